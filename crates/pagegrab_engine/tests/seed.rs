use std::fs;

use pagegrab_engine::{load_url_batch, save_url_batch, SeedError};
use tempfile::TempDir;

#[test]
fn loads_array_of_strings_in_order() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("urls.json");
    fs::write(&path, r#"["https://a.example/1", "https://b.example/2"]"#).unwrap();

    let urls = load_url_batch(&path).unwrap();
    assert_eq!(urls, vec!["https://a.example/1", "https://b.example/2"]);
}

#[test]
fn empty_array_is_a_valid_batch() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("urls.json");
    fs::write(&path, "[]").unwrap();
    assert!(load_url_batch(&path).unwrap().is_empty());
}

#[test]
fn missing_file_is_a_read_error() {
    let temp = TempDir::new().unwrap();
    let err = load_url_batch(&temp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SeedError::Read { .. }));
}

#[test]
fn non_string_entries_are_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("urls.json");
    fs::write(&path, r#"["https://a.example", 42]"#).unwrap();
    assert!(matches!(load_url_batch(&path), Err(SeedError::Parse { .. })));

    fs::write(&path, r#"{"urls": []}"#).unwrap();
    assert!(matches!(load_url_batch(&path), Err(SeedError::Parse { .. })));
}

#[test]
fn save_writes_indented_json_that_loads_back() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("urls.json");
    let urls = vec!["https://a.example".to_string(), "https://b.example".to_string()];

    save_url_batch(&path, &urls).unwrap();
    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(raw, "[\n  \"https://a.example\",\n  \"https://b.example\"\n]\n");
    assert_eq!(load_url_batch(&path).unwrap(), urls);
}
