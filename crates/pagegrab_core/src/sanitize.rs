/// Characters that are not allowed in a file stem on common filesystems.
pub const RESERVED_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Stem used when a title sanitizes to nothing.
pub const UNTITLED_STEM: &str = "untitled";

/// Map a raw title to a file stem: every reserved character becomes `_`,
/// then outer whitespace is trimmed. Total and idempotent.
pub fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { '_' } else { c })
        .collect();
    replaced.trim().to_string()
}

/// `{stem}.txt` for the given raw title, falling back to `untitled.txt`.
pub fn output_file_name(title: &str) -> String {
    let stem = sanitize_title(title);
    if stem.is_empty() {
        format!("{UNTITLED_STEM}.txt")
    } else {
        format!("{stem}.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::{output_file_name, sanitize_title};

    #[test]
    fn inner_spacing_is_preserved() {
        assert_eq!(sanitize_title("  a  b  "), "a  b");
    }

    #[test]
    fn whitespace_only_title_uses_fallback() {
        assert_eq!(output_file_name(" \t\n "), "untitled.txt");
    }
}
