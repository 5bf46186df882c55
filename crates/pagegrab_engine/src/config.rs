use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::{SelectorError, SelectorSet};
use crate::fetch::FetchSettings;

pub const DEFAULT_HEADING_SELECTOR: &str = "#chapter-heading";
pub const DEFAULT_CONTENT_SELECTOR: &str = "body > div.wrap > div > div.site-content > div > div > div > div > div > div > div.c-blog-post > div.entry-content > div > div > div.reading-content > div.text-left > p";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_URLS_FILE: &str = "urls.json";
pub const DEFAULT_WORKERS: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// Settings for one scrape run. Every field has a default, so a config file
/// only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub heading_selector: String,
    pub content_selector: String,
    pub output_dir: PathBuf,
    pub urls_file: PathBuf,
    pub workers: usize,
    pub log_file: Option<PathBuf>,
    pub fetch: FetchConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            heading_selector: DEFAULT_HEADING_SELECTOR.to_string(),
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            urls_file: PathBuf::from(DEFAULT_URLS_FILE),
            workers: DEFAULT_WORKERS,
            log_file: None,
            fetch: FetchConfig::default(),
        }
    }
}

/// Serializable mirror of [`FetchSettings`]. Timeouts are off unless set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            connect_timeout_secs: settings.connect_timeout.map(|d| d.as_secs()),
            request_timeout_secs: settings.request_timeout.map(|d| d.as_secs()),
            redirect_limit: settings.redirect_limit,
            max_bytes: settings.max_bytes,
            user_agent: settings.user_agent,
        }
    }
}

impl FetchConfig {
    pub fn settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
            user_agent: self.user_agent.clone(),
            ..FetchSettings::default()
        }
    }
}

impl ScrapeConfig {
    /// Load `path`, or return the defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        self.selectors()?;
        Ok(())
    }

    pub fn selectors(&self) -> Result<SelectorSet, SelectorError> {
        SelectorSet::parse(&self.heading_selector, &self.content_selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ScrapeConfig::load_or_default(&temp.path().join("absent.json")).unwrap();
        assert_eq!(config, ScrapeConfig::default());
        assert_eq!(config.workers, 10);
        assert_eq!(config.fetch.request_timeout_secs, None);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pagegrab.json");
        fs::write(
            &path,
            r#"{ "workers": 3, "heading_selector": "h1", "fetch": { "request_timeout_secs": 20 } }"#,
        )
        .unwrap();

        let config = ScrapeConfig::load_or_default(&path).unwrap();
        assert_eq!(config.workers, 3);
        assert_eq!(config.heading_selector, "h1");
        assert_eq!(config.content_selector, DEFAULT_CONTENT_SELECTOR);
        assert_eq!(
            config.fetch.settings().request_timeout,
            Some(Duration::from_secs(20))
        );
        assert_eq!(config.fetch.redirect_limit, FetchSettings::default().redirect_limit);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pagegrab.json");
        fs::write(&path, r#"{ "workers": 0 }"#).unwrap();
        assert!(matches!(
            ScrapeConfig::load(&path),
            Err(ConfigError::NoWorkers)
        ));
    }

    #[test]
    fn bad_selector_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pagegrab.json");
        fs::write(&path, r#"{ "content_selector": "p >>> [" }"#).unwrap();
        assert!(matches!(
            ScrapeConfig::load(&path),
            Err(ConfigError::Selector(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pagegrab.json");
        fs::write(&path, "{ workers: ").unwrap();
        assert!(matches!(
            ScrapeConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn default_selectors_parse() {
        ScrapeConfig::default().selectors().unwrap();
    }
}
