//! Logger initialization for the pagegrab binaries.
//!
//! Logs always go to the terminal; a file sink is added when one is configured.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the terminal.
    Terminal,
    /// Write to the terminal and the given file.
    Both(PathBuf),
}

impl LogDestination {
    pub fn from_log_file(log_file: Option<&Path>) -> Self {
        match log_file {
            Some(path) => LogDestination::Both(path.to_path_buf()),
            None => LogDestination::Terminal,
        }
    }
}

/// Install the global logger. Calling it twice keeps the first logger.
pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::Both(path) => {
            let mut loggers = vec![terminal_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(&path, level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn create_file_logger(path: &Path, level: LevelFilter, config: Config) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogDestination;
    use std::path::{Path, PathBuf};

    #[test]
    fn configured_log_file_logs_to_both() {
        assert_eq!(LogDestination::from_log_file(None), LogDestination::Terminal);
        assert_eq!(
            LogDestination::from_log_file(Some(Path::new("run.log"))),
            LogDestination::Both(PathBuf::from("run.log"))
        );
    }
}
