use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot create output directory {path}: {message}")]
    OutputDir { path: PathBuf, message: String },
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("write task for {path} did not finish: {message}")]
    Aborted { path: PathBuf, message: String },
}

/// Create `dir` and any missing parents. Succeeds if it already is a directory.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let fail = |message: String| PersistError::OutputDir {
        path: dir.to_path_buf(),
        message,
    };
    if dir.exists() && !dir.is_dir() {
        return Err(fail("path exists and is not a directory".into()));
    }
    fs::create_dir_all(dir).map_err(|e| fail(e.to_string()))
}

/// Writes `{dir}/{stem}.txt`, replacing whatever was there.
///
/// Content goes to a temp file in the same directory first and is renamed
/// into place, so a failed write never leaves a truncated target behind.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    pub fn write(&self, file_name: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.path_for(file_name);
        let io_err = |source: io::Error| PersistError::Io {
            path: target.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(content.as_bytes()).map_err(io_err)?;
        tmp.as_file_mut().sync_all().map_err(io_err)?;

        if target.is_dir() {
            return Err(io_err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "a directory occupies the output path",
            )));
        }
        tmp.persist(&target).map_err(|e| io_err(e.error))?;
        Ok(target)
    }

    /// [`OutputWriter::write`] on tokio's blocking pool, for use from worker tasks.
    pub async fn write_async(&self, file_name: String, content: String) -> Result<PathBuf, PersistError> {
        let writer = self.clone();
        let target = self.path_for(&file_name);
        tokio::task::spawn_blocking(move || writer.write(&file_name, &content))
            .await
            .map_err(|err| PersistError::Aborted {
                path: target,
                message: err.to_string(),
            })?
    }
}
