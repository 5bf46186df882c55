use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("error reading URLs from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not a JSON array of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("error writing URLs to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the URL batch: a JSON array of strings. An empty array is valid.
pub fn load_url_batch(path: &Path) -> Result<Vec<String>, SeedError> {
    let raw = fs::read(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `urls` as a two-space indented JSON array with a trailing newline.
pub fn save_url_batch(path: &Path, urls: &[String]) -> Result<(), SeedError> {
    let write_err = |source: io::Error| SeedError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, urls).map_err(|e| write_err(e.into()))?;
    out.write_all(b"\n").map_err(write_err)?;
    out.flush().map_err(write_err)
}
