//! Core data types produced by a thumbnail run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A thumbnail written to the destination directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailFile {
    /// Source image the thumbnail was cut from
    pub source: PathBuf,

    /// Where the thumbnail was written
    pub output: PathBuf,

    /// Format detected from the source content ("jpeg", "png", "gif")
    pub source_format: String,

    /// Output codec, chosen by the source extension
    pub format: String,

    /// Thumbnail width in pixels
    pub width: u32,

    /// Thumbnail height in pixels
    pub height: u32,

    /// Encoded size in bytes
    pub bytes: u64,
}

/// A candidate file that produced no thumbnail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Aggregate outcome of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Thumbnails written
    pub succeeded: u64,

    /// Total bytes written
    pub bytes_written: u64,

    /// Candidates that failed, in walk order
    pub failed: Vec<FailedFile>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn record_success(&mut self, thumbnail: &ThumbnailFile) {
        self.succeeded += 1;
        self.bytes_written += thumbnail.bytes;
    }

    pub fn record_failure(&mut self, path: &Path, error: impl ToString) {
        self.failed.push(FailedFile {
            path: path.to_path_buf(),
            error: error.to_string(),
        });
    }

    /// Number of candidates seen.
    pub fn total(&self) -> u64 {
        self.succeeded + self.failed.len() as u64
    }

    /// True if every candidate produced a thumbnail.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
