//! Error types for the cropthumb pipeline.
//!
//! Errors are split by severity. [`CropthumbError`] aborts the whole run, while
//! [`PipelineError`] describes a single file that could not be turned into a
//! thumbnail and is recorded before the run moves on.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type. Any of these terminates the run.
#[derive(Error, Debug)]
pub enum CropthumbError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The directory walk failed (missing root, unreadable directory, ...)
    #[error("Walk error under {}: {source}", display_opt_path(path))]
    Walk {
        path: Option<PathBuf>,
        #[source]
        source: walkdir::Error,
    },
}

impl From<walkdir::Error> for CropthumbError {
    fn from(source: walkdir::Error) -> Self {
        Self::Walk {
            path: source.path().map(|p| p.to_path_buf()),
            source,
        }
    }
}

fn display_opt_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is unset or empty
    #[error("{var} is not set or empty")]
    MissingEnv { var: &'static str },

    /// An optional environment variable holds a value we cannot interpret
    #[error("Invalid value {value:?} for {var}: expected {expected}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-file pipeline errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Opening, reading or decoding the source failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Crop rectangle does not fit and the crop policy is `skip`
    #[error(
        "Image too small: {path} ({width}x{height}, crop needs {required_width}x{required_height})"
    )]
    ImageTooSmall {
        path: PathBuf,
        width: u32,
        height: u32,
        required_width: u32,
        required_height: u32,
    },

    /// Crop rectangle has no overlap with the image
    #[error("Empty crop region for {path} ({width}x{height})")]
    EmptyCrop {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    /// No thumbnail codec for this extension
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// Encoding the cropped view failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Creating or writing the thumbnail file failed
    #[error("Write error for {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for fatal-tier results.
pub type Result<T> = std::result::Result<T, CropthumbError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
