//! Cropthumb Core - batch center-crop thumbnails.
//!
//! Walks a directory tree, decodes every JPEG, PNG and GIF it finds, cuts a
//! fixed-size box anchored at the image midpoint and writes it into a
//! destination directory as `thumb_<name>`.
//!
//! # Architecture
//!
//! A single synchronous pass; each file is finished before the next one is
//! pulled from the walk:
//!
//! ```text
//! Walk → Filter → Decode → Crop (view) → Encode → Write
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use cropthumb_core::{Config, ImageProcessor};
//!
//! fn main() -> cropthumb_core::Result<()> {
//!     let config = Config::from_env()?;
//!     let processor = ImageProcessor::new(&config);
//!
//!     let summary = processor.run(|_, _| {})?;
//!     println!("{} thumbnails, {} failed", summary.succeeded, summary.failed.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::{Config, CropPolicy};
pub use error::{ConfigError, CropthumbError, PipelineError, PipelineResult, Result};
pub use pipeline::{DiscoveredFile, ImageProcessor};
pub use types::{FailedFile, RunSummary, ThumbnailFile};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
