//! Pipeline orchestration - wires together all processing stages.

use image::GenericImageView;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult, Result};
use crate::types::{RunSummary, ThumbnailFile};

use super::crop::Cropper;
use super::decode::{format_to_string, ImageDecoder};
use super::discovery::{DiscoveredFile, FileDiscovery};
use super::thumbnail::{ThumbnailEncoder, ThumbnailFormat};

/// The main image processor that orchestrates the full pipeline.
pub struct ImageProcessor {
    source_dir: PathBuf,
    decoder: ImageDecoder,
    cropper: Cropper,
    encoder: ThumbnailEncoder,
    discovery: FileDiscovery,
}

impl ImageProcessor {
    /// Create a new image processor with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            source_dir: config.source_dir.clone(),
            decoder: ImageDecoder::new(config.limits.clone()),
            cropper: Cropper::new(&config.thumbnail),
            encoder: ThumbnailEncoder::new(config.thumbnail.clone(), &config.dest_dir),
            discovery: FileDiscovery::new(config.processing.clone()).excluding(&config.dest_dir),
        }
    }

    /// Decode, crop, encode and write one file.
    pub fn process(&self, file: &DiscoveredFile) -> PipelineResult<ThumbnailFile> {
        let start = Instant::now();
        let path = file.path.as_path();
        tracing::debug!("Processing: {:?}", path);

        // Pick the codec up front so unsupported extensions never reach decode
        let format = ThumbnailFormat::from_extension(&file.extension).ok_or_else(|| {
            PipelineError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: file.extension.clone(),
            }
        })?;

        let decode_start = Instant::now();
        let decoded = self.decoder.decode(path)?;
        tracing::trace!("  Decode: {:?}", decode_start.elapsed());

        let view = self.cropper.crop(&decoded.image, path)?;
        let (width, height) = (view.width(), view.height());

        let encode_start = Instant::now();
        let bytes = self.encoder.encode(&view, format, path)?;
        tracing::trace!("  Encode: {:?}", encode_start.elapsed());

        let output = self.encoder.output_path(path);
        self.encoder.write(&bytes, &output)?;

        tracing::debug!(
            "Wrote {:?} in {:?} ({}x{} from {}x{})",
            output,
            start.elapsed(),
            width,
            height,
            decoded.width,
            decoded.height
        );

        Ok(ThumbnailFile {
            source: path.to_path_buf(),
            output,
            source_format: format_to_string(decoded.format),
            format: format.as_str().to_string(),
            width,
            height,
            bytes: bytes.len() as u64,
        })
    }

    /// Walk the source directory and process every candidate in order.
    ///
    /// `observer` is called after each file with its outcome. Per-file
    /// failures are logged and collected; a walk error stops the run.
    pub fn run<F>(&self, mut observer: F) -> Result<RunSummary>
    where
        F: FnMut(&DiscoveredFile, &PipelineResult<ThumbnailFile>),
    {
        let start = Instant::now();
        let mut summary = RunSummary::default();
        let mut written = HashSet::new();

        for entry in self.discovery.walk(&self.source_dir) {
            let file = entry?;
            let outcome = self.process(&file);

            match &outcome {
                Ok(thumbnail) => {
                    if !written.insert(thumbnail.output.clone()) {
                        tracing::debug!(
                            "{:?} overwrote an earlier thumbnail with the same name",
                            thumbnail.output
                        );
                    }
                    summary.record_success(thumbnail);
                }
                Err(e) => {
                    tracing::warn!("Error processing {:?}: {}", file.path, e);
                    summary.record_failure(&file.path, e);
                }
            }

            observer(&file, &outcome);
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        Ok(summary)
    }
}
