//! Thumbnail encoding and output naming.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, SubImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::config::ThumbnailConfig;
use crate::error::PipelineError;

/// Output codec, chosen from the source file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailFormat {
    Jpeg,
    Png,
    Gif,
}

impl ThumbnailFormat {
    /// Map a lowercase extension to an output codec.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

/// Encodes cropped views and writes them into the destination directory.
pub struct ThumbnailEncoder {
    config: ThumbnailConfig,
    dest_dir: PathBuf,
}

impl ThumbnailEncoder {
    /// Create a new encoder writing into `dest_dir`.
    pub fn new(config: ThumbnailConfig, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            dest_dir: dest_dir.into(),
        }
    }

    /// Destination for the thumbnail of `source`: `<dest>/thumb_<basename>`.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let mut name = std::ffi::OsString::from(&self.config.file_prefix);
        name.push(source.file_name().unwrap_or(source.as_os_str()));
        self.dest_dir.join(name)
    }

    /// Encode a cropped view to bytes in the given format.
    ///
    /// JPEG output drops any alpha channel and uses the configured quality.
    pub fn encode(
        &self,
        view: &SubImage<&DynamicImage>,
        format: ThumbnailFormat,
        path: &Path,
    ) -> Result<Vec<u8>, PipelineError> {
        let cropped = DynamicImage::ImageRgba8(view.to_image());
        let mut buffer = Vec::new();

        let result = match format {
            ThumbnailFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut buffer, self.config.quality);
                DynamicImage::ImageRgb8(cropped.to_rgb8()).write_with_encoder(encoder)
            }
            ThumbnailFormat::Png => cropped.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png),
            ThumbnailFormat::Gif => cropped.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Gif),
        };

        result.map_err(|e| PipelineError::Encode {
            path: path.to_path_buf(),
            message: format!("{} encoding failed: {}", format.as_str(), e),
        })?;

        Ok(buffer)
    }

    /// Create (or truncate) `out_path` and write the encoded thumbnail.
    pub fn write(&self, bytes: &[u8], out_path: &Path) -> Result<(), PipelineError> {
        std::fs::write(out_path, bytes).map_err(|source| PipelineError::Write {
            path: out_path.to_path_buf(),
            source,
        })
    }
}
