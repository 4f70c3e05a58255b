//! Sub-configuration structs and their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Thumbnail box width in pixels.
pub const THUMB_WIDTH: u32 = 300;

/// Thumbnail box height in pixels.
pub const THUMB_HEIGHT: u32 = 300;

/// JPEG quality used for thumbnails.
pub const THUMB_QUALITY: u8 = 95;

/// What to do when the crop rectangle runs past the image edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropPolicy {
    /// Intersect the rectangle with the image bounds; the thumbnail may be
    /// smaller than the box.
    #[default]
    Clamp,
    /// Report the image as too small and write nothing.
    Skip,
}

impl FromStr for CropPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "skip" => Ok(Self::Skip),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CropPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropPolicy::Clamp => write!(f, "clamp"),
            CropPolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Thumbnail geometry and encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Crop box width
    pub width: u32,

    /// Crop box height
    pub height: u32,

    /// JPEG quality (1-100)
    pub quality: u8,

    /// Out-of-bounds handling
    pub crop_policy: CropPolicy,

    /// Prefix prepended to the source basename
    pub file_prefix: String,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: THUMB_WIDTH,
            height: THUMB_HEIGHT,
            quality: THUMB_QUALITY,
            crop_policy: CropPolicy::Clamp,
            file_prefix: "thumb_".to_string(),
        }
    }
}

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Accepted input extensions, lowercase without the dot
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "gif".to_string(),
            ],
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_defaults() {
        let config = ThumbnailConfig::default();
        assert_eq!(config.width, 300);
        assert_eq!(config.height, 300);
        assert_eq!(config.quality, 95);
        assert_eq!(config.crop_policy, CropPolicy::Clamp);
        assert_eq!(config.file_prefix, "thumb_");
    }

    #[test]
    fn test_crop_policy_parse() {
        assert_eq!("clamp".parse::<CropPolicy>(), Ok(CropPolicy::Clamp));
        assert_eq!(" SKIP ".parse::<CropPolicy>(), Ok(CropPolicy::Skip));
        assert!("stretch".parse::<CropPolicy>().is_err());
    }

    #[test]
    fn test_supported_formats_default() {
        let config = ProcessingConfig::default();
        assert_eq!(config.supported_formats, vec!["jpg", "jpeg", "png", "gif"]);
    }
}
