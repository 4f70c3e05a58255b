//! Configuration management for cropthumb.
//!
//! There is no config file. The two directories come from `IMG_DIR_PATH` and
//! `THUMB_DIR_PATH`, a handful of optional variables tune behavior, and
//! everything else keeps the `Default` values of the sub-configs.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::Serialize;
use std::path::PathBuf;

/// Environment variable holding the source directory.
pub const IMG_DIR_ENV: &str = "IMG_DIR_PATH";

/// Environment variable holding the destination directory.
pub const THUMB_DIR_ENV: &str = "THUMB_DIR_PATH";

/// Optional override for [`CropPolicy`].
pub const CROP_POLICY_ENV: &str = "THUMB_CROP_POLICY";

/// Optional override for [`LoggingConfig::level`].
pub const LOG_LEVEL_ENV: &str = "THUMB_LOG_LEVEL";

/// Optional override for [`LoggingConfig::format`].
pub const LOG_FORMAT_ENV: &str = "THUMB_LOG_FORMAT";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration, built once at startup and passed by reference.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory walked for source images
    pub source_dir: PathBuf,

    /// Directory thumbnails are written into
    pub dest_dir: PathBuf,

    /// Thumbnail settings
    pub thumbnail: ThumbnailConfig,

    /// Processing settings
    pub processing: ProcessingConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Build a configuration with default settings for the given directories.
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            thumbnail: ThumbnailConfig::default(),
            processing: ProcessingConfig::default(),
            limits: LimitsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Fails if either directory variable is unset or empty, or if an
    /// optional variable holds a value we cannot parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_dir = required(&lookup, IMG_DIR_ENV)?;
        let dest_dir = required(&lookup, THUMB_DIR_ENV)?;
        let mut config = Self::new(source_dir, dest_dir);

        if let Some(value) = optional(&lookup, CROP_POLICY_ENV) {
            config.thumbnail.crop_policy =
                value.parse().map_err(|_| ConfigError::InvalidEnv {
                    var: CROP_POLICY_ENV,
                    value: value.clone(),
                    expected: "clamp or skip",
                })?;
        }

        if let Some(value) = optional(&lookup, LOG_LEVEL_ENV) {
            let level = value.to_ascii_lowercase();
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::InvalidEnv {
                    var: LOG_LEVEL_ENV,
                    value,
                    expected: "trace, debug, info, warn or error",
                });
            }
            config.logging.level = level;
        }

        if let Some(value) = optional(&lookup, LOG_FORMAT_ENV) {
            let format = value.to_ascii_lowercase();
            if format != "pretty" && format != "json" {
                return Err(ConfigError::InvalidEnv {
                    var: LOG_FORMAT_ENV,
                    value,
                    expected: "pretty or json",
                });
            }
            config.logging.format = format;
        }

        config.validate()?;
        Ok(config)
    }

    /// Serialize the effective config to a pretty JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Err(ConfigError::MissingEnv { var }),
    }
}

fn optional<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_both_dirs() {
        let config = Config::from_lookup(lookup_from(&[
            ("IMG_DIR_PATH", "/data/images"),
            ("THUMB_DIR_PATH", "/data/thumbs"),
        ]))
        .unwrap();

        assert_eq!(config.source_dir, PathBuf::from("/data/images"));
        assert_eq!(config.dest_dir, PathBuf::from("/data/thumbs"));
        assert_eq!(config.thumbnail.width, 300);
        assert_eq!(config.thumbnail.crop_policy, CropPolicy::Clamp);
    }

    #[test]
    fn test_missing_source_dir() {
        let err = Config::from_lookup(lookup_from(&[("THUMB_DIR_PATH", "/data/thumbs")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingEnv {
                var: "IMG_DIR_PATH"
            }
        ));
    }

    #[test]
    fn test_empty_dest_dir_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[
            ("IMG_DIR_PATH", "/data/images"),
            ("THUMB_DIR_PATH", ""),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingEnv {
                var: "THUMB_DIR_PATH"
            }
        ));
    }

    #[test]
    fn test_crop_policy_override() {
        let config = Config::from_lookup(lookup_from(&[
            ("IMG_DIR_PATH", "in"),
            ("THUMB_DIR_PATH", "out"),
            ("THUMB_CROP_POLICY", "skip"),
        ]))
        .unwrap();
        assert_eq!(config.thumbnail.crop_policy, CropPolicy::Skip);
    }

    #[test]
    fn test_invalid_crop_policy() {
        let err = Config::from_lookup(lookup_from(&[
            ("IMG_DIR_PATH", "in"),
            ("THUMB_DIR_PATH", "out"),
            ("THUMB_CROP_POLICY", "stretch"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("THUMB_CROP_POLICY"));
    }

    #[test]
    fn test_log_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("IMG_DIR_PATH", "in"),
            ("THUMB_DIR_PATH", "out"),
            ("THUMB_LOG_LEVEL", "DEBUG"),
            ("THUMB_LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_log_level() {
        let err = Config::from_lookup(lookup_from(&[
            ("IMG_DIR_PATH", "in"),
            ("THUMB_DIR_PATH", "out"),
            ("THUMB_LOG_LEVEL", "verbose"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                var: "THUMB_LOG_LEVEL",
                ..
            }
        ));
        assert!(err.to_string().contains("\"verbose\""));
    }

    #[test]
    fn test_invalid_log_format() {
        let err = Config::from_lookup(lookup_from(&[
            ("IMG_DIR_PATH", "in"),
            ("THUMB_DIR_PATH", "out"),
            ("THUMB_LOG_FORMAT", "xml"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("THUMB_LOG_FORMAT"));
    }

    #[test]
    fn test_config_to_json() {
        let config = Config::new("in", "out");
        let json = config.to_json().unwrap();
        assert!(json.contains("\"source_dir\""));
        assert!(json.contains("\"crop_policy\": \"clamp\""));
    }
}
