/// User configuration
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/photo-library/config.json
/// - macOS: ~/Library/Application Support/photo-library/config.json
/// - Windows: %APPDATA%\photo-library\config.json
///
/// A missing file means defaults; missing keys take their default value.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::preview::thumbnail::THUMBNAIL_SIZE;

const DEFAULT_TILE_SIZE: f32 = 180.0;
/// Smallest tile that still fits the name row and remove button
const MIN_TILE_SIZE: f32 = 48.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Start with case-sensitive filtering
    pub match_case: bool,
    /// Bounding size of generated thumbnails in pixels
    pub thumbnail_size: u32,
    /// Width and height of a gallery tile in logical pixels
    pub tile_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_case: true,
            thumbnail_size: THUMBNAIL_SIZE,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl Config {
    /// Get the path where the config file is expected
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("photo-library");
        path.push("config.json");
        Some(path)
    }

    /// Load from `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the user's config, logging and using defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::warn!("could not determine config directory, using defaults");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), ?config, "loaded config");
                config
            }
            Err(err) => {
                tracing::warn!(error = %err, "using default config");
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Clamp sizes into a range the layout can use
    pub fn validated(mut self) -> Self {
        self.thumbnail_size = self.thumbnail_size.max(1);
        self.tile_size = if self.tile_size.is_finite() {
            self.tile_size.max(MIN_TILE_SIZE)
        } else {
            DEFAULT_TILE_SIZE
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.match_case);
        assert_eq!(config.thumbnail_size, 256);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config = Config::from_json(r#"{ "match_case": false, "extra": 1 }"#).unwrap();
        assert!(!config.match_case);
        assert_eq!(config.thumbnail_size, THUMBNAIL_SIZE);
        assert_eq!(config.tile_size, 180.0);
    }

    #[test]
    fn test_sizes_are_clamped() {
        let config = Config::from_json(r#"{ "tile_size": -20.0, "thumbnail_size": 0 }"#).unwrap();
        assert_eq!(config.tile_size, MIN_TILE_SIZE);
        assert_eq!(config.thumbnail_size, 1);

        let config = Config {
            tile_size: f32::NAN,
            ..Config::default()
        }
        .validated();
        assert_eq!(config.tile_size, DEFAULT_TILE_SIZE);

        let config = Config {
            tile_size: f32::INFINITY,
            ..Config::default()
        }
        .validated();
        assert_eq!(config.tile_size, DEFAULT_TILE_SIZE);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "thumbnail_size": 128, "tile_size": 120.0 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();

        assert!(config.match_case);
        assert_eq!(config.thumbnail_size, 128);
        assert_eq!(config.tile_size, 120.0);
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
