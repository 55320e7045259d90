//! Resolver configuration loader describing where activity images are served from.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::asset_url::{APPLICATION_ASSET_BASE, FALLBACK_IMAGE_URL, SPOTIFY_IMAGE_BASE};

/// Default configuration file name searched for by [`ResolverConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "activity.config.json";

/// Image locations used when resolving activity asset descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Placeholder image returned whenever no image can be derived.
    pub fallback_image_url: String,
    /// Base URL prefixed to Spotify image identifiers.
    pub spotify_image_base: String,
    /// Base URL for first-party application assets.
    pub application_asset_base: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback_image_url: FALLBACK_IMAGE_URL.into(),
            spotify_image_base: SPOTIFY_IMAGE_BASE.into(),
            application_asset_base: APPLICATION_ASSET_BASE.into(),
        }
    }
}

/// Errors that can occur while loading an explicit configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },
    /// Failed to parse the JSON configuration file.
    Parse {
        /// Path that caused the error.
        path: PathBuf,
        /// Source parse error.
        source: serde_json::Error,
    },
}

impl ResolverConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// A missing file silently yields the defaults. A file that cannot be read or parsed is
    /// reported as a warning and the defaults are used as well.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if !candidate.exists() {
            return Self::default();
        }

        Self::load_from_path(&candidate).unwrap_or_else(|err| {
            warn!(error = %err, "ignoring resolver configuration");
            Self::default()
        })
    }

    /// Read configuration from a specific JSON file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
