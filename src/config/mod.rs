//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `REVIEW_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_ANNOTATIONS_DIR, DEFAULT_EXTENSION, DEFAULT_PAGE_SIZE, DEFAULT_ROW_WIDTH,
};
use crate::pager::Pager;
use crate::storage::FsRecordStore;

/// Review tool configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `REVIEW_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the record sets. Default: `./annotations`.
    pub annotations_dir: PathBuf,

    /// Records per page. Default: `10`.
    pub page_size: NonZeroUsize,

    /// Records per rendered row. Default: `3`.
    pub row_width: NonZeroUsize,

    /// Extension identifying record set files. Default: `json`.
    pub extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            annotations_dir: PathBuf::from(DEFAULT_ANNOTATIONS_DIR),
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            row_width: NonZeroUsize::new(DEFAULT_ROW_WIDTH).unwrap_or(NonZeroUsize::MIN),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Config {
    const ENV_ANNOTATIONS_DIR: &'static str = "REVIEW_ANNOTATIONS_DIR";
    const ENV_PAGE_SIZE: &'static str = "REVIEW_PAGE_SIZE";
    const ENV_ROW_WIDTH: &'static str = "REVIEW_ROW_WIDTH";
    const ENV_EXTENSION: &'static str = "REVIEW_EXTENSION";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let annotations_dir =
            Self::parse_path_from_env(Self::ENV_ANNOTATIONS_DIR, defaults.annotations_dir);
        let page_size = Self::parse_count_from_env(Self::ENV_PAGE_SIZE, defaults.page_size)?;
        let row_width = Self::parse_count_from_env(Self::ENV_ROW_WIDTH, defaults.row_width)?;
        let extension = Self::parse_extension_from_env(defaults.extension)?;

        Ok(Self {
            annotations_dir,
            page_size,
            row_width,
            extension,
        })
    }

    /// Validates paths (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.annotations_dir.exists() && !self.annotations_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.annotations_dir.clone(),
            });
        }
        Ok(())
    }

    pub fn pager(&self) -> Pager {
        Pager::new(self.page_size)
    }

    /// Record store over [`Config::annotations_dir`].
    pub fn record_store(&self) -> FsRecordStore {
        FsRecordStore::with_extension(self.annotations_dir.clone(), self.extension.clone())
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_count_from_env(
        var_name: &'static str,
        default: NonZeroUsize,
    ) -> Result<NonZeroUsize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let count: usize =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::InvalidNumber {
                            name: var_name,
                            value: value.clone(),
                            source: e,
                        })?;

                NonZeroUsize::new(count).ok_or(ConfigError::ZeroValue { name: var_name })
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_extension_from_env(default: String) -> Result<String, ConfigError> {
        match env::var(Self::ENV_EXTENSION) {
            Ok(value) => {
                let ext = value.trim().trim_start_matches('.');
                if ext.is_empty() {
                    return Err(ConfigError::EmptyExtension);
                }
                Ok(ext.to_string())
            }
            Err(_) => Ok(default),
        }
    }
}
