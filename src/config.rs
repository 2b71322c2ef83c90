//! Configuration for the CLI.
//!
//! Settings come from a TOML file, then environment overrides:
//!
//! ```toml
//! data_dir = "/home/me/sqa_data"
//! log_level = "info"
//! ```
//!
//! File lookup order: `$SQA_CONFIG`, `./sqa.toml`, `<config dir>/sqa/config.toml`.
//! Environment overrides: `SQA_DATA_DIR`, `SQA_LOG`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result};

pub const CONFIG_ENV: &str = "SQA_CONFIG";
pub const DATA_DIR_ENV: &str = "SQA_DATA_DIR";
pub const LOG_ENV: &str = "SQA_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding cached price files
    pub data_dir: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: "warn".to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sqa_data")
}

impl Config {
    /// Parse a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |message: String| CliError::Config {
            path: path.to_path_buf(),
            message,
        };
        let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        toml::from_str(&content).map_err(|e| invalid(e.to_string()))
    }

    /// Load from the first config file found, then apply environment overrides.
    ///
    /// A missing file means defaults. A file that cannot be read or parsed
    /// also falls back to defaults, and the error is returned alongside for
    /// the caller to report.
    pub fn load_or_default() -> (Self, Option<CliError>) {
        Self::layered(Self::locate().as_deref(), |key| std::env::var(key).ok())
    }

    fn layered<F>(path: Option<&Path>, lookup: F) -> (Self, Option<CliError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut config, error) = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                match Self::load(path) {
                    Ok(config) => (config, None),
                    Err(e) => (Self::default(), Some(e)),
                }
            }
            None => (Self::default(), None),
        };
        config.apply_env(lookup);
        (config, error)
    }

    fn locate() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let local = PathBuf::from("sqa.toml");
        if local.exists() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| dir.join("sqa").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Apply overrides from `lookup` (the process environment in production)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.data_dir.ends_with("sqa_data"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("data_dir = \"/tmp/prices\"").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/prices"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(DATA_DIR_ENV, "/data"), (LOG_ENV, "debug")].into();
        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_blank_env_ignored() {
        let mut config = Config::default();
        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unparseable_file_is_config_error() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "data_dir = [").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_missing_file_error_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, CliError::Config { path: ref p, .. } if *p == path));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_broken_file_falls_back_to_env_and_defaults() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "data_dir = [").unwrap();

        let (config, error) = Config::layered(Some(file.path()), |key| {
            (key == DATA_DIR_ENV).then(|| "/env/data".to_string())
        });
        assert!(matches!(error, Some(CliError::Config { .. })));
        assert_eq!(config.data_dir, PathBuf::from("/env/data"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_layered_reads_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "log_level = \"debug\"").unwrap();

        let (config, error) = Config::layered(Some(file.path()), |_| None);
        assert!(error.is_none());
        assert_eq!(config.log_level, "debug");
    }
}
