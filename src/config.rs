//! Runtime configuration for the command-line front end.
//!
//! Resolution order: `config.toml` > environment (`.env` honoured) > defaults.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_DATA_PATH: &str = "data/study_set.json";

pub const DATA_PATH_ENV: &str = "STUDY_REVIEW_DATA";
pub const STRICT_RATINGS_ENV: &str = "STUDY_REVIEW_STRICT";

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewConfig {
    /// JSON snapshot holding the study set and its review states
    pub data_path: PathBuf,
    /// Reject raw ratings outside 0-5 before they reach the scheduler
    pub strict_ratings: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            strict_ratings: true,
        }
    }
}

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    review: Option<ReviewSection>,
}

#[derive(Debug, Default, Deserialize)]
struct ReviewSection {
    data_path: Option<String>,
    strict_ratings: Option<bool>,
}

impl ReviewConfig {
    /// Loads `config.toml` from the working directory, falling back to the
    /// environment and then to defaults for anything it leaves unset.
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        match Self::load_from(Path::new(CONFIG_FILE)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", CONFIG_FILE, e);
                Self::from_env(ConfigFile::default())
            }
        }
    }

    /// Like [`ReviewConfig::load`] but for an explicit file. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::from_env(ConfigFile::default()));
        }
        let contents = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&contents)?;
        tracing::info!("Using config from {}", path.display());
        Ok(Self::from_env(file))
    }

    /// Parses config.toml contents without consulting the environment.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        let section = file.review.unwrap_or_default();
        let defaults = Self::default();
        Ok(Self {
            data_path: section
                .data_path
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            strict_ratings: section.strict_ratings.unwrap_or(defaults.strict_ratings),
        })
    }

    fn from_env(file: ConfigFile) -> Self {
        let section = file.review.unwrap_or_default();

        let data_path = match section.data_path {
            Some(path) => PathBuf::from(path),
            None => match std::env::var(DATA_PATH_ENV) {
                Ok(path) => {
                    tracing::info!("Using data path from {} env: {}", DATA_PATH_ENV, path);
                    PathBuf::from(path)
                }
                Err(_) => PathBuf::from(DEFAULT_DATA_PATH),
            },
        };

        let strict_ratings = section.strict_ratings.unwrap_or_else(|| {
            std::env::var(STRICT_RATINGS_ENV)
                .ok()
                .and_then(|value| parse_flag(&value))
                .unwrap_or(true)
        });

        Self {
            data_path,
            strict_ratings,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
