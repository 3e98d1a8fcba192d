use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::AntCheckError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub scan: ScanConfig,
    pub ant: AntConfig,
    pub tmdb: TmdbConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Folders scanned recursively for film files.
    pub input_folders: Vec<String>,
    /// Folder that receives the result table.
    pub output_folder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntConfig {
    pub api_key: String,
    pub base_url: String,
    /// Minimum seconds between catalog searches.
    pub search_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// Absent means the secondary title lookup is skipped.
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_interval_ms: u64,
    /// Minimum normalized-title similarity (0.0-1.0) to accept a fuzzy hit.
    pub fuzzy_threshold: f64,
    /// Years either side of the parsed year still considered a match.
    pub year_window: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Release groups that must never be uploaded, matched case-insensitively.
    pub banned_groups: Vec<String>,
}

impl AppConfig {
    /// Load config: the user file if it exists, else built-in defaults.
    pub fn load() -> Result<Self, AntCheckError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            toml::from_str(DEFAULT_CONFIG).map_err(|e| AntCheckError::Config(e.to_string()))
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, AntCheckError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AntCheckError::Config(e.to_string()))?;
        toml::from_str(&content).map_err(|e| AntCheckError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), AntCheckError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AntCheckError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "antcheck")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Fail before any network activity when the run cannot possibly
    /// produce a useful result.
    pub fn validate(&self) -> Result<(), AntCheckError> {
        if self.ant.api_key.trim().is_empty() {
            return Err(AntCheckError::Config(
                "the ANT API key is blank, set [ant] api_key in the config file".into(),
            ));
        }
        if self.scan.input_folders.is_empty() {
            return Err(AntCheckError::Config(
                "no input folders configured, set [scan] input_folders in the config file".into(),
            ));
        }
        if self.scan.output_folder.trim().is_empty() {
            return Err(AntCheckError::Config(
                "no output folder configured, set [scan] output_folder in the config file".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
