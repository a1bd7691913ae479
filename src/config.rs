//! Configuration management for the resume analyzer

use crate::error::{AnalyzerError, Result};
use crate::model::AnalysisSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Overrides `api.base_url` in the effective config; the file is never
/// rewritten with it.
pub const API_URL_ENV: &str = "RESUME_ANALYZER_API_URL";

pub const SETTABLE_KEYS: [&str; 6] = [
    "api.base_url",
    "api.timeout_secs",
    "output.color_output",
    "output.export_dir",
    "output.share_origin",
    "analysis.industry",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Alternate industry catalog; the built-in one is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    #[serde(default)]
    pub api: ApiConfig,
    /// Settings every new session starts with.
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub color_output: bool,
    pub export_dir: PathBuf,
    /// Origin that shareable links point at.
    pub share_origin: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color_output: true,
            export_dir: PathBuf::from("."),
            share_origin: "http://localhost:3000".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            api: ApiConfig::default(),
            analysis: AnalysisSettings::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load the stored config from `path`, creating it with defaults on
    /// first use. Environment overrides are not applied; see `effective`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)
                .map_err(|e| AnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?
        } else {
            let config = Self::default();
            config.save_to(path)?;
            config
        };

        Ok(config)
    }

    /// The config commands run with: the stored values plus `API_URL_ENV`.
    /// Never save the result back.
    pub fn effective(&self) -> Self {
        let mut config = self.clone();
        config.apply_env_override(std::env::var(API_URL_ENV).ok());
        config
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    fn apply_env_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            log::debug!("{} overrides api.base_url with {}", API_URL_ENV, url);
            self.api.base_url = url;
        }
    }

    /// Set one dotted key from its string form.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => self.api.base_url = value.to_string(),
            "api.timeout_secs" => {
                self.api.timeout_secs = value.parse().map_err(|_| {
                    AnalyzerError::Configuration(format!("Invalid timeout '{}': expected seconds", value))
                })?
            }
            "output.color_output" => {
                self.output.color_output = value.parse().map_err(|_| {
                    AnalyzerError::Configuration(format!("Invalid boolean '{}'", value))
                })?
            }
            "output.export_dir" => self.output.export_dir = PathBuf::from(value),
            "output.share_origin" => {
                self.output.share_origin = value.trim_end_matches('/').to_string()
            }
            "analysis.industry" => {
                self.analysis.industry = (!value.is_empty()).then(|| value.to_string())
            }
            _ => {
                return Err(AnalyzerError::Configuration(format!(
                    "Unknown key '{}'. Supported keys: {}",
                    key,
                    SETTABLE_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}
