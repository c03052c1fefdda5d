use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::drift::DriftRequest;
use crate::output::OutputFormat;
use crate::state::RESERVED_SHORTCUT;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionConfig {
    #[serde(default = "default_query_directory")]
    pub query_directory: String,
    #[serde(default = "default_state_ref")]
    pub start_state: String,
    #[serde(default = "default_state_ref")]
    pub end_state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub query_directory: Option<String>,
    pub start_state: Option<String>,
    pub end_state: Option<String>,
    pub output_format: Option<OutputFormat>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/state-drift/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(dir) = overrides.query_directory {
            self.detection.query_directory = dir;
        }
        if let Some(start) = overrides.start_state {
            self.detection.start_state = start;
        }
        if let Some(end) = overrides.end_state {
            self.detection.end_state = end;
        }
        if let Some(format) = overrides.output_format {
            self.output.format = format;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn drift_request(&self) -> DriftRequest {
        DriftRequest {
            query_directory: expand_tilde(&self.detection.query_directory),
            start_state: self.detection.start_state.clone(),
            end_state: self.detection.end_state.clone(),
        }
    }

    pub fn default_template() -> String {
        let template = r#"[detection]
query_directory = "."
start_state = "most-recent"
end_state = "most-recent"

[output]
format = "table"

[logging]
level = "info"
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            query_directory: default_query_directory(),
            start_state: default_state_ref(),
            end_state: default_state_ref(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_query_directory() -> String {
    ".".to_string()
}

fn default_state_ref() -> String {
    RESERVED_SHORTCUT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
