//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ClipGateError, ClipGateResult};
use crate::utils::logging::{LogFormat, LogLevel};

/// Files searched for settings when no `--config` is given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["clipgate.toml", "config/clipgate.toml"];

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppSettings {
    pub requirements: RequirementsSettings,
    pub remote: RemoteSettings,
    pub probe: ProbeSettings,
    pub history: HistorySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RequirementsSettings {
    /// Requirements file; the embedded catalog is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    pub enabled: bool,
    pub base_url: String,
    pub path: String,
    pub field_name: String,
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "http://localhost:8000".to_string(),
            path: "/api/validate-video".to_string(),
            field_name: "file".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub ffprobe_path: PathBuf,
    pub timeout_secs: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from("ffprobe"),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub path: PathBuf,
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("clipgate-history.json"),
            limit: crate::app::history_interactor::DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogSettings {
    pub level: LogLevel,
    pub format: LogFormat,
}

/// Overrides coming from the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub requirements: Option<PathBuf>,
    pub remote: Option<bool>,
    pub remote_url: Option<String>,
    pub ffprobe: Option<PathBuf>,
    pub history_path: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
}

/// Build settings following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(overrides: &CliOverrides) -> ClipGateResult<AppSettings> {
    // Step 1: defaults
    let mut settings = AppSettings::default();

    // Step 2: file
    match &overrides.config {
        Some(path) => settings = load_config_file(path)?,
        None => {
            if let Some(path) = DEFAULT_CONFIG_PATHS.iter().map(Path::new).find(|p| p.exists()) {
                settings = load_config_file(path)?;
            }
        }
    }

    // Step 3: environment
    apply_environment(&mut settings, |key| std::env::var(key).ok())?;

    // Step 4: command line
    apply_cli_overrides(&mut settings, overrides);

    Ok(settings)
}

/// Parse a settings file
pub fn load_config_file(path: &Path) -> ClipGateResult<AppSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ClipGateError::Config {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ClipGateError::Config {
        message: format!("Failed to parse {}: {}", path.display(), e),
    })
}

/// Apply `CLIPGATE_*` variables read through `lookup`
pub fn apply_environment<F>(settings: &mut AppSettings, lookup: F) -> ClipGateResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("CLIPGATE_REQUIREMENTS") {
        settings.requirements.path = Some(PathBuf::from(value));
    }
    if let Some(value) = lookup("CLIPGATE_REMOTE_ENABLED") {
        settings.remote.enabled = parse_bool("CLIPGATE_REMOTE_ENABLED", &value)?;
    }
    if let Some(value) = lookup("CLIPGATE_REMOTE_URL") {
        settings.remote.base_url = value;
    }
    if let Some(value) = lookup("CLIPGATE_FFPROBE") {
        settings.probe.ffprobe_path = PathBuf::from(value);
    }
    if let Some(value) = lookup("CLIPGATE_HISTORY_PATH") {
        settings.history.path = PathBuf::from(value);
    }
    if let Some(value) = lookup("CLIPGATE_LOG_LEVEL") {
        settings.log.level = value.parse()?;
    }
    if let Some(value) = lookup("CLIPGATE_LOG_FORMAT") {
        settings.log.format = value.parse()?;
    }
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> ClipGateResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ClipGateError::Config {
            message: format!("Invalid boolean value for {}: {}", key, value),
        }),
    }
}

/// Apply command-line overrides
pub fn apply_cli_overrides(settings: &mut AppSettings, overrides: &CliOverrides) {
    if let Some(path) = &overrides.requirements {
        settings.requirements.path = Some(path.clone());
    }
    if let Some(enabled) = overrides.remote {
        settings.remote.enabled = enabled;
    }
    if let Some(url) = &overrides.remote_url {
        settings.remote.base_url = url.clone();
    }
    if let Some(path) = &overrides.ffprobe {
        settings.probe.ffprobe_path = path.clone();
    }
    if let Some(path) = &overrides.history_path {
        settings.history.path = path.clone();
    }
    if let Some(level) = overrides.log_level {
        settings.log.level = level;
    }
    if let Some(format) = overrides.log_format {
        settings.log.format = format;
    }
}

/// Log where the effective settings came from
pub fn log_settings(settings: &AppSettings) {
    info!(
        requirements = ?settings.requirements.path,
        remote = settings.remote.enabled,
        remote_url = %settings.remote.base_url,
        history = %settings.history.path.display(),
        "Configuration initialized"
    );
}
