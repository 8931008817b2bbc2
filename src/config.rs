use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub event: EventConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Event branding shown in the wizard header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    #[serde(default = "default_event_name")]
    pub name: String,
    #[serde(default = "default_event_tagline")]
    pub tagline: String,
}

fn default_event_name() -> String {
    "Fun Run Event 2025".to_string()
}

fn default_event_tagline() -> String {
    "Isi formulir pendaftaran di bawah ini untuk mengamankan tempat Anda".to_string()
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            name: default_event_name(),
            tagline: default_event_tagline(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval; toasts are expired on each tick
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// How long a notification stays on screen
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,
}

fn default_tick_rate() -> u64 {
    250
}

fn default_toast_duration() -> u64 {
    4000 // 4 seconds
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            toast_duration_ms: default_toast_duration(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,

    /// Log directory; defaults to the platform data dir
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
            dir: None,
        }
    }
}

/// External files shown read-only in the UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Jersey size chart, displayed verbatim
    #[serde(default)]
    pub size_chart: Option<String>,
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so funrun works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config in ~/.config/funrun/ (optional global overrides)
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with FUNRUN_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("FUNRUN")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// `<config dir>/funrun/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("funrun").join("config.toml"))
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        if let Some(ref dir) = self.logging.dir {
            let path = PathBuf::from(dir);
            if path.is_absolute() {
                return path;
            }
            return std::env::current_dir().unwrap_or_default().join(path);
        }
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("funrun")
            .join("logs")
    }

    /// Contents of the configured size chart.
    ///
    /// `Ok(None)` when no chart is configured.
    pub fn load_size_chart(&self) -> Result<Option<String>> {
        let Some(ref path) = self.assets.size_chart else {
            return Ok(None);
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read size chart {path}"))?;
        Ok(Some(contents))
    }
}
