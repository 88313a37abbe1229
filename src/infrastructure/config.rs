use crate::presentation::config::keybindings;
use crate::presentation::config::styles;

use std::path::PathBuf;

use config::ConfigError;
use serde::Deserialize;

use crate::core::state::{
    gradient::{DEFAULT_CYCLE_MS, DEFAULT_FRAME_MS, DEFAULT_TRANSITION_MS},
    pomodoro::DEFAULT_POMODORO_SECS,
};
use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

pub const DEFAULT_QUOTE_URL: &str = "https://programming-quotesapi.vercel.app/api/random";
pub const DEFAULT_FAVICON_URL: &str = "https://www.google.com/s2/favicons?domain={domain}";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: keybindings::KeyBindings,
    #[serde(default)]
    pub styles: styles::Styles,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Tunables of the dashboard components
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub quote_url: String,
    /// Favicon service URL; `{domain}` is replaced by the bookmark's domain
    pub favicon_url: String,
    /// chrono strftime pattern
    pub clock_format: String,
    pub pomodoro_secs: u32,
    pub gradient_cycle_ms: u64,
    pub gradient_transition_ms: u64,
    pub animation_frame_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            favicon_url: DEFAULT_FAVICON_URL.to_string(),
            clock_format: "%X".to_string(),
            pomodoro_secs: DEFAULT_POMODORO_SECS,
            gradient_cycle_ms: DEFAULT_CYCLE_MS,
            gradient_transition_ms: DEFAULT_TRANSITION_MS,
            animation_frame_ms: DEFAULT_FRAME_MS,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load the embedded defaults, then any user config files from the
    /// config directory on top.
    pub fn new() -> Result<Self, ConfigError> {
        let default_config: Config = json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))?;
        let data_dir = utils::get_data_dir();
        let config_dir = utils::get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!("No user configuration file found, using defaults");
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        // Merge default keybindings into user config (flat mapping)
        for (keyseq, action) in default_config.keybindings.iter() {
            cfg.keybindings
                .entry(keyseq.clone())
                .or_insert_with(|| *action);
        }
        for (style_key, style) in default_config.styles.iter() {
            cfg.styles
                .entry(style_key.clone())
                .or_insert_with(|| *style);
        }

        Ok(cfg)
    }

    /// Embedded defaults only, with no filesystem access.
    pub fn embedded() -> Result<Self, ConfigError> {
        json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))
    }
}
