use crate::api::DEFAULT_BASE_URL;
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

pub const CONFIG_PATH: &str = "config.toml";
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub key: String,
    pub base_url: String,
    pub units: String, // "metric", "imperial" or "standard"
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            units: "metric".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LocationConfig {
    pub auto_locate: bool, // Start on the current-location route if true
    pub default_lat: f64,
    pub default_lon: f64,
    pub lookup_ip: String, // Empty means the caller's own address
}

impl Default for LocationConfig {
    fn default() -> Self {
        // London
        Self {
            auto_locate: true,
            default_lat: 51.5073219,
            default_lon: -0.1276474,
            lookup_ip: String::new(),
        }
    }
}

impl LocationConfig {
    pub fn default_coordinates(&self) -> Coordinates {
        Coordinates::new(self.default_lat, self.default_lon)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    pub tab_reveal_ticks: usize,
    pub log_dir: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 150,
            tab_reveal_ticks: 2,
            log_dir: "logs".to_string(),
        }
    }
}

impl Config {
    /// Loads config.toml from the working directory.
    /// If it doesn't exist, creates a default one.
    pub fn load() -> Self {
        let mut config = Self::load_from(Path::new(CONFIG_PATH));
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.api.key = key;
            }
        }
        config
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(content) = fs::read_to_string(path) {
            match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    return Config::default();
                }
            }
        }

        let default_config = Config::default();

        // Save default config to disk for the user to edit later
        match toml::to_string_pretty(&default_config) {
            Ok(toml_string) => {
                if fs::write(path, toml_string).is_err() {
                    warn!("Could not write default {} to disk.", path.display());
                }
            }
            Err(e) => warn!("Could not serialize default config: {}", e),
        }

        info!("Loaded default configuration.");
        default_config
    }
}
