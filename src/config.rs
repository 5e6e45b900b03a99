use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::LevelFilter;
use serde::Deserialize;

use crate::app::RenderOptions;
use crate::codes::Language;
use crate::errors::WxError;

pub const API_KEY_ENV: &str = "WXBAR_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    #[serde(rename = "wttr")]
    #[value(name = "wttr")]
    Wttr,
    #[serde(rename = "open-meteo")]
    #[value(name = "open-meteo")]
    OpenMeteo,
    #[serde(rename = "openweathermap")]
    #[value(name = "openweathermap")]
    OpenWeatherMap,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub provider: Provider,
    /// City name or "District,City" string; empty lets wttr.in geolocate by IP
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub area_name: Option<String>,
    pub api_key: Option<String>,
    pub language: Language,
    pub timeout_secs: u64,
    pub show_feels_like: bool,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            location: String::new(),
            latitude: None,
            longitude: None,
            area_name: None,
            api_key: None,
            language: Language::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            show_feels_like: false,
            log_level: LevelFilter::Warn,
        }
    }
}

impl Config {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            language: self.language,
            show_feels_like: self.show_feels_like,
        }
    }

    /// Coordinates, when both halves are configured.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Best human-readable name of the configured place, used for web searches.
    pub fn search_term(&self) -> String {
        let place = if !self.location.trim().is_empty() {
            self.location.trim().to_string()
        } else if let Some(area) = &self.area_name {
            area.clone()
        } else if let Some((lat, lon)) = self.coordinates() {
            format!("{lat},{lon}")
        } else {
            String::new()
        };
        let suffix = match self.language {
            Language::Zh => "天气",
            Language::En => "weather",
        };
        format!("{place} {suffix}").trim().to_string()
    }

    pub fn with_overrides(mut self, location: Option<String>, provider: Option<Provider>) -> Self {
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(provider) = provider {
            self.provider = provider;
        }
        self
    }
}

/// Default location of the configuration file
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wxbar").join("config.toml"))
}

/// Loads the configuration and applies the api key environment override.
///
/// # Arguments
///
/// * 'config_path' - explicit path given on the command line, if any
pub fn load_config(config_path: Option<&Path>) -> Result<Config, WxError> {
    let mut config = read_config(config_path, default_path())?;

    if let Ok(key) = env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.api_key = Some(key.trim().to_string());
        }
    }

    Ok(config)
}

/// An explicitly given path must exist, while a missing default file just
/// means built-in defaults.
fn read_config(explicit: Option<&Path>, default: Option<PathBuf>) -> Result<Config, WxError> {
    match explicit {
        Some(path) => parse_config(&fs::read_to_string(path)?),
        None => match default {
            Some(path) if path.exists() => parse_config(&fs::read_to_string(path)?),
            _ => Ok(Config::default()),
        },
    }
}

fn parse_config(toml: &str) -> Result<Config, WxError> {
    let config: Config = toml::from_str(toml)?;
    if config.timeout_secs == 0 {
        return Err(WxError::Config("timeout_secs must be greater than zero".to_string()));
    }
    Ok(config)
}
