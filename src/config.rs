//! Application-level configuration loading, including the seed pigment set.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::color::Rgb;
use crate::state::Palette;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PAINT_MIXER_CONFIG_PATH";

/// Starter pigments used when no configuration is present. Classic paint
/// pigments whose names need no lookup.
const DEFAULT_PIGMENTS: &[(&str, Rgb)] = &[
    ("Cadmium Yellow", Rgb::new(254, 236, 0)),
    ("Cadmium Red", Rgb::new(255, 39, 2)),
    ("Quinacridone Magenta", Rgb::new(128, 2, 46)),
    ("Ultramarine Blue", Rgb::new(25, 0, 89)),
    ("Phthalo Green", Rgb::new(0, 60, 50)),
    ("Burnt Sienna", Rgb::new(123, 72, 0)),
    ("Titanium White", Rgb::new(255, 255, 255)),
];

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    pigments: Vec<(String, Rgb)>,
    naming: NamingConfig,
}

/// Settings for the external color-name lookup collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct NamingConfig {
    /// Base URL of the name API.
    #[serde(default = "default_naming_base_url")]
    pub base_url: String,
    /// How long rapid input changes are coalesced before a lookup fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Per-request timeout; a slow API resolves to an empty name.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl NamingConfig {
    /// Debounce window as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            base_url: default_naming_base_url(),
            debounce_ms: default_debounce_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_naming_base_url() -> String {
    "https://www.thecolorapi.com".to_string()
}

fn default_debounce_ms() -> u64 {
    250
}

fn default_timeout_ms() -> u64 {
    1500
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in default pigment set.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        count = config.pigments.len(),
                        "loaded seed pigment set from config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Build the starting palette from the configured seed pigments.
    pub fn seed_palette(&self) -> Palette {
        Palette::from_seeds(
            self.pigments
                .iter()
                .map(|(name, rgb)| (name.as_str(), *rgb)),
        )
    }

    /// Settings for the color-name lookup collaborator.
    pub fn naming(&self) -> &NamingConfig {
        &self.naming
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pigments: DEFAULT_PIGMENTS
                .iter()
                .map(|(name, rgb)| (name.to_string(), *rgb))
                .collect(),
            naming: NamingConfig::default(),
        }
    }
}

fn resolve_config_path() -> PathBuf {
    env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// On-disk layout of the configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    pigments: Vec<RawPigment>,
    #[serde(default)]
    naming: Option<NamingConfig>,
}

#[derive(Debug, Deserialize)]
struct RawPigment {
    name: String,
    rgb: String,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let mut pigments = Vec::with_capacity(raw.pigments.len());
        for pigment in raw.pigments {
            match Rgb::parse(&pigment.rgb) {
                Ok(rgb) => pigments.push((pigment.name, rgb)),
                Err(err) => {
                    warn!(
                        name = %pigment.name,
                        error = %err,
                        "skipping configured pigment with invalid color"
                    );
                }
            }
        }

        if pigments.is_empty() {
            return Self {
                naming: raw.naming.unwrap_or_default(),
                ..Self::default()
            };
        }

        Self {
            pigments,
            naming: raw.naming.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_includes_the_starter_pigments() {
        let config = AppConfig::default();
        let palette = config.seed_palette();
        let labels: Vec<&str> = palette.iter().map(|s| s.label.as_str()).collect();
        assert!(labels.contains(&"Cadmium Yellow"));
        assert!(labels.contains(&"Ultramarine Blue"));
        assert!(palette.iter().all(|s| s.parts_in_mix == 0));
    }

    #[test]
    fn raw_config_with_invalid_pigment_skips_it() {
        let raw: RawConfig = serde_json::from_str(
            r#"{
                "pigments": [
                    {"name": "Good", "rgb": "rgb(1, 2, 3)"},
                    {"name": "Bad", "rgb": "chartreuse-ish"}
                ]
            }"#,
        )
        .unwrap();
        let config = AppConfig::from(raw);
        assert_eq!(config.seed_palette().len(), 1);
    }

    #[test]
    fn raw_config_with_no_usable_pigments_falls_back() {
        let raw: RawConfig = serde_json::from_str(r#"{"pigments": []}"#).unwrap();
        let config = AppConfig::from(raw);
        assert_eq!(config.seed_palette().len(), DEFAULT_PIGMENTS.len());
    }

    #[test]
    fn naming_defaults_apply() {
        let config = AppConfig::default();
        assert_eq!(config.naming().debounce(), Duration::from_millis(250));
        assert!(config.naming().base_url.starts_with("https://"));
    }
}
