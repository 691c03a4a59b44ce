//! Game settings and preferences
//!
//! Supplied by the hosting page as JSON (never written back). Every field is
//! optional; anything missing takes its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Tuning;

/// Errors while reading page-supplied configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{field} must be within {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        range: &'static str,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Engine drone volume (0.0 - 1.0)
    pub engine_volume: f32,
    /// Start muted
    pub muted: bool,

    // === Feedback ===
    /// Vibrate on each shot where supported
    pub haptics: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Behavior ===
    /// Pause when the tab is hidden or the window loses focus
    pub pause_on_blur: bool,
    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,

    /// Gameplay balance overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            engine_volume: 0.5,
            muted: false,

            haptics: true,

            show_fps: false,

            pause_on_blur: true,
            seed: None,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("engine_volume", self.engine_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::OutOfRange {
                    field,
                    value: value as f64,
                    range: "0.0..=1.0",
                });
            }
        }
        self.tuning.validate()
    }

    /// Page element holding the JSON config
    #[allow(dead_code)]
    const CONFIG_ELEMENT_ID: &'static str = "game-config";

    /// Environment variable naming a JSON config file (native only)
    #[allow(dead_code)]
    const CONFIG_ENV: &'static str = "CITY_LITE_CONFIG";

    /// Load settings from the `#game-config` element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        Self::from_optional_json(json.as_deref())
    }

    /// Load settings from the file named by `CITY_LITE_CONFIG` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::CONFIG_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_optional_json(Some(&json)),
            Err(source) => {
                let err = SettingsError::Io { path, source };
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    fn from_optional_json(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|j| !j.is_empty()) {
            Some(json) => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings from page config");
                    settings
                }
                Err(err) => {
                    log::warn!("{err}; using default settings");
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
