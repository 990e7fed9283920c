//! Operator preferences
//!
//! Persisted separately from the profile in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::NuiError;
use crate::sim::Difficulty;

/// Panel color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

/// Panel settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quantum-lock difficulty used for the next run
    pub difficulty: Difficulty,
    pub theme: Theme,
    /// Shake/ripple feedback
    pub animations: bool,
    pub sounds: bool,
    /// Default toast lifetime (ms)
    pub toast_duration_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            theme: Theme::Dark,
            animations: true,
            sounds: false,
            toast_duration_ms: 3000,
        }
    }
}

impl Settings {
    /// Set difficulty by name ("easy" / "HARD" ...)
    pub fn set_difficulty_str(&mut self, name: &str) -> Result<(), NuiError> {
        self.difficulty =
            Difficulty::from_str(name).ok_or_else(|| NuiError::UnknownDifficulty(name.to_string()))?;
        Ok(())
    }

    /// Set theme by name
    pub fn set_theme_str(&mut self, name: &str) -> Result<(), NuiError> {
        self.theme = Theme::from_str(name).ok_or_else(|| NuiError::UnknownTheme(name.to_string()))?;
        Ok(())
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "silent_operator_settings";

    pub fn load() -> Self {
        match crate::persistence::load(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        crate::persistence::store(Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}
