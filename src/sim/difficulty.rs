//! Difficulty profiles
//!
//! Each profile maps a gate index to its base speed, gap width and jitter
//! range. Everything else about a ring is shared.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::consts::MIN_GAP_SIZE;

/// Difficulty selected before a run starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Unsigned rotation speed of gate `index` (radians/tick at 60 Hz)
    pub fn base_speed(&self, index: usize) -> f32 {
        let i = index as f32;
        match self {
            Difficulty::Easy => 0.02 + i * 0.01,
            Difficulty::Hard => 0.04 + i * 0.02,
        }
    }

    /// Angular width of the opening of gate `index`, never below `MIN_GAP_SIZE`
    pub fn gap_size(&self, index: usize) -> f32 {
        let raw = match self {
            Difficulty::Easy => PI / 4.0,
            Difficulty::Hard => PI / 6.0 - index as f32 * 0.1,
        };
        raw.max(MIN_GAP_SIZE)
    }

    /// Range the per-gate jitter speed is drawn from (None = constant speed)
    pub fn jitter_range(&self) -> Option<(f32, f32)> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Hard => Some((0.05, 0.10)),
        }
    }

    /// Indicator color shown in the lock core
    pub fn accent_color(&self) -> &'static str {
        match self {
            Difficulty::Easy => "#10b981",
            Difficulty::Hard => "#ff0055",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
