//! The player's shot, travelling inward along the entry line (angle 0)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Whether a shot is in flight
    pub active: bool,
    /// Distance travelled since firing
    pub progress: f32,
}

impl Projectile {
    /// Launch from the entry point; returns false if a shot is already in flight
    pub fn fire(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.progress = 0.0;
        true
    }

    /// Move inward by `step`, returning the (previous, current) radius
    pub fn advance(&mut self, entry_radius: f32, step: f32) -> (f32, f32) {
        let prev = self.radius(entry_radius);
        self.progress += step;
        (prev, self.radius(entry_radius))
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.progress = 0.0;
    }

    #[inline]
    pub fn radius(&self, entry_radius: f32) -> f32 {
        entry_radius - self.progress
    }

    pub fn position(&self, entry_radius: f32) -> Vec2 {
        polar_to_cartesian(self.radius(entry_radius), 0.0)
    }
}
