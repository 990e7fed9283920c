//! Renderable snapshot of a lock run
//!
//! The core never draws. Each animation frame the host asks for a `LockFrame`
//! and paints it onto whatever surface it owns (canvas, SVG, terminal).

use glam::Vec2;
use serde::Serialize;

use super::difficulty::Difficulty;
use super::game::{GamePhase, LockGame};
use crate::consts::IDLE_MARKER_RADIUS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RingStatus {
    Cleared,
    Active,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingView {
    pub radius: f32,
    /// Gap center in [0, 2π)
    pub angle: f32,
    pub gap_size: f32,
    /// Solid part as (start, end) radians
    pub arc: (f32, f32),
    pub status: RingStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectileView {
    pub radius: f32,
    pub position: Vec2,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockFrame {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub accent_color: &'static str,
    pub level_index: usize,
    pub max_levels: usize,
    pub entry_radius: f32,
    pub idle_marker_radius: f32,
    pub rings: Vec<RingView>,
    /// Present only while a shot is in flight
    pub projectile: Option<ProjectileView>,
}

impl LockFrame {
    pub(crate) fn capture(game: &LockGame) -> Self {
        let level = game.level_index();
        let rings = game
            .field()
            .map(|field| {
                field
                    .rings()
                    .iter()
                    .enumerate()
                    .map(|(i, ring)| RingView {
                        radius: ring.radius,
                        angle: ring.normalized_angle(),
                        gap_size: ring.gap_size,
                        arc: ring.solid_arc(),
                        status: if i < level {
                            RingStatus::Cleared
                        } else if i == level {
                            RingStatus::Active
                        } else {
                            RingStatus::Pending
                        },
                    })
                    .collect()
            })
            .unwrap_or_default();

        let entry = game.config().entry_radius;
        let projectile = game.projectile();
        let projectile = projectile.active.then(|| ProjectileView {
            radius: projectile.radius(entry),
            position: projectile.position(entry),
        });

        Self {
            phase: game.phase(),
            difficulty: game.difficulty(),
            accent_color: game.difficulty().accent_color(),
            level_index: level,
            max_levels: game.max_levels(),
            entry_radius: entry,
            idle_marker_radius: IDLE_MARKER_RADIUS,
            rings,
            projectile,
        }
    }

    /// Core readout, e.g. "1/3"
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.level_index, self.max_levels)
    }
}
