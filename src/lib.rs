//! Silent Operator - NUI core for the operator panel
//!
//! Core modules:
//! - `sim`: Quantum-lock ring minigame (ring field, run state machine, pacing)
//! - `overlay`: Panel state (dialogs, toasts, radar, VPN list, data reveal)
//! - `settings`: Player preferences (difficulty, theme, toast timing)
//! - `persistence`: Versioned JSON storage for profile and error log
//! - `web`: wasm-bindgen surface for the browser host

pub mod error;
pub mod overlay;
pub mod persistence;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ConfigError, NuiError};
pub use overlay::Overlay;
pub use settings::{Settings, Theme};
pub use sim::{Difficulty, GameEvent, GamePhase, LockConfig, LockGame};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Tick rate the speed constants are expressed in
    pub const REFERENCE_TICK_HZ: f32 = 60.0;
    /// Maximum elapsed time fed to the driver in one frame (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// Maximum logic ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of gates in a run
    pub const MAX_LEVELS: usize = 3;
    /// Radius of the outermost gate
    pub const BASE_RADIUS: f32 = 150.0;
    /// Radius lost per gate index
    pub const RADIUS_STEP: f32 = 40.0;
    /// Where the projectile starts its radial run
    pub const ENTRY_RADIUS: f32 = 160.0;
    /// Where the loaded projectile waits before firing
    pub const IDLE_MARKER_RADIUS: f32 = 170.0;
    /// Half-width of the radial window in which a gate is checked
    pub const COLLISION_BAND: f32 = 6.0;
    /// Projectile travel per tick at the reference rate
    pub const PROJECTILE_STEP: f32 = 12.0;

    /// Amplitude of the hard-mode speed wobble (radians/tick)
    pub const JITTER_AMPLITUDE: f32 = 0.02;
    /// Narrowest gap a gate may have (radians)
    pub const MIN_GAP_SIZE: f32 = 0.05;

    /// Delay before a failed run returns to idle (ms)
    pub const FAIL_RESET_MS: f64 = 1500.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Shorter-arc distance between an angle and the entry direction (0 rad)
#[inline]
pub fn angular_distance_from_entry(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let a = normalize_angle(angle);
    a.min(TAU - a)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
