//! Geometry and pacing of a lock run

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable constants for one `LockGame`
///
/// Speeds and the projectile step are given at `REFERENCE_TICK_HZ`; a game
/// ticking at another rate scales them by [`LockConfig::speed_scale`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockConfig {
    pub max_levels: usize,
    pub base_radius: f32,
    pub radius_step: f32,
    pub entry_radius: f32,
    pub collision_band: f32,
    pub projectile_step: f32,
    pub tick_hz: f32,
    pub fail_reset_ms: f64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            max_levels: MAX_LEVELS,
            base_radius: BASE_RADIUS,
            radius_step: RADIUS_STEP,
            entry_radius: ENTRY_RADIUS,
            collision_band: COLLISION_BAND,
            projectile_step: PROJECTILE_STEP,
            tick_hz: REFERENCE_TICK_HZ,
            fail_reset_ms: FAIL_RESET_MS,
        }
    }
}

impl LockConfig {
    /// Radius of gate `index`
    #[inline]
    pub fn ring_radius(&self, index: usize) -> f32 {
        self.base_radius - index as f32 * self.radius_step
    }

    /// Logic tick length in milliseconds
    #[inline]
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.tick_hz as f64
    }

    /// Multiplier turning reference per-tick speeds into this rate's speeds
    #[inline]
    pub fn speed_scale(&self) -> f32 {
        REFERENCE_TICK_HZ / self.tick_hz
    }

    /// Projectile travel per tick at this rate
    #[inline]
    pub fn projectile_step_per_tick(&self) -> f32 {
        self.projectile_step * self.speed_scale()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_levels == 0 {
            return Err(ConfigError::NoLevels);
        }
        if !(self.tick_hz > 0.0) {
            return Err(ConfigError::TickRate(self.tick_hz));
        }
        if !(self.projectile_step > 0.0) {
            return Err(ConfigError::ProjectileStep(self.projectile_step));
        }
        // Gates must shrink inward and every band must have width
        if !(self.radius_step > 0.0) {
            return Err(ConfigError::RadiusStep(self.radius_step));
        }
        if !(self.collision_band > 0.0) {
            return Err(ConfigError::CollisionBand(self.collision_band));
        }
        if !self.base_radius.is_finite()
            || !self.entry_radius.is_finite()
            || !self.projectile_step.is_finite()
            || !self.radius_step.is_finite()
            || !self.collision_band.is_finite()
            || !self.tick_hz.is_finite()
            || !(self.fail_reset_ms >= 0.0 && self.fail_reset_ms.is_finite())
        {
            return Err(ConfigError::NonFinite);
        }
        let innermost = self.ring_radius(self.max_levels - 1);
        if innermost <= self.collision_band {
            return Err(ConfigError::InnerRadius {
                radius: innermost,
                band: self.collision_band,
            });
        }
        let outer = self.base_radius + self.collision_band;
        if outer >= self.entry_radius {
            return Err(ConfigError::EntryRadius {
                outer,
                entry: self.entry_radius,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LockConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ring_radius(0), 150.0);
        assert_eq!(config.ring_radius(2), 70.0);
    }

    #[test]
    fn test_too_many_levels_rejected() {
        let config = LockConfig {
            max_levels: 4,
            ..Default::default()
        };
        // Fourth gate would sit at radius 30; still fine
        assert!(config.validate().is_ok());

        let config = LockConfig {
            max_levels: 5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InnerRadius { .. })
        ));
    }

    #[test]
    fn test_non_shrinking_gates_rejected() {
        for step in [0.0, -40.0, f32::NAN] {
            let config = LockConfig {
                radius_step: step,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::RadiusStep(_))));
        }
    }

    #[test]
    fn test_band_must_have_width() {
        for band in [0.0, -10.0, f32::NAN] {
            let config = LockConfig {
                collision_band: band,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::CollisionBand(_))));
        }
    }

    #[test]
    fn test_non_finite_geometry_rejected() {
        let config = LockConfig {
            entry_radius: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonFinite));

        let config = LockConfig {
            fail_reset_ms: f64::NAN,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonFinite));
    }

    #[test]
    fn test_entry_must_clear_outer_band() {
        let config = LockConfig {
            entry_radius: 155.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EntryRadius { .. })
        ));
    }

    #[test]
    fn test_speed_scale_for_faster_rate() {
        let config = LockConfig {
            tick_hz: 120.0,
            ..Default::default()
        };
        assert!((config.speed_scale() - 0.5).abs() < f32::EPSILON);
        assert!((config.projectile_step_per_tick() - 6.0).abs() < 1e-5);
        assert!((config.tick_interval_ms() - 1000.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rate_rejected() {
        let config = LockConfig {
            tick_hz: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TickRate(0.0)));
    }
}
