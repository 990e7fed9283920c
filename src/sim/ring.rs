//! Rotating gates and the field that owns them
//!
//! A ring is a circle of radius `radius` with an opening of `gap_size`
//! radians centered on `angle`. Angles accumulate without wrapping; only
//! alignment checks and snapshots normalize them.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use super::difficulty::Difficulty;
use crate::consts::JITTER_AMPLITUDE;
use crate::normalize_angle;

/// One rotating gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    /// Centerline radius from lock center
    pub radius: f32,
    /// Center of the gap (radians, unbounded)
    pub angle: f32,
    /// Signed speed in radians/tick; sign is the rotation direction
    pub base_speed: f32,
    /// Angular width of the opening (radians)
    pub gap_size: f32,
    /// Phase of the speed wobble
    pub jitter_phase: f32,
    /// Phase advance per tick (0 = constant speed)
    pub jitter_speed: f32,
}

impl Ring {
    /// A constant-speed ring
    pub fn new(radius: f32, angle: f32, base_speed: f32, gap_size: f32) -> Self {
        Self {
            radius,
            angle,
            base_speed,
            gap_size,
            jitter_phase: 0.0,
            jitter_speed: 0.0,
        }
    }

    /// Gap center wrapped into [0, 2π)
    #[inline]
    pub fn normalized_angle(&self) -> f32 {
        normalize_angle(self.angle)
    }

    #[inline]
    pub fn is_jittered(&self) -> bool {
        self.jitter_speed > 0.0
    }

    /// Rotate by one tick; `scale` converts reference speeds to the tick rate
    pub fn advance(&mut self, scale: f32) {
        if self.is_jittered() {
            self.jitter_phase += self.jitter_speed * scale;
            let speed_variation = self.jitter_phase.sin() * JITTER_AMPLITUDE;
            self.angle += (self.base_speed + speed_variation) * scale;
        } else {
            self.angle += self.base_speed * scale;
        }
    }

    /// Drawn part of the ring as (start, end) angles, going around the gap
    pub fn solid_arc(&self) -> (f32, f32) {
        let angle = self.normalized_angle();
        (angle + self.gap_size / 2.0, angle + TAU - self.gap_size / 2.0)
    }
}

/// Radii of a stack of gates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingGeometry {
    pub base_radius: f32,
    pub radius_step: f32,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            base_radius: crate::consts::BASE_RADIUS,
            radius_step: crate::consts::RADIUS_STEP,
        }
    }
}

/// The concentric gates of one run, outermost first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingField {
    rings: Vec<Ring>,
}

impl RingField {
    /// Build `level_count` gates with fresh random direction, angle and phase
    pub fn initialize<R: Rng>(
        level_count: usize,
        difficulty: Difficulty,
        geometry: RingGeometry,
        rng: &mut R,
    ) -> Self {
        let rings = (0..level_count)
            .map(|i| {
                let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                let jitter_speed = difficulty
                    .jitter_range()
                    .map(|(lo, hi)| rng.random_range(lo..hi))
                    .unwrap_or(0.0);
                Ring {
                    radius: geometry.base_radius - i as f32 * geometry.radius_step,
                    angle: rng.random_range(0.0..TAU),
                    base_speed: difficulty.base_speed(i) * direction,
                    gap_size: difficulty.gap_size(i),
                    jitter_phase: rng.random_range(0.0..PI),
                    jitter_speed,
                }
            })
            .collect();
        Self { rings }
    }

    /// Wrap hand-built gates (scripted runs, tests)
    pub fn from_rings(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn rings_mut(&mut self) -> &mut [Ring] {
        &mut self.rings
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Ring> {
        self.rings.get(index)
    }

    /// Rotate every gate at or beyond `level_index`; cleared gates stay frozen
    pub fn advance(&mut self, level_index: usize, scale: f32) {
        for ring in self.rings.iter_mut().skip(level_index) {
            ring.advance(scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_initialize_easy_profile() {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = RingField::initialize(3, Difficulty::Easy, RingGeometry::default(), &mut rng);
        assert_eq!(field.len(), 3);
        for (i, ring) in field.rings().iter().enumerate() {
            assert_eq!(ring.radius, 150.0 - i as f32 * 40.0);
            assert!((ring.base_speed.abs() - (0.02 + i as f32 * 0.01)).abs() < 1e-6);
            assert!((ring.gap_size - PI / 4.0).abs() < 1e-6);
            assert_eq!(ring.jitter_speed, 0.0);
            assert!((0.0..TAU).contains(&ring.angle));
            assert!((0.0..PI).contains(&ring.jitter_phase));
        }
    }

    #[test]
    fn test_initialize_hard_profile() {
        let mut rng = Pcg32::seed_from_u64(11);
        let field = RingField::initialize(3, Difficulty::Hard, RingGeometry::default(), &mut rng);
        for (i, ring) in field.rings().iter().enumerate() {
            assert!((ring.base_speed.abs() - (0.04 + i as f32 * 0.02)).abs() < 1e-6);
            assert!((0.05..0.10).contains(&ring.jitter_speed));
            assert!(ring.gap_size > 0.0);
        }
    }

    #[test]
    fn test_constant_speed_advance() {
        let mut ring = Ring::new(150.0, 1.0, -0.03, PI / 4.0);
        ring.advance(1.0);
        ring.advance(1.0);
        assert!((ring.angle - 0.94).abs() < 1e-6);
    }

    #[test]
    fn test_jittered_advance() {
        let mut ring = Ring::new(110.0, 0.0, 0.06, 0.4);
        ring.jitter_speed = 0.08;
        ring.jitter_phase = 0.5;
        ring.advance(1.0);
        let expected_phase = 0.58_f32;
        assert!((ring.jitter_phase - expected_phase).abs() < 1e-6);
        let expected_angle = 0.06 + expected_phase.sin() * JITTER_AMPLITUDE;
        assert!((ring.angle - expected_angle).abs() < 1e-6);
    }

    #[test]
    fn test_advance_skips_cleared_gates() {
        let mut field = RingField::from_rings(vec![
            Ring::new(150.0, 0.5, 0.02, 0.7),
            Ring::new(110.0, 0.5, 0.03, 0.7),
            Ring::new(70.0, 0.5, 0.04, 0.7),
        ]);
        field.advance(1, 1.0);
        assert_eq!(field.rings()[0].angle, 0.5);
        assert!((field.rings()[1].angle - 0.53).abs() < 1e-6);
        assert!((field.rings()[2].angle - 0.54).abs() < 1e-6);
    }

    #[test]
    fn test_solid_arc_spans_everything_but_gap() {
        let ring = Ring::new(150.0, 0.0, 0.0, 0.5);
        let (start, end) = ring.solid_arc();
        assert!((start - 0.25).abs() < 1e-6);
        assert!((end - start - (TAU - 0.5)).abs() < 1e-5);
    }
}
