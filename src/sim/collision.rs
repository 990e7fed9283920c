//! Gate checks for the projectile
//!
//! The shot is only judged against the active ring, and only once it reaches
//! that ring's radial band. The band test is swept over the whole distance
//! covered in a tick, so no step size can jump over a ring unchecked.

use super::ring::Ring;
use crate::angular_distance_from_entry;

/// Outcome of reaching the active ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateCheck {
    /// Gap lined up with the entry line
    Pass,
    /// Hit the solid part of the ring
    Miss,
}

/// Whether the gap of a ring at `angle` covers the entry line
///
/// Strict comparison: an offset of exactly half the gap is a miss.
#[inline]
pub fn is_aligned(angle: f32, gap_size: f32) -> bool {
    angular_distance_from_entry(angle) < gap_size / 2.0
}

/// Whether moving inward from `prev_radius` to `cur_radius` touched the band
/// `ring_radius ± band`
#[inline]
pub fn crosses_band(prev_radius: f32, cur_radius: f32, ring_radius: f32, band: f32) -> bool {
    let (near, far) = if prev_radius >= cur_radius {
        (cur_radius, prev_radius)
    } else {
        (prev_radius, cur_radius)
    };
    near <= ring_radius + band && far >= ring_radius - band
}

/// Judge a projectile segment against a ring; None if it has not arrived yet
pub fn check_gate(ring: &Ring, prev_radius: f32, cur_radius: f32, band: f32) -> Option<GateCheck> {
    if !crosses_band(prev_radius, cur_radius, ring.radius, band) {
        return None;
    }
    if is_aligned(ring.angle, ring.gap_size) {
        Some(GateCheck::Pass)
    } else {
        Some(GateCheck::Miss)
    }
}
