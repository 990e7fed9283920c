//! Fixed timestep pacing
//!
//! Frames arrive at whatever rate the display runs at. The driver turns real
//! elapsed time into a whole number of logic ticks and carries the remainder
//! into the next frame, so per-tick speeds mean the same thing at 30, 60 or
//! 144 Hz.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct TickDriver {
    interval_ms: f64,
    accumulator_ms: f64,
    running: bool,
    total_ticks: u64,
}

impl TickDriver {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            accumulator_ms: 0.0,
            running: false,
            total_ticks: 0,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks produced since the last `start`
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Leftover time not yet spent on a tick
    pub fn pending_ms(&self) -> f64 {
        self.accumulator_ms
    }

    pub fn start(&mut self) {
        self.running = true;
        self.accumulator_ms = 0.0;
        self.total_ticks = 0;
    }

    /// Stop producing ticks; safe to call repeatedly
    pub fn cancel(&mut self) {
        self.running = false;
        self.accumulator_ms = 0.0;
    }

    /// Feed real elapsed time, get back how many ticks to run now
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !self.running || !elapsed_ms.is_finite() {
            return 0;
        }
        // Long stalls (tab hidden, debugger) must not fast-forward the lock
        let elapsed = elapsed_ms.clamp(0.0, MAX_FRAME_MS);
        self.accumulator_ms += elapsed;

        let mut substeps = 0;
        while self.accumulator_ms >= self.interval_ms && substeps < MAX_SUBSTEPS {
            self.accumulator_ms -= self.interval_ms;
            substeps += 1;
        }
        self.total_ticks += substeps as u64;
        substeps
    }
}
