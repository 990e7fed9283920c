//! Radar scan panel
//!
//! A scan is a timed sweep that always turns up the same two targets.

use serde::Serialize;

/// How long a sweep takes (ms)
pub const SCAN_DURATION_MS: f64 = 3000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Risk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanTarget {
    pub name: &'static str,
    pub role: &'static str,
    pub risk: Risk,
}

pub const SCAN_TARGETS: &[ScanTarget] = &[
    ScanTarget {
        name: "Michael De Santa",
        role: "Retired Criminal",
        risk: Risk::High,
    },
    ScanTarget {
        name: "Trevor Philips",
        role: "Arms Dealer",
        risk: Risk::High,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RadarStatus {
    #[default]
    Idle,
    Scanning,
    TargetsFound,
}

impl RadarStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RadarStatus::Idle => "READY",
            RadarStatus::Scanning => "SCANNING...",
            RadarStatus::TargetsFound => "TARGETS FOUND",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Radar {
    pub status: RadarStatus,
    pub targets: Vec<ScanTarget>,
}

impl Radar {
    pub fn is_scanning(&self) -> bool {
        self.status == RadarStatus::Scanning
    }

    /// Start a sweep; false if one is already running
    pub fn begin_scan(&mut self) -> bool {
        if self.is_scanning() {
            return false;
        }
        self.status = RadarStatus::Scanning;
        true
    }

    /// Finish the sweep, replacing previous results; returns the target count
    pub fn complete_scan(&mut self) -> usize {
        self.status = RadarStatus::TargetsFound;
        self.targets = SCAN_TARGETS.to_vec();
        self.targets.len()
    }

    pub fn target(&self, index: usize) -> Option<&ScanTarget> {
        self.targets.get(index)
    }
}
