//! Post-win data leak sequence
//!
//! Two header lines appear at once, then one leaked record per step, then a
//! completion line. The overlay drives the steps from its timer queue.

use serde::Serialize;

/// Delay between winning and the terminal opening (ms)
pub const REVEAL_DELAY_MS: f64 = 800.0;
/// Interval between records (ms)
pub const REVEAL_STEP_MS: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeakedRecord {
    pub kind: &'static str,
    pub from: &'static str,
    pub message: &'static str,
}

pub const LEAKED_DATA: &[LeakedRecord] = &[
    LeakedRecord {
        kind: "SMS",
        from: "Unknown",
        message: "Drop point changed. Old factory, midnight.",
    },
    LeakedRecord {
        kind: "BANK",
        from: "Maze Bank",
        message: "Statement: -$120,000 (Offshore Transfer)",
    },
    LeakedRecord {
        kind: "GPS",
        from: "Vehicle",
        message: "Last Location: Vinewood Hills, Garage.",
    },
    LeakedRecord {
        kind: "NOTE",
        from: "System",
        message: "Security Protocol: Disabled",
    },
];

pub const REVEAL_HEADER: &[&str] = &["> ROOT ACCESS GRANTED...", "> DECRYPTING... [AES-256]"];
pub const REVEAL_FOOTER: &str = "> DOWNLOAD COMPLETE. (Data added to database)";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RevealLine {
    Header { text: &'static str },
    Record { record: LeakedRecord },
    Footer { text: &'static str },
}

/// Outcome of one reveal step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// A record was printed; more to come
    Printed,
    /// The completion line was printed
    Finished,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reveal {
    pub lines: Vec<RevealLine>,
    next_record: usize,
    pub complete: bool,
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new()
    }
}

impl Reveal {
    /// Open the terminal with its header lines
    pub fn new() -> Self {
        Self {
            lines: REVEAL_HEADER
                .iter()
                .map(|&text| RevealLine::Header { text })
                .collect(),
            next_record: 0,
            complete: false,
        }
    }

    /// Print the next record, or the footer once all records are out
    pub fn step(&mut self) -> RevealStep {
        if self.complete {
            return RevealStep::Finished;
        }
        match LEAKED_DATA.get(self.next_record) {
            Some(record) => {
                self.lines.push(RevealLine::Record {
                    record: record.clone(),
                });
                self.next_record += 1;
                RevealStep::Printed
            }
            None => {
                self.lines.push(RevealLine::Footer {
                    text: REVEAL_FOOTER,
                });
                self.complete = true;
                RevealStep::Finished
            }
        }
    }

    pub fn records_shown(&self) -> usize {
        self.next_record
    }
}
