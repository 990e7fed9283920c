//! Recent-error log
//!
//! Keeps the last few errors for debugging and turns each context into the
//! message shown to the operator.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of errors to keep
pub const MAX_ERROR_RECORDS: usize = 10;

/// Where an error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorContext {
    VpnConnection,
    HostMessage,
    TargetHack,
}

impl ErrorContext {
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorContext::VpnConnection => "VPN connection problem. Checking the link.",
            ErrorContext::HostMessage | ErrorContext::TargetHack => {
                "Unexpected error. Recovering the system."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub context: ErrorContext,
    pub message: String,
    /// Overlay clock reading (ms)
    pub timestamp_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorLog {
    entries: VecDeque<ErrorRecord>,
}

impl ErrorLog {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "silent_operator_errors";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Self {
        super::load(Self::STORAGE_KEY).unwrap_or_default()
    }

    pub fn save(&self) {
        super::store(Self::STORAGE_KEY, self);
    }

    /// Record an error, dropping the oldest past the limit
    pub fn record(&mut self, context: ErrorContext, message: impl Into<String>, timestamp_ms: f64) {
        let record = ErrorRecord {
            context,
            message: message.into(),
            timestamp_ms,
        };
        log::error!("[{:?}] {}", record.context, record.message);
        self.entries.push_back(record);
        while self.entries.len() > MAX_ERROR_RECORDS {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&ErrorRecord> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        super::remove(Self::STORAGE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_recent_errors() {
        let mut log = ErrorLog::new();
        for i in 0..15 {
            log.record(ErrorContext::TargetHack, format!("e{i}"), i as f64);
        }
        assert_eq!(log.len(), MAX_ERROR_RECORDS);
        assert_eq!(log.entries().next().map(|r| r.message.as_str()), Some("e5"));
        assert_eq!(log.last().map(|r| r.message.as_str()), Some("e14"));
    }

    #[test]
    fn test_context_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorContext::VpnConnection).unwrap();
        assert_eq!(json, "\"VPN_CONNECTION\"");
    }
}
