//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - LocalStorage backing on wasm32, no-op natively
//! - Stale or corrupt entries fall back to defaults

pub mod errors;
pub mod profile;

pub use errors::{ErrorContext, ErrorLog, ErrorRecord};
pub use profile::{NetworkStatus, OperatorProfile, ProfileState};

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

/// Current envelope format
pub const ENVELOPE_VERSION: u32 = 1;

/// Wrapper written around every stored value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            data,
        }
    }
}

/// Serialize `value` inside a current-version envelope
pub fn encode<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(&Envelope::new(value))
}

/// Decode an envelope, rejecting other versions
pub fn decode<T: DeserializeOwned>(json: &str) -> Option<T> {
    match serde_json::from_str::<Envelope<T>>(json) {
        Ok(envelope) if envelope.version == ENVELOPE_VERSION => Some(envelope.data),
        Ok(envelope) => {
            log::warn!("Discarding stored data with version {}", envelope.version);
            None
        }
        Err(e) => {
            log::warn!("Discarding unreadable stored data: {}", e);
            None
        }
    }
}

/// Read a stored value from LocalStorage
#[cfg(target_arch = "wasm32")]
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let json = storage.get_item(key).ok()??;
    decode(&json)
}

/// Write a value to LocalStorage
#[cfg(target_arch = "wasm32")]
pub fn store<T: Serialize>(key: &str, value: &T) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        match encode(value) {
            Ok(json) => {
                if storage.set_item(key, &json).is_err() {
                    log::error!("LocalStorage rejected write for {}", key);
                }
            }
            Err(e) => log::error!("Failed to encode {}: {}", key, e),
        }
    }
}

/// Remove a stored value from LocalStorage
#[cfg(target_arch = "wasm32")]
pub fn remove(key: &str) {
    if let Some(storage) = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
    {
        let _ = storage.remove_item(key);
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn store<T: Serialize>(_key: &str, _value: &T) {
    // No-op for native
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove(_key: &str) {}
