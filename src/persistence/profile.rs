//! Operator profile and network status
//!
//! The only panel state that survives a reload.

use serde::{Deserialize, Serialize};

/// Reputation granted for breaking a quantum lock
pub const WIN_REPUTATION: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorProfile {
    pub name: String,
    pub level: u32,
    pub reputation: u32,
}

impl Default for OperatorProfile {
    fn default() -> Self {
        Self {
            name: "OP_PHANTOM".to_string(),
            level: 4,
            reputation: 1250,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub status: String,
    /// Slug of the active VPN server
    pub vpn: String,
    pub trace: u32,
}

impl Default for NetworkStatus {
    fn default() -> Self {
        Self {
            status: "online".to_string(),
            vpn: "singapore-1".to_string(),
            trace: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileState {
    #[serde(default)]
    pub user: OperatorProfile,
    #[serde(default)]
    pub network: NetworkStatus,
}

impl ProfileState {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "silent_operator_state";

    pub fn load() -> Self {
        match super::load(Self::STORAGE_KEY) {
            Some(state) => {
                log::info!("Loaded operator profile");
                state
            }
            None => {
                log::info!("Using default operator profile");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        super::store(Self::STORAGE_KEY, self);
    }

    pub fn reward_win(&mut self) {
        self.user.reputation = self.user.reputation.saturating_add(WIN_REPUTATION);
    }

    pub fn set_vpn(&mut self, slug: impl Into<String>) {
        self.network.vpn = slug.into();
    }
}
