//! VPN server list

use serde::Serialize;

/// Time the fake handshake takes (ms)
pub const CONNECT_DURATION_MS: f64 = 1500.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnServer {
    pub name: &'static str,
    pub ping_ms: u32,
}

impl VpnServer {
    /// Profile slug: lower-cased, first space turned into a dash
    pub fn slug(&self) -> String {
        self.name.to_lowercase().replacen(' ', "-", 1)
    }
}

pub const VPN_SERVERS: &[VpnServer] = &[
    VpnServer {
        name: "Singapore 1",
        ping_ms: 42,
    },
    VpnServer {
        name: "Frankfurt 2",
        ping_ms: 87,
    },
    VpnServer {
        name: "New York 3",
        ping_ms: 115,
    },
    VpnServer {
        name: "Tokyo 1",
        ping_ms: 64,
    },
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnList {
    pub servers: Vec<VpnServer>,
    pub active: usize,
    /// Server currently handshaking
    pub connecting: Option<usize>,
}

impl Default for VpnList {
    fn default() -> Self {
        Self {
            servers: VPN_SERVERS.to_vec(),
            active: 0,
            connecting: None,
        }
    }
}

impl VpnList {
    /// List with the server matching `slug` marked active
    pub fn with_active_slug(slug: &str) -> Self {
        let mut list = Self::default();
        if let Some(i) = list.servers.iter().position(|s| s.slug() == slug) {
            list.active = i;
        }
        list
    }

    pub fn get(&self, index: usize) -> Option<&VpnServer> {
        self.servers.get(index)
    }

    pub fn active_server(&self) -> Option<&VpnServer> {
        self.servers.get(self.active)
    }

    /// Begin switching to `index`; false while another handshake is running
    pub fn begin_connect(&mut self, index: usize) -> bool {
        if self.connecting.is_some() || index >= self.servers.len() {
            return false;
        }
        self.connecting = Some(index);
        true
    }

    /// Finish the handshake started for `index`
    pub fn finish_connect(&mut self, index: usize) -> Option<&VpnServer> {
        if self.connecting != Some(index) {
            return None;
        }
        self.connecting = None;
        self.active = index;
        self.servers.get(index)
    }
}
