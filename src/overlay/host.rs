//! Messages exchanged with the hosting game process
//!
//! Inbound messages arrive as JSON tagged by `action`. Outbound requests are
//! queued; the page delivers them to the host resource however it likes.

use serde::{Deserialize, Serialize};

use crate::error::NuiError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostMessage {
    Open,
    Close,
    UpdateStatus {
        #[serde(default)]
        ip: Option<String>,
    },
}

impl HostMessage {
    pub fn parse(json: &str) -> Result<Self, NuiError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "endpoint")]
pub enum HostRequest {
    /// Operator closed the panel
    #[serde(rename = "closeUI")]
    CloseUi,
    /// Lock broken and reveal finished
    #[serde(rename = "hackResult")]
    HackResult { success: bool },
}

impl HostRequest {
    /// Callback name on the host resource
    pub fn endpoint(&self) -> &'static str {
        match self {
            HostRequest::CloseUi => "closeUI",
            HostRequest::HackResult { .. } => "hackResult",
        }
    }

    /// JSON request body
    pub fn body(&self) -> String {
        let body = match self {
            HostRequest::CloseUi => serde_json::json!({}),
            HostRequest::HackResult { success } => serde_json::json!({ "success": success }),
        };
        body.to_string()
    }
}
