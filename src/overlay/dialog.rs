//! Confirmation prompts
//!
//! Every risky action goes through one of these. Only one can be open; the
//! overlay keeps the pending action and runs it when the prompt resolves.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    Warning,
    Danger,
    Info,
}

/// What happens if the operator confirms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConfirmAction {
    CloseUi,
    StartInjection,
    RadarScan,
    HackTarget { index: usize },
    ConnectVpn { index: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialog {
    pub title: String,
    pub message: String,
    pub kind: DialogKind,
    pub confirm_label: String,
    pub cancel_label: String,
    pub action: ConfirmAction,
}

impl Dialog {
    pub fn close_ui() -> Self {
        Self {
            title: "Shut Down System".into(),
            message: "Are you sure you want to shut down Silent Operator?".into(),
            kind: DialogKind::Danger,
            confirm_label: "Shut down".into(),
            cancel_label: "Cancel".into(),
            action: ConfirmAction::CloseUi,
        }
    }

    pub fn start_injection() -> Self {
        Self {
            title: "Intrusion Protocol".into(),
            message: "Start the intrusion into the target system? This operation can be detected."
                .into(),
            kind: DialogKind::Warning,
            confirm_label: "Start".into(),
            cancel_label: "Cancel".into(),
            action: ConfirmAction::StartInjection,
        }
    }

    pub fn radar_scan() -> Self {
        Self {
            title: "Radar Scan".into(),
            message: "Scan the local network for targets? This operation can be detected.".into(),
            kind: DialogKind::Warning,
            confirm_label: "Scan".into(),
            cancel_label: "Cancel".into(),
            action: ConfirmAction::RadarScan,
        }
    }

    pub fn hack_target(index: usize, name: &str) -> Self {
        Self {
            title: "Target Attack".into(),
            message: format!("Launch an intrusion attack against {name}?"),
            kind: DialogKind::Danger,
            confirm_label: "Attack".into(),
            cancel_label: "Cancel".into(),
            action: ConfirmAction::HackTarget { index },
        }
    }

    pub fn connect_vpn(index: usize, name: &str) -> Self {
        Self {
            title: "VPN Change".into(),
            message: format!(
                "Switch to the {name} VPN server? The current connection will be dropped."
            ),
            kind: DialogKind::Info,
            confirm_label: "Connect".into(),
            cancel_label: "Cancel".into(),
            action: ConfirmAction::ConnectVpn { index },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_carry_their_action() {
        assert_eq!(Dialog::close_ui().action, ConfirmAction::CloseUi);
        assert_eq!(Dialog::close_ui().kind, DialogKind::Danger);
        let d = Dialog::connect_vpn(2, "Tokyo 1");
        assert_eq!(d.action, ConfirmAction::ConnectVpn { index: 2 });
        assert!(d.message.contains("Tokyo 1"));
    }
}
