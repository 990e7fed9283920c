//! Panel state for the operator overlay
//!
//! `Overlay` is everything the browser page shows, minus the DOM: current
//! page, confirmation prompt, toasts, radar and VPN panels, the intrusion
//! button and the post-win reveal. It owns the `LockGame` and a single timer
//! queue for every delayed step, all advanced by [`Overlay::update`].

pub mod dialog;
pub mod host;
pub mod radar;
pub mod reveal;
pub mod toast;
pub mod vpn;

pub use dialog::{ConfirmAction, Dialog, DialogKind};
pub use host::{HostMessage, HostRequest};
pub use radar::{Radar, RadarStatus, ScanTarget};
pub use reveal::{Reveal, RevealLine, RevealStep};
pub use toast::{Toast, ToastKind, ToastQueue};
pub use vpn::{VpnList, VpnServer};

use serde::Serialize;

use crate::error::{NuiError, Result};
use crate::persistence::{ErrorContext, ErrorLog, ProfileState};
use crate::settings::Settings;
use crate::sim::{Difficulty, GameEvent, LockFrame, LockGame, Timers};

/// Fake "protocol starting" delay before the lock appears (ms)
pub const INJECTION_DELAY_MS: f64 = 1000.0;
/// Delay between picking a scan target and the intrusion prompt (ms)
pub const TARGET_PROMPT_DELAY_MS: f64 = 500.0;
/// Lifetime of short confirmations (ms)
pub const SHORT_TOAST_MS: f64 = 2000.0;
/// Lifetime of error toasts (ms)
pub const ERROR_TOAST_MS: f64 = 4000.0;

/// Panel pages, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Dashboard,
    HackTools,
    Radar,
    Vpn,
    Settings,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::HackTools,
        Page::Radar,
        Page::Vpn,
        Page::Settings,
    ];

    fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    /// Neighbouring page, wrapping at both ends
    pub fn cycle(&self, forward: bool) -> Page {
        let len = Self::ALL.len();
        let i = self.index();
        let next = if forward { (i + 1) % len } else { (i + len - 1) % len };
        Self::ALL[next]
    }
}

/// State of the intrusion button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InjectState {
    #[default]
    Ready,
    /// Waiting out the fake start-up delay
    Loading,
    /// Lock running; the button fires
    Armed,
    /// Lock failed; waiting for its auto-reset
    Failed,
    /// Lock broken; reveal pending or playing
    Granted,
    /// Reveal finished and reported to the host
    Complete,
}

impl InjectState {
    pub fn label(&self) -> &'static str {
        match self {
            InjectState::Ready => "START SEQUENCE",
            InjectState::Loading => "PROTOCOL STARTING...",
            InjectState::Armed => "BREAK LOCK [SPACE]",
            InjectState::Failed => "CONNECTION ERROR",
            InjectState::Granted => "ACCESS GRANTED",
            InjectState::Complete => "MISSION COMPLETE",
        }
    }

    pub fn enabled(&self) -> bool {
        matches!(self, InjectState::Ready | InjectState::Armed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverlayTimer {
    BeginInjection,
    OpenInjectionPrompt,
    ScanComplete,
    VpnConnected { index: usize },
    RevealStart,
    RevealStep,
}

impl OverlayTimer {
    /// Timers that belong to one intrusion attempt
    fn is_game_sequence(&self) -> bool {
        matches!(
            self,
            OverlayTimer::BeginInjection
                | OverlayTimer::OpenInjectionPrompt
                | OverlayTimer::RevealStart
                | OverlayTimer::RevealStep
        )
    }
}

/// Serializable snapshot of the panel for the page to render
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayView<'a> {
    pub visible: bool,
    pub page: Page,
    pub ip_address: Option<&'a str>,
    pub inject_state: InjectState,
    pub inject_label: &'static str,
    pub inject_enabled: bool,
    pub game_active: bool,
    pub radar: &'a Radar,
    pub radar_label: &'static str,
    pub vpn: &'a VpnList,
    pub dialog: Option<&'a Dialog>,
    pub toasts: &'a [Toast],
    pub reveal: Option<&'a Reveal>,
    pub profile: &'a ProfileState,
    pub settings: &'a Settings,
}

#[derive(Debug)]
pub struct Overlay {
    visible: bool,
    page: Page,
    settings: Settings,
    profile: ProfileState,
    errors: ErrorLog,
    game: LockGame,
    inject: InjectState,
    toasts: ToastQueue,
    dialog: Option<Dialog>,
    radar: Radar,
    vpn: VpnList,
    reveal: Option<Reveal>,
    timers: Timers<OverlayTimer>,
    outbox: Vec<HostRequest>,
    ip_address: Option<String>,
}

impl Overlay {
    pub fn new(settings: Settings, profile: ProfileState, seed: u64) -> Self {
        let vpn = VpnList::with_active_slug(&profile.network.vpn);
        Self {
            visible: false,
            page: Page::default(),
            settings,
            profile,
            errors: ErrorLog::new(),
            game: LockGame::new(seed),
            inject: InjectState::default(),
            toasts: ToastQueue::new(),
            dialog: None,
            radar: Radar::default(),
            vpn,
            reveal: None,
            timers: Timers::new(),
            outbox: Vec::new(),
            ip_address: None,
        }
    }

    /// Overlay restored from storage
    pub fn load(seed: u64) -> Self {
        let mut overlay = Self::new(Settings::load(), ProfileState::load(), seed);
        overlay.errors = ErrorLog::load();
        overlay
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn profile(&self) -> &ProfileState {
        &self.profile
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    pub fn game(&self) -> &LockGame {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut LockGame {
        &mut self.game
    }

    pub fn inject_state(&self) -> InjectState {
        self.inject
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn radar(&self) -> &Radar {
        &self.radar
    }

    pub fn vpn(&self) -> &VpnList {
        &self.vpn
    }

    pub fn reveal(&self) -> Option<&Reveal> {
        self.reveal.as_ref()
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    pub fn is_game_active(&self) -> bool {
        self.game.is_running()
    }

    // === Host protocol ===

    pub fn handle_message(&mut self, message: HostMessage) {
        match message {
            HostMessage::Open => {
                self.visible = true;
                log::info!("Overlay opened");
            }
            HostMessage::Close => {
                self.visible = false;
                self.stop_game_sequence();
                log::info!("Overlay closed by host");
            }
            HostMessage::UpdateStatus { ip } => {
                if let Some(ip) = ip {
                    self.ip_address = Some(ip);
                }
            }
        }
    }

    /// Parse and apply a raw host message; bad input is recorded, not applied
    pub fn handle_message_json(&mut self, json: &str) -> Result<()> {
        match HostMessage::parse(json) {
            Ok(message) => {
                self.handle_message(message);
                Ok(())
            }
            Err(e) => {
                log::warn!("Rejected host message: {}", e);
                self.report_error(ErrorContext::HostMessage, &e, false);
                Err(e)
            }
        }
    }

    /// Take the requests queued for the host process
    pub fn drain_host_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.outbox)
    }

    // === Navigation & input ===

    pub fn select_page(&mut self, page: Page) {
        self.page = page;
    }

    pub fn cycle_page(&mut self, forward: bool) {
        self.page = self.page.cycle(forward);
    }

    /// Keyboard input by `KeyboardEvent.code` (or `key`)
    pub fn key_down(&mut self, code: &str) {
        match code {
            "Escape" => {
                if self.dialog.is_some() {
                    self.resolve_dialog(false);
                } else {
                    self.request_close();
                }
            }
            "Space" | " " => {
                self.fire();
            }
            _ => {}
        }
    }

    /// Fire the lock projectile if a run is active
    pub fn fire(&mut self) -> bool {
        self.game.fire()
    }

    /// Intrusion button: fires while armed, otherwise asks to start
    pub fn press_inject(&mut self) {
        if self.inject == InjectState::Armed {
            self.fire();
        } else {
            self.request_injection();
        }
    }

    // === Prompts ===

    fn open_dialog(&mut self, dialog: Dialog) -> bool {
        if self.dialog.is_some() {
            log::debug!("Prompt already open, ignoring {:?}", dialog.action);
            return false;
        }
        self.dialog = Some(dialog);
        true
    }

    pub fn request_close(&mut self) -> bool {
        self.open_dialog(Dialog::close_ui())
    }

    pub fn request_injection(&mut self) -> bool {
        if self.game.is_running() || self.inject != InjectState::Ready {
            return false;
        }
        self.open_dialog(Dialog::start_injection())
    }

    pub fn request_scan(&mut self) -> bool {
        if self.radar.is_scanning() {
            return false;
        }
        self.open_dialog(Dialog::radar_scan())
    }

    pub fn request_target_hack(&mut self, index: usize) -> Result<bool> {
        let Some(name) = self.radar.target(index).map(|t| t.name) else {
            let err = NuiError::UnknownTarget(index);
            self.report_error(ErrorContext::TargetHack, &err, true);
            return Err(err);
        };
        Ok(self.open_dialog(Dialog::hack_target(index, name)))
    }

    pub fn request_vpn(&mut self, index: usize) -> Result<bool> {
        let Some(name) = self.vpn.get(index).map(|s| s.name) else {
            let err = NuiError::UnknownVpn(index);
            self.report_error(ErrorContext::VpnConnection, &err, true);
            return Err(err);
        };
        if self.vpn.connecting.is_some() {
            return Ok(false);
        }
        Ok(self.open_dialog(Dialog::connect_vpn(index, name)))
    }

    /// Answer the open prompt; the action runs only when confirmed
    pub fn resolve_dialog(&mut self, confirmed: bool) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        if !confirmed {
            log::debug!("Prompt cancelled: {:?}", dialog.action);
            return;
        }
        match dialog.action {
            ConfirmAction::CloseUi => self.close_ui(),
            ConfirmAction::StartInjection => self.begin_injection(),
            ConfirmAction::RadarScan => self.begin_scan(),
            ConfirmAction::HackTarget { index } => self.hack_target(index),
            ConfirmAction::ConnectVpn { index } => self.begin_vpn(index),
        }
    }

    // === Actions ===

    fn close_ui(&mut self) {
        self.stop_game_sequence();
        self.outbox.push(HostRequest::CloseUi);
        self.toast(ToastKind::Info, "Shutting the system down safely...", SHORT_TOAST_MS);
        log::info!("Close requested by operator");
    }

    fn begin_injection(&mut self) {
        if self.game.is_running() || self.inject != InjectState::Ready {
            return;
        }
        self.inject = InjectState::Loading;
        self.timers
            .schedule(INJECTION_DELAY_MS, OverlayTimer::BeginInjection);
    }

    fn begin_scan(&mut self) {
        if self.radar.begin_scan() {
            self.timers
                .schedule(radar::SCAN_DURATION_MS, OverlayTimer::ScanComplete);
            log::info!("Radar scan started");
        }
    }

    fn hack_target(&mut self, index: usize) {
        let Some(name) = self.radar.target(index).map(|t| t.name) else {
            return;
        };
        self.select_page(Page::HackTools);
        self.timers
            .schedule(TARGET_PROMPT_DELAY_MS, OverlayTimer::OpenInjectionPrompt);
        self.toast(ToastKind::Info, format!("{name} selected as target"), SHORT_TOAST_MS);
    }

    fn begin_vpn(&mut self, index: usize) {
        if self.vpn.begin_connect(index) {
            self.timers
                .schedule(vpn::CONNECT_DURATION_MS, OverlayTimer::VpnConnected { index });
        }
    }

    /// Stop the lock and drop every pending step of the current attempt
    fn stop_game_sequence(&mut self) {
        self.game.stop();
        let cancelled = self.timers.cancel_where(|t| t.is_game_sequence());
        if cancelled > 0 {
            log::debug!("Cancelled {} pending intrusion steps", cancelled);
        }
        self.reveal = None;
        self.inject = InjectState::Ready;
    }

    // === Settings ===

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        self.settings.save();
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.save();
    }

    // === Clock ===

    /// Advance the panel by `elapsed_ms` of real time
    pub fn update(&mut self, elapsed_ms: f64) {
        let elapsed_ms = if elapsed_ms.is_finite() {
            elapsed_ms.max(0.0)
        } else {
            0.0
        };
        self.toasts.advance(elapsed_ms);
        // Clock first, so delays scheduled by game events start from now
        let due = self.timers.advance(elapsed_ms);

        self.game.update(elapsed_ms);
        for event in self.game.drain_events() {
            self.on_game_event(event);
        }

        for timer in due {
            self.on_timer(timer);
        }
    }

    fn on_game_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Started { difficulty } => {
                log::debug!("Lock run started on {}", difficulty);
            }
            GameEvent::Advanced { level_index } => {
                log::debug!("Gate cleared, {} of {}", level_index, self.game.max_levels());
            }
            GameEvent::Failed { .. } => {
                self.inject = InjectState::Failed;
                self.toast(
                    ToastKind::Error,
                    "Intrusion detected! System is protecting itself...",
                    3000.0,
                );
            }
            GameEvent::Won => {
                self.inject = InjectState::Granted;
                self.toast(ToastKind::Success, "System successfully compromised!", 3000.0);
                self.profile.reward_win();
                self.profile.save();
                self.timers
                    .schedule(reveal::REVEAL_DELAY_MS, OverlayTimer::RevealStart);
            }
            GameEvent::Reset => {
                if self.inject == InjectState::Failed {
                    self.inject = InjectState::Ready;
                }
            }
            GameEvent::Stopped => {}
        }
    }

    fn on_timer(&mut self, timer: OverlayTimer) {
        match timer {
            OverlayTimer::BeginInjection => {
                if self.inject == InjectState::Loading {
                    self.game.start(self.settings.difficulty);
                    self.inject = InjectState::Armed;
                    self.toast(ToastKind::Success, "Intrusion protocol active", SHORT_TOAST_MS);
                }
            }
            OverlayTimer::OpenInjectionPrompt => {
                self.request_injection();
            }
            OverlayTimer::ScanComplete => {
                let found = self.radar.complete_scan();
                self.toast(ToastKind::Success, format!("{found} targets found"), SHORT_TOAST_MS);
            }
            OverlayTimer::VpnConnected { index } => {
                let connected = self
                    .vpn
                    .finish_connect(index)
                    .map(|server| (server.name, server.slug()));
                if let Some((name, slug)) = connected {
                    self.profile.set_vpn(slug);
                    self.profile.save();
                    self.toast(
                        ToastKind::Success,
                        format!("{name} connection established"),
                        SHORT_TOAST_MS,
                    );
                    log::info!("VPN switched to {}", name);
                }
            }
            OverlayTimer::RevealStart => {
                self.reveal = Some(Reveal::new());
                self.timers
                    .schedule(reveal::REVEAL_STEP_MS, OverlayTimer::RevealStep);
            }
            OverlayTimer::RevealStep => {
                let step = self.reveal.as_mut().map(|r| r.step());
                match step {
                    Some(RevealStep::Printed) => {
                        self.timers
                            .schedule(reveal::REVEAL_STEP_MS, OverlayTimer::RevealStep);
                    }
                    Some(RevealStep::Finished) => {
                        self.inject = InjectState::Complete;
                        self.game.acknowledge();
                        self.outbox.push(HostRequest::HackResult { success: true });
                        log::info!("Data reveal complete, result sent to host");
                    }
                    None => {}
                }
            }
        }
    }

    // === Feedback ===

    fn toast(&mut self, kind: ToastKind, message: impl Into<String>, duration_ms: f64) {
        self.toasts.push(kind, message, duration_ms);
    }

    /// Toast with the configured default lifetime
    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) {
        let duration = self.settings.toast_duration_ms as f64;
        self.toast(kind, message, duration);
    }

    pub fn dismiss_toast(&mut self, id: u32) -> bool {
        self.toasts.dismiss(id)
    }

    /// Record an error and optionally tell the operator about it
    pub fn report_error(&mut self, context: ErrorContext, error: &NuiError, show_to_user: bool) {
        self.errors
            .record(context, error.to_string(), self.timers.now_ms());
        self.errors.save();
        if show_to_user {
            self.toast(ToastKind::Error, context.user_message(), ERROR_TOAST_MS);
        }
    }

    // === Snapshots ===

    pub fn view(&self) -> OverlayView<'_> {
        OverlayView {
            visible: self.visible,
            page: self.page,
            ip_address: self.ip_address.as_deref(),
            inject_state: self.inject,
            inject_label: self.inject.label(),
            inject_enabled: self.inject.enabled(),
            game_active: self.game.is_running(),
            radar: &self.radar,
            radar_label: self.radar.status.label(),
            vpn: &self.vpn,
            dialog: self.dialog.as_ref(),
            toasts: self.toasts.toasts(),
            reveal: self.reveal.as_ref(),
            profile: &self.profile,
            settings: &self.settings,
        }
    }

    pub fn frame(&self) -> LockFrame {
        self.game.frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> Overlay {
        Overlay::new(Settings::default(), ProfileState::default(), 42)
    }

    #[test]
    fn test_page_cycle_wraps() {
        assert_eq!(Page::Dashboard.cycle(false), Page::Settings);
        assert_eq!(Page::Settings.cycle(true), Page::Dashboard);
        assert_eq!(Page::HackTools.cycle(true), Page::Radar);
    }

    #[test]
    fn test_host_open_close() {
        let mut ui = overlay();
        ui.handle_message_json(r#"{"action":"open"}"#).unwrap();
        assert!(ui.is_visible());
        ui.handle_message_json(r#"{"action":"updateStatus","ip":"192.168.0.12"}"#)
            .unwrap();
        assert_eq!(ui.ip_address(), Some("192.168.0.12"));
        ui.handle_message_json(r#"{"action":"close"}"#).unwrap();
        assert!(!ui.is_visible());
    }

    #[test]
    fn test_malformed_message_is_recorded() {
        let mut ui = overlay();
        assert!(ui.handle_message_json("{oops").is_err());
        assert_eq!(ui.errors().len(), 1);
        assert_eq!(
            ui.errors().last().map(|r| r.context),
            Some(ErrorContext::HostMessage)
        );
        assert!(ui.toasts().is_empty());
    }

    #[test]
    fn test_escape_cancels_prompt_before_closing() {
        let mut ui = overlay();
        assert!(ui.request_scan());
        ui.key_down("Escape");
        assert!(ui.dialog().is_none());
        assert!(!ui.radar().is_scanning());

        ui.key_down("Escape");
        assert_eq!(ui.dialog().map(|d| d.action), Some(ConfirmAction::CloseUi));
    }

    #[test]
    fn test_only_one_prompt_at_a_time() {
        let mut ui = overlay();
        assert!(ui.request_scan());
        assert!(!ui.request_close());
        assert_eq!(ui.dialog().map(|d| d.action), Some(ConfirmAction::RadarScan));
    }

    #[test]
    fn test_unknown_selection_errors() {
        let mut ui = overlay();
        assert!(matches!(ui.request_target_hack(0), Err(NuiError::UnknownTarget(0))));
        assert_eq!(
            ui.errors().last().map(|r| r.context),
            Some(ErrorContext::TargetHack)
        );
        assert!(matches!(ui.request_vpn(9), Err(NuiError::UnknownVpn(9))));
        assert_eq!(
            ui.errors().last().map(|r| r.context),
            Some(ErrorContext::VpnConnection)
        );

        let toasts = ui.toasts().toasts();
        assert_eq!(toasts.len(), 2);
        assert!(toasts.iter().all(|t| t.kind == ToastKind::Error));
        assert_eq!(
            toasts[1].message,
            ErrorContext::VpnConnection.user_message()
        );
        assert!(ui.dialog().is_none());
    }

    #[test]
    fn test_nan_frame_keeps_toasts() {
        let mut ui = overlay();
        ui.notify(ToastKind::Info, "still here");
        ui.update(f64::NAN);
        assert_eq!(ui.toasts().len(), 1);
        ui.update(3000.0);
        assert!(ui.toasts().is_empty());
    }

    #[test]
    fn test_notify_uses_settings_duration() {
        let mut ui = overlay();
        ui.notify(ToastKind::Warning, "trace rising");
        assert_eq!(ui.toasts().latest().map(|t| t.duration_ms), Some(3000.0));
    }
}
