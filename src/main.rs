//! Silent Operator - native headless run
//!
//! The browser build is driven from JavaScript through `web::Nui`. Natively
//! this binary plays one intrusion against the overlay with a simple
//! autopilot and logs what happens.
//!
//! Usage: `silent-operator [easy|hard] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let difficulty = match args.next() {
        Some(name) => match silent_operator::Difficulty::from_str(&name) {
            Some(d) => d,
            None => {
                log::error!("{}", silent_operator::NuiError::UnknownDifficulty(name));
                std::process::exit(2);
            }
        },
        None => silent_operator::Difficulty::Easy,
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);

    log::info!("Silent Operator (native) starting, {} seed {}", difficulty, seed);
    autopilot::run(difficulty, seed);
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use silent_operator::overlay::{HostMessage, HostRequest, InjectState, Overlay};
    use silent_operator::persistence::ProfileState;
    use silent_operator::sim::{LockGame, is_aligned};
    use silent_operator::{Difficulty, GamePhase, Settings};

    /// Simulated display refresh (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this much simulated time (ms)
    const TIME_LIMIT_MS: f64 = 120_000.0;
    /// Fraction of the gap the autopilot aims inside
    const AIM_MARGIN: f32 = 0.5;

    pub fn run(difficulty: Difficulty, seed: u64) {
        let settings = Settings {
            difficulty,
            ..Settings::default()
        };
        let mut ui = Overlay::new(settings, ProfileState::default(), seed);
        ui.handle_message(HostMessage::Open);

        let mut attempts = 0u32;
        let mut elapsed = 0.0;
        let mut reported = None;

        while elapsed < TIME_LIMIT_MS {
            if ui.inject_state() == InjectState::Ready && ui.request_injection() {
                attempts += 1;
                log::info!("Attempt {}", attempts);
                ui.resolve_dialog(true);
            }

            if ui.game().phase() == GamePhase::Running
                && !ui.game().projectile().active
                && shot_lines_up(ui.game())
            {
                ui.fire();
            }

            ui.update(FRAME_MS);
            elapsed += FRAME_MS;

            // Toasts raised this frame are still at full lifetime
            for toast in ui
                .toasts()
                .toasts()
                .iter()
                .filter(|t| t.remaining_ms >= t.duration_ms)
            {
                log::info!("[{:?}] {}", toast.kind, toast.message);
            }

            let requests = ui.drain_host_requests();
            if let Some(req) = requests
                .into_iter()
                .find(|r| matches!(r, HostRequest::HackResult { .. }))
            {
                reported = Some(req);
                break;
            }
        }

        match reported {
            Some(req) => {
                log::info!(
                    "Lock broken after {} attempt(s) in {:.1}s; POST {} {}",
                    attempts,
                    elapsed / 1000.0,
                    req.endpoint(),
                    req.body()
                );
                log::info!("Reputation now {}", ui.profile().user.reputation);
            }
            None => log::warn!("Gave up after {} attempt(s)", attempts),
        }
    }

    /// Predict where the active gap will be when a shot fired now arrives
    fn shot_lines_up(game: &LockGame) -> bool {
        let Some(ring) = game.field().and_then(|f| f.get(game.level_index())) else {
            return false;
        };
        let config = game.config();
        let step = config.projectile_step_per_tick();
        let reach = config.entry_radius - (ring.radius + config.collision_band);
        let ticks = (reach / step).ceil().max(1.0);
        let predicted = ring.angle + ring.base_speed * config.speed_scale() * ticks;
        is_aligned(predicted, ring.gap_size * AIM_MARGIN)
    }
}
