//! Quantum-lock run state machine
//!
//! `Idle → Running → {Failed, Won} → Idle`. A failed run returns to idle on
//! its own after `fail_reset_ms`; a won run waits for the host to finish its
//! reveal and call [`LockGame::acknowledge`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{GateCheck, check_gate};
use super::config::LockConfig;
use super::difficulty::Difficulty;
use super::frame::LockFrame;
use super::projectile::Projectile;
use super::ring::{RingField, RingGeometry};
use super::tick::TickDriver;
use super::timers::Timers;
use crate::error::ConfigError;

/// Current phase of a lock run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// No run; waiting for `start`
    Idle,
    /// Gates rotating, projectile may be fired
    Running,
    /// Missed a gate; auto-resets after the fail delay
    Failed,
    /// Every gate passed; waiting for the host's reveal to finish
    Won,
}

/// Lifecycle notifications for the host UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    Started { difficulty: Difficulty },
    /// A gate was passed; `level_index` is the gate now active
    Advanced { level_index: usize },
    /// The shot hit gate `level_index`
    Failed { level_index: usize, reset_in_ms: f64 },
    Won,
    /// Run aborted by `stop`
    Stopped,
    /// Failed or won run returned to idle
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockTimer {
    FailReset,
}

/// One quantum-lock instance, owned by whoever drives the overlay
#[derive(Debug, Clone)]
pub struct LockGame {
    config: LockConfig,
    rng: Pcg32,
    phase: GamePhase,
    difficulty: Difficulty,
    level_index: usize,
    field: Option<RingField>,
    projectile: Projectile,
    driver: TickDriver,
    timers: Timers<LockTimer>,
    events: Vec<GameEvent>,
}

impl LockGame {
    /// Game with the reference geometry and pacing
    pub fn new(seed: u64) -> Self {
        Self::build(LockConfig::default(), seed)
    }

    pub fn with_config(config: LockConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: LockConfig, seed: u64) -> Self {
        let driver = TickDriver::new(config.tick_interval_ms());
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            difficulty: Difficulty::default(),
            level_index: 0,
            field: None,
            projectile: Projectile::default(),
            driver,
            timers: Timers::new(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn max_levels(&self) -> usize {
        self.config.max_levels
    }

    pub fn field(&self) -> Option<&RingField> {
        self.field.as_ref()
    }

    pub fn field_mut(&mut self) -> Option<&mut RingField> {
        self.field.as_mut()
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn driver(&self) -> &TickDriver {
        &self.driver
    }

    /// Delayed transitions still waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn geometry(&self) -> RingGeometry {
        RingGeometry {
            base_radius: self.config.base_radius,
            radius_step: self.config.radius_step,
        }
    }

    /// Begin a run with freshly randomized gates; no-op while running
    pub fn start(&mut self, difficulty: Difficulty) {
        if self.is_running() {
            log::debug!("start ignored: run already active");
            return;
        }
        let field = RingField::initialize(
            self.config.max_levels,
            difficulty,
            self.geometry(),
            &mut self.rng,
        );
        self.begin(difficulty, field);
    }

    /// Begin a run on hand-built gates; no-op while running
    pub fn start_with_field(&mut self, difficulty: Difficulty, field: RingField) {
        if self.is_running() {
            log::debug!("start ignored: run already active");
            return;
        }
        assert_eq!(
            field.len(),
            self.config.max_levels,
            "ring field must have one ring per level"
        );
        for ring in field.rings() {
            assert!(
                ring.radius > self.config.collision_band
                    && ring.radius + self.config.collision_band < self.config.entry_radius,
                "ring radius {} outside the projectile path",
                ring.radius
            );
            assert!(
                ring.gap_size > 0.0,
                "ring gap {} can never be passed",
                ring.gap_size
            );
        }
        self.begin(difficulty, field);
    }

    fn begin(&mut self, difficulty: Difficulty, field: RingField) {
        // A reset still pending from the previous run must not hit this one
        self.timers.clear();
        self.difficulty = difficulty;
        self.level_index = 0;
        self.projectile.reset();
        self.field = Some(field);
        self.phase = GamePhase::Running;
        self.driver.start();
        self.events.push(GameEvent::Started { difficulty });
        log::info!("Quantum lock started ({})", difficulty);
    }

    /// Launch the projectile; false if not running or a shot is in flight
    pub fn fire(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.projectile.fire()
    }

    /// Abort whatever is happening and return to idle; safe to repeat
    pub fn stop(&mut self) {
        self.driver.cancel();
        self.timers.clear();
        if self.phase == GamePhase::Idle && self.field.is_none() {
            return;
        }
        self.clear_run();
        self.events.push(GameEvent::Stopped);
        log::info!("Quantum lock stopped");
    }

    /// Host finished the post-win reveal
    pub fn acknowledge(&mut self) {
        if self.phase == GamePhase::Won {
            self.clear_run();
            self.events.push(GameEvent::Reset);
        }
    }

    fn clear_run(&mut self) {
        self.phase = GamePhase::Idle;
        self.level_index = 0;
        self.field = None;
        self.projectile.reset();
    }

    /// Feed real elapsed time: fires due timers, then runs the ticks it buys
    ///
    /// Returns the number of logic ticks executed.
    pub fn update(&mut self, elapsed_ms: f64) -> u32 {
        for timer in self.timers.advance(elapsed_ms) {
            match timer {
                LockTimer::FailReset => {
                    if self.phase == GamePhase::Failed {
                        self.clear_run();
                        self.events.push(GameEvent::Reset);
                        log::debug!("Quantum lock reset after failure");
                    }
                }
            }
        }

        let due = self.driver.advance(elapsed_ms);
        let mut ran = 0;
        for _ in 0..due {
            if !self.is_running() {
                break;
            }
            self.tick();
            ran += 1;
        }
        ran
    }

    /// One fixed logic step
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }
        let scale = self.config.speed_scale();
        let field = self
            .field
            .as_mut()
            .expect("running lock always owns a ring field");
        field.advance(self.level_index, scale);

        if !self.projectile.active {
            return;
        }
        let (prev, cur) = self
            .projectile
            .advance(self.config.entry_radius, self.config.projectile_step_per_tick());
        let ring = &field.rings()[self.level_index];
        match check_gate(ring, prev, cur, self.config.collision_band) {
            None => {}
            Some(GateCheck::Pass) => self.pass_gate(),
            Some(GateCheck::Miss) => self.fail(),
        }
    }

    fn pass_gate(&mut self) {
        self.projectile.reset();
        self.level_index += 1;
        if self.level_index >= self.config.max_levels {
            self.phase = GamePhase::Won;
            self.driver.cancel();
            self.events.push(GameEvent::Won);
            log::info!("Quantum lock broken ({})", self.difficulty);
        } else {
            self.events.push(GameEvent::Advanced {
                level_index: self.level_index,
            });
            log::debug!("Gate cleared, now on {}/{}", self.level_index, self.config.max_levels);
        }
    }

    fn fail(&mut self) {
        self.phase = GamePhase::Failed;
        self.driver.cancel();
        self.projectile.reset();
        self.timers
            .schedule(self.config.fail_reset_ms, LockTimer::FailReset);
        self.events.push(GameEvent::Failed {
            level_index: self.level_index,
            reset_in_ms: self.config.fail_reset_ms,
        });
        log::info!("Quantum lock failed at gate {}", self.level_index + 1);
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Renderable snapshot of the current state
    pub fn frame(&self) -> LockFrame {
        LockFrame::capture(self)
    }
}
