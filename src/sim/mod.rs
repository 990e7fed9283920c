//! Quantum-lock simulation
//!
//! All minigame logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, DOM or storage dependencies

pub mod collision;
pub mod config;
pub mod difficulty;
pub mod frame;
pub mod game;
pub mod projectile;
pub mod ring;
pub mod tick;
pub mod timers;

pub use collision::{GateCheck, check_gate, crosses_band, is_aligned};
pub use config::LockConfig;
pub use difficulty::Difficulty;
pub use frame::{LockFrame, ProjectileView, RingStatus, RingView};
pub use game::{GameEvent, GamePhase, LockGame};
pub use projectile::Projectile;
pub use ring::{Ring, RingField, RingGeometry};
pub use tick::TickDriver;
pub use timers::{TimerId, Timers};
