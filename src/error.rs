//! Error types for the overlay boundary
//!
//! Game operations themselves are infallible; these cover what comes in from
//! the host and from stored configuration.

/// Rejected `LockConfig`
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("a run needs at least one gate")]
    NoLevels,

    #[error("tick rate must be positive, got {0}")]
    TickRate(f32),

    #[error("projectile step must be positive, got {0}")]
    ProjectileStep(f32),

    #[error("gate radii must shrink inward, got a step of {0}")]
    RadiusStep(f32),

    #[error("collision band must be positive, got {0}")]
    CollisionBand(f32),

    #[error("geometry and pacing values must be finite")]
    NonFinite,

    #[error("innermost gate radius {radius} must exceed the collision band {band}")]
    InnerRadius { radius: f32, band: f32 },

    #[error("outermost gate band reaches {outer} but the entry point is at {entry}")]
    EntryRadius { outer: f32, entry: f32 },
}

/// Error type for overlay operations
#[derive(thiserror::Error, Debug)]
pub enum NuiError {
    /// Host message that is not valid JSON or has an unknown action
    #[error("Invalid host message: {0}")]
    InvalidMessage(#[from] serde_json::Error),

    /// Unrecognized difficulty name
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// Unrecognized theme name
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Scan target index outside the current result list
    #[error("No scan target at index {0}")]
    UnknownTarget(usize),

    /// VPN index outside the server list
    #[error("No VPN server at index {0}")]
    UnknownVpn(usize),

    /// Invalid game configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for overlay operations
pub type Result<T> = std::result::Result<T, NuiError>;
