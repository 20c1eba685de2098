//! Spider Drop - A lane-dodging arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (movement, spawning, fall, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `platform`: Host abstraction (input, clock, presentation) and the driver loop
//! - `renderer`: Draw-list construction from a state snapshot

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use sim::{FrameInput, FrameResult, GamePhase, GameState, SimulationEngine};
pub use tuning::{MoveResolution, Tuning, TuningError};

/// Reference game configuration constants
pub mod consts {
    /// X positions of the five vertical lanes
    pub const LANE_POSITIONS: [f32; 5] = [100.0, 200.0, 300.0, 400.0, 500.0];

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Spider bounding box
    pub const SPIDER_WIDTH: f32 = 40.0;
    pub const SPIDER_HEIGHT: f32 = 40.0;

    /// Falling object bounding widths (objects are square)
    pub const DROPLET_WIDTH: f32 = 30.0;
    pub const FLY_WIDTH: f32 = 30.0;

    /// Minimum time between lateral steps (ms, inclusive)
    pub const MOVE_COOLDOWN_MS: f64 = 200.0;
    /// Minimum time between bonus awards (ms, exclusive)
    pub const BONUS_COOLDOWN_MS: f64 = 500.0;

    /// Per-frame, per-kind spawn probability at session start
    pub const INITIAL_SPAWN_RATE: f64 = 0.005;
    /// Added to the spawn rate every frame, no cap
    pub const SPAWN_RATE_INCREMENT: f64 = 0.000_001;

    /// Vertical fall per frame (pixels)
    pub const FALL_SPEED: f32 = 3.0;

    /// Interaction zone band, measured up from the field bottom
    pub const ZONE_TOP_OFFSET: f32 = 100.0;
    pub const ZONE_BOTTOM_OFFSET: f32 = 50.0;

    /// Fly awards
    pub const FLY_POINTS: u64 = 1;
    pub const FLY_BONUS_POINTS: u64 = 2;
}
