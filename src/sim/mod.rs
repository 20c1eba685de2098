//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - One `advance` per rendered frame, stamped with the host's clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod state;

pub use collision::{Aabb, InteractionZone};
pub use engine::{FrameInput, FrameResult, SimulationEngine};
pub use state::{
    FallingObject, GameEvent, GamePhase, GameState, LaneSet, ObjectKind, RngState, Spider,
};
