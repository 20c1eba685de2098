//! Game state and core simulation types
//!
//! Everything the engine mutates between frames lives in `GameState`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// A droplet hit the spider; frozen until reset
    GameOver,
}

/// Fixed, ordered lane x positions for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSet {
    positions: Vec<f32>,
}

impl LaneSet {
    pub fn new(positions: Vec<f32>) -> Self {
        debug_assert!(!positions.is_empty(), "lane set must not be empty");
        Self { positions }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// X position of a lane. Panics on an out-of-range index.
    #[inline]
    pub fn x(&self, lane: usize) -> f32 {
        self.positions[lane]
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Index of the middle lane (rounding down)
    #[inline]
    pub fn middle(&self) -> usize {
        self.positions.len() / 2
    }

    /// Highest valid lane index
    #[inline]
    pub fn last(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }
}

impl From<&Tuning> for LaneSet {
    fn from(tuning: &Tuning) -> Self {
        Self::new(tuning.lanes.clone())
    }
}

/// The player's spider. Its position is always derived from the lane index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spider {
    pub lane: usize,
}

impl Spider {
    pub fn new(lane: usize) -> Self {
        Self { lane }
    }

    /// Step one lane left. Returns false at the left edge.
    pub fn step_left(&mut self) -> bool {
        if self.lane > 0 {
            self.lane -= 1;
            true
        } else {
            false
        }
    }

    /// Step one lane right. Returns false at `last_lane`.
    pub fn step_right(&mut self, last_lane: usize) -> bool {
        if self.lane < last_lane {
            self.lane += 1;
            true
        } else {
            false
        }
    }
}

/// Falling object variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Hazard: contact ends the session
    Droplet,
    /// Collectible: contact scores and consumes it
    Fly,
}

impl ObjectKind {
    /// Bounding width for this kind (objects are square)
    pub fn width(self, tuning: &Tuning) -> f32 {
        match self {
            ObjectKind::Droplet => tuning.droplet_width,
            ObjectKind::Fly => tuning.fly_width,
        }
    }
}

/// A droplet or fly falling down one lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    /// Lane x position (one of the lane set's values)
    pub x: f32,
    /// Vertical offset from the top of the field
    pub y: f32,
}

impl FallingObject {
    /// New object at the top of the field
    pub fn spawn(x: f32) -> Self {
        Self { x, y: 0.0 }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn fall(&mut self, speed: f32) {
        self.y += speed;
    }
}

/// Something that happened during the last frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    DropletSpawned { lane: usize },
    FlySpawned { lane: usize },
    FlyCollected { points: u64, bonus: bool },
    HazardHit { x: f32, y: f32 },
}

/// Session RNG with its position in the stream, so a snapshot resumes
/// exactly where it left off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    rng: Pcg32,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session RNG (seed and stream position)
    pub rng_state: RngState,
    pub score: u64,
    /// Per-frame, per-kind spawn probability
    pub spawn_rate: f64,
    /// Timestamp (ms) of the last lateral step
    pub last_move_ms: f64,
    /// Timestamp (ms) of the last bonus award
    pub last_bonus_ms: f64,
    /// Frames advanced since the last reset
    pub frame: u64,
    pub phase: GamePhase,
    pub spider: Spider,
    /// Live hazards, oldest first
    pub droplets: Vec<FallingObject>,
    /// Live collectibles, oldest first
    pub flies: Vec<FallingObject>,
    /// Events from the most recent frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session state for the given configuration
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self {
            rng_state: RngState::new(seed),
            score: 0,
            spawn_rate: tuning.initial_spawn_rate,
            last_move_ms: 0.0,
            last_bonus_ms: 0.0,
            frame: 0,
            phase: GamePhase::Running,
            spider: Spider::new(tuning.middle_lane()),
            droplets: Vec::new(),
            flies: Vec::new(),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Collection holding objects of the given kind
    pub fn objects(&self, kind: ObjectKind) -> &[FallingObject] {
        match kind {
            ObjectKind::Droplet => &self.droplets,
            ObjectKind::Fly => &self.flies,
        }
    }

    pub fn objects_mut(&mut self, kind: ObjectKind) -> &mut Vec<FallingObject> {
        match kind {
            ObjectKind::Droplet => &mut self.droplets,
            ObjectKind::Fly => &mut self.flies,
        }
    }
}
