//! Per-frame simulation engine
//!
//! One `advance` call is one rendered frame: movement, spawning, difficulty
//! ramp, fall, hazard check, then fly collection, in that order.

use rand::Rng;

use super::collision::InteractionZone;
use super::state::{FallingObject, GameEvent, GamePhase, GameState, LaneSet, ObjectKind};
use crate::tuning::{MoveResolution, Tuning, TuningError};

/// Player intents for a single frame. Level-active while the key is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Catch a fly for bonus points
    pub bonus: bool,
}

/// Snapshot returned by `advance`
#[derive(Debug, Clone, Copy)]
pub struct FrameResult<'a> {
    pub state: &'a GameState,
    pub game_over: bool,
}

/// Owns the game state and advances it one frame at a time
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    tuning: Tuning,
    lanes: LaneSet,
    state: GameState,
    last_now: Option<f64>,
}

impl SimulationEngine {
    /// Engine with the reference configuration
    pub fn new(seed: u64) -> Self {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning, seed);
        Self::assemble(tuning, state)
    }

    /// Engine with a custom configuration, rejected unless it describes a
    /// playable field
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let state = GameState::new(&tuning, seed);
        Ok(Self::assemble(tuning, state))
    }

    /// Resume a session from a saved snapshot, RNG stream included
    pub fn from_state(tuning: Tuning, mut state: GameState) -> Result<Self, TuningError> {
        tuning.validate()?;
        if state.spider.lane >= tuning.lanes.len() {
            return Err(TuningError::SnapshotMismatch(format!(
                "spider lane {} outside {} lanes",
                state.spider.lane,
                tuning.lanes.len()
            )));
        }
        state.events.clear();
        log::info!(
            "Resumed session at frame {} (score {})",
            state.frame,
            state.score
        );
        Ok(Self::assemble(tuning, state))
    }

    fn assemble(tuning: Tuning, state: GameState) -> Self {
        let lanes = LaneSet::from(&tuning);
        Self {
            tuning,
            lanes,
            state,
            last_now: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for staging scripted scenarios
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn lane_set(&self) -> &LaneSet {
        &self.lanes
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// X position of the spider's current lane
    pub fn spider_x(&self) -> f32 {
        self.lanes.x(self.state.spider.lane)
    }

    /// Advance the game by one frame. `now` is a monotonic clock in ms.
    ///
    /// Once a droplet has hit the spider the state is frozen: further calls
    /// return the final snapshot with `game_over` set until `reset`.
    pub fn advance(&mut self, input: &FrameInput, now: f64) -> FrameResult<'_> {
        if let Some(prev) = self.last_now {
            debug_assert!(now >= prev, "timestamps must be monotonic ({now} < {prev})");
        }
        self.last_now = Some(now);

        if self.state.is_game_over() {
            return self.result();
        }

        self.state.events.clear();
        self.state.frame += 1;

        self.resolve_movement(input, now);
        self.spawn_objects();
        self.state.spawn_rate += self.tuning.spawn_rate_increment;
        self.apply_fall();

        if self.check_hazards() {
            return self.result();
        }

        self.collect_flies(input, now);
        self.result()
    }

    /// Start a new session. Cooldown timestamps carry over unless
    /// `reset_cooldowns_on_reset` is set.
    pub fn reset(&mut self) {
        let state = &mut self.state;
        state.score = 0;
        state.spider.lane = self.lanes.middle();
        state.spawn_rate = self.tuning.initial_spawn_rate;
        state.droplets.clear();
        state.flies.clear();
        state.events.clear();
        state.frame = 0;
        state.phase = GamePhase::Running;

        if self.tuning.reset_cooldowns_on_reset {
            state.last_move_ms = 0.0;
            state.last_bonus_ms = 0.0;
        }

        log::info!("Session reset");
    }

    fn result(&self) -> FrameResult<'_> {
        FrameResult {
            state: &self.state,
            game_over: self.state.is_game_over(),
        }
    }

    fn resolve_movement(&mut self, input: &FrameInput, now: f64) {
        // Gate is checked once, against the timestamp on entry
        if now - self.state.last_move_ms < self.tuning.move_cooldown_ms {
            return;
        }

        let mut stepped = false;
        if input.move_left && self.state.spider.step_left() {
            self.state.last_move_ms = now;
            stepped = true;
        }

        let right_allowed = match self.tuning.move_resolution {
            MoveResolution::Independent => true,
            MoveResolution::FirstOnly => !stepped,
        };
        if input.move_right && right_allowed && self.state.spider.step_right(self.lanes.last()) {
            self.state.last_move_ms = now;
        }
    }

    fn spawn_objects(&mut self) {
        for kind in [ObjectKind::Droplet, ObjectKind::Fly] {
            let roll: f64 = self.state.rng_state.rng_mut().random();
            if roll < self.state.spawn_rate {
                let lane = self.state.rng_state.rng_mut().random_range(0..self.lanes.len());
                let x = self.lanes.x(lane);
                self.state.objects_mut(kind).push(FallingObject::spawn(x));

                let event = match kind {
                    ObjectKind::Droplet => GameEvent::DropletSpawned { lane },
                    ObjectKind::Fly => GameEvent::FlySpawned { lane },
                };
                self.state.events.push(event);
                log::trace!("Spawned {kind:?} in lane {lane} (rate {:.6})", self.state.spawn_rate);
            }
        }
    }

    fn apply_fall(&mut self) {
        let speed = self.tuning.fall_speed;
        let floor = self.tuning.field_height;
        for objects in [&mut self.state.droplets, &mut self.state.flies] {
            for object in objects.iter_mut() {
                object.fall(speed);
            }
            objects.retain(|o| o.y <= floor);
        }
    }

    fn zone(&self) -> InteractionZone {
        InteractionZone::new(
            self.spider_x(),
            self.tuning.spider_width,
            self.tuning.zone_top(),
            self.tuning.zone_bottom(),
        )
    }

    /// Returns true if a droplet ended the session
    fn check_hazards(&mut self) -> bool {
        let zone = self.zone();
        let width = ObjectKind::Droplet.width(&self.tuning);

        // Newest droplet first
        let hit = self
            .state
            .droplets
            .iter()
            .rev()
            .find(|d| zone.contains(d, width))
            .copied();

        match hit {
            Some(droplet) => {
                self.state.phase = GamePhase::GameOver;
                self.state.events.push(GameEvent::HazardHit {
                    x: droplet.x,
                    y: droplet.y,
                });
                log::info!(
                    "Game over at frame {}: final score {}",
                    self.state.frame,
                    self.state.score
                );
                true
            }
            None => false,
        }
    }

    fn collect_flies(&mut self, input: &FrameInput, now: f64) {
        let zone = self.zone();
        let width = ObjectKind::Fly.width(&self.tuning);

        // Newest fly first, so it is the one eligible for the bonus
        for i in (0..self.state.flies.len()).rev() {
            if !zone.contains(&self.state.flies[i], width) {
                continue;
            }

            let bonus = input.bonus && now - self.state.last_bonus_ms > self.tuning.bonus_cooldown_ms;
            let points = if bonus {
                self.state.last_bonus_ms = now;
                self.tuning.fly_bonus_points
            } else {
                self.tuning.fly_points
            };

            self.state.score += points;
            self.state.flies.remove(i);
            self.state.events.push(GameEvent::FlyCollected { points, bonus });
            log::debug!("Fly collected: +{points} (score {})", self.state.score);
        }
    }
}
