//! Host capabilities and the explicit frame loop
//!
//! The host calls `Driver::step` once per animation frame (or as fast as it
//! likes, headless). Pausing is simply not calling it.

use crate::sim::{FrameInput, GameState, LaneSet, SimulationEngine};
use crate::tuning::Tuning;

/// Source of per-frame intents (keyboard, touch, script, AI...)
pub trait InputSource {
    fn poll(&mut self) -> FrameInput;
}

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&mut self) -> f64;
}

/// Presentation side of the host
pub trait RenderSink {
    /// Draw a running frame
    fn present(&mut self, state: &GameState, lanes: &LaneSet, tuning: &Tuning);

    /// Tell the player the session ended. Return true once acknowledged;
    /// the driver then starts a new session.
    fn acknowledge_game_over(&mut self, final_score: u64) -> bool;
}

/// Clock that advances a fixed amount per reading (headless runs, tests)
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    now: f64,
    step_ms: f64,
}

impl FixedStepClock {
    pub fn new(start_ms: f64, step_ms: f64) -> Self {
        Self {
            now: start_ms,
            step_ms,
        }
    }

    /// 60 Hz, starting at zero
    pub fn sixty_hz() -> Self {
        Self::new(0.0, 1000.0 / 60.0)
    }
}

impl Clock for FixedStepClock {
    fn now_ms(&mut self) -> f64 {
        let now = self.now;
        self.now += self.step_ms;
        now
    }
}

/// Wall clock measured from construction
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// What a single driver step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Frame advanced and presented
    Running,
    /// Session over, waiting for acknowledgement
    GameOver { final_score: u64 },
    /// Game over was acknowledged and a new session started
    Restarted { final_score: u64 },
}

/// Runs a `SimulationEngine` against host capabilities
pub struct Driver<I, C, R> {
    engine: SimulationEngine,
    input: I,
    clock: C,
    sink: R,
    sessions: u32,
}

impl<I: InputSource, C: Clock, R: RenderSink> Driver<I, C, R> {
    pub fn new(engine: SimulationEngine, input: I, clock: C, sink: R) -> Self {
        Self {
            engine,
            input,
            clock,
            sink,
            sessions: 1,
        }
    }

    /// Advance one frame: poll, advance, then present or handle game over.
    ///
    /// The frame that ends a session is not presented.
    pub fn step(&mut self) -> StepOutcome {
        let input = self.input.poll();
        let now = self.clock.now_ms();

        let (game_over, final_score) = {
            let result = self.engine.advance(&input, now);
            (result.game_over, result.state.score)
        };

        if !game_over {
            let engine = &self.engine;
            self.sink.present(engine.state(), engine.lane_set(), engine.tuning());
            return StepOutcome::Running;
        }

        if self.sink.acknowledge_game_over(final_score) {
            self.engine.reset();
            self.sessions += 1;
            log::info!("Session {} started", self.sessions);
            StepOutcome::Restarted { final_score }
        } else {
            StepOutcome::GameOver { final_score }
        }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SimulationEngine {
        &mut self.engine
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Sessions played so far, including the current one
    pub fn sessions(&self) -> u32 {
        self.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::KeyState;
    use crate::sim::FallingObject;

    #[derive(Default)]
    struct RecordingSink {
        presented: Vec<u64>,
        lanes: Vec<usize>,
        alerts: Vec<u64>,
        acknowledge: bool,
    }

    impl RenderSink for RecordingSink {
        fn present(&mut self, state: &GameState, _lanes: &LaneSet, _tuning: &Tuning) {
            self.presented.push(state.frame);
            self.lanes.push(state.spider.lane);
        }

        fn acknowledge_game_over(&mut self, final_score: u64) -> bool {
            self.alerts.push(final_score);
            self.acknowledge
        }
    }

    fn quiet_engine() -> SimulationEngine {
        let tuning = Tuning {
            initial_spawn_rate: 0.0,
            spawn_rate_increment: 0.0,
            ..Default::default()
        };
        SimulationEngine::with_tuning(tuning, 7).unwrap()
    }

    fn stage_hit(driver: &mut Driver<KeyState, FixedStepClock, RecordingSink>) {
        let engine = driver.engine_mut();
        let x = engine.spider_x();
        engine.state_mut().score = 4;
        engine.state_mut().droplets.push(FallingObject::at(x, 510.0));
    }

    #[test]
    fn test_fixed_step_clock() {
        let mut clock = FixedStepClock::new(100.0, 10.0);
        assert_eq!(clock.now_ms(), 100.0);
        assert_eq!(clock.now_ms(), 110.0);
        assert_eq!(clock.now_ms(), 120.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let first = clock.now_ms();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = clock.now_ms();
        assert!(first >= 0.0);
        assert!(second > first);
    }

    #[test]
    fn test_step_presents_running_frames() {
        let sink = RecordingSink::default();
        let mut driver = Driver::new(
            quiet_engine(),
            KeyState::new(),
            FixedStepClock::new(1000.0, 100.0),
            sink,
        );

        driver.input_mut().key_down("ArrowRight");
        for _ in 0..3 {
            assert_eq!(driver.step(), StepOutcome::Running);
        }

        assert_eq!(driver.sink().presented, vec![1, 2, 3]);
        // 1000: step, 1100: cooldown, 1200: step
        assert_eq!(driver.sink().lanes, vec![3, 3, 4]);
    }

    #[test]
    fn test_game_over_acknowledged_restarts() {
        let sink = RecordingSink {
            acknowledge: true,
            ..Default::default()
        };
        let mut driver = Driver::new(
            quiet_engine(),
            KeyState::new(),
            FixedStepClock::sixty_hz(),
            sink,
        );
        stage_hit(&mut driver);

        assert_eq!(driver.step(), StepOutcome::Restarted { final_score: 4 });
        assert_eq!(driver.sink().alerts, vec![4]);
        assert!(driver.sink().presented.is_empty());
        assert_eq!(driver.sessions(), 2);
        assert_eq!(driver.engine().state().score, 0);

        assert_eq!(driver.step(), StepOutcome::Running);
    }

    #[test]
    fn test_game_over_waits_for_acknowledgement() {
        let mut driver = Driver::new(
            quiet_engine(),
            KeyState::new(),
            FixedStepClock::sixty_hz(),
            RecordingSink::default(),
        );
        stage_hit(&mut driver);

        assert_eq!(driver.step(), StepOutcome::GameOver { final_score: 4 });
        assert_eq!(driver.step(), StepOutcome::GameOver { final_score: 4 });
        assert_eq!(driver.sink().alerts.len(), 2);
        assert!(driver.engine().is_game_over());
        assert_eq!(driver.sessions(), 1);
    }
}
