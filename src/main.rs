//! Spider Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Performance, Window};

    use spider_drop::platform::{Clock, Driver, InputSource, KeyState, RenderSink};
    use spider_drop::renderer::{build_sprites, score_label, sprites::SCORE_ANCHOR};
    use spider_drop::sim::{FrameInput, GameState, LaneSet, SimulationEngine};
    use spider_drop::tuning::Tuning;

    /// Keyboard state shared with the DOM listeners
    struct SharedKeys(Rc<RefCell<KeyState>>);

    impl InputSource for SharedKeys {
        fn poll(&mut self) -> FrameInput {
            self.0.borrow().intents()
        }
    }

    /// `performance.now()`, monotonic for the page lifetime
    struct PerformanceClock(Performance);

    impl Clock for PerformanceClock {
        fn now_ms(&mut self) -> f64 {
            self.0.now()
        }
    }

    /// Paints sprites as filled rectangles on a 2D canvas
    struct CanvasSink {
        window: Window,
        ctx: CanvasRenderingContext2d,
    }

    impl RenderSink for CanvasSink {
        fn present(&mut self, state: &GameState, lanes: &LaneSet, tuning: &Tuning) {
            let ctx = &self.ctx;
            ctx.clear_rect(
                0.0,
                0.0,
                tuning.field_width as f64,
                tuning.field_height as f64,
            );

            for sprite in build_sprites(state, lanes, tuning) {
                ctx.set_fill_style_str(sprite.kind.color());
                ctx.fill_rect(
                    sprite.pos.x as f64,
                    sprite.pos.y as f64,
                    sprite.size.x as f64,
                    sprite.size.y as f64,
                );
            }

            ctx.set_font("20px Arial");
            ctx.set_fill_style_str("white");
            if let Err(e) = ctx.fill_text(
                &score_label(state),
                SCORE_ANCHOR.x as f64,
                SCORE_ANCHOR.y as f64,
            ) {
                log::warn!("Score draw failed: {:?}", e);
            }
        }

        fn acknowledge_game_over(&mut self, final_score: u64) -> bool {
            // Blocks until dismissed, then the driver resets
            if let Err(e) = self
                .window
                .alert_with_message(&format!("Game Over! Final Score: {}", final_score))
            {
                log::warn!("Alert failed: {:?}", e);
            }
            true
        }
    }

    type WebDriver = Driver<SharedKeys, PerformanceClock, CanvasSink>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Spider Drop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("missing #gameCanvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;
        let performance = window.performance().ok_or("no performance clock")?;

        let tuning = Tuning {
            field_width: canvas.width() as f32,
            field_height: canvas.height() as f32,
            ..Default::default()
        };

        let seed = js_sys::Date::now() as u64;
        let engine = SimulationEngine::with_tuning(tuning, seed).unwrap_or_else(|e| {
            log::warn!("Canvas size rejected ({e}), using reference field");
            SimulationEngine::new(seed)
        });
        log::info!("Game initialized with seed: {}", seed);

        let keys = Rc::new(RefCell::new(KeyState::new()));
        setup_input_handlers(&window, keys.clone())?;

        let driver = Driver::new(
            engine,
            SharedKeys(keys),
            PerformanceClock(performance),
            CanvasSink {
                window: window.clone(),
                ctx,
            },
        );

        request_animation_frame(Rc::new(RefCell::new(driver)));
        log::info!("Spider Drop running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, keys: Rc<RefCell<KeyState>>) -> Result<(), JsValue> {
        let down_keys = keys.clone();
        let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
            if down_keys.borrow_mut().key_down(&e.key()) {
                e.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        keydown.forget();

        let up_keys = keys.clone();
        let keyup = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
            up_keys.borrow_mut().key_up(&e.key());
        });
        window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
        keyup.forget();

        // Key-up events are lost while unfocused
        let blur = Closure::<dyn FnMut()>::new(move || {
            keys.borrow_mut().clear();
        });
        window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
        blur.forget();

        Ok(())
    }

    fn request_animation_frame(driver: Rc<RefCell<WebDriver>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone, stopping game loop");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(driver);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(driver: Rc<RefCell<WebDriver>>) {
        driver.borrow_mut().step();
        request_animation_frame(driver);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use spider_drop::platform::{InputSource, RenderSink};
    use spider_drop::renderer::build_sprites;
    use spider_drop::sim::{FrameInput, GameState, LaneSet};
    use spider_drop::tuning::Tuning;

    /// Frames between autopilot decisions
    const DECISION_INTERVAL: u32 = 12;

    /// Random-walk player: holds a random intent for a few frames at a time
    pub struct Autopilot {
        rng: Pcg32,
        held: FrameInput,
        frames_left: u32,
    }

    impl Autopilot {
        pub fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed ^ 0xA5A5_A5A5),
                held: FrameInput::default(),
                frames_left: 0,
            }
        }
    }

    impl InputSource for Autopilot {
        fn poll(&mut self) -> FrameInput {
            if self.frames_left == 0 {
                let direction = self.rng.random_range(0..3);
                self.held = FrameInput {
                    move_left: direction == 0,
                    move_right: direction == 1,
                    bonus: self.rng.random_bool(0.3),
                };
                self.frames_left = DECISION_INTERVAL;
            }
            self.frames_left -= 1;
            self.held
        }
    }

    /// Logs progress instead of drawing
    #[derive(Default)]
    pub struct LogSink {
        pub final_score: Option<u64>,
    }

    impl RenderSink for LogSink {
        fn present(&mut self, state: &GameState, lanes: &LaneSet, tuning: &Tuning) {
            if state.frame % 600 == 0 {
                let sprites = build_sprites(state, lanes, tuning);
                log::info!(
                    "Frame {}: score {}, lane {}, {} sprites, spawn rate {:.6}",
                    state.frame,
                    state.score,
                    state.spider.lane,
                    sprites.len(),
                    state.spawn_rate
                );
            }
        }

        fn acknowledge_game_over(&mut self, final_score: u64) -> bool {
            log::info!("Game Over! Final Score: {}", final_score);
            self.final_score = Some(final_score);
            true
        }
    }
}

/// Play one session to game over (or the frame cap), then report it
#[cfg(not(target_arch = "wasm32"))]
fn run_session<C: spider_drop::platform::Clock>(
    mut driver: spider_drop::platform::Driver<headless::Autopilot, C, headless::LogSink>,
    frame_pause: Option<std::time::Duration>,
) {
    use spider_drop::platform::StepOutcome;

    /// Ten minutes at 60 Hz
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    let mut frames = 0;
    while frames < MAX_FRAMES {
        frames += 1;
        match driver.step() {
            StepOutcome::Running => {}
            StepOutcome::GameOver { .. } | StepOutcome::Restarted { .. } => break,
        }
        if let Some(pause) = frame_pause {
            std::thread::sleep(pause);
        }
    }

    match driver.sink().final_score {
        Some(score) => println!("Game over after {} frames. Final score: {}", frames, score),
        None => println!(
            "Survived {} frames. Score: {}",
            frames,
            driver.engine().state().score
        ),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use spider_drop::SimulationEngine;
    use spider_drop::platform::{Driver, FixedStepClock, SystemClock};
    use spider_drop::tuning::Tuning;

    env_logger::init();
    log::info!("Spider Drop (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` to play");

    let tuning = match std::env::var("SPIDER_DROP_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };
    let seed = std::env::var("SPIDER_DROP_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED);
    let engine = SimulationEngine::with_tuning(tuning, seed).unwrap_or_else(|e| {
        log::warn!("Tuning rejected ({e}), using reference configuration");
        SimulationEngine::new(seed)
    });
    log::info!("Game initialized with seed: {}", seed);

    let autopilot = headless::Autopilot::new(seed);
    let sink = headless::LogSink::default();

    // Real-time pacing: wall clock, one frame every ~16ms
    if std::env::var_os("SPIDER_DROP_REALTIME").is_some() {
        log::info!("Running in real time");
        let driver = Driver::new(engine, autopilot, SystemClock::new(), sink);
        run_session(driver, Some(std::time::Duration::from_millis(16)));
    } else {
        let driver = Driver::new(engine, autopilot, FixedStepClock::sixty_hz(), sink);
        run_session(driver, None);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
