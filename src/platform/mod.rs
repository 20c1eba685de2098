//! Platform abstraction layer
//!
//! The simulation never touches the host directly. Hosts provide:
//! - Input intents (`InputSource`)
//! - A millisecond clock (`Clock`)
//! - Presentation and game-over acknowledgement (`RenderSink`)
//!
//! `Driver` ties these to a `SimulationEngine`, one `step` per rendered frame.

pub mod driver;
pub mod input;

pub use driver::{Clock, Driver, FixedStepClock, InputSource, RenderSink, StepOutcome};
#[cfg(not(target_arch = "wasm32"))]
pub use driver::SystemClock;
pub use input::KeyState;
