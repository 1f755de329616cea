//! Platform abstraction layer
//!
//! Input sources that feed the simulation:
//! - `input`: event-driven collector for keyboard and pointer
//! - `autopilot`: scripted pilot for headless runs

pub mod autopilot;
pub mod input;

pub use autopilot::Autopilot;
pub use input::{Direction, InputCollector};
