//! Platform abstraction layer
//!
//! Keeps winit details out of the simulation:
//! - Input snapshot polled once per frame
//! - Fixed-rate frame pacing

pub mod input;
pub mod pacer;

pub use input::InputState;
pub use pacer::FramePacer;
