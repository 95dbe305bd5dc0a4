//! Pac-Man Duel - a two-agent dot collecting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collection, round timer)
//! - `hud`: Overlay text (scores, clock, result message)
//! - `renderer`: wgpu rendering pipeline
//! - `platform`: Windowing/input capability layer
//! - `settings`: JSON configuration

pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions in game units
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Target frame rate (frames per second)
    pub const TARGET_FPS: u32 = 60;

    /// Dot field defaults
    pub const DOT_COUNT: usize = 50;
    pub const SPECIAL_RATIO: f32 = 0.2;
    /// Dots never spawn closer than this to a canvas edge
    pub const FIELD_MARGIN: f32 = 50.0;
    pub const DOT_RADIUS: f32 = 5.0;

    /// Agent sprite size and collision radius (integer half of the sprite)
    pub const AGENT_SIZE: f32 = 30.0;
    pub const AGENT_BODY_RADIUS: f32 = 15.0;

    /// Per-frame movement limits
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 3.0;
    /// Unclamped speed is distance / APPROACH_DIVISOR
    pub const APPROACH_DIVISOR: f32 = 5.0;

    /// Round length and result hold time (seconds)
    pub const ROUND_DURATION_SECS: f32 = 180.0;
    pub const RESULT_DISPLAY_SECS: f32 = 3.0;

    /// Score lost for touching a special dot (clamped at zero)
    pub const SPECIAL_PENALTY: u32 = 10;

    pub const PLAYER_START: (f32, f32) = (400.0, 300.0);
    pub const AI_START: (f32, f32) = (200.0, 200.0);
}

/// Canvas size as a vector
#[inline]
pub fn canvas_size() -> Vec2 {
    Vec2::new(consts::CANVAS_WIDTH, consts::CANVAS_HEIGHT)
}
