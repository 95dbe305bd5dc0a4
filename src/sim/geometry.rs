//! Planar helpers shared by both agents
//!
//! Distances, 8-way facing classification and the eased step toward a target.

use glam::Vec2;

use crate::consts::APPROACH_DIVISOR;

/// One of the eight facing directions an agent sprite can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// All directions, in sprite-sheet layer order
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Symbolic name, also used as the sprite file suffix
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpLeft => "up_left",
            Direction::UpRight => "up_right",
            Direction::DownLeft => "down_left",
            Direction::DownRight => "down_right",
        }
    }

    /// Index into the sprite sheet
    pub fn layer(&self) -> u32 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
            Direction::UpLeft => 4,
            Direction::UpRight => 5,
            Direction::DownLeft => 6,
            Direction::DownRight => 7,
        }
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Classify the vector from `from` to `to` by the signs of its components.
///
/// Screen coordinates: negative dy is up. A zero vector faces right.
pub fn direction(from: Vec2, to: Vec2) -> Direction {
    let d = to - from;

    if d.y < 0.0 {
        if d.x < 0.0 {
            Direction::UpLeft
        } else if d.x > 0.0 {
            Direction::UpRight
        } else {
            Direction::Up
        }
    } else if d.y > 0.0 {
        if d.x < 0.0 {
            Direction::DownLeft
        } else if d.x > 0.0 {
            Direction::DownRight
        } else {
            Direction::Down
        }
    } else if d.x < 0.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Step from `from` toward `to`.
///
/// Snaps onto the target once it is closer than `min_speed`. Otherwise moves
/// `distance / 5` clamped to `[min_speed, max_speed]`, which eases the final
/// approach and caps top speed. Never overshoots.
pub fn move_towards(from: Vec2, to: Vec2, min_speed: f32, max_speed: f32) -> Vec2 {
    let dist = distance(from, to);

    if dist < min_speed {
        return to;
    }
    if dist == 0.0 {
        return from;
    }

    let speed = (dist / APPROACH_DIVISOR).min(max_speed).max(min_speed);
    from + (to - from) / dist * speed
}
