//! The two competing agents and their target policies

use glam::Vec2;

use super::dots::Dot;
use super::geometry::{Direction, direction, distance, move_towards};
use crate::consts::{MAX_SPEED, MIN_SPEED, SPECIAL_PENALTY};

/// Which side an agent plays for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    /// Follows the pointer
    Player,
    /// Chases the nearest safe dot
    Ai,
}

impl AgentKind {
    pub fn label(&self) -> &'static str {
        match self {
            AgentKind::Player => "Player",
            AgentKind::Ai => "AI",
        }
    }
}

/// A scoring agent on the field
#[derive(Debug, Clone)]
pub struct Agent {
    pub kind: AgentKind,
    pub pos: Vec2,
    pub score: u32,
    pub facing: Direction,
}

impl Agent {
    pub fn new(kind: AgentKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            score: 0,
            facing: Direction::default(),
        }
    }

    /// Face `target` and take one eased step toward it
    pub fn step_towards(&mut self, target: Vec2) {
        self.facing = direction(self.pos, target);
        self.pos = move_towards(self.pos, target, MIN_SPEED, MAX_SPEED);
    }

    /// Apply the score change for collecting `dot`: +1, or the penalty
    /// clamped at zero for special dots
    pub fn collect(&mut self, dot: &Dot) {
        if dot.special {
            self.score = self.score.saturating_sub(SPECIAL_PENALTY);
        } else {
            self.score += 1;
        }
    }
}

/// Nearest uncollected dot by `filter`; ties keep the first in field order
fn nearest_matching(from: Vec2, dots: &[Dot], filter: impl Fn(&Dot) -> bool) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, dot) in dots.iter().enumerate() {
        if !dot.is_live() || !filter(dot) {
            continue;
        }
        let d = distance(from, dot.pos);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// AI target: nearest uncollected normal dot, falling back to the nearest
/// uncollected dot of any kind. `None` when nothing is left.
pub fn nearest_dot(from: Vec2, dots: &[Dot]) -> Option<usize> {
    nearest_matching(from, dots, |d| !d.special).or_else(|| nearest_matching(from, dots, |_| true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(x: f32, y: f32, special: bool) -> Dot {
        Dot::new(Vec2::new(x, y), special)
    }

    #[test]
    fn test_special_clamps_at_zero() {
        let mut agent = Agent::new(AgentKind::Player, Vec2::ZERO);
        agent.score = 5;
        agent.collect(&dot(0.0, 0.0, true));
        assert_eq!(agent.score, 0);
    }

    #[test]
    fn test_special_subtracts_ten() {
        let mut agent = Agent::new(AgentKind::Ai, Vec2::ZERO);
        agent.score = 15;
        agent.collect(&dot(0.0, 0.0, true));
        assert_eq!(agent.score, 5);
    }

    #[test]
    fn test_normal_adds_one() {
        let mut agent = Agent::new(AgentKind::Ai, Vec2::ZERO);
        agent.collect(&dot(0.0, 0.0, false));
        agent.collect(&dot(0.0, 0.0, false));
        assert_eq!(agent.score, 2);
    }

    #[test]
    fn test_nearest_prefers_normal() {
        let dots = vec![dot(1.0, 0.0, true), dot(50.0, 0.0, false), dot(20.0, 0.0, false)];
        assert_eq!(nearest_dot(Vec2::ZERO, &dots), Some(2));
    }

    #[test]
    fn test_nearest_skips_collected() {
        let mut dots = vec![dot(5.0, 0.0, false), dot(30.0, 0.0, false)];
        dots[0].collected = true;
        assert_eq!(nearest_dot(Vec2::ZERO, &dots), Some(1));
    }

    #[test]
    fn test_nearest_falls_back_to_special() {
        let mut dots = vec![dot(5.0, 0.0, false), dot(30.0, 0.0, true), dot(10.0, 0.0, true)];
        dots[0].collected = true;
        assert_eq!(nearest_dot(Vec2::ZERO, &dots), Some(2));
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let dots = vec![dot(10.0, 0.0, false), dot(-10.0, 0.0, false), dot(0.0, 10.0, false)];
        assert_eq!(nearest_dot(Vec2::ZERO, &dots), Some(0));
    }

    #[test]
    fn test_nearest_none_when_exhausted() {
        let mut dots = vec![dot(5.0, 0.0, true)];
        dots[0].collected = true;
        assert_eq!(nearest_dot(Vec2::ZERO, &dots), None);
        assert_eq!(nearest_dot(Vec2::ZERO, &[]), None);
    }

    #[test]
    fn test_step_updates_facing() {
        let mut agent = Agent::new(AgentKind::Player, Vec2::new(100.0, 100.0));
        assert_eq!(agent.facing, Direction::Right);
        agent.step_towards(Vec2::new(50.0, 20.0));
        assert_eq!(agent.facing, Direction::UpLeft);
        assert!(agent.pos.x < 100.0 && agent.pos.y < 100.0);
    }
}
