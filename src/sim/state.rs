//! Round state and core simulation types
//!
//! Everything one round needs is owned by `GameState`; the frame loop mutates
//! it in place through `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::agent::{Agent, AgentKind};
use super::collision::Collection;
use super::dots::{Dot, generate_dots};
use crate::canvas_size;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Clock running, agents moving
    Playing,
    /// Timer expired or quit received; terminal
    RoundOver,
}

/// How a finished round was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerWins,
    AiWins,
    Draw,
}

impl Outcome {
    /// Strictly higher score wins
    pub fn from_scores(player: u32, ai: u32) -> Self {
        match player.cmp(&ai) {
            std::cmp::Ordering::Greater => Outcome::PlayerWins,
            std::cmp::Ordering::Less => Outcome::AiWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Text shown on the result screen
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::PlayerWins => "Player wins",
            Outcome::AiWins => "AI wins",
            Outcome::Draw => "Draw",
        }
    }
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Collected(Collection),
    /// Every dot was gone; a fresh field replaced it
    FieldRefreshed,
    /// Round timer expired with this result
    RoundOver(Outcome),
    /// External quit; no result is announced
    Quit,
}

/// Round parameters fixed at creation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundConfig {
    pub duration_secs: f32,
    pub dot_count: usize,
    pub special_ratio: f32,
    pub bounds: Vec2,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            duration_secs: ROUND_DURATION_SECS,
            dot_count: DOT_COUNT,
            special_ratio: SPECIAL_RATIO,
            bounds: canvas_size(),
        }
    }
}

impl From<&Settings> for RoundConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            duration_secs: settings.round_secs,
            dot_count: settings.dot_count,
            special_ratio: settings.special_ratio,
            bounds: canvas_size(),
        }
    }
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the dot fields are drawn from
    pub seed: u64,
    rng: Pcg32,
    pub config: RoundConfig,
    pub phase: GamePhase,
    /// Set only when the timer ran out
    pub outcome: Option<Outcome>,
    /// Seconds since the round started
    pub elapsed_secs: f32,
    pub dots: Vec<Dot>,
    pub player: Agent,
    pub ai: Agent,
    /// How many fields have been generated this round (starts at 1)
    pub fields_generated: u32,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a round: fresh field, zero scores, clock at zero
    pub fn new(seed: u64, config: RoundConfig) -> Self {
        let mut state = Self::with_dots(seed, config, Vec::new());
        state.dots = state.generate_field();
        state
    }

    /// Start a round on a hand-placed field
    pub fn with_dots(seed: u64, config: RoundConfig, dots: Vec<Dot>) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            phase: GamePhase::Playing,
            outcome: None,
            elapsed_secs: 0.0,
            dots,
            player: Agent::new(AgentKind::Player, Vec2::from(PLAYER_START)),
            ai: Agent::new(AgentKind::Ai, Vec2::from(AI_START)),
            fields_generated: 1,
            events: Vec::new(),
        }
    }

    /// Seconds left on the clock, never negative
    pub fn remaining_secs(&self) -> f32 {
        (self.config.duration_secs - self.elapsed_secs).max(0.0)
    }

    /// True when no dot on the field is still collectible
    pub fn field_exhausted(&self) -> bool {
        self.dots.iter().all(|d| d.collected)
    }

    /// Replace the field with a newly generated one
    pub fn refresh_field(&mut self) {
        self.dots = self.generate_field();
        self.fields_generated += 1;
    }

    fn generate_field(&mut self) -> Vec<Dot> {
        generate_dots(
            &mut self.rng,
            self.config.dot_count,
            self.config.bounds,
            self.config.special_ratio,
        )
    }

    /// Uncollected dots in field order
    pub fn live_dots(&self) -> impl Iterator<Item = &Dot> {
        self.dots.iter().filter(|d| d.is_live())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round() {
        let state = GameState::new(1234, RoundConfig::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.dots.len(), DOT_COUNT);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.ai.score, 0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ai.pos, Vec2::new(200.0, 200.0));
        assert!((state.remaining_secs() - 180.0).abs() < 1e-6);
        assert!(state.outcome.is_none());
    }

    #[test]
    fn test_outcome_from_scores() {
        assert_eq!(Outcome::from_scores(3, 1), Outcome::PlayerWins);
        assert_eq!(Outcome::from_scores(0, 3), Outcome::AiWins);
        assert_eq!(Outcome::from_scores(2, 2), Outcome::Draw);
        assert_eq!(Outcome::from_scores(0, 0).message(), "Draw");
        assert_eq!(Outcome::AiWins.message(), "AI wins");
        assert_eq!(Outcome::PlayerWins.message(), "Player wins");
    }

    #[test]
    fn test_refresh_replaces_field() {
        let mut state = GameState::new(5, RoundConfig::default());
        for dot in &mut state.dots {
            dot.collected = true;
        }
        assert!(state.field_exhausted());
        assert_eq!(state.live_dots().count(), 0);

        state.refresh_field();
        assert!(!state.field_exhausted());
        assert_eq!(state.live_dots().count(), DOT_COUNT);
        assert_eq!(state.fields_generated, 2);
    }

    #[test]
    fn test_remaining_never_negative() {
        let mut state = GameState::new(5, RoundConfig::default());
        state.elapsed_secs = 500.0;
        assert_eq!(state.remaining_secs(), 0.0);
    }
}
