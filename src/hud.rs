//! Overlay text shown on top of the playfield

use crate::sim::{GamePhase, GameState};

/// Format seconds as `m:ss` (whole seconds, rounded down)
pub fn format_clock(secs: f32) -> String {
    let secs = secs.max(0.0);
    let minutes = (secs / 60.0).floor() as u32;
    let seconds = (secs % 60.0).floor() as u32;
    format!("{minutes}:{seconds:02}")
}

/// Score line for the top-left corner
pub fn score_line(player: u32, ai: u32) -> String {
    format!("Player: {player}   AI: {ai}")
}

/// Clock line for the top-right corner
pub fn time_line(remaining_secs: f32) -> String {
    format!("Time: {}", format_clock(remaining_secs))
}

/// Texts the renderer draws for the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Scores and clock during play
    Playing { score: String, time: String },
    /// Centered result after a timed-out round
    Result(String),
    /// Nothing to draw (quit path)
    Empty,
}

impl Overlay {
    pub fn for_state(state: &GameState) -> Self {
        match (state.phase, state.outcome) {
            (GamePhase::Playing, _) => Overlay::Playing {
                score: score_line(state.player.score, state.ai.score),
                time: time_line(state.remaining_secs()),
            },
            (GamePhase::RoundOver, Some(outcome)) => Overlay::Result(outcome.message().to_string()),
            (GamePhase::RoundOver, None) => Overlay::Empty,
        }
    }
}
