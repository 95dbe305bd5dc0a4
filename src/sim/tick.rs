//! One frame of the round controller
//!
//! Order within a frame: quit, timer, player move, field refresh, AI move,
//! collection.

use glam::Vec2;

use super::agent::nearest_dot;
use super::collision::collect_dots;
use super::state::{GameEvent, GamePhase, GameState, Outcome};

/// Input sampled once per frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in canvas units (None before the first move event)
    pub pointer: Option<Vec2>,
    /// Window close / quit request
    pub quit: bool,
}

/// Advance the round by one frame.
///
/// `elapsed_secs` is wall-clock time since the round started; the clock never
/// runs backwards.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_secs: f32) {
    state.events.clear();

    if state.phase == GamePhase::RoundOver {
        return;
    }

    if input.quit {
        log::info!("Quit received, ending round without a result");
        state.phase = GamePhase::RoundOver;
        state.events.push(GameEvent::Quit);
        return;
    }

    state.elapsed_secs = state.elapsed_secs.max(elapsed_secs);
    if state.elapsed_secs >= state.config.duration_secs {
        let outcome = Outcome::from_scores(state.player.score, state.ai.score);
        log::info!(
            "Round over: {} (player {} / ai {})",
            outcome.message(),
            state.player.score,
            state.ai.score
        );
        state.phase = GamePhase::RoundOver;
        state.outcome = Some(outcome);
        state.events.push(GameEvent::RoundOver(outcome));
        return;
    }

    if let Some(pointer) = input.pointer {
        state.player.step_towards(pointer);
    }

    if state.field_exhausted() {
        state.refresh_field();
        log::info!("Field cleared, generated field #{}", state.fields_generated);
        state.events.push(GameEvent::FieldRefreshed);
    }

    // With nothing left to chase the AI holds position and facing
    if let Some(target) = nearest_dot(state.ai.pos, &state.dots) {
        let target_pos = state.dots[target].pos;
        state.ai.step_towards(target_pos);
    }

    for collection in collect_dots(&mut state.dots, &mut state.player, &mut state.ai) {
        log::debug!(
            "{} collected {} dot #{} -> score {}",
            collection.by.label(),
            if collection.special { "special" } else { "normal" },
            collection.dot_index,
            collection.score
        );
        state.events.push(GameEvent::Collected(collection));
    }
}
