//! CPU-side projection of the game state into draw lists
//!
//! Pure function of `GameState`; the GPU layer only uploads what this builds.

use glam::Vec2;

use super::shapes;
use super::vertex::{SpriteVertex, Vertex, colors};
use crate::consts::{AGENT_SIZE, CANVAS_WIDTH};
use crate::canvas_size;
use crate::hud::Overlay;
use crate::sim::GameState;

/// Triangles per dot
const DOT_SEGMENTS: u32 = 16;
/// Font pixel size for the score and clock lines
pub const HUD_TEXT_SCALE: f32 = 3.0;
/// Font pixel size for the result message
pub const RESULT_TEXT_SCALE: f32 = 7.0;
/// Overlay inset from the canvas edges
const HUD_MARGIN: f32 = 20.0;

/// Everything drawn in one frame, in canvas units, in draw order
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Dots, drawn first
    pub shapes: Vec<Vertex>,
    /// Agent sprites, over the dots
    pub sprites: Vec<SpriteVertex>,
    /// Text, over everything
    pub overlay: Vec<Vertex>,
}

/// Build the draw lists for `state`
pub fn build_scene(state: &GameState) -> Scene {
    let mut scene = Scene::default();

    match Overlay::for_state(state) {
        Overlay::Playing { score, time } => {
            for dot in state.live_dots() {
                let color = if dot.special {
                    colors::DOT_SPECIAL
                } else {
                    colors::DOT
                };
                scene
                    .shapes
                    .extend(shapes::circle(dot.pos, dot.radius, color, DOT_SEGMENTS));
            }

            for agent in [&state.player, &state.ai] {
                scene
                    .sprites
                    .extend_from_slice(&shapes::sprite(agent.pos, AGENT_SIZE, agent.facing.layer()));
            }

            scene.overlay.extend(shapes::text(
                &score,
                Vec2::splat(HUD_MARGIN),
                HUD_TEXT_SCALE,
                colors::TEXT,
            ));
            let time_width = shapes::text_size(&time, HUD_TEXT_SCALE).x;
            scene.overlay.extend(shapes::text(
                &time,
                Vec2::new(CANVAS_WIDTH - time_width - HUD_MARGIN, HUD_MARGIN),
                HUD_TEXT_SCALE,
                colors::TEXT,
            ));
        }
        Overlay::Result(message) => {
            // Result screen shows nothing but the centered message
            let size = shapes::text_size(&message, RESULT_TEXT_SCALE);
            let origin = (canvas_size() - size) / 2.0;
            scene.overlay.extend(shapes::text(
                &message,
                origin,
                RESULT_TEXT_SCALE,
                colors::TEXT,
            ));
        }
        Overlay::Empty => {}
    }

    scene
}
