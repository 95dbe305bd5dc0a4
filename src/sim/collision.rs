//! Agent/dot overlap and the per-frame collection pass
//!
//! Agents are circles of `AGENT_BODY_RADIUS`; a dot counts as eaten when its
//! center falls inside that circle.

use glam::Vec2;

use super::agent::{Agent, AgentKind};
use super::dots::Dot;
use super::geometry::distance;
use crate::consts::AGENT_BODY_RADIUS;

/// A dot picked up during a collection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub dot_index: usize,
    pub by: AgentKind,
    pub special: bool,
    /// Collector's score after the pickup
    pub score: u32,
}

/// Check whether a dot center lies inside an agent's body
#[inline]
pub fn agent_touches_dot(agent_center: Vec2, dot_pos: Vec2) -> bool {
    distance(agent_center, dot_pos) <= AGENT_BODY_RADIUS
}

/// Test every uncollected dot against both agents, player first.
///
/// The first agent to touch a dot takes it: the `collected` flag is set
/// before the AI is tested, so one dot never scores twice.
pub fn collect_dots(dots: &mut [Dot], player: &mut Agent, ai: &mut Agent) -> Vec<Collection> {
    let mut collected = Vec::new();

    for (i, dot) in dots.iter_mut().enumerate() {
        for agent in [&mut *player, &mut *ai] {
            if !dot.is_live() {
                break;
            }
            if agent_touches_dot(agent.pos, dot.pos) {
                dot.collected = true;
                agent.collect(dot);
                collected.push(Collection {
                    dot_index: i,
                    by: agent.kind,
                    special: dot.special,
                    score: agent.score,
                });
            }
        }
    }

    collected
}
