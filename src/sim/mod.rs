//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Per-frame steps driven by an explicit `dt`
//! - Seeded RNG only
//! - Stable iteration order (field order)
//! - No rendering or platform dependencies

pub mod agent;
pub mod collision;
pub mod dots;
pub mod geometry;
pub mod state;
pub mod tick;

pub use agent::{Agent, AgentKind, nearest_dot};
pub use collision::{Collection, agent_touches_dot, collect_dots};
pub use dots::{Dot, generate_dots, special_count};
pub use geometry::{Direction, direction, distance, move_towards};
pub use state::{GameEvent, GamePhase, GameState, Outcome, RoundConfig};
pub use tick::{TickInput, tick};
