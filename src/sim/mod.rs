//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - One owner (`GameState`), one mutator at a time

pub mod aabb;
pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::resolve_collisions;
pub use state::{
    Collectible, GameEvent, GamePhase, GameState, GroundSegment, Hazard, Platform, Player,
    RenderState,
};
pub use tick::{Key, handle_key, tick};
