//! Mushroom Hop - A scrolling 2D platformer simulation core
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, spawning, game state)
//! - `tuning`: Data-driven game balance and policy toggles
//!
//! Drawing, windowing and key binding belong to the host, which calls
//! [`sim::tick`] once per frame and reads [`sim::GameState::render_state`].

pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GamePhase, GameState, Key, RenderState, handle_key, tick};
pub use tuning::SimConfig;

/// Game configuration constants
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: f32 = 500.0;
    pub const WORLD_HEIGHT: f32 = 500.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const MAX_LIVES: u8 = 3;
    /// Sideways offset per move key press (no horizontal velocity)
    pub const PLAYER_STEP: f32 = 50.0;

    /// Vertical physics (per-frame velocity units)
    pub const GRAVITY: f32 = -8.0;
    pub const JUMP_STRENGTH: f32 = 10.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 80.0;
    pub const PLATFORM_HEIGHT: f32 = 10.0;

    /// Collectible (mushroom) and hazard (trap) defaults
    pub const COLLECTIBLE_SIZE: f32 = 30.0;
    pub const HAZARD_SIZE: f32 = 10.0;
    /// Chance per frame of spawning when the lane is empty
    pub const SPAWN_PROBABILITY: f64 = 0.02;
    /// Chance that a spawn is a collectible rather than a hazard
    pub const COLLECTIBLE_WEIGHT: f64 = 0.5;
    /// Scroll speed of collectibles and hazards (units/s)
    pub const ENTITY_SCROLL_SPEED: f32 = 30.0;
    /// Center height of spawned collectibles/hazards
    pub const SPAWN_Y: f32 = 10.0;

    /// Ground tiling
    pub const GROUND_PITCH: f32 = 10.0;
    pub const GROUND_HEIGHT: f32 = 5.0;
    pub const GROUND_SCROLL_SPEED: f32 = 10.0;

    /// Bounds applied to edited or loaded tuning
    pub const MIN_TILE_PITCH: f32 = 1.0;
    pub const MAX_WORLD_EXTENT: f32 = 100_000.0;
    pub const MAX_SCATTERED_COLLECTIBLES: usize = 256;

    /// Default run seed
    pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;
}
