//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything the simulation mutates.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::spawn;
use crate::tuning::{Oscillation, SimConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Simulation frozen; only pause toggle, restart and quit respond
    Paused,
    /// Out of lives
    GameOver,
}

/// Something noteworthy that happened during a tick, for sound/effects hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CollectiblePicked { id: u32, score: u64 },
    HazardHit { id: u32, lives: u8 },
    PlayerRespawned,
    GameOver { score: u64 },
    CollectibleSpawned { id: u32 },
    HazardSpawned { id: u32 },
    Paused,
    Resumed,
    Reset,
}

/// The player-controlled circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Circle center
    pub pos: Vec2,
    /// Vertical velocity (units per frame)
    pub vel_y: f32,
    pub radius: f32,
    pub lives: u8,
    pub score: u64,
    /// Supported by a platform this frame
    pub resting: bool,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, lives: u8) -> Self {
        Self {
            pos,
            vel_y: 0.0,
            radius,
            lives,
            score: 0,
            resting: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }

    /// Move back to `pos` with no vertical motion, keeping lives and score
    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel_y = 0.0;
        self.resting = false;
    }
}

/// A static or bobbing platform the player can stand on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub oscillation: Option<Oscillation>,
}

impl Platform {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }

    /// Height of the standing surface
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    /// Advance bobbing by `dt`, flipping direction outside the range
    pub fn bob(&mut self, dt: f32) {
        if let Some(osc) = self.oscillation.as_mut() {
            self.pos.y += f32::from(osc.direction) * osc.speed * dt;
            if self.pos.y > osc.max_y || self.pos.y < osc.min_y {
                osc.direction = -osc.direction;
            }
        }
    }
}

/// A mushroom worth one point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
}

impl Collectible {
    pub fn aabb(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// A trap that costs a life
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
}

impl Hazard {
    pub fn aabb(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// A strip of grass (cosmetic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundSegment {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl GroundSegment {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Tuning this run was started with
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    /// Stores below are sorted by id for deterministic iteration
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    pub hazards: Vec<Hazard>,
    pub ground: Vec<GroundSegment>,
    /// Set by the quit key; the host decides how to exit
    pub quit_requested: bool,
    /// Events raised by the latest `tick` (and keys handled since); cleared
    /// at the start of every tick, so read or drain after each frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    #[serde(skip)]
    pub(crate) redraw_requested: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given tuning and seed
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let mut state = Self {
            player: Player::new(config.player_start, config.player_radius, config.max_lives),
            rng: rng_state.to_rng(),
            rng_state,
            config,
            time_ticks: 0,
            phase: GamePhase::Running,
            platforms: Vec::new(),
            collectibles: Vec::new(),
            hazards: Vec::new(),
            ground: Vec::new(),
            quit_requested: false,
            events: Vec::new(),
            redraw_requested: true,
            next_id: 1,
        };

        // Sanitizes the tuning and builds the layout
        state.reset();
        state
    }

    /// Back to the starting layout: fresh player, rebuilt platforms, no
    /// transient entities, ground reseeded, RNG reseeded from the run seed.
    pub fn reset(&mut self) {
        // Tuning is public and may have been edited since the last reset
        self.config = std::mem::take(&mut self.config).sanitized();
        self.next_id = 1;
        self.time_ticks = 0;
        self.rng = self.rng_state.to_rng();
        self.quit_requested = false;
        self.phase = GamePhase::Running;

        self.player = Player::new(
            self.config.player_start,
            self.config.player_radius,
            self.config.max_lives,
        );

        let mut platforms = Vec::with_capacity(self.config.platforms.len());
        for layout in self.config.platforms.clone() {
            platforms.push(Platform {
                id: self.next_entity_id(),
                pos: layout.pos,
                width: layout.width,
                height: layout.height,
                oscillation: layout.oscillation,
            });
        }
        self.platforms = platforms;

        self.collectibles.clear();
        self.hazards.clear();
        self.ground.clear();
        spawn::seed_ground(self);
        spawn::populate(self);

        self.events.clear();
        self.events.push(GameEvent::Reset);
        self.redraw_requested = true;
        log::info!(
            "Reset: {} platforms, {} collectibles, {} hazards, {} ground segments",
            self.platforms.len(),
            self.collectibles.len(),
            self.hazards.len(),
            self.ground.len()
        );
    }

    /// Reset with a different run seed
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.rng_state = RngState::new(seed);
        self.reset();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the host should redraw; clears the request
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::replace(&mut self.redraw_requested, false)
    }

    /// Read-only view for drawing
    pub fn render_state(&self) -> RenderState<'_> {
        RenderState {
            player: &self.player,
            platforms: &self.platforms,
            collectibles: &self.collectibles,
            hazards: &self.hazards,
            ground: &self.ground,
            phase: self.phase,
        }
    }

    /// Ensure stores are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.platforms.sort_by_key(|p| p.id);
        self.collectibles.sort_by_key(|c| c.id);
        self.hazards.sort_by_key(|h| h.id);
        self.ground.sort_by_key(|g| g.id);
    }
}

/// Borrowed snapshot handed to the renderer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RenderState<'a> {
    pub player: &'a Player,
    pub platforms: &'a [Platform],
    pub collectibles: &'a [Collectible],
    pub hazards: &'a [Hazard],
    pub ground: &'a [GroundSegment],
    pub phase: GamePhase,
}

impl RenderState<'_> {
    /// Status line drawn in the corner
    pub fn hud_line(&self) -> String {
        format!("Lives: {}  Score: {}", self.player.lives, self.player.score)
    }

    /// Centered banner text, if any
    pub fn banner(&self) -> Option<String> {
        match self.phase {
            GamePhase::GameOver => Some(format!("GAME OVER\nScore: {}", self.player.score)),
            GamePhase::Paused => Some("PAUSED".to_string()),
            GamePhase::Running => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_SEED;

    #[test]
    fn test_new_state() {
        let state = GameState::new(SimConfig::scrolling(), DEFAULT_SEED);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.pos, Vec2::new(250.0, 30.0));
        assert_eq!(state.platforms.len(), 3);
        assert!(state.collectibles.is_empty());
        assert!(state.hazards.is_empty());
        assert_eq!(state.ground.len(), 50);
    }

    #[test]
    fn test_entity_ids_are_unique_and_sorted() {
        let state = GameState::new(SimConfig::scattered(), DEFAULT_SEED);
        let mut ids: Vec<u32> = state
            .platforms
            .iter()
            .map(|p| p.id)
            .chain(state.collectibles.iter().map(|c| c.id))
            .chain(state.hazards.iter().map(|h| h.id))
            .chain(state.ground.iter().map(|g| g.id))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert!(state.hazards.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::new(SimConfig::scattered(), 42);
        state.player.score = 7;
        state.player.lives = 1;
        state.collectibles.clear();

        state.reset();
        let once = serde_json::to_string(&state).expect("serialize");
        state.reset();
        let twice = serde_json::to_string(&state).expect("serialize");
        assert_eq!(once, twice);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.collectibles.len(), 4);
    }

    #[test]
    fn test_platform_bob_flips_outside_range() {
        let mut platform = Platform {
            id: 1,
            pos: Vec2::new(0.0, 10.0),
            width: 60.0,
            height: 10.0,
            oscillation: Some(Oscillation {
                direction: 1,
                speed: 2.0,
                min_y: 0.0,
                max_y: 11.0,
            }),
        };
        platform.bob(1.0);
        assert_eq!(platform.pos.y, 12.0);
        assert_eq!(platform.oscillation.map(|o| o.direction), Some(-1));
        platform.bob(1.0);
        assert_eq!(platform.pos.y, 10.0);
        assert_eq!(platform.oscillation.map(|o| o.direction), Some(-1));
    }

    #[test]
    fn test_render_state_text() {
        let mut state = GameState::new(SimConfig::scrolling(), DEFAULT_SEED);
        state.player.score = 5;
        assert_eq!(state.render_state().hud_line(), "Lives: 3  Score: 5");
        assert_eq!(state.render_state().banner(), None);

        state.player.lives = 0;
        state.phase = GamePhase::GameOver;
        assert_eq!(
            state.render_state().banner().as_deref(),
            Some("GAME OVER\nScore: 5")
        );

        let json = serde_json::to_value(state.render_state()).expect("serialize");
        assert_eq!(json["phase"], "GameOver");
        assert_eq!(json["platforms"].as_array().map(Vec::len), Some(3));
    }
}
