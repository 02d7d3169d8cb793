//! Data-driven game balance
//!
//! Every tunable constant and behavior toggle of the simulation. Two presets
//! reproduce the two shipped game variants: a scrolling lane of mushrooms and
//! traps over looping grass, and a static field of mushrooms above a row of
//! traps with bobbing platforms.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Aabb;

/// How collectibles and hazards enter the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// One collectible or hazard at a time, entering from the right edge
    Scrolling,
    /// Collectibles scattered over the width, hazards tiled along the ground.
    /// The hazard row is centered on `spawn_y`; collectibles sit on top of it.
    Scattered { target_collectibles: usize },
}

/// What happens to the player after a hazard hit that leaves lives > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HazardResponse {
    /// Keep playing from the current position
    #[default]
    Continue,
    /// Teleport back to the respawn position
    Respawn,
}

/// How many times gravity is applied to an airborne player per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityMode {
    /// Once per frame
    #[default]
    Single,
    /// Once during integration and again after an unsuccessful platform
    /// scan. Kept for parity with older builds, which did this by accident.
    Double,
}

/// Vertical bobbing of a platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// -1 down, 0 still, 1 up
    pub direction: i8,
    /// Units per second (per frame in frame-count mode)
    pub speed: f32,
    /// Center-y range; direction flips once the platform leaves it
    pub min_y: f32,
    pub max_y: f32,
}

/// Initial placement of one platform (center-anchored)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformLayout {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub oscillation: Option<Oscillation>,
}

impl PlatformLayout {
    /// Translate a bottom-left anchored placement into the center convention
    pub fn from_corner(x: f32, y: f32, width: f32, height: f32) -> Self {
        let aabb = Aabb::from_corner(Vec2::new(x, y), Vec2::new(width, height));
        Self {
            pos: aabb.center,
            width,
            height,
            oscillation: None,
        }
    }

    /// Add bobbing between corner-anchored bottom heights `low..high`
    pub fn bobbing(mut self, direction: i8, speed: f32, low: f32, high: f32) -> Self {
        let half = self.height / 2.0;
        self.oscillation = Some(Oscillation {
            direction: direction.signum(),
            speed,
            min_y: low + half,
            max_y: high + half,
        });
        self
    }
}

/// Cosmetic ground strip tiling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTuning {
    /// Distance between segment left edges
    pub pitch: f32,
    pub segment_width: f32,
    pub segment_height: f32,
    pub scroll_speed: f32,
}

impl Default for GroundTuning {
    fn default() -> Self {
        Self {
            pitch: GROUND_PITCH,
            segment_width: GROUND_PITCH,
            segment_height: GROUND_HEIGHT,
            scroll_speed: GROUND_SCROLL_SPEED,
        }
    }
}

/// Complete simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_step: f32,
    pub player_start: Vec2,
    pub respawn_position: Vec2,
    /// Starting lives, within `1..=MAX_LIVES`
    pub max_lives: u8,

    // === Physics ===
    /// Negative: pulls down
    pub gravity: f32,
    /// Positive: instant upward velocity on jump
    pub jump_strength: f32,
    pub gravity_mode: GravityMode,
    /// Scale by wall-clock `dt`; when false every frame counts as `dt = 1`
    pub use_delta_time: bool,

    // === Platforms ===
    pub platforms: Vec<PlatformLayout>,

    // === Collectibles / hazards ===
    pub spawn_policy: SpawnPolicy,
    pub collectible_size: f32,
    pub hazard_size: f32,
    pub spawn_probability: f64,
    pub collectible_weight: f64,
    pub entity_scroll_speed: f32,
    /// Center height of spawned collectibles/hazards
    pub spawn_y: f32,
    pub hazard_response: HazardResponse,
    /// Keep resolving pickups/hits while paused
    pub resolve_while_paused: bool,

    // === Ground ===
    pub ground: GroundTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::scrolling()
    }
}

impl SimConfig {
    /// Scrolling lane over looping grass, three fixed platforms
    pub fn scrolling() -> Self {
        let platforms = [50.0, 200.0, 350.0]
            .into_iter()
            .map(|x| PlatformLayout::from_corner(x, 150.0, PLATFORM_WIDTH, PLATFORM_HEIGHT))
            .collect();

        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            player_radius: PLAYER_RADIUS,
            player_step: PLAYER_STEP,
            player_start: Vec2::new(250.0, 30.0),
            respawn_position: Vec2::new(250.0, 30.0),
            max_lives: MAX_LIVES,

            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            gravity_mode: GravityMode::Single,
            use_delta_time: true,

            platforms,

            spawn_policy: SpawnPolicy::Scrolling,
            collectible_size: COLLECTIBLE_SIZE,
            hazard_size: HAZARD_SIZE,
            spawn_probability: SPAWN_PROBABILITY,
            collectible_weight: COLLECTIBLE_WEIGHT,
            entity_scroll_speed: ENTITY_SCROLL_SPEED,
            spawn_y: SPAWN_Y,
            hazard_response: HazardResponse::Continue,
            resolve_while_paused: true,

            ground: GroundTuning::default(),
        }
    }

    /// Static mushroom field over a trap row, bobbing platforms, per-frame physics
    pub fn scattered() -> Self {
        let platforms = vec![
            PlatformLayout::from_corner(200.0, 200.0, 60.0, 10.0).bobbing(1, 0.05, 100.0, 300.0),
            PlatformLayout::from_corner(270.0, 200.0, 60.0, 10.0).bobbing(-1, 0.05, 100.0, 300.0),
            PlatformLayout::from_corner(340.0, 200.0, 60.0, 10.0).bobbing(1, 0.05, 100.0, 300.0),
        ];

        Self {
            player_step: 20.0,
            player_start: Vec2::new(250.0, 150.0),
            respawn_position: Vec2::new(250.0, 200.0),

            gravity: -0.01,
            jump_strength: 1.0,
            use_delta_time: false,

            platforms,

            spawn_policy: SpawnPolicy::Scattered {
                target_collectibles: 4,
            },
            entity_scroll_speed: 0.0,
            hazard_response: HazardResponse::Respawn,
            resolve_while_paused: false,

            ground: GroundTuning {
                scroll_speed: 0.0,
                ..GroundTuning::default()
            },
            ..Self::scrolling()
        }
    }

    /// Parse a tuning document; missing fields take the scrolling defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp out-of-range values instead of rejecting them
    pub fn sanitized(mut self) -> Self {
        fn clamp_probability(name: &str, value: &mut f64) {
            if !(0.0..=1.0).contains(&*value) {
                let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
                log::warn!("Tuning {} = {} out of range, using {}", name, value, clamped);
                *value = clamped;
            }
        }

        fn at_least(name: &str, value: &mut f32, min: f32) {
            if value.is_nan() || *value < min {
                log::warn!("Tuning {} = {} below {}, clamping", name, value, min);
                *value = min;
            }
        }

        fn at_most(name: &str, value: &mut f32, max: f32) {
            if *value > max {
                log::warn!("Tuning {} = {} above {}, clamping", name, value, max);
                *value = max;
            }
        }

        clamp_probability("spawn_probability", &mut self.spawn_probability);
        clamp_probability("collectible_weight", &mut self.collectible_weight);

        at_least("world_width", &mut self.world_width, 1.0);
        at_least("world_height", &mut self.world_height, 1.0);
        at_most("world_width", &mut self.world_width, MAX_WORLD_EXTENT);
        at_most("world_height", &mut self.world_height, MAX_WORLD_EXTENT);
        at_least("player_radius", &mut self.player_radius, 0.0);
        at_least("collectible_size", &mut self.collectible_size, 0.0);
        at_least("hazard_size", &mut self.hazard_size, MIN_TILE_PITCH);
        at_least("entity_scroll_speed", &mut self.entity_scroll_speed, 0.0);
        at_least("ground.pitch", &mut self.ground.pitch, MIN_TILE_PITCH);
        at_least("ground.scroll_speed", &mut self.ground.scroll_speed, 0.0);

        if let SpawnPolicy::Scattered {
            target_collectibles,
        } = &mut self.spawn_policy
        {
            if *target_collectibles > MAX_SCATTERED_COLLECTIBLES {
                log::warn!(
                    "Tuning target_collectibles = {} above {}, clamping",
                    target_collectibles,
                    MAX_SCATTERED_COLLECTIBLES
                );
                *target_collectibles = MAX_SCATTERED_COLLECTIBLES;
            }
        }

        // Lives are capped at MAX_LIVES; the tuning may only lower the cap
        if self.max_lives == 0 || self.max_lives > MAX_LIVES {
            log::warn!("Tuning max_lives = {}, using {}", self.max_lives, MAX_LIVES);
            self.max_lives = MAX_LIVES;
        }

        for platform in &mut self.platforms {
            if let Some(osc) = platform.oscillation.as_mut() {
                osc.direction = osc.direction.signum();
                if osc.min_y > osc.max_y {
                    std::mem::swap(&mut osc.min_y, &mut osc.max_y);
                }
            }
        }

        self
    }
}
