//! Entity spawning and retirement
//!
//! Collectibles and hazards either stream in one at a time from the right
//! edge or sit scattered across the world, depending on the spawn policy.
//! Ground segments tile the width and loop while scrolling.

use glam::Vec2;
use rand::Rng;

use super::state::{Collectible, GameEvent, GameState, GroundSegment, Hazard};
use crate::consts::{MAX_SCATTERED_COLLECTIBLES, MAX_WORLD_EXTENT, MIN_TILE_PITCH};
use crate::tuning::SpawnPolicy;

/// Tiles of `pitch` needed to cover `span`, bounded even for edited tuning
fn tile_count(span: f32, pitch: f32) -> usize {
    let pitch = pitch.max(MIN_TILE_PITCH);
    let span = span.clamp(0.0, MAX_WORLD_EXTENT);
    // NaN span saturates to 0
    (span / pitch).ceil() as usize
}

/// Clamp a probability for `random_bool`, NaN counts as never
fn chance(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Lay one tiling pass of ground starting at `start_x` (left edge)
fn tile_ground_pass(state: &mut GameState, start_x: f32) {
    let ground = state.config.ground;
    let pitch = ground.pitch.max(MIN_TILE_PITCH);
    let size = Vec2::new(ground.segment_width, ground.segment_height);

    for i in 0..tile_count(state.config.world_width, pitch) {
        let x = start_x + i as f32 * pitch;
        let id = state.next_entity_id();
        state.ground.push(GroundSegment {
            id,
            pos: Vec2::new(x, 0.0) + size * 0.5,
            size,
        });
    }
}

/// Cover the world width with ground from x = 0
pub fn seed_ground(state: &mut GameState) {
    tile_ground_pass(state, 0.0);
}

/// Append another pass once the rightmost segment drifts off the right edge
pub fn loop_ground(state: &mut GameState) {
    let pitch = state.config.ground.pitch.max(MIN_TILE_PITCH);
    let rightmost_left = state
        .ground
        .iter()
        .map(|g| g.pos.x - g.size.x / 2.0)
        .fold(f32::NEG_INFINITY, f32::max);

    if state.ground.is_empty() {
        seed_ground(state);
    } else if rightmost_left < state.config.world_width - pitch {
        tile_ground_pass(state, rightmost_left + pitch);
    }
}

/// Initial population after a reset
pub fn populate(state: &mut GameState) {
    if let SpawnPolicy::Scattered { .. } = state.config.spawn_policy {
        replenish_collectibles(state);
        tile_hazard_row(state);
    }
}

/// Top scattered collectibles back up to the target count
pub fn replenish_collectibles(state: &mut GameState) {
    let SpawnPolicy::Scattered {
        target_collectibles,
    } = state.config.spawn_policy
    else {
        return;
    };

    let target = target_collectibles.min(MAX_SCATTERED_COLLECTIBLES);
    let width = state.config.world_width.clamp(0.0, MAX_WORLD_EXTENT);
    if width.is_nan() {
        return;
    }

    let size = state.config.collectible_size;
    let y = state.config.spawn_y + size / 2.0;
    while state.collectibles.len() < target {
        let x = state.rng.random_range(0.0..=width).round();
        spawn_collectible(state, Vec2::new(x, y));
    }
}

/// A full row of hazards along the ground
pub fn tile_hazard_row(state: &mut GameState) {
    let pitch = state.config.hazard_size.max(MIN_TILE_PITCH);
    let y = state.config.spawn_y;
    for i in 0..tile_count(state.config.world_width, pitch) {
        spawn_hazard(state, Vec2::new(i as f32 * pitch, y));
    }
}

/// Per-frame spawner
pub fn maybe_spawn(state: &mut GameState) {
    match state.config.spawn_policy {
        SpawnPolicy::Scrolling => {
            // One lane: nothing new while anything is still on screen
            if !state.collectibles.is_empty() || !state.hazards.is_empty() {
                return;
            }
            if !state.rng.random_bool(chance(state.config.spawn_probability)) {
                return;
            }

            let pos = Vec2::new(state.config.world_width, state.config.spawn_y);
            if state.rng.random_bool(chance(state.config.collectible_weight)) {
                spawn_collectible(state, pos);
            } else {
                spawn_hazard(state, pos);
            }
        }
        SpawnPolicy::Scattered { .. } => replenish_collectibles(state),
    }
}

fn spawn_collectible(state: &mut GameState, pos: Vec2) {
    let id = state.next_entity_id();
    state.collectibles.push(Collectible {
        id,
        pos,
        size: state.config.collectible_size,
    });
    state.events.push(GameEvent::CollectibleSpawned { id });
    log::debug!("Collectible {} spawned at {:?}", id, pos);
}

fn spawn_hazard(state: &mut GameState, pos: Vec2) {
    let id = state.next_entity_id();
    state.hazards.push(Hazard {
        id,
        pos,
        size: state.config.hazard_size,
    });
    state.events.push(GameEvent::HazardSpawned { id });
    log::debug!("Hazard {} spawned at {:?}", id, pos);
}

/// Move scrolling entities left and drop the ones fully past the left edge
pub fn scroll_and_retire(state: &mut GameState, dt: f32) {
    let entity_dx = state.config.entity_scroll_speed * dt;
    let ground_dx = state.config.ground.scroll_speed * dt;

    for collectible in &mut state.collectibles {
        collectible.pos.x -= entity_dx;
    }
    for hazard in &mut state.hazards {
        hazard.pos.x -= entity_dx;
    }
    for segment in &mut state.ground {
        segment.pos.x -= ground_dx;
    }

    state.collectibles.retain(|c| c.aabb().max().x >= 0.0);
    state.hazards.retain(|h| h.aabb().max().x >= 0.0);
    state.ground.retain(|g| g.aabb().max().x >= 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::tuning::SimConfig;

    fn scrolling_state() -> GameState {
        GameState::new(SimConfig::scrolling(), 7)
    }

    #[test]
    fn test_seed_ground_tiles_width() {
        let state = scrolling_state();
        assert_eq!(state.ground.len(), 50);
        assert_eq!(state.ground[0].pos, Vec2::new(5.0, 2.5));
        assert_eq!(state.ground[49].pos, Vec2::new(495.0, 2.5));
    }

    #[test]
    fn test_loop_ground_appends_seamlessly() {
        let mut state = scrolling_state();
        scroll_and_retire(&mut state, 0.5);
        assert_eq!(state.ground.len(), 50);

        loop_ground(&mut state);
        assert_eq!(state.ground.len(), 100);

        let mut lefts: Vec<f32> = state.ground.iter().map(|g| g.pos.x - 5.0).collect();
        lefts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        assert!(lefts.windows(2).all(|w| (w[1] - w[0] - 10.0).abs() < 1e-3));

        // Far enough right now: no further pass
        loop_ground(&mut state);
        assert_eq!(state.ground.len(), 100);
    }

    #[test]
    fn test_loop_ground_reseeds_empty_strip() {
        let mut state = scrolling_state();
        state.ground.clear();
        loop_ground(&mut state);
        assert_eq!(state.ground.len(), 50);
    }

    #[test]
    fn test_scrolling_spawn_is_single_lane() {
        let mut state = scrolling_state();
        state.config.spawn_probability = 1.0;

        maybe_spawn(&mut state);
        assert_eq!(state.collectibles.len() + state.hazards.len(), 1);

        let pos = state
            .collectibles
            .first()
            .map(|c| c.pos)
            .or(state.hazards.first().map(|h| h.pos));
        assert_eq!(pos, Some(Vec2::new(500.0, 10.0)));

        for _ in 0..10 {
            maybe_spawn(&mut state);
        }
        assert_eq!(state.collectibles.len() + state.hazards.len(), 1);
    }

    #[test]
    fn test_collectible_weight_picks_kind() {
        let mut state = scrolling_state();
        state.config.spawn_probability = 1.0;
        state.config.collectible_weight = 1.0;
        maybe_spawn(&mut state);
        assert_eq!(state.collectibles.len(), 1);

        let mut state = scrolling_state();
        state.config.spawn_probability = 1.0;
        state.config.collectible_weight = 0.0;
        maybe_spawn(&mut state);
        assert_eq!(state.hazards.len(), 1);
    }

    #[test]
    fn test_zero_probability_never_spawns() {
        let mut state = scrolling_state();
        state.config.spawn_probability = 0.0;
        for _ in 0..1000 {
            maybe_spawn(&mut state);
        }
        assert!(state.collectibles.is_empty() && state.hazards.is_empty());
    }

    #[test]
    fn test_chance_clamps_edited_probabilities() {
        assert_eq!(chance(1.5), 1.0);
        assert_eq!(chance(-0.2), 0.0);
        assert_eq!(chance(f64::NAN), 0.0);
        assert_eq!(chance(0.25), 0.25);
    }

    #[test]
    fn test_out_of_range_probabilities_after_new() {
        let mut state = scrolling_state();
        state.config.spawn_probability = 1.5;
        state.config.collectible_weight = f64::NAN;

        maybe_spawn(&mut state);
        assert!(state.collectibles.is_empty());
        assert_eq!(state.hazards.len(), 1);
    }

    #[test]
    fn test_tile_count_is_bounded() {
        assert_eq!(tile_count(500.0, 10.0), 50);
        assert_eq!(tile_count(500.0, 1e-7), 500);
        assert_eq!(tile_count(f32::NAN, 10.0), 0);
        assert_eq!(tile_count(-5.0, 10.0), 0);
        assert_eq!(tile_count(1e9, 1e-7), MAX_WORLD_EXTENT as usize);
    }

    #[test]
    fn test_tiny_pitches_edited_after_new() {
        let mut state = GameState::new(SimConfig::scattered(), 7);
        state.config.hazard_size = 1e-7;
        state.config.ground.pitch = 1e-7;

        state.hazards.clear();
        tile_hazard_row(&mut state);
        assert_eq!(state.hazards.len(), 500);

        state.ground.clear();
        loop_ground(&mut state);
        assert_eq!(state.ground.len(), 500);
    }

    #[test]
    fn test_degenerate_tuning_document() {
        let config = SimConfig::from_json(
            r#"{"spawn_policy":{"Scattered":{"target_collectibles":4}},"hazard_size":1e-7}"#,
        )
        .unwrap();
        let state = GameState::new(config, 7);
        assert_eq!(state.config.hazard_size, MIN_TILE_PITCH);
        assert_eq!(state.collectibles.len(), 4);
        assert_eq!(state.hazards.len(), 500);
    }

    #[test]
    fn test_scattered_target_is_capped() {
        let mut state = GameState::new(SimConfig::scattered(), 7);
        state.config.spawn_policy = SpawnPolicy::Scattered {
            target_collectibles: usize::MAX,
        };
        replenish_collectibles(&mut state);
        assert_eq!(state.collectibles.len(), MAX_SCATTERED_COLLECTIBLES);
    }

    #[test]
    fn test_scattered_population() {
        let state = GameState::new(SimConfig::scattered(), 7);
        assert_eq!(state.collectibles.len(), 4);
        assert_eq!(state.hazards.len(), 50);
        assert!(state.collectibles.iter().all(|c| c.pos.y == 25.0));
        assert!(
            state
                .collectibles
                .iter()
                .all(|c| (0.0..=500.0).contains(&c.pos.x) && c.pos.x.fract() == 0.0)
        );
        assert_eq!(state.hazards[3].pos, Vec2::new(30.0, 10.0));
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_scroll_and_retire() {
        let mut state = scrolling_state();
        state.collectibles.push(Collectible {
            id: 900,
            pos: Vec2::new(100.0, 10.0),
            size: 30.0,
        });
        state.collectibles.push(Collectible {
            id: 901,
            pos: Vec2::new(-10.0, 10.0),
            size: 30.0,
        });
        state.hazards.push(Hazard {
            id: 902,
            pos: Vec2::new(-2.0, 10.0),
            size: 10.0,
        });

        scroll_and_retire(&mut state, 0.5);

        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.collectibles[0].pos.x, 85.0);
        assert!(state.hazards.is_empty());
        assert_eq!(state.ground[0].pos.x, 0.0);
    }
}
