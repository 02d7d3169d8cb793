//! Player vs collectible/hazard resolution
//!
//! Overlaps are gathered first and applied afterwards, so stores are never
//! mutated while being scanned. Every overlap in a frame counts.

use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::HazardResponse;

/// Score pickups, apply hazard damage and the game-over transition
pub fn resolve_collisions(state: &mut GameState) {
    resolve_collectibles(state);
    resolve_hazards(state);
}

fn resolve_collectibles(state: &mut GameState) {
    let player_box = state.player.aabb();
    let picked: Vec<u32> = state
        .collectibles
        .iter()
        .filter(|c| player_box.intersects(&c.aabb()))
        .map(|c| c.id)
        .collect();

    if picked.is_empty() {
        return;
    }

    for &id in &picked {
        state.player.score += 1;
        state.events.push(GameEvent::CollectiblePicked {
            id,
            score: state.player.score,
        });
        log::debug!("Collectible {} picked, score {}", id, state.player.score);
    }
    state.collectibles.retain(|c| !picked.contains(&c.id));

    spawn::replenish_collectibles(state);
}

fn resolve_hazards(state: &mut GameState) {
    let player_box = state.player.aabb();
    let hit: Vec<u32> = state
        .hazards
        .iter()
        .filter(|h| player_box.intersects(&h.aabb()))
        .map(|h| h.id)
        .collect();

    if hit.is_empty() {
        return;
    }
    state.hazards.retain(|h| !hit.contains(&h.id));

    for &id in &hit {
        let player = &mut state.player;
        player.lives = player.lives.saturating_sub(1);
        state.events.push(GameEvent::HazardHit {
            id,
            lives: player.lives,
        });
        log::debug!("Hazard {} hit, {} lives left", id, player.lives);

        if player.lives == 0 {
            if state.phase != GamePhase::GameOver {
                state.phase = GamePhase::GameOver;
                state.events.push(GameEvent::GameOver {
                    score: player.score,
                });
                log::info!("Game over with score {}", player.score);
            }
        } else if state.config.hazard_response == HazardResponse::Respawn {
            player.respawn(state.config.respawn_position);
            state.events.push(GameEvent::PlayerRespawned);
        }
    }
}
