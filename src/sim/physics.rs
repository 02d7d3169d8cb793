//! Vertical physics and platform resting
//!
//! Velocity is in units per frame: gravity scales by `dt`, but position
//! advances by the full velocity each frame.

use super::state::GameState;
use crate::tuning::GravityMode;

/// Integrate gravity, clamp to the world, then settle on the first
/// platform the player overlaps.
pub fn integrate_player(state: &mut GameState, dt: f32) {
    let gravity = state.config.gravity;
    let player = &mut state.player;

    player.vel_y += gravity * dt;
    player.pos.y += player.vel_y;

    clamp_to_world(state);

    let player = &mut state.player;
    let player_box = player.aabb();
    player.resting = false;
    if let Some(platform) = state
        .platforms
        .iter()
        .find(|p| player_box.intersects(&p.aabb()))
    {
        player.pos.y = platform.top() + player.radius;
        player.vel_y = 0.0;
        player.resting = true;
    }

    if !player.resting && state.config.gravity_mode == GravityMode::Double {
        player.vel_y += gravity * dt;
    }
}

/// Keep the player's circle inside `[0, width] x [0, height]`
pub fn clamp_to_world(state: &mut GameState) {
    let width = state.config.world_width;
    let height = state.config.world_height;
    let player = &mut state.player;
    let r = player.radius;

    if player.pos.y - r < 0.0 {
        player.pos.y = r;
        player.vel_y = 0.0;
    }
    if player.pos.y + r > height {
        player.pos.y = height - r;
        player.vel_y = 0.0;
    }

    player.pos.x = if width > 2.0 * r {
        player.pos.x.clamp(r, width - r)
    } else {
        width / 2.0
    };
}

/// Advance bobbing platforms
pub fn move_platforms(state: &mut GameState, dt: f32) {
    for platform in &mut state.platforms {
        platform.bob(dt);
    }
}
