//! Per-frame simulation step
//!
//! The host calls [`tick`] once per frame with the elapsed time and the key
//! pressed since the previous frame, if any.

use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::physics::{clamp_to_world, integrate_player, move_platforms};
use super::spawn::{loop_ground, maybe_spawn, scroll_and_retire};
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete, edge-triggered input: each press acts once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Jump,
    MoveLeft,
    MoveRight,
    TogglePause,
    Restart,
    Quit,
}

impl Key {
    /// Default keyboard bindings
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Key::Jump),
            'a' => Some(Key::MoveLeft),
            'd' => Some(Key::MoveRight),
            'p' | ' ' => Some(Key::TogglePause),
            'r' => Some(Key::Restart),
            'x' => Some(Key::Quit),
            _ => None,
        }
    }
}

/// Apply a key press outside a frame step, then resolve whatever the move
/// ran into.
pub fn handle_key(state: &mut GameState, key: Key) {
    apply_key(state, key);
    clamp_to_world(state);
    if resolves_collisions(state) {
        resolve_collisions(state);
    }
    state.redraw_requested = true;
}

fn apply_key(state: &mut GameState, key: Key) {
    match key {
        Key::TogglePause => match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                state.events.push(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        },
        Key::Restart => state.reset(),
        Key::Quit => state.quit_requested = true,
        // Movement is frozen while paused or over
        _ if state.phase != GamePhase::Running => {}
        Key::Jump => state.player.vel_y = state.config.jump_strength,
        Key::MoveLeft => state.player.pos.x -= state.config.player_step,
        Key::MoveRight => state.player.pos.x += state.config.player_step,
    }
}

fn resolves_collisions(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Running => true,
        GamePhase::Paused => state.config.resolve_while_paused,
        GamePhase::GameOver => false,
    }
}

/// Frame duration actually integrated: malformed `dt` counts as zero and
/// frame-count mode ignores it.
fn effective_dt(state: &GameState, dt: f32) -> f32 {
    if !state.config.use_delta_time {
        1.0
    } else if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: Option<Key>, dt: f32) {
    let dt = effective_dt(state, dt);
    state.events.clear();

    if let Some(key) = input {
        apply_key(state, key);
        clamp_to_world(state);
    }

    if state.phase == GamePhase::Running {
        state.time_ticks += 1;

        integrate_player(state, dt);
        move_platforms(state, dt);
        scroll_and_retire(state, dt);
        loop_ground(state);
        maybe_spawn(state);
    }

    if resolves_collisions(state) {
        resolve_collisions(state);
    }

    // Ensure deterministic ordering
    state.normalize_order();
    state.redraw_requested = true;
}
