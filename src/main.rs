//! Mushroom Hop headless runner
//!
//! Plays a scripted session without a window and logs what happened. Useful
//! for checking tuning changes: `mushroom-hop [scrolling|scattered] [seed] [frames]`.

use mushroom_hop::consts::DEFAULT_SEED;
use mushroom_hop::sim::{GameEvent, GamePhase, GameState, Key, tick};
use mushroom_hop::tuning::SimConfig;

/// Simulated frame time (60 Hz host)
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 3600;

/// Scripted key presses: hop regularly, drift back and forth
fn scripted_input(frame: u32) -> Option<Key> {
    match frame % 120 {
        0 | 45 => Some(Key::Jump),
        60 if frame % 240 < 120 => Some(Key::MoveLeft),
        60 => Some(Key::MoveRight),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next().as_deref() {
        Some("scattered") => SimConfig::scattered(),
        Some("scrolling") | None => SimConfig::scrolling(),
        Some(other) => {
            log::warn!("Unknown preset '{}', using scrolling", other);
            SimConfig::scrolling()
        }
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    log::info!("Mushroom Hop (headless) starting, seed {}", seed);
    let mut state = GameState::new(config, seed);

    let mut pickups = 0u32;
    let mut hits = 0u32;
    for frame in 0..frames {
        tick(&mut state, scripted_input(frame), FRAME_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::CollectiblePicked { .. } => pickups += 1,
                GameEvent::HazardHit { .. } => hits += 1,
                _ => {}
            }
        }

        if state.phase == GamePhase::GameOver {
            log::info!("Game over after {} frames", frame + 1);
            break;
        }
    }

    let view = state.render_state();
    log::info!("{} pickups, {} hazard hits", pickups, hits);
    println!("{}", view.hud_line());
    if let Some(banner) = view.banner() {
        println!("{}", banner);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `tick` themselves
}
