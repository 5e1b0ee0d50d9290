//! Demo-mode pilot
//!
//! Turns the ship toward the nearest asteroid and fires once lined up.
//! Produces ordinary input events so the tick treats it like a player.

use glam::Vec2;

use super::state::{GameState, InputEvent, Key};
use crate::normalize_degrees;

/// Heading error (degrees) within which the pilot holds still and fires
pub const AIM_TOLERANCE_DEG: f32 = 5.0;
/// Fire on every n-th tick while aimed
pub const FIRE_EVERY_TICKS: u64 = 3;

/// Heading in degrees that points from `from` toward `to`
///
/// Zero is straight up the screen, positive turns clockwise.
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.x.atan2(-d.y).to_degrees()
}

/// Events for this tick
pub fn plan(state: &GameState) -> Vec<InputEvent> {
    let ship = state.player.position;
    let target = state
        .asteroids
        .iter()
        .filter(|a| a.is_alive())
        .min_by(|a, b| {
            a.position
                .distance_squared(ship)
                .total_cmp(&b.position.distance_squared(ship))
        });

    let Some(target) = target else {
        return vec![InputEvent::KeyUp(Key::RotateRight)];
    };

    let error = normalize_degrees(bearing(ship, target.position) - state.player.rotation);
    if error.abs() <= AIM_TOLERANCE_DEG {
        let mut events = vec![InputEvent::KeyUp(Key::RotateRight)];
        if state.time_ticks % FIRE_EVERY_TICKS == 0 {
            events.push(InputEvent::KeyDown(Key::Fire));
            events.push(InputEvent::KeyUp(Key::Fire));
        }
        events
    } else if error > 0.0 {
        vec![InputEvent::KeyDown(Key::RotateRight)]
    } else {
        vec![InputEvent::KeyDown(Key::RotateLeft)]
    }
}
