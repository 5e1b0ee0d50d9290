//! Per-frame simulation tick
//!
//! One call advances the game by one timer tick, in a fixed order:
//! spawn, bullet hits, ship hits, prune, advance, spin, difficulty.

use glam::Vec2;
use rand::Rng;

use super::autopilot;
use super::collision::collides;
use super::entity::{AsteroidSize, Bounds, Entity};
use super::polygon::Polygon;
use super::state::{GameEvent, GamePhase, GameState, InputEvent};

/// Input for a single tick
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Current playfield size
    pub bounds: Bounds,
    /// Key transitions since the previous tick, in arrival order
    pub events: Vec<InputEvent>,
    /// Demo mode - the autopilot steers and fires
    pub autopilot: bool,
}

impl TickInput {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            events: Vec::new(),
            autopilot: false,
        }
    }
}

/// Advance the game state by one tick
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    let bounds = input.bounds;

    if input.autopilot && state.is_running() {
        for event in autopilot::plan(state) {
            state.handle_input(event);
        }
    }
    for &event in &input.events {
        state.handle_input(event);
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Idle | GamePhase::GameOver => {
            state.wait_screen.advance(bounds);
            return;
        }
        GamePhase::Running => {}
    }

    // Frozen after a hit; the frame still renders
    if state.is_stunned() {
        state.hud.advance(bounds);
        return;
    }

    // 1. Top up the field
    if state.asteroids.len() < state.difficulty as usize {
        spawn_large_asteroid(state, bounds, rng);
    }

    // 2. Bullets vs asteroids
    bullet_asteroid_pass(state, rng);

    // 3. Ship vs asteroids
    player_asteroid_pass(state);
    if state.phase != GamePhase::Running {
        return;
    }

    // 4. Prune
    state.bullets.retain(|b| !b.dead);
    state.asteroids.retain(|a| !a.dead);

    // 5. Move
    state.player.advance(bounds);
    state.hud.advance(bounds);
    for bullet in &mut state.bullets {
        bullet.advance(bounds);
    }
    for asteroid in &mut state.asteroids {
        asteroid.advance(bounds);
    }

    // 6. Spin, once per entity per tick
    state.player.advance_rotation();
    for bullet in &mut state.bullets {
        bullet.advance_rotation();
    }
    for asteroid in &mut state.asteroids {
        asteroid.advance_rotation();
    }

    // 7. Difficulty
    state.ramp_difficulty();

    log::trace!(
        "tick {}: bullets={} asteroids={} score={} lives={}",
        state.time_ticks,
        state.bullets.len(),
        state.asteroids.len(),
        state.score,
        state.lives
    );
}

/// Square kept clear of new asteroids, centred on the screen
pub fn safe_zone(state: &GameState, bounds: Bounds) -> Polygon {
    Polygon::rect(bounds.center(), Vec2::splat(state.settings.safe_zone_size))
}

/// Place one Large asteroid at a random spot whose outline misses the safe zone
///
/// Gives up after `max_spawn_attempts` and uses the top-left corner.
pub fn spawn_large_asteroid<R: Rng + ?Sized>(state: &mut GameState, bounds: Bounds, rng: &mut R) {
    let zone = safe_zone(state, bounds);
    let attempts = state.settings.max_spawn_attempts;
    let id = state.next_entity_id();

    for _ in 0..attempts {
        let position = random_position(bounds, rng);
        let candidate = Entity::asteroid(id, position, AsteroidSize::Large, rng);
        if !candidate.current_outline().intersects(&zone) {
            state.asteroids.push(candidate);
            return;
        }
    }

    log::warn!("no safe asteroid placement after {attempts} attempts, using corner");
    state.events.push(GameEvent::SpawnFallback { attempts });
    state
        .asteroids
        .push(Entity::asteroid(id, Vec2::ZERO, AsteroidSize::Large, rng));
}

/// Whole-pixel position inside the playfield
fn random_position<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Vec2 {
    let w = (bounds.width as u32).max(1);
    let h = (bounds.height as u32).max(1);
    Vec2::new(rng.random_range(0..w) as f32, rng.random_range(0..h) as f32)
}

/// Every live bullet against every live asteroid; hits destroy both and split the rock
fn bullet_asteroid_pass<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let mut fragments = Vec::new();

    for bi in 0..state.bullets.len() {
        for ai in 0..state.asteroids.len() {
            if !collides(&state.bullets[bi], &state.asteroids[ai]) {
                continue;
            }
            state.bullets[bi].dead = true;
            state.asteroids[ai].dead = true;
            let destroyed = state.asteroids[ai].clone();
            fragments.extend(state.split_asteroid(&destroyed, rng));
            // This bullet is spent
            break;
        }
    }

    state.asteroids.extend(fragments);
}

/// Faded-in asteroids against the ship
fn player_asteroid_pass(state: &mut GameState) {
    for ai in 0..state.asteroids.len() {
        if !state.asteroids[ai].is_collidable_asteroid() {
            continue;
        }
        if collides(&state.player, &state.asteroids[ai]) {
            state.asteroids[ai].dead = true;
            state.player_hit();
            if state.phase != GamePhase::Running {
                return;
            }
        }
    }
}
