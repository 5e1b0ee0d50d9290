//! Game entities
//!
//! Every on-screen object shares one `Entity` record; behaviour that differs
//! per object is selected by matching on the closed `EntityKind` set.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use super::shape::{asteroid_template, bullet_template, player_template};
use crate::consts::*;
use crate::heading;

/// Playfield size, supplied by the host every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inside `[0, width] x [0, height]` grown by `margin` on every side
    #[inline]
    pub fn contains(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const YELLOW: Rgba = Rgba::new(255, 255, 0, 255);
    pub const RED: Rgba = Rgba::new(255, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Normalized `[r, g, b, a]` for vertex buffers
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Asteroid size classes; the value is the nominal radius in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Small => 20.0,
            AsteroidSize::Medium => 40.0,
            AsteroidSize::Large => 60.0,
        }
    }

    /// Points (and bonus-life progress) for destroying one
    pub fn points(self) -> u32 {
        match self {
            AsteroidSize::Large => SCORE_LARGE,
            AsteroidSize::Medium => SCORE_MEDIUM,
            AsteroidSize::Small => SCORE_SMALL,
        }
    }

    /// Size and number of the fragments left behind
    pub fn split(self) -> Option<(AsteroidSize, usize)> {
        match self {
            AsteroidSize::Large => Some((AsteroidSize::Medium, LARGE_SPLIT_COUNT)),
            AsteroidSize::Medium => Some((AsteroidSize::Small, MEDIUM_SPLIT_COUNT)),
            AsteroidSize::Small => None,
        }
    }
}

/// Fade and size state of an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidState {
    pub size: AsteroidSize,
    pub alpha: u8,
    /// Spawn grace period: not collidable with the player until this clears
    pub fading_in: bool,
    /// Drifted off-screen; fades out and then dies
    pub dying: bool,
}

/// What an entity is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Bullet,
    Asteroid(AsteroidState),
    /// Score and life counter overlay
    Hud { score: u32, lives: u32 },
    /// Title shown while no game is running
    WaitScreen,
}

/// A simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub position: Vec2,
    /// Degrees, clockwise on screen
    pub rotation: f32,
    /// Degrees added by each `advance_rotation`
    pub rotation_delta: f32,
    pub velocity: Vec2,
    /// Nominal radius for the coarse collision check
    pub radius: f32,
    pub color: Rgba,
    /// Marked for removal at the next prune
    pub dead: bool,
    /// Outline in local space
    pub template: Polygon,
}

impl Entity {
    fn base(id: u32, kind: EntityKind, position: Vec2, radius: f32, color: Rgba, template: Polygon) -> Self {
        Self {
            id,
            kind,
            position,
            rotation: 0.0,
            rotation_delta: 0.0,
            velocity: Vec2::ZERO,
            radius,
            color,
            dead: false,
            template,
        }
    }

    pub fn player(id: u32, position: Vec2) -> Self {
        Self::base(id, EntityKind::Player, position, PLAYER_RADIUS, Rgba::YELLOW, player_template())
    }

    /// A bullet leaving the ship along its current heading
    pub fn bullet(id: u32, player: &Entity) -> Self {
        let mut bullet = Self::base(
            id,
            EntityKind::Bullet,
            player.position,
            BULLET_RADIUS,
            Rgba::WHITE,
            bullet_template(),
        );
        bullet.rotation = player.rotation;
        bullet.velocity = Vec2::new(BULLET_SPEED_X, BULLET_SPEED_Y);
        bullet
    }

    /// A new asteroid with its own random outline, spin and drift
    pub fn asteroid<R: Rng + ?Sized>(id: u32, position: Vec2, size: AsteroidSize, rng: &mut R) -> Self {
        let template = asteroid_template(size.radius(), rng);
        let rotation_delta = rng.random_range(-ASTEROID_MAX_SPIN..ASTEROID_MAX_SPIN);
        let velocity = Vec2::new(
            rng.random_range(-ASTEROID_MAX_SPEED..ASTEROID_MAX_SPEED),
            rng.random_range(-ASTEROID_MAX_SPEED..ASTEROID_MAX_SPEED),
        );
        Self::asteroid_with(id, position, size, template, rotation_delta, velocity)
    }

    /// Asteroid from explicit parts (scripted scenes and tests)
    pub fn asteroid_with(
        id: u32,
        position: Vec2,
        size: AsteroidSize,
        template: Polygon,
        rotation_delta: f32,
        velocity: Vec2,
    ) -> Self {
        let state = AsteroidState {
            size,
            alpha: 0,
            fading_in: true,
            dying: false,
        };
        let mut asteroid = Self::base(
            id,
            EntityKind::Asteroid(state),
            position,
            size.radius(),
            Rgba::RED.with_alpha(0),
            template,
        );
        asteroid.rotation_delta = rotation_delta;
        asteroid.velocity = velocity;
        asteroid
    }

    pub fn hud(id: u32, position: Vec2, score: u32, lives: u32) -> Self {
        Self::base(id, EntityKind::Hud { score, lives }, position, 0.0, Rgba::WHITE, Polygon::default())
    }

    pub fn wait_screen(id: u32, position: Vec2) -> Self {
        Self::base(id, EntityKind::WaitScreen, position, 0.0, Rgba::WHITE, Polygon::default())
    }

    /// Outline at the current position and rotation
    pub fn current_outline(&self) -> Polygon {
        self.template.transformed(self.position, self.rotation)
    }

    /// Spin by one rotation step
    #[inline]
    pub fn advance_rotation(&mut self) {
        self.rotation += self.rotation_delta;
    }

    /// Outline for this frame, then spin; each call advances rotation once
    pub fn take_outline(&mut self) -> Polygon {
        let outline = self.current_outline();
        self.advance_rotation();
        outline
    }

    pub fn asteroid_state(&self) -> Option<&AsteroidState> {
        match &self.kind {
            EntityKind::Asteroid(state) => Some(state),
            _ => None,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Asteroid that has finished fading in and is not marked dead
    pub fn is_collidable_asteroid(&self) -> bool {
        self.is_alive() && matches!(&self.kind, EntityKind::Asteroid(s) if !s.fading_in)
    }

    /// Step the entity forward one tick
    pub fn advance(&mut self, bounds: Bounds) {
        match &mut self.kind {
            EntityKind::Player => {
                self.position = bounds.center();
                self.velocity = Vec2::ZERO;
            }
            EntityKind::Bullet => {
                // Velocity components are negative speeds along the heading
                self.position -= heading(self.rotation) * self.velocity;
                if !bounds.contains(self.position, 0.0) {
                    self.dead = true;
                }
            }
            EntityKind::Asteroid(state) => {
                self.position += self.velocity;
                if !bounds.contains(self.position, ASTEROID_OFFSCREEN_MARGIN) {
                    state.dying = true;
                }

                if state.fading_in {
                    if state.alpha < u8::MAX {
                        state.alpha = state.alpha.saturating_add(FADE_STEP);
                    } else {
                        state.fading_in = false;
                    }
                }
                if state.dying && !state.fading_in {
                    state.alpha = state.alpha.saturating_sub(FADE_STEP);
                    if state.alpha == 0 {
                        self.dead = true;
                    }
                }
                self.color = self.color.with_alpha(state.alpha);
            }
            EntityKind::Hud { .. } => {
                self.position = Vec2::new(bounds.width / 20.0, bounds.height / 20.0);
            }
            EntityKind::WaitScreen => {
                self.position = bounds.center();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Bounds = Bounds::new(800.0, 600.0);

    fn still_asteroid(position: Vec2) -> Entity {
        Entity::asteroid_with(
            1,
            position,
            AsteroidSize::Large,
            Polygon::rect(Vec2::ZERO, Vec2::splat(60.0)),
            0.0,
            Vec2::ZERO,
        )
    }

    #[test]
    fn test_take_outline_advances_rotation_once_per_call() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut rock = Entity::asteroid(1, Vec2::new(100.0, 100.0), AsteroidSize::Medium, &mut rng);
        rock.rotation_delta = 2.5;

        let first = rock.take_outline();
        let second = rock.take_outline();
        assert!((rock.rotation - 5.0).abs() < 1e-5);

        // Second outline equals the first rotated by one delta about the position
        let expected = first
            .points
            .iter()
            .map(|&p| rock.position + crate::rotate_degrees(p - rock.position, 2.5));
        for (got, want) in second.points.iter().zip(expected) {
            assert!((*got - want).length() < 1e-3);
        }
    }

    #[test]
    fn test_current_outline_is_pure() {
        let mut player = Entity::player(1, BOUNDS.center());
        player.rotation_delta = 10.0;
        let a = player.current_outline();
        let b = player.current_outline();
        assert_eq!(a, b);
        assert_eq!(player.rotation, 0.0);
    }

    #[test]
    fn test_player_recenters() {
        let mut player = Entity::player(1, Vec2::new(5.0, 5.0));
        player.velocity = Vec2::new(3.0, 3.0);
        player.advance(Bounds::new(1000.0, 500.0));
        assert_eq!(player.position, Vec2::new(500.0, 250.0));
        assert_eq!(player.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_bullet_moves_along_spawn_heading() {
        let mut player = Entity::player(1, BOUNDS.center());
        player.rotation = 90.0;
        let mut bullet = Entity::bullet(2, &player);
        bullet.advance(BOUNDS);
        // 90 degrees fires to the right
        assert!((bullet.position.x - 406.0).abs() < 1e-3);
        assert!((bullet.position.y - 300.0).abs() < 1e-3);
        assert!(!bullet.dead);
    }

    #[test]
    fn test_bullet_dies_off_screen() {
        let player = Entity::player(1, Vec2::new(400.0, 3.0));
        let mut bullet = Entity::bullet(2, &player);
        bullet.advance(BOUNDS);
        assert!(bullet.position.y < 0.0);
        assert!(bullet.dead);
    }

    #[test]
    fn test_asteroid_random_ranges() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let rock = Entity::asteroid(1, Vec2::ZERO, AsteroidSize::Small, &mut rng);
            assert!(rock.rotation_delta >= -3.0 && rock.rotation_delta < 3.0);
            assert!(rock.velocity.x.abs() <= 2.5 && rock.velocity.y.abs() <= 2.5);
            assert_eq!(rock.radius, 20.0);
        }
    }

    #[test]
    fn test_asteroid_fade_in() {
        let mut rock = still_asteroid(Vec2::new(400.0, 300.0));
        assert!(!rock.is_collidable_asteroid());

        for _ in 0..17 {
            rock.advance(BOUNDS);
        }
        let state = rock.asteroid_state().copied().unwrap();
        assert_eq!(state.alpha, 255);
        // Fade-in ends on the tick after alpha tops out
        assert!(state.fading_in);

        rock.advance(BOUNDS);
        assert!(rock.is_collidable_asteroid());
        assert_eq!(rock.color.a, 255);
    }

    #[test]
    fn test_asteroid_fade_out_then_dies() {
        let mut rock = still_asteroid(Vec2::new(400.0, 300.0));
        for _ in 0..18 {
            rock.advance(BOUNDS);
        }
        assert!(rock.is_collidable_asteroid());

        rock.position = Vec2::new(-26.0, 300.0);
        let mut ticks = 0;
        while !rock.dead {
            rock.advance(BOUNDS);
            ticks += 1;
            assert!(ticks <= 17, "fade-out never finished");
        }
        assert_eq!(ticks, 17);
        assert!(rock.asteroid_state().unwrap().dying);
        assert_eq!(rock.color.a, 0);
    }

    #[test]
    fn test_asteroid_within_margin_is_not_dying() {
        let mut rock = still_asteroid(Vec2::new(-24.0, 300.0));
        rock.advance(BOUNDS);
        assert!(!rock.asteroid_state().unwrap().dying);
    }

    #[test]
    fn test_asteroid_drifts_without_bouncing() {
        let mut rock = still_asteroid(Vec2::new(799.0, 300.0));
        rock.velocity = Vec2::new(2.0, 0.0);
        for _ in 0..20 {
            rock.advance(BOUNDS);
        }
        assert!((rock.position.x - 839.0).abs() < 1e-3);
    }

    #[test]
    fn test_hud_pins_to_corner() {
        let mut hud = Entity::hud(1, Vec2::ZERO, 0, 3);
        hud.advance(BOUNDS);
        assert_eq!(hud.position, Vec2::new(40.0, 30.0));
    }

    #[test]
    fn test_split_table() {
        assert_eq!(AsteroidSize::Large.split(), Some((AsteroidSize::Medium, 2)));
        assert_eq!(AsteroidSize::Medium.split(), Some((AsteroidSize::Small, 3)));
        assert_eq!(AsteroidSize::Small.split(), None);
    }
}
