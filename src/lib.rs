//! Asteroids - a vector arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, splitting, scoring)
//! - `renderer`: Draw lists and line vertices for an external window host
//! - `settings`: Tunable game configuration
//! - `highscores`: Sorted leaderboard
//! - `persistence`: JSON file load/save

pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Rotation applied per tick while a turn key is held (degrees)
    pub const TURN_RATE_DEG: f32 = 10.0;

    /// Player ship
    pub const PLAYER_RADIUS: f32 = 20.0;

    /// Bullets travel along their spawn heading at this (negative) speed on both axes
    pub const BULLET_SPEED_X: f32 = -6.0;
    pub const BULLET_SPEED_Y: f32 = -6.0;
    pub const BULLET_RADIUS: f32 = 5.0;

    /// Asteroid shape generation
    pub const ASTEROID_VERTICES: usize = 7;
    pub const ASTEROID_VARIANCE: f32 = 0.0;
    pub const ASTEROID_SPIKINESS: f32 = 1.0;
    /// Max spin (degrees/tick) and drift speed (pixels/tick per axis)
    pub const ASTEROID_MAX_SPIN: f32 = 3.0;
    pub const ASTEROID_MAX_SPEED: f32 = 2.5;
    /// Distance past the screen edge before an asteroid starts fading out
    pub const ASTEROID_OFFSCREEN_MARGIN: f32 = 25.0;
    /// Alpha change per tick while fading in or out
    pub const FADE_STEP: u8 = 15;

    /// Points awarded per destroyed asteroid size
    pub const SCORE_LARGE: u32 = 100;
    pub const SCORE_MEDIUM: u32 = 200;
    pub const SCORE_SMALL: u32 = 300;

    /// Children spawned when an asteroid splits
    pub const LARGE_SPLIT_COUNT: usize = 2;
    pub const MEDIUM_SPLIT_COUNT: usize = 3;
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Rotate a point about the origin by `degrees` (clockwise on a y-down screen)
#[inline]
pub fn rotate_degrees(point: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(point)
}

/// Direction a bullet fired at `degrees` travels, as a unit vector
///
/// Zero degrees points up the screen.
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.sin(), -rad.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(190.0) - (-170.0)).abs() < 1e-4);
        assert!((normalize_degrees(-190.0) - 170.0).abs() < 1e-4);
        assert!((normalize_degrees(720.0)).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_degrees_is_clockwise_on_screen() {
        // Pointing up (negative y); 90 degrees turns it to the right
        let p = rotate_degrees(Vec2::new(0.0, -1.0), 90.0);
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
    }

    #[test]
    fn test_heading_matches_rotation() {
        for deg in [0.0_f32, 45.0, 90.0, 200.0, -30.0] {
            let h = heading(deg);
            let r = rotate_degrees(Vec2::new(0.0, -1.0), deg);
            assert!((h - r).length() < 1e-5, "deg {deg}");
        }
    }
}
