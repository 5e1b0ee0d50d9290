//! Procedural asteroid outlines and the fixed ship/bullet templates
//!
//! Polygons are built by walking once around a centre at randomized angular
//! steps and placing each vertex at a random distance along its spoke. Keeping
//! every step below half a turn and every spoke above zero makes the result
//! star-shaped about the centre, so it can never self-intersect.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use thiserror::Error;

use super::polygon::Polygon;
use crate::consts::{ASTEROID_SPIKINESS, ASTEROID_VARIANCE, ASTEROID_VERTICES};

/// Largest angular step allowed after rescaling (radians)
const MAX_STEP: f32 = 0.9 * PI;
/// Smallest angular step allowed after rescaling (radians)
const MIN_STEP: f32 = 1e-3;
/// Re-draws of the step set before falling back to even spacing
const MAX_STEP_DRAWS: u32 = 64;
/// Spokes never shrink below this fraction of the nominal radius
const MIN_SPOKE_FRACTION: f32 = 0.05;

/// Rejected polygon parameters
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShapeError {
    #[error("polygon radius must be positive (got {0})")]
    InvalidRadius(f32),
    #[error("polygon needs at least 3 vertices (got {0})")]
    TooFewVertices(usize),
}

/// Generate an irregular closed polygon approximating a circle
///
/// `variance` (0..=1) widens the range each angular step is drawn from;
/// `spikiness` (0..=1) stretches how far a vertex may sit from the centre.
/// Both are clamped.
pub fn generate_polygon<R: Rng + ?Sized>(
    center: Vec2,
    radius: f32,
    variance: f32,
    spikiness: f32,
    vertex_count: usize,
    rng: &mut R,
) -> Result<Polygon, ShapeError> {
    if !(radius > 0.0) || !radius.is_finite() {
        return Err(ShapeError::InvalidRadius(radius));
    }
    if vertex_count < 3 {
        return Err(ShapeError::TooFewVertices(vertex_count));
    }
    Ok(build_polygon(center, radius, variance, spikiness, vertex_count, rng))
}

/// Fresh outline for an asteroid of the given nominal radius
pub fn asteroid_template<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Polygon {
    build_polygon(
        Vec2::ZERO,
        radius,
        ASTEROID_VARIANCE,
        ASTEROID_SPIKINESS,
        ASTEROID_VERTICES,
        rng,
    )
}

/// Ship outline: a notched arrowhead pointing up
pub fn player_template() -> Polygon {
    Polygon::new(vec![
        Vec2::new(0.0, -15.0),
        Vec2::new(-10.0, 10.0),
        Vec2::new(0.0, 7.0),
        Vec2::new(10.0, 10.0),
    ])
}

/// Bullet outline: 1x2 rectangle ten pixels ahead of the muzzle
pub fn bullet_template() -> Polygon {
    Polygon::new(vec![
        Vec2::new(0.0, -10.0),
        Vec2::new(1.0, -10.0),
        Vec2::new(1.0, -8.0),
        Vec2::new(0.0, -8.0),
    ])
}

/// Parameters are assumed valid (radius > 0, vertex_count >= 3)
fn build_polygon<R: Rng + ?Sized>(
    center: Vec2,
    radius: f32,
    variance: f32,
    spikiness: f32,
    vertex_count: usize,
    rng: &mut R,
) -> Polygon {
    let n = vertex_count as f32;
    let variance = variance.clamp(0.0, 1.0) * TAU / n;
    let spikiness = spikiness.clamp(0.0, 1.0) * radius;

    let steps = angular_steps(vertex_count, variance, rng);

    let min_spoke = radius * MIN_SPOKE_FRACTION;
    let max_spoke = radius + spikiness;
    let mut angle = rng.random_range(0.0..TAU);
    let mut points = Vec::with_capacity(vertex_count);
    for step in steps {
        let spoke = (rng.random::<f32>() * max_spoke).clamp(min_spoke, 2.0 * radius);
        points.push(center + Vec2::new(angle.cos(), angle.sin()) * spoke);
        angle += step;
    }

    Polygon::new(points)
}

/// Random angular steps rescaled to sum to a full turn
fn angular_steps<R: Rng + ?Sized>(count: usize, variance: f32, rng: &mut R) -> Vec<f32> {
    let base = TAU / count as f32;
    let lower = (base - variance).max(0.0);
    let upper = base + variance;

    for _ in 0..MAX_STEP_DRAWS {
        let mut steps: Vec<f32> = (0..count)
            .map(|_| lower + rng.random::<f32>() * (upper - lower))
            .collect();
        let sum: f32 = steps.iter().sum();
        if sum <= 0.0 {
            continue;
        }
        let k = sum / TAU;
        for step in &mut steps {
            *step /= k;
        }
        if steps.iter().all(|&s| s > MIN_STEP && s < MAX_STEP) {
            return steps;
        }
    }

    log::warn!("angular steps rejected {MAX_STEP_DRAWS} times, using even spacing");
    vec![base; count]
}
