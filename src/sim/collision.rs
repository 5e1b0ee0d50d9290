//! Two-stage collision detection between entities
//!
//! A cheap bounding-circle test on the nominal radii rejects most pairs;
//! only the survivors pay for the exact outline intersection.

use super::entity::Entity;

/// Coarse pre-check: centres no further apart than the sum of the radii
#[inline]
pub fn within_radii(a: &Entity, b: &Entity) -> bool {
    a.position.distance(b.position) <= a.radius + b.radius
}

/// Exact check on the current outlines
pub fn outlines_intersect(a: &Entity, b: &Entity) -> bool {
    a.current_outline().intersects(&b.current_outline())
}

/// Full two-stage test using the entities' current position and rotation
///
/// Entities marked dead never collide.
pub fn collides(a: &Entity, b: &Entity) -> bool {
    if a.dead || b.dead {
        return false;
    }
    within_radii(a, b) && outlines_intersect(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::AsteroidSize;
    use crate::sim::polygon::Polygon;
    use crate::sim::shape::generate_polygon;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn square_rock(id: u32, position: Vec2, half: f32) -> Entity {
        Entity::asteroid_with(
            id,
            position,
            AsteroidSize::Large,
            Polygon::rect(Vec2::ZERO, Vec2::splat(half * 2.0)),
            0.0,
            Vec2::ZERO,
        )
    }

    #[test]
    fn test_far_apart_rejected_by_pre_check() {
        let a = square_rock(1, Vec2::new(0.0, 0.0), 10.0);
        let b = square_rock(2, Vec2::new(500.0, 0.0), 10.0);
        assert!(!within_radii(&a, &b));
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_pre_check_passes_but_outlines_miss() {
        // Radii are 60 each but the outlines are tiny
        let a = square_rock(1, Vec2::new(0.0, 0.0), 5.0);
        let b = square_rock(2, Vec2::new(50.0, 0.0), 5.0);
        assert!(within_radii(&a, &b));
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_overlapping_outlines_collide() {
        let a = square_rock(1, Vec2::new(0.0, 0.0), 30.0);
        let b = square_rock(2, Vec2::new(50.0, 0.0), 30.0);
        assert!(collides(&a, &b));
    }

    #[test]
    fn test_dead_entities_never_collide() {
        let a = square_rock(1, Vec2::new(0.0, 0.0), 30.0);
        let mut b = square_rock(2, Vec2::new(10.0, 0.0), 30.0);
        b.dead = true;
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_collides_does_not_spin() {
        let mut a = square_rock(1, Vec2::new(0.0, 0.0), 30.0);
        a.rotation_delta = 3.0;
        let b = square_rock(2, Vec2::new(10.0, 0.0), 30.0);
        collides(&a, &b);
        collides(&a, &b);
        assert_eq!(a.rotation, 0.0);
    }

    proptest! {
        /// For outlines that fit inside their nominal radius, any exact hit
        /// also passes the coarse check.
        #[test]
        fn prop_pre_check_is_superset_of_exact(
            seed in any::<u64>(),
            ra in 5.0f32..60.0,
            rb in 5.0f32..60.0,
            bx in -150.0f32..150.0,
            by in -150.0f32..150.0,
            rot in -180.0f32..180.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let ta = generate_polygon(Vec2::ZERO, ra, 0.5, 0.0, 7, &mut rng).unwrap();
            let tb = generate_polygon(Vec2::ZERO, rb, 0.5, 0.0, 9, &mut rng).unwrap();
            prop_assume!(ta.bounding_radius() <= ra && tb.bounding_radius() <= rb);

            let mut a = Entity::asteroid_with(1, Vec2::ZERO, AsteroidSize::Small, ta, 0.0, Vec2::ZERO);
            let mut b = Entity::asteroid_with(2, Vec2::new(bx, by), AsteroidSize::Small, tb, 0.0, Vec2::ZERO);
            a.radius = ra;
            b.radius = rb;
            b.rotation = rot;

            if outlines_intersect(&a, &b) {
                prop_assert!(within_radii(&a, &b));
            }
        }
    }
}
