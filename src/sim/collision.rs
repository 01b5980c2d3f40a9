//! Pairwise collision detection
//!
//! Everything in the field is a circle, so one overlap predicate serves
//! every interaction. The response (bounce, split, life loss) is dispatched
//! by the orchestrator on the pair of entity kinds; nothing here mutates
//! state.

use glam::Vec2;

/// Entity discriminant for collision-response dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Craft,
    Projectile,
    Obstacle,
}

/// What a collision between two kinds does to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// The craft loses a life and the field resets
    LoseLife,
    /// Both obstacles reflect along their separation
    Bounce,
    /// The projectile is consumed and the obstacle splits
    Split,
    /// The pair never interacts
    Ignore,
}

/// Collision-response lookup on a pair of kinds; symmetric in its arguments
pub fn response_for(a: EntityKind, b: EntityKind) -> Response {
    use EntityKind::*;
    match (a, b) {
        (Craft, Obstacle) | (Obstacle, Craft) => Response::LoseLife,
        (Obstacle, Obstacle) => Response::Bounce,
        (Projectile, Obstacle) | (Obstacle, Projectile) => Response::Split,
        (Craft, Craft | Projectile) | (Projectile, Craft | Projectile) => Response::Ignore,
    }
}

/// A circular collision body
pub trait Body {
    /// Stable entity id; the overlap predicate is false for identical ids
    fn id(&self) -> u32;
    fn kind(&self) -> EntityKind;
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// True iff `a` and `b` are distinct entities whose circles touch or overlap.
///
/// Pure and symmetric. Distance is compared against the sum of radii, so
/// tangent circles count as collided.
pub fn collided(a: &impl Body, b: &impl Body) -> bool {
    if a.id() == b.id() {
        return false;
    }
    a.center().distance(b.center()) <= a.radius() + b.radius()
}

/// New headings for two obstacles that ran into each other.
///
/// Both reverse along the normalized center separation: the first leaves
/// along the separation vector, the second along its negation. A
/// zero-length separation falls back to the +X axis so the result is
/// always a pair of unit vectors.
pub fn bounce_directions(a_center: Vec2, b_center: Vec2) -> (Vec2, Vec2) {
    let sep = a_center - b_center;
    let n = if sep.length_squared() > f32::EPSILON {
        sep.normalize()
    } else {
        Vec2::X
    };
    (n, -n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Circle {
        id: u32,
        pos: Vec2,
        radius: f32,
    }

    impl Body for Circle {
        fn id(&self) -> u32 {
            self.id
        }
        fn kind(&self) -> EntityKind {
            EntityKind::Obstacle
        }
        fn center(&self) -> Vec2 {
            self.pos
        }
        fn radius(&self) -> f32 {
            self.radius
        }
    }

    fn circle(id: u32, x: f32, y: f32, radius: f32) -> Circle {
        Circle {
            id,
            pos: Vec2::new(x, y),
            radius,
        }
    }

    #[test]
    fn overlapping_circles_collide() {
        let a = circle(1, 0.0, 0.0, 10.0);
        let b = circle(2, 15.0, 0.0, 10.0);
        assert!(collided(&a, &b));
    }

    #[test]
    fn tangent_circles_collide() {
        let a = circle(1, 0.0, 0.0, 10.0);
        let b = circle(2, 20.0, 0.0, 10.0);
        assert!(collided(&a, &b));
    }

    #[test]
    fn separated_circles_do_not_collide() {
        let a = circle(1, 0.0, 0.0, 10.0);
        let b = circle(2, 25.0, 0.0, 10.0);
        assert!(!collided(&a, &b));
    }

    #[test]
    fn same_entity_never_collides_with_itself() {
        let a = circle(7, 0.0, 0.0, 10.0);
        let also_a = circle(7, 0.0, 0.0, 10.0);
        assert!(!collided(&a, &also_a));
    }

    #[test]
    fn response_lookup_is_symmetric() {
        use EntityKind::*;
        for a in [Craft, Projectile, Obstacle] {
            for b in [Craft, Projectile, Obstacle] {
                assert_eq!(response_for(a, b), response_for(b, a));
            }
        }
    }

    #[test]
    fn response_lookup_matches_the_rules() {
        use EntityKind::*;
        assert_eq!(response_for(Craft, Obstacle), Response::LoseLife);
        assert_eq!(response_for(Obstacle, Obstacle), Response::Bounce);
        assert_eq!(response_for(Projectile, Obstacle), Response::Split);
        assert_eq!(response_for(Craft, Projectile), Response::Ignore);
    }

    #[test]
    fn bounce_reverses_along_separation() {
        let (da, db) = bounce_directions(Vec2::new(10.0, 0.0), Vec2::new(0.0, 0.0));
        assert_eq!(da, Vec2::X);
        assert_eq!(db, -Vec2::X);
    }

    #[test]
    fn bounce_with_coincident_centers_falls_back() {
        let p = Vec2::new(42.0, 7.0);
        let (da, db) = bounce_directions(p, p);
        assert_eq!(da, Vec2::X);
        assert_eq!(db, -Vec2::X);
    }

    proptest! {
        #[test]
        fn collided_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0, ar in 0.1f32..200.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0, br in 0.1f32..200.0,
        ) {
            let a = circle(1, ax, ay, ar);
            let b = circle(2, bx, by, br);
            prop_assert_eq!(collided(&a, &b), collided(&b, &a));
        }

        #[test]
        fn bounce_directions_are_unit_and_opposite(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
        ) {
            let (da, db) = bounce_directions(Vec2::new(ax, ay), Vec2::new(bx, by));
            prop_assert!((da.length() - 1.0).abs() < 1e-4);
            prop_assert!((da + db).length() < 1e-4);
        }
    }
}
