//! Pairwise penalty-based contact resolution between 4D spheres.

use glam::Vec4;

use crate::core::{fruit::Fruit, object::PhysicsObject};

/// Pseudo-mass used to weight the separation of two touching objects.
fn weight(object: &PhysicsObject) -> f32 {
    object.radius.powi(4)
}

/// Separates two overlapping objects along the axis joining their centers.
///
/// Each dynamic object moves by a share of `response_coef * penetration`
/// proportional to its partner's weight; a static partner counts as infinitely
/// heavy. Returns `true` when a correction was applied.
pub fn solve_contact(
    a: &mut PhysicsObject,
    b: &mut PhysicsObject,
    response_coef: f32,
    eps: f32,
) -> bool {
    if a.hidden || b.hidden {
        return false;
    }
    if !a.dynamic && !b.dynamic {
        return false;
    }

    let axis = a.position - b.position;
    let dist2 = axis.length_squared();
    let combined_radius = a.radius + b.radius;
    if !(dist2 > eps && dist2 < combined_radius * combined_radius) {
        return false;
    }

    let dist = dist2.sqrt();
    let penetration = combined_radius - dist;
    if penetration <= 0.0 {
        return false;
    }

    let (share_a, share_b) = match (a.dynamic, b.dynamic) {
        (true, false) => (1.0, 0.0),
        (false, true) => (0.0, 1.0),
        _ => {
            let (wa, wb) = (weight(a), weight(b));
            let total = wa + wb;
            if total < f32::MIN_POSITIVE {
                (0.5, 0.5)
            } else {
                (wb / total, wa / total)
            }
        }
    };

    let correction = axis / dist * (response_coef * penetration);
    a.position += correction * share_a;
    b.position -= correction * share_b;
    true
}

/// Fruit two touching objects should merge into, if they qualify.
///
/// Both must be visible, dynamic, fully grown, of the same non-final tier, and
/// overlapping.
pub fn merge_target(a: &PhysicsObject, b: &PhysicsObject) -> Option<Fruit> {
    if a.hidden || b.hidden || !a.dynamic || !b.dynamic {
        return None;
    }
    if a.growing || b.growing || a.fruit != b.fruit {
        return None;
    }
    let combined_radius = a.radius + b.radius;
    if a.position.distance_squared(b.position) >= combined_radius * combined_radius {
        return None;
    }
    a.fruit.next()
}

/// Where a merged object is spawned.
pub fn merge_point(a: &PhysicsObject, b: &PhysicsObject) -> Vec4 {
    (a.position + b.position) * 0.5
}
