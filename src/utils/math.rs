//! Additional math helpers layered on top of `glam`, extended to four dimensions.

use glam::{Vec3, Vec4};

/// Downward axis of the bowl. The w component is always zero.
pub const DOWN: Vec4 = Vec4::new(0.0, -1.0, 0.0, 0.0);

/// Angle in radians between two unit vectors, robust to rounding outside [-1, 1].
pub fn angle_between(a: Vec4, b: Vec4) -> f32 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Removes the component of `v` along the unit `normal`.
pub fn project_onto_tangent(v: Vec4, normal: Vec4) -> Vec4 {
    v - normal * v.dot(normal)
}

/// Squared radius of the 3D cross-section of a 4D sphere taken at slice `w`.
///
/// Negative when the slice misses the sphere entirely.
pub fn slice_radius_squared(radius: f32, center_w: f32, w: f32) -> f32 {
    let dw = center_w - w;
    radius * radius - dw * dw
}

/// Solves `|origin + t * direction - center|^2 = radius_sq` for `t`.
///
/// Returns both roots in ascending order, or `None` when the ray misses or the
/// direction is degenerate.
pub fn ray_sphere_roots(
    origin: Vec3,
    direction: Vec3,
    center: Vec3,
    radius_sq: f32,
) -> Option<(f32, f32)> {
    let a = direction.length_squared();
    if a < 1e-12 || radius_sq < 0.0 {
        return None;
    }
    let oc = origin - center;
    let b = 2.0 * oc.dot(direction);
    let c = oc.length_squared() - radius_sq;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_disc = discriminant.sqrt();
    let t0 = (-b - sqrt_disc) / (2.0 * a);
    let t1 = (-b + sqrt_disc) / (2.0 * a);
    Some((t0, t1))
}

/// Smallest strictly positive root, if any.
pub fn nearest_positive_root(t0: f32, t1: f32) -> Option<f32> {
    match (t0 > 0.0, t1 > 0.0) {
        (true, true) => Some(t0.min(t1)),
        (true, false) => Some(t0),
        (false, true) => Some(t1),
        (false, false) => None,
    }
}
