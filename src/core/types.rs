use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::fruit::Fruit;

/// World-space ray in the current 3D slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Unprojects a cursor (window pixels, origin top-left) at the near and far
    /// planes of a GL-style projection into a world-space ray.
    ///
    /// A zero-sized viewport yields a ray with a zero direction, which every
    /// ray test treats as a miss.
    pub fn from_screen(cursor: Vec2, viewport: Vec2, view: Mat4, projection: Mat4) -> Self {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return Self::new(Vec3::ZERO, Vec3::ZERO);
        }

        let ndc_x = cursor.x / viewport.x * 2.0 - 1.0;
        let ndc_y = (viewport.y - cursor.y) / viewport.y * 2.0 - 1.0;
        let inverse = (projection * view).inverse();

        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, -1.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Self::new(near, (far - near).normalize_or_zero())
    }
}

/// Result of a ray test against a boundary or object.
///
/// `distance` is `f32::INFINITY` on a miss so nearest-hit comparisons never need
/// to look at `hit` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub hit: bool,
    pub distance: f32,
    pub point: Vec3,
}

impl Default for RayHit {
    fn default() -> Self {
        Self::MISS
    }
}

impl RayHit {
    pub const MISS: Self = Self {
        hit: false,
        distance: f32::INFINITY,
        point: Vec3::ZERO,
    };

    pub fn new(distance: f32, point: Vec3) -> Self {
        Self {
            hit: true,
            distance,
            point,
        }
    }

    /// Keeps whichever of the two results is the nearer hit.
    pub fn nearest(self, other: Self) -> Self {
        if other.hit && other.distance < self.distance {
            other
        } else {
            self
        }
    }
}

/// Read-only view of one pool slot handed to the drawing layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub index: usize,
    pub position: Vec4,
    pub radius: f32,
    pub fruit: Fruit,
    pub hidden: bool,
}
