//! Containment geometry that keeps objects inside the bowl.

use glam::{Vec3, Vec4};

use crate::{
    config::HemisphereConfig,
    core::{object::PhysicsObject, types::RayHit},
    error::Result,
    utils::math::{angle_between, project_onto_tangent, ray_sphere_roots, DOWN},
};

const DEGENERATE_DISTANCE: f32 = 1e-6;

/// Shape that constrains objects and can be targeted by placement rays.
pub trait Boundary: Send + Sync {
    fn name(&self) -> &str;

    /// Pushes `object` back onto the valid side of the boundary, if it is touching it.
    fn enforce(&self, object: &mut PhysicsObject);

    /// Ray test in slice `w` used to resolve drop targets.
    fn check_ray(&self, w: f32, origin: Vec3, direction: Vec3) -> RayHit;
}

/// Hollow 4D spherical shell, open above `cutoff_angle` from the downward axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereBoundary {
    pub center: Vec4,
    pub radius: f32,
    pub margin: f32,
    /// Rim opening in radians, measured from the downward axis.
    pub cutoff_angle: f32,
}

impl Default for HemisphereBoundary {
    fn default() -> Self {
        let config = HemisphereConfig::default();
        Self::new(
            Vec4::from_array(config.center),
            config.radius,
            config.cutoff_angle_degrees,
            config.margin,
        )
    }
}

impl HemisphereBoundary {
    pub fn new(center: Vec4, radius: f32, cutoff_angle_degrees: f32, margin: f32) -> Self {
        Self {
            center,
            radius,
            margin,
            cutoff_angle: cutoff_angle_degrees.to_radians(),
        }
    }

    pub fn from_config(config: &HemisphereConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            Vec4::from_array(config.center),
            config.radius,
            config.cutoff_angle_degrees,
            config.margin,
        ))
    }

    pub fn inner_radius(&self) -> f32 {
        self.radius - self.margin
    }

    pub fn outer_radius(&self) -> f32 {
        self.radius + self.margin
    }

    /// Whether the direction `normal` from the center lies inside the bowl's cap.
    pub fn within_cutoff(&self, normal: Vec4) -> bool {
        angle_between(normal, DOWN) <= self.cutoff_angle
    }
}

impl Boundary for HemisphereBoundary {
    fn name(&self) -> &str {
        "hemisphere"
    }

    fn enforce(&self, object: &mut PhysicsObject) {
        let offset = object.position - self.center;
        let dist = offset.length();
        if dist < DEGENERATE_DISTANCE {
            return;
        }

        let inner_limit = self.inner_radius() - object.radius;
        let outer_limit = self.outer_radius() + object.radius;
        if dist <= inner_limit || dist >= outer_limit {
            return;
        }

        let normal = offset / dist;
        if !self.within_cutoff(normal) {
            return;
        }

        let target = if dist - inner_limit <= outer_limit - dist {
            inner_limit
        } else {
            outer_limit
        };
        let corrected = self.center + normal * target;
        let tangent = project_onto_tangent(corrected - object.last_position, normal);
        object.position = corrected;
        object.last_position = corrected - tangent;
    }

    fn check_ray(&self, w: f32, origin: Vec3, direction: Vec3) -> RayHit {
        let inner = self.inner_radius();
        let dw = self.center.w - w;
        if dw.abs() > inner {
            return RayHit::MISS;
        }
        let radius_sq = inner * inner - dw * dw;
        if radius_sq <= 0.0 {
            return RayHit::MISS;
        }

        let Some((t0, t1)) = ray_sphere_roots(origin, direction, self.center.truncate(), radius_sq)
        else {
            return RayHit::MISS;
        };

        let rim_height = self.center.y - radius_sq.sqrt() * self.cutoff_angle.cos();
        for t in [t0, t1] {
            if t <= 0.0 {
                continue;
            }
            let point = origin + direction * t;
            if point.y <= rim_height {
                return RayHit::new(t, point);
            }
        }
        RayHit::MISS
    }
}
