use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::{fruit::Fruit, types::RayHit};
use crate::{
    config::SolverConfig,
    utils::math::{nearest_positive_root, ray_sphere_roots, slice_radius_squared},
};

/// A single simulated 4D sphere.
///
/// Velocity is implicit: `position - last_position` is the displacement of the
/// previous integration step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsObject {
    pub position: Vec4,
    pub last_position: Vec4,
    pub acceleration: Vec4,
    pub radius: f32,
    pub target_radius: f32,
    pub growing: bool,
    pub dynamic: bool,
    pub hidden: bool,
    pub fruit: Fruit,
}

impl PhysicsObject {
    /// Creates an object at rest with zero radius that grows into its tier.
    pub fn new(position: Vec4, fruit: Fruit, dynamic: bool, hidden: bool) -> Self {
        Self {
            position,
            last_position: position,
            acceleration: Vec4::ZERO,
            radius: 0.0,
            target_radius: fruit.radius(),
            growing: true,
            dynamic,
            hidden,
            fruit,
        }
    }

    /// Skips the growth animation.
    pub fn fully_grown(mut self) -> Self {
        self.radius = self.target_radius;
        self.growing = false;
        self
    }

    /// Advances growth and performs one damped Verlet step.
    pub fn update(&mut self, dt: f32, config: &SolverConfig) {
        if self.growing {
            self.radius += self.target_radius * config.grow_speed * dt;
            if self.radius >= self.target_radius {
                self.radius = self.target_radius;
                self.growing = false;
            }
        }

        let last_move = self.position - self.last_position;
        let next = self.position
            + last_move
            + (self.acceleration - last_move * config.velocity_damping) * (dt * dt);
        self.last_position = self.position;
        self.position = next;
        self.acceleration = Vec4::ZERO;
    }

    /// Ray test against this object's cross-section in slice `w`.
    pub fn test_ray(&self, w: f32, origin: Vec3, direction: Vec3) -> RayHit {
        let radius_sq = slice_radius_squared(self.radius, self.position.w, w);
        if radius_sq < 0.0 {
            return RayHit::MISS;
        }

        ray_sphere_roots(origin, direction, self.position.truncate(), radius_sq)
            .and_then(|(t0, t1)| nearest_positive_root(t0, t1))
            .map(|t| RayHit::new(t, origin + direction * t))
            .unwrap_or(RayHit::MISS)
    }

    pub fn accelerate(&mut self, acceleration: Vec4) {
        self.acceleration += acceleration;
    }

    /// Teleports the object and zeroes its velocity.
    pub fn set_position(&mut self, position: Vec4) {
        self.position = position;
        self.last_position = position;
    }

    /// Teleports the object while keeping its velocity vector.
    pub fn set_position_same_speed(&mut self, position: Vec4) {
        let to_last = self.last_position - self.position;
        self.position = position;
        self.last_position = position + to_last;
    }

    /// Displaces the object; the displacement also counts as velocity.
    pub fn move_by(&mut self, offset: Vec4) {
        self.position += offset;
    }

    pub fn add_velocity(&mut self, velocity: Vec4) {
        self.last_position -= velocity;
    }

    /// Scales the implicit velocity by `1 - ratio`.
    pub fn slowdown(&mut self, ratio: f32) {
        self.last_position += ratio * (self.position - self.last_position);
    }

    pub fn stop(&mut self) {
        self.last_position = self.position;
    }

    pub fn velocity(&self) -> Vec4 {
        self.position - self.last_position
    }

    pub fn speed(&self) -> f32 {
        self.velocity().length()
    }

    pub fn disable(&mut self) {
        self.hidden = true;
    }

    pub fn enable(&mut self) {
        self.hidden = false;
    }
}
