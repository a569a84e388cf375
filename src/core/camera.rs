//! Orbit camera around the bowl plus the w slice it looks through.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use crate::config::{W_MAX, W_MIN};

const MIN_PITCH: f32 = -89.0 * PI / 180.0;
const MAX_PITCH: f32 = 89.0 * PI / 180.0;

/// Camera orbiting a target point, looking at it from `distance` away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Current slice position along the fourth axis.
    pub w: f32,
    pub w_min: f32,
    pub w_max: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 8.0,
            min_distance: 6.0,
            max_distance: 55.0,
            yaw: 0.0,
            pitch: (-20.0_f32).to_radians(),
            fov_y: 45.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
            w: 0.0,
            w_min: W_MIN,
            w_max: W_MAX,
        }
    }
}

impl OrbitCamera {
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            ..Self::default()
        }
    }

    fn forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.cos(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.sin(),
        )
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.target - self.forward() * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// OpenGL-style perspective projection (depth in [-1, 1]).
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, aspect.max(1e-3), self.near, self.far)
    }

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(MIN_PITCH, MAX_PITCH);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).clamp(self.min_distance, self.max_distance);
    }

    pub fn shift_w(&mut self, delta: f32) {
        self.w = (self.w + delta).clamp(self.w_min, self.w_max);
    }

    /// Restores orientation, zoom and slice while keeping the configured limits.
    pub fn reset(&mut self) {
        *self = Self {
            target: self.target,
            w_min: self.w_min,
            w_max: self.w_max,
            ..Self::default()
        };
    }
}
