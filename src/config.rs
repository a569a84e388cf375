//! Global configuration constants and serde-backed configuration structs.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default object pool capacity.
pub const MAX_OBJECTS: usize = 100;

/// Implicit friction applied to the previous step's displacement during integration.
pub const VELOCITY_DAMPING: f32 = 1000.0;

/// Softening factor applied to every penetration correction.
pub const RESPONSE_COEF: f32 = 0.1;

/// Growth rate, in target radii per second.
pub const GROW_SPEED: f32 = 5.0;

/// Squared-distance threshold below which two positions are treated as coincident.
pub const EPS: f32 = 1e-4;

/// Number of solver passes per fixed update.
pub const DEFAULT_SUB_STEPS: u32 = 8;

/// Default fixed timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Fixed updates one [`crate::Game::step`] may run before the leftover time is dropped.
pub const MAX_CATCH_UP_STEPS: usize = 5;

/// Default gravity vector. The fourth axis never receives gravity.
pub const DEFAULT_GRAVITY: [f32; 4] = [0.0, -20.0, 0.0, 0.0];

/// Upper bound on worker threads spawned by the default thread pool.
pub const MAX_WORKER_THREADS: usize = 4;

/// Default bowl radius.
pub const DEFAULT_BOUNDARY_RADIUS: f32 = 3.0;

/// Default bowl wall half-thickness.
pub const DEFAULT_BOUNDARY_MARGIN: f32 = 0.1;

/// Default rim opening, measured from the downward axis.
pub const DEFAULT_CUTOFF_ANGLE_DEGREES: f32 = 90.0;

/// Height above the picked point at which new fruit are dropped.
pub const DROP_HEIGHT: f32 = 3.0;

/// Any object below this height ends the session.
pub const GAME_OVER_HEIGHT: f32 = -3.0;

/// Objects below this height are removed from the pool.
pub const DESPAWN_HEIGHT: f32 = -10.0;

/// Lower bound of the viewable w range.
pub const W_MIN: f32 = -5.0;

/// Upper bound of the viewable w range.
pub const W_MAX: f32 = 5.0;

/// Solver tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub max_objects: usize,
    pub velocity_damping: f32,
    pub response_coef: f32,
    pub grow_speed: f32,
    pub eps: f32,
    pub sub_steps: u32,
    pub gravity: [f32; 4],
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_objects: MAX_OBJECTS,
            velocity_damping: VELOCITY_DAMPING,
            response_coef: RESPONSE_COEF,
            grow_speed: GROW_SPEED,
            eps: EPS,
            sub_steps: DEFAULT_SUB_STEPS,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl SolverConfig {
    pub fn gravity(&self) -> Vec4 {
        Vec4::from_array(self.gravity)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_objects == 0 {
            return Err(Error::invalid_config("max_objects must be positive"));
        }
        if self.sub_steps == 0 {
            return Err(Error::invalid_config("sub_steps must be positive"));
        }
        if !(self.velocity_damping >= 0.0) {
            return Err(Error::invalid_config("velocity_damping must be non-negative"));
        }
        if !(self.response_coef > 0.0 && self.response_coef <= 1.0) {
            return Err(Error::invalid_config("response_coef must be in (0, 1]"));
        }
        if !(self.grow_speed > 0.0) {
            return Err(Error::invalid_config("grow_speed must be positive"));
        }
        if !(self.eps >= 0.0) {
            return Err(Error::invalid_config("eps must be non-negative"));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(Error::invalid_config("gravity must be finite"));
        }
        Ok(())
    }
}

/// Geometry of the hemispherical bowl.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HemisphereConfig {
    pub center: [f32; 4],
    pub radius: f32,
    pub margin: f32,
    pub cutoff_angle_degrees: f32,
}

impl Default for HemisphereConfig {
    fn default() -> Self {
        Self {
            center: [0.0; 4],
            radius: DEFAULT_BOUNDARY_RADIUS,
            margin: DEFAULT_BOUNDARY_MARGIN,
            cutoff_angle_degrees: DEFAULT_CUTOFF_ANGLE_DEGREES,
        }
    }
}

impl HemisphereConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.radius > 0.0) {
            return Err(Error::invalid_config("boundary radius must be positive"));
        }
        if !(self.margin >= 0.0 && self.margin < self.radius) {
            return Err(Error::invalid_config(
                "boundary margin must be in [0, radius)",
            ));
        }
        if !(self.cutoff_angle_degrees > 0.0 && self.cutoff_angle_degrees <= 180.0) {
            return Err(Error::invalid_config(
                "cutoff_angle_degrees must be in (0, 180]",
            ));
        }
        Ok(())
    }
}

/// Complete session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub solver: SolverConfig,
    pub boundary: HemisphereConfig,
    pub time_step: f32,
    pub drop_height: f32,
    pub game_over_height: f32,
    pub despawn_height: f32,
    pub seed: u64,
    pub w_min: f32,
    pub w_max: f32,
    pub frame_budget_ms: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            boundary: HemisphereConfig::default(),
            time_step: DEFAULT_TIME_STEP,
            drop_height: DROP_HEIGHT,
            game_over_height: GAME_OVER_HEIGHT,
            despawn_height: DESPAWN_HEIGHT,
            seed: 0x4d_f2_u64,
            w_min: W_MIN,
            w_max: W_MAX,
            frame_budget_ms: 1000.0 / 60.0,
        }
    }
}

impl GameConfig {
    /// Parses a JSON document; missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.solver.validate()?;
        self.boundary.validate()?;
        if !(self.time_step > 0.0) {
            return Err(Error::invalid_config("time_step must be positive"));
        }
        if !(self.w_min <= self.w_max) {
            return Err(Error::invalid_config("w_min must not exceed w_max"));
        }
        if self.despawn_height > self.game_over_height {
            return Err(Error::invalid_config(
                "despawn_height must not be above game_over_height",
            ));
        }
        Ok(())
    }
}
