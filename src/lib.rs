//! Hyperfruit – a 4D "drop and merge" fruit physics engine.
//!
//! Objects are 4D spheres integrated with damped Verlet steps inside a
//! hemispherical bowl. Touching fruit of the same tier merge into the next
//! tier. The solver runs its collision, integration and boundary passes on a
//! pluggable [`Dispatcher`], and [`Game`] layers the session rules on top.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::{Mat4, Vec2, Vec3, Vec4};

pub use collision::{
    boundary::{Boundary, HemisphereBoundary},
    queries::{PickQuery, Raycast},
};
pub use config::{GameConfig, HemisphereConfig, SolverConfig};
pub use crate::core::{
    camera::OrbitCamera,
    fruit::Fruit,
    object::PhysicsObject,
    types::{ObjectSnapshot, Ray, RayHit},
};
#[cfg(feature = "parallel")]
pub use dynamics::parallel::RayonDispatcher;
pub use dynamics::{
    parallel::{Dispatcher, SerialDispatcher, ThreadPool},
    solver::{MergeEvent, PhysicsSolver},
};
pub use error::{Error, Result};
pub use utils::profiling::SolverProfile;
pub use world::{Game, GamePhase};
