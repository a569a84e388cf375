//! Core types describing simulated fruit, ray queries, and the viewing camera.

pub mod camera;
pub mod fruit;
pub mod object;
pub mod types;

pub use camera::OrbitCamera;
pub use fruit::Fruit;
pub use object::PhysicsObject;
pub use types::{ObjectSnapshot, Ray, RayHit};
