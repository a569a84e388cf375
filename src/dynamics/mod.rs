//! Simulation dynamics: object storage, work dispatch and the sub-stepped solver.

pub mod parallel;
pub mod pool;
pub mod solver;

#[cfg(feature = "parallel")]
pub use parallel::RayonDispatcher;
pub use parallel::{
    default_thread_count, split_ranges, Dispatcher, RangeTask, SerialDispatcher, ThreadPool,
};
pub use pool::ObjectPool;
pub use solver::{MergeEvent, PhysicsSolver};
