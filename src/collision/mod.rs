//! Collision modules: containment boundaries, pairwise contacts, pair partitioning, ray queries.

pub mod boundary;
pub mod contact;
pub mod pairs;
pub mod queries;

pub use boundary::{Boundary, HemisphereBoundary};
pub use contact::{merge_point, merge_target, solve_contact};
pub use pairs::{pair_count, pair_from_index};
pub use queries::{PickQuery, Raycast};
