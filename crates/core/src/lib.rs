//! Memorial domain logic.
//!
//! Pure data shaping over rows fetched by the caller: statistics
//! aggregation, comment tree construction, memory page assembly and public
//! profile assembly. This crate has no database dependency.

pub mod comment_tree;
pub mod error;
pub mod fallen;
pub mod labels;
pub mod listing;
pub mod memory_assembly;
pub mod profile;
pub mod statistics;
pub mod types;
