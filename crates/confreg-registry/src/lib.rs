//! confreg Registry - Versioned configuration and group repositories
//!
//! This crate provides:
//! - The key-space codec mapping `(kind, id, version)` to store keys
//! - Configuration and group repositories over an injected `KvStore`
//! - Conflict policies and the group replace strategies
//! - Exact-match label queries over group members

pub mod keyspace;
pub mod matcher;
pub mod model;
pub mod policy;
pub mod repository;

// Re-export commonly used types
pub use keyspace::EntityKey;
pub use matcher::LabelMatcher;
pub use model::*;
pub use policy::{ConflictPolicy, ReplaceStrategy};
pub use repository::{ConfigurationRepository, GroupRepository};
