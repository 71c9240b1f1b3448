//! Policy layer (method tables, decisions, project-membership seam).
//!
//! Compiles policy configuration into a single tier-tagged lookup table that
//! interceptors consult on every call.

pub mod engine;
pub mod membership;
pub mod tables;

pub use engine::{PolicyConfig, PolicyDecision};
pub use membership::{ProjectMembership, StaticMembership};
pub use tables::MethodTable;
