//! rpcacl core: method identifiers, roles, policy tiers, and the shared error type.
//!
//! This crate defines the vocabulary shared by the policy engine and any RPC
//! interceptor that consumes its decisions. It performs no I/O and pulls in
//! no async runtime or transport; `serde`, `thiserror` and `tracing` are its
//! only dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod method;
pub mod role;
pub mod tier;

/// Shared result type.
pub use error::{AclError, Result};
pub use method::{short_method_name, MethodNormalizer, API_PACKAGE_PREFIX};
pub use role::{is_elevated, HasRole, Principal, ProjectRole, Role};
pub use tier::PolicyTier;
