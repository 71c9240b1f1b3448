//! rpcacl policy library entry.
//!
//! This crate compiles the method policy tables, evaluates per-call
//! decisions for an RPC interceptor, and exposes the project-membership seam
//! the host service implements. It is consumed by the `rpcacl-check` binary
//! and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod obs;
pub mod policy;

pub use policy::{MethodTable, PolicyConfig, PolicyDecision, ProjectMembership, StaticMembership};
