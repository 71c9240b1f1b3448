//! rpcacl: method-level authorization tiers for an RPC interceptor.
//!
//! `core` holds the shared vocabulary (method ids, roles, tiers, errors);
//! `policy` holds the compiled tables, decisions and config loading.

pub mod core {
    pub use rpcacl_core::*;
}

pub mod policy {
    pub use rpcacl_policy::*;
}
