//! ACL policy configuration.
//!
//! YAML is parsed strictly (unknown keys are errors). [`load_from_str`] and
//! [`load_from_file`] return the checked [`AclConfig`] document; the
//! `load_policy_*` variants go straight to a ready [`PolicyConfig`] and check
//! the document exactly once on the way.

pub mod schema;

use std::fs;
use std::path::Path;

use rpcacl_core::error::{AclError, Result};

use crate::policy::PolicyConfig;

pub use schema::{AclConfig, NormalizerSection, PolicySection};

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| AclError::Internal(format!("read {} failed: {e}", path.display())))
}

fn parse(s: &str) -> Result<AclConfig> {
    serde_yaml::from_str(s).map_err(|e| AclError::BadRequest(format!("invalid yaml: {e}")))
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<AclConfig> {
    load_from_str(&read(path.as_ref())?)
}

pub fn load_from_str(s: &str) -> Result<AclConfig> {
    let cfg = parse(s)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_policy_from_file(path: impl AsRef<Path>) -> Result<PolicyConfig> {
    load_policy_from_str(&read(path.as_ref())?)
}

pub fn load_policy_from_str(s: &str) -> Result<PolicyConfig> {
    PolicyConfig::from_config(&parse(s)?)
}
