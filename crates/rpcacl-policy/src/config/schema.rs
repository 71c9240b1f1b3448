use serde::Deserialize;

use rpcacl_core::error::{AclError, Result};
use rpcacl_core::{PolicyTier, API_PACKAGE_PREFIX};

use crate::policy::tables::{
    MethodTable, OWNER_OR_DBA_METHODS, PROJECT_OWNER_METHODS, TRANSFER_DATABASE_METHODS,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AclConfig {
    pub version: u32,

    #[serde(default)]
    pub normalizer: NormalizerSection,

    #[serde(default)]
    pub policy: PolicySection,
}

impl AclConfig {
    /// Version 1 config equivalent to the built-in tables.
    pub fn builtin() -> Self {
        Self {
            version: 1,
            normalizer: NormalizerSection::default(),
            policy: PolicySection::default(),
        }
    }

    /// Check the whole document, compiling the method table once.
    pub fn validate(&self) -> Result<()> {
        self.compile().map(|_| ())
    }

    /// Version and prefix checks, then the compiled method table.
    pub fn compile(&self) -> Result<MethodTable> {
        if self.version != 1 {
            return Err(AclError::UnsupportedVersion);
        }

        self.normalizer.validate()?;
        self.policy.compile()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizerSection {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for NormalizerSection {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

impl NormalizerSection {
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(AclError::BadRequest(
                "normalizer.prefix must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySection {
    #[serde(default = "default_owner_or_dba")]
    pub owner_or_dba: Vec<String>,

    #[serde(default = "default_project_owner")]
    pub project_owner: Vec<String>,

    #[serde(default = "default_transfer_database")]
    pub transfer_database: Vec<String>,

    #[serde(default = "default_elevated_bypass")]
    pub elevated_bypasses_project_checks: bool,
}

impl Default for PolicySection {
    fn default() -> Self {
        Self {
            owner_or_dba: default_owner_or_dba(),
            project_owner: default_project_owner(),
            transfer_database: default_transfer_database(),
            elevated_bypasses_project_checks: default_elevated_bypass(),
        }
    }
}

impl PolicySection {
    /// Entry shape and cross-tier overlap.
    pub fn compile(&self) -> Result<MethodTable> {
        MethodTable::compile(&self.owner_or_dba, &self.project_owner, &self.transfer_database)
    }

    pub fn empty_tiers(&self) -> Vec<PolicyTier> {
        PolicyTier::ALL
            .into_iter()
            .filter(|tier| self.entries(*tier).is_empty())
            .collect()
    }

    pub fn entries(&self, tier: PolicyTier) -> &[String] {
        match tier {
            PolicyTier::OwnerOrDba => &self.owner_or_dba,
            PolicyTier::ProjectOwner => &self.project_owner,
            PolicyTier::TransferDatabase => &self.transfer_database,
        }
    }
}

fn default_prefix() -> String {
    API_PACKAGE_PREFIX.into()
}
fn default_owner_or_dba() -> Vec<String> {
    OWNER_OR_DBA_METHODS.iter().map(|s| s.to_string()).collect()
}
fn default_project_owner() -> Vec<String> {
    PROJECT_OWNER_METHODS.iter().map(|s| s.to_string()).collect()
}
fn default_transfer_database() -> Vec<String> {
    TRANSFER_DATABASE_METHODS.iter().map(|s| s.to_string()).collect()
}
fn default_elevated_bypass() -> bool {
    true
}
