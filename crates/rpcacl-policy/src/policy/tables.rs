//! Built-in method tables and their compiled form.
//!
//! Keys are short method names (`Service/Method`). Matching is exact and
//! case-sensitive.

use std::collections::HashMap;

use rpcacl_core::error::{AclError, Result};
use rpcacl_core::method::split_service_method;
use rpcacl_core::PolicyTier;

/// Environment and instance lifecycle / data-source mutations.
pub const OWNER_OR_DBA_METHODS: &[&str] = &[
    "EnvironmentService/CreateEnvironment",
    "EnvironmentService/UpdateEnvironment",
    "EnvironmentService/DeleteEnvironment",
    "EnvironmentService/UndeleteEnvironment",
    "InstanceService/CreateInstance",
    "InstanceService/UpdateInstance",
    "InstanceService/DeleteInstance",
    "InstanceService/UndeleteInstance",
    "InstanceService/AddDataSource",
    "InstanceService/RemoveDataSource",
    "InstanceService/UpdateDataSource",
];

/// Project mutation, deletion and undeletion.
pub const PROJECT_OWNER_METHODS: &[&str] = &[
    "ProjectService/UpdateProject",
    "ProjectService/DeleteProject",
    "ProjectService/UndeleteProject",
];

/// Database updates, which may move a database to another project.
pub const TRANSFER_DATABASE_METHODS: &[&str] = &[
    "DatabaseService/UpdateDatabase",
    "DatabaseService/BatchUpdateDatabases",
];

/// Compiled `short method -> tier` table.
///
/// A method maps to at most one tier; compiling a name into a second tier
/// is an error.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    tiers: HashMap<String, PolicyTier>,
}

impl MethodTable {
    /// Table built from the constants above.
    pub fn builtin() -> Self {
        let mut tiers = HashMap::new();
        for (tier, names) in [
            (PolicyTier::OwnerOrDba, OWNER_OR_DBA_METHODS),
            (PolicyTier::ProjectOwner, PROJECT_OWNER_METHODS),
            (PolicyTier::TransferDatabase, TRANSFER_DATABASE_METHODS),
        ] {
            for name in names {
                tiers.insert((*name).to_string(), tier);
            }
        }
        Self { tiers }
    }

    pub fn compile<S: AsRef<str>>(
        owner_or_dba: &[S],
        project_owner: &[S],
        transfer_database: &[S],
    ) -> Result<Self> {
        let mut table = Self::default();
        table.extend(PolicyTier::OwnerOrDba, owner_or_dba)?;
        table.extend(PolicyTier::ProjectOwner, project_owner)?;
        table.extend(PolicyTier::TransferDatabase, transfer_database)?;
        Ok(table)
    }

    fn extend<S: AsRef<str>>(&mut self, tier: PolicyTier, names: &[S]) -> Result<()> {
        for name in names {
            let name = name.as_ref();
            if split_service_method(name).is_none() {
                return Err(AclError::BadRequest(format!(
                    "invalid {} entry: {name} (expected Service/Method)",
                    tier.as_str()
                )));
            }
            match self.tiers.get(name) {
                Some(existing) if *existing != tier => {
                    return Err(AclError::BadRequest(format!(
                        "method {name} listed under both {} and {}",
                        existing.as_str(),
                        tier.as_str()
                    )));
                }
                // duplicate within a tier
                Some(_) => {}
                None => {
                    self.tiers.insert(name.to_string(), tier);
                }
            }
        }
        Ok(())
    }

    pub fn tier(&self, short: &str) -> Option<PolicyTier> {
        self.tiers.get(short).copied()
    }

    pub fn requires_owner_or_dba(&self, short: &str) -> bool {
        self.tier(short) == Some(PolicyTier::OwnerOrDba)
    }

    pub fn requires_project_owner(&self, short: &str) -> bool {
        self.tier(short) == Some(PolicyTier::ProjectOwner)
    }

    pub fn is_transfer_database_method(&self, short: &str) -> bool {
        self.tier(short) == Some(PolicyTier::TransferDatabase)
    }

    /// Sorted method names filed under `tier`.
    pub fn methods(&self, tier: PolicyTier) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .tiers
            .iter()
            .filter(|(_, t)| **t == tier)
            .map(|(name, _)| name.as_str())
            .collect();
        out.sort_unstable();
        out
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
