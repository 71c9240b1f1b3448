//! Policy tiers: the kind of authorization check a method demands.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyTier {
    /// Caller must hold an elevated workspace role.
    OwnerOrDba,
    /// Caller must own the addressed project.
    ProjectOwner,
    /// Database moves between projects; ownership is checked on every project involved.
    TransferDatabase,
}

impl PolicyTier {
    pub const ALL: [PolicyTier; 3] = [
        PolicyTier::OwnerOrDba,
        PolicyTier::ProjectOwner,
        PolicyTier::TransferDatabase,
    ];

    /// Label used in metrics and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyTier::OwnerOrDba => "owner_or_dba",
            PolicyTier::ProjectOwner => "project_owner",
            PolicyTier::TransferDatabase => "transfer_database",
        }
    }
}
