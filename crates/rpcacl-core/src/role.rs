//! Principal roles and the elevated-role predicate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AclError;

/// Workspace-level role of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Owner,
    Dba,
    Developer,
    Guest,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Dba => "DBA",
            Role::Developer => "DEVELOPER",
            Role::Guest => "GUEST",
        }
    }

    /// Owner and DBA are the elevated workspace roles.
    pub fn is_elevated(self) -> bool {
        matches!(self, Role::Owner | Role::Dba)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(Role::Owner),
            "DBA" => Ok(Role::Dba),
            "DEVELOPER" => Ok(Role::Developer),
            "GUEST" => Ok(Role::Guest),
            other => Err(AclError::BadRequest(format!("unknown role: {other}"))),
        }
    }
}

/// Role of a principal within a single project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectRole {
    Owner,
    Developer,
}

impl ProjectRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectRole::Owner => "OWNER",
            ProjectRole::Developer => "DEVELOPER",
        }
    }
}

/// Anything carrying a workspace role. Host services implement this for
/// their own user records; rpcacl only reads the role.
pub trait HasRole {
    fn role(&self) -> Role;
}

/// Plain principal value for callers without their own user type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

impl Principal {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: None,
            role,
        }
    }
}

impl HasRole for Principal {
    fn role(&self) -> Role {
        self.role
    }
}

impl HasRole for Role {
    fn role(&self) -> Role {
        *self
    }
}

/// Whether the principal holds an elevated workspace role.
pub fn is_elevated<P: HasRole + ?Sized>(principal: &P) -> bool {
    principal.role().is_elevated()
}
