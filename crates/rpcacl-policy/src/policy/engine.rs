use rpcacl_core::error::{AclError, ClientCode, Result};
use rpcacl_core::{HasRole, MethodNormalizer, PolicyTier};

use super::tables::MethodTable;
use crate::config::AclConfig;

/// Decision from policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Method is not specially governed; default authorization applies.
    Unrestricted,
    Allow { tier: PolicyTier },
    /// Caller must own the addressed project(s); resolved outside this crate.
    NeedsProjectOwner { tier: PolicyTier },
    Deny {
        tier: PolicyTier,
        code: ClientCode,
        reason: String,
    },
}

impl PolicyDecision {
    pub fn tier(&self) -> Option<PolicyTier> {
        match self {
            PolicyDecision::Unrestricted => None,
            PolicyDecision::Allow { tier }
            | PolicyDecision::NeedsProjectOwner { tier }
            | PolicyDecision::Deny { tier, .. } => Some(*tier),
        }
    }

    /// Label used in metrics and CLI output.
    pub fn outcome(&self) -> &'static str {
        match self {
            PolicyDecision::Unrestricted => "unrestricted",
            PolicyDecision::Allow { .. } => "allow",
            PolicyDecision::NeedsProjectOwner { .. } => "needs_project_owner",
            PolicyDecision::Deny { .. } => "deny",
        }
    }

    /// `Deny` becomes `AclError::PermissionDenied`; everything else passes through.
    pub fn into_result(self) -> Result<Self> {
        match self {
            PolicyDecision::Deny { reason, .. } => Err(AclError::PermissionDenied(reason)),
            other => Ok(other),
        }
    }
}

/// Immutable policy configuration.
/// Construct once at startup, then share via Arc.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    normalizer: MethodNormalizer,
    table: MethodTable,
    elevated_bypasses_project_checks: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PolicyConfig {
    pub fn new(normalizer: MethodNormalizer, table: MethodTable) -> Self {
        Self {
            normalizer,
            table,
            elevated_bypasses_project_checks: true,
        }
    }

    /// Default prefix with the built-in tables.
    pub fn builtin() -> Self {
        Self::new(MethodNormalizer::default(), MethodTable::builtin())
    }

    /// Build from a config document. The document is checked here (once),
    /// whether or not it came through [`crate::config::load_from_str`].
    pub fn from_config(cfg: &AclConfig) -> Result<Self> {
        let table = cfg.compile()?;
        for tier in cfg.policy.empty_tiers() {
            tracing::warn!(tier = tier.as_str(), "policy tier has no methods");
        }
        Ok(Self::new(MethodNormalizer::new(cfg.normalizer.prefix.clone()), table)
            .with_elevated_bypass(cfg.policy.elevated_bypasses_project_checks))
    }

    pub fn with_elevated_bypass(mut self, enabled: bool) -> Self {
        self.elevated_bypasses_project_checks = enabled;
        self
    }

    pub fn elevated_bypasses_project_checks(&self) -> bool {
        self.elevated_bypasses_project_checks
    }

    pub fn table(&self) -> &MethodTable {
        &self.table
    }

    pub fn normalize<'a>(&self, full: &'a str) -> &'a str {
        self.normalizer.normalize(full)
    }

    pub fn requires_owner_or_dba(&self, short: &str) -> bool {
        self.table.requires_owner_or_dba(short)
    }

    pub fn requires_project_owner(&self, short: &str) -> bool {
        self.table.requires_project_owner(short)
    }

    pub fn is_transfer_database_method(&self, short: &str) -> bool {
        self.table.is_transfer_database_method(short)
    }

    /// Normalize a full method id and look up its tier.
    pub fn classify(&self, full: &str) -> Option<PolicyTier> {
        self.table.tier(self.normalize(full))
    }

    /// Decide what the interceptor must do for `principal` calling `full`.
    ///
    /// Never consults project membership; project tiers come back as
    /// [`PolicyDecision::NeedsProjectOwner`] unless the caller is elevated
    /// and the bypass is enabled.
    pub fn decide<P: HasRole + ?Sized>(&self, full: &str, principal: &P) -> PolicyDecision {
        let short = self.normalize(full);
        let role = principal.role();
        let decision = match self.table.tier(short) {
            None => PolicyDecision::Unrestricted,
            Some(tier @ PolicyTier::OwnerOrDba) => {
                if role.is_elevated() {
                    PolicyDecision::Allow { tier }
                } else {
                    PolicyDecision::Deny {
                        tier,
                        code: ClientCode::PermissionDenied,
                        reason: format!("{short} requires workspace OWNER or DBA role"),
                    }
                }
            }
            Some(tier @ (PolicyTier::ProjectOwner | PolicyTier::TransferDatabase)) => {
                if role.is_elevated() && self.elevated_bypasses_project_checks {
                    PolicyDecision::Allow { tier }
                } else {
                    PolicyDecision::NeedsProjectOwner { tier }
                }
            }
        };
        tracing::debug!(method = %short, role = %role, outcome = decision.outcome(), "policy decision");
        decision
    }
}
