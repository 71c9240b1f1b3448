//! Project-membership seam.
//!
//! The host service resolves project roles (store / IAM lookups); rpcacl
//! only turns the answers into a decision.

use async_trait::async_trait;
use dashmap::DashMap;

use rpcacl_core::error::{ClientCode, Result};
use rpcacl_core::{Principal, ProjectRole};

use super::engine::{PolicyConfig, PolicyDecision};
use crate::obs::AclMetrics;

#[async_trait]
pub trait ProjectMembership: Send + Sync {
    /// Role of `principal_id` in `project`, or `None` if not a member.
    async fn project_role(&self, principal_id: &str, project: &str) -> Result<Option<ProjectRole>>;
}

/// In-memory membership map keyed by `(principal_id, project)`.
#[derive(Debug, Default)]
pub struct StaticMembership {
    roles: DashMap<(String, String), ProjectRole>,
}

impl StaticMembership {
    pub fn new() -> Self {
        Self {
            roles: DashMap::new(),
        }
    }

    pub fn grant(&self, principal_id: impl Into<String>, project: impl Into<String>, role: ProjectRole) {
        self.roles.insert((principal_id.into(), project.into()), role);
    }

    pub fn revoke(&self, principal_id: &str, project: &str) {
        self.roles.remove(&(principal_id.to_string(), project.to_string()));
    }
}

#[async_trait]
impl ProjectMembership for StaticMembership {
    async fn project_role(&self, principal_id: &str, project: &str) -> Result<Option<ProjectRole>> {
        Ok(self
            .roles
            .get(&(principal_id.to_string(), project.to_string()))
            .map(|r| *r.value()))
    }
}

impl PolicyConfig {
    /// [`PolicyConfig::decide`] followed by the project-ownership check.
    ///
    /// `projects` lists every project the call touches; for a transfer that is
    /// the source and the destination. The caller must own all of them.
    pub async fn evaluate<M: ProjectMembership + ?Sized>(
        &self,
        full: &str,
        principal: &Principal,
        projects: &[&str],
        membership: &M,
    ) -> Result<PolicyDecision> {
        let tier = match self.decide(full, principal) {
            PolicyDecision::NeedsProjectOwner { tier } => tier,
            settled => return Ok(settled),
        };

        if projects.is_empty() {
            return Ok(PolicyDecision::Deny {
                tier,
                code: ClientCode::PermissionDenied,
                reason: "no project to check ownership against".into(),
            });
        }

        for project in projects {
            let role = membership.project_role(&principal.id, project).await?;
            if role != Some(ProjectRole::Owner) {
                tracing::debug!(principal = %principal.id, project = %project, "not a project owner");
                return Ok(PolicyDecision::Deny {
                    tier,
                    code: ClientCode::PermissionDenied,
                    reason: format!("{} is not an owner of {project}", principal.id),
                });
            }
        }

        Ok(PolicyDecision::Allow { tier })
    }

    /// [`PolicyConfig::evaluate`] that counts the decision, or the resolver
    /// failure by its client code.
    pub async fn evaluate_recorded<M: ProjectMembership + ?Sized>(
        &self,
        full: &str,
        principal: &Principal,
        projects: &[&str],
        membership: &M,
        metrics: &AclMetrics,
    ) -> Result<PolicyDecision> {
        match self.evaluate(full, principal, projects, membership).await {
            Ok(decision) => {
                metrics.record(&decision);
                Ok(decision)
            }
            Err(e) => {
                tracing::warn!(method = %full, principal = %principal.id, "project membership lookup failed: {e}");
                metrics.record_resolver_error(e.client_code().as_str());
                Err(e)
            }
        }
    }
}
