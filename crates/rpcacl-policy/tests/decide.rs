#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use rpcacl_core::error::ClientCode;
use rpcacl_core::{Principal, PolicyTier, Role};
use rpcacl_policy::{PolicyConfig, PolicyDecision};

const ADD_DATA_SOURCE: &str = "/bytebase.v1.InstanceService/AddDataSource";
const DELETE_PROJECT: &str = "/bytebase.v1.ProjectService/DeleteProject";
const BATCH_UPDATE: &str = "/bytebase.v1.DatabaseService/BatchUpdateDatabases";
const GET_INSTANCE: &str = "/bytebase.v1.InstanceService/GetInstance";

#[test]
fn owner_or_dba_tier() {
    let policy = PolicyConfig::builtin();

    for role in [Role::Owner, Role::Dba] {
        assert_eq!(
            policy.decide(ADD_DATA_SOURCE, &role),
            PolicyDecision::Allow { tier: PolicyTier::OwnerOrDba }
        );
    }
    for role in [Role::Developer, Role::Guest] {
        match policy.decide(ADD_DATA_SOURCE, &role) {
            PolicyDecision::Deny { tier, code, reason } => {
                assert_eq!(tier, PolicyTier::OwnerOrDba);
                assert_eq!(code, ClientCode::PermissionDenied);
                assert!(reason.contains("InstanceService/AddDataSource"), "{reason}");
            }
            other => panic!("expected deny, got {other:?}"),
        }
    }
}

#[test]
fn unrestricted_method() {
    let policy = PolicyConfig::builtin();
    let guest = Principal::new("users/9", Role::Guest);
    let d = policy.decide(GET_INSTANCE, &guest);
    assert_eq!(d, PolicyDecision::Unrestricted);
    assert_eq!(d.tier(), None);
    assert!(d.into_result().is_ok());
}

#[test]
fn project_tiers_need_external_check() {
    let policy = PolicyConfig::builtin();
    let dev = Principal::new("users/2", Role::Developer);

    assert_eq!(
        policy.decide(DELETE_PROJECT, &dev),
        PolicyDecision::NeedsProjectOwner { tier: PolicyTier::ProjectOwner }
    );
    assert_eq!(
        policy.decide(BATCH_UPDATE, &dev),
        PolicyDecision::NeedsProjectOwner { tier: PolicyTier::TransferDatabase }
    );
}

#[test]
fn elevated_bypass_toggle() {
    let dba = Principal::new("users/1", Role::Dba);

    let policy = PolicyConfig::builtin();
    assert_eq!(
        policy.decide(DELETE_PROJECT, &dba),
        PolicyDecision::Allow { tier: PolicyTier::ProjectOwner }
    );

    let strict = PolicyConfig::builtin().with_elevated_bypass(false);
    assert_eq!(
        strict.decide(DELETE_PROJECT, &dba),
        PolicyDecision::NeedsProjectOwner { tier: PolicyTier::ProjectOwner }
    );
}

#[test]
fn deny_into_result() {
    let policy = PolicyConfig::builtin();
    let err = policy
        .decide(ADD_DATA_SOURCE, &Role::Developer)
        .into_result()
        .expect_err("developer must be denied");
    assert_eq!(err.client_code().as_str(), "PERMISSION_DENIED");
}

#[test]
fn shared_across_threads() {
    let policy = Arc::new(PolicyConfig::builtin());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let policy = Arc::clone(&policy);
            thread::spawn(move || {
                let role = if i % 2 == 0 { Role::Owner } else { Role::Developer };
                (role, policy.decide(ADD_DATA_SOURCE, &role))
            })
        })
        .collect();

    for h in handles {
        let (role, d) = h.join().unwrap();
        assert_eq!(matches!(d, PolicyDecision::Allow { .. }), role.is_elevated());
    }
}
