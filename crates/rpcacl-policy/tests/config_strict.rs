#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use rpcacl_core::{PolicyTier, API_PACKAGE_PREFIX};
use rpcacl_policy::config::{self, AclConfig};
use rpcacl_policy::PolicyConfig;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
policy:
  owner_or_dbaa: ["InstanceService/AddDataSource"] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config_uses_builtin_tables() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.normalizer.prefix, API_PACKAGE_PREFIX);
    assert!(cfg.policy.elevated_bypasses_project_checks);

    let from_cfg = PolicyConfig::from_config(&cfg).unwrap();
    let builtin = PolicyConfig::builtin();
    for tier in PolicyTier::ALL {
        assert_eq!(from_cfg.table().methods(tier), builtin.table().methods(tier));
    }
}

#[test]
fn builtin_config_validates() {
    AclConfig::builtin().validate().unwrap();
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn empty_prefix_rejected() {
    let bad = r#"
version: 1
normalizer:
  prefix: ""
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn cross_tier_overlap_rejected() {
    let bad = r#"
version: 1
policy:
  project_owner: ["ProjectService/DeleteProject"]
  transfer_database: ["ProjectService/DeleteProject"]
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn malformed_entry_rejected() {
    let bad = r#"
version: 1
policy:
  owner_or_dba: ["/bytebase.v1.InstanceService/AddDataSource"]
"#;
    let err = config::load_from_str(bad).expect_err("full ids are not table keys");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn custom_tables_and_prefix() {
    let ok = r#"
version: 1
normalizer:
  prefix: "/acme.v2."
policy:
  owner_or_dba: ["SettingService/SetSetting"]
  project_owner: []
  elevated_bypasses_project_checks: false
"#;
    let cfg = config::load_from_str(ok).unwrap();
    let policy = PolicyConfig::from_config(&cfg).unwrap();

    assert!(!policy.elevated_bypasses_project_checks());
    assert_eq!(
        policy.classify("/acme.v2.SettingService/SetSetting"),
        Some(PolicyTier::OwnerOrDba)
    );
    // Replaced, not merged.
    assert_eq!(policy.classify("/acme.v2.InstanceService/AddDataSource"), None);
    assert_eq!(policy.classify("/acme.v2.ProjectService/DeleteProject"), None);
    // Omitted tier falls back to the built-in list.
    assert_eq!(
        policy.classify("/acme.v2.DatabaseService/UpdateDatabase"),
        Some(PolicyTier::TransferDatabase)
    );
}

#[test]
fn missing_file_is_internal() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn with_captured_log<T>(f: impl FnOnce() -> T) -> (T, String) {
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, log.text())
}

const EMPTY_PROJECT_OWNER: &str = r#"
version: 1
policy:
  project_owner: []
"#;

#[test]
fn empty_tier_warned_once_when_loading_policy() {
    let (policy, log) = with_captured_log(|| config::load_policy_from_str(EMPTY_PROJECT_OWNER));
    let policy = policy.unwrap();

    assert_eq!(policy.classify("/bytebase.v1.ProjectService/DeleteProject"), None);
    assert_eq!(log.matches("policy tier has no methods").count(), 1, "{log}");
    assert!(log.contains("project_owner"), "{log}");
}

#[test]
fn checking_a_document_does_not_warn() {
    let (cfg, log) = with_captured_log(|| config::load_from_str(EMPTY_PROJECT_OWNER));
    assert_eq!(cfg.unwrap().policy.empty_tiers(), [PolicyTier::ProjectOwner]);
    assert!(!log.contains("policy tier has no methods"), "{log}");
}

#[test]
fn load_policy_rejects_what_load_rejects() {
    let err = config::load_policy_from_str("version: 3\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");

    let err = config::load_policy_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}
