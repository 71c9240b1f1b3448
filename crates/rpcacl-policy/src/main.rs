//! rpcacl-check: classify RPC method ids against a policy config.
//!
//! Without `--config` the built-in tables are used. Log verbosity follows
//! `RUST_LOG`. Argument errors exit with clap's usage code (2); config
//! errors exit with 2 as well.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use rpcacl_core::error::Result;
use rpcacl_core::Role;
use rpcacl_policy::obs::AclMetrics;
use rpcacl_policy::{config, PolicyConfig};

#[derive(Parser, Debug)]
#[command(name = "rpcacl-check", about = "Show the policy tier and decision for RPC method ids")]
struct Args {
    /// Policy config (YAML). Built-in tables when omitted.
    #[arg(long, env = "RPCACL_CONFIG")]
    config: Option<PathBuf>,

    /// Workspace role of the caller (OWNER, DBA, DEVELOPER, GUEST)
    #[arg(long, default_value = "DEVELOPER")]
    role: Role,

    /// Print decision counters after the report
    #[arg(long)]
    metrics: bool,

    /// Full or short method ids
    #[arg(required = true)]
    methods: Vec<String>,
}

/// One `short<TAB>tier<TAB>outcome` line per method.
fn report(policy: &PolicyConfig, role: Role, methods: &[String], metrics: &AclMetrics) -> Vec<String> {
    methods
        .iter()
        .map(|full| {
            let short = policy.normalize(full);
            let tier = policy.classify(full).map(|t| t.as_str()).unwrap_or("-");
            let decision = policy.decide(full, &role);
            metrics.record(&decision);
            format!("{short}\t{tier}\t{}", decision.outcome())
        })
        .collect()
}

fn run(args: Args) -> Result<()> {
    let policy = match &args.config {
        Some(path) => config::load_policy_from_file(path)?,
        None => PolicyConfig::builtin(),
    };
    tracing::info!(methods = policy.table().len(), role = %args.role, "policy loaded");

    let metrics = AclMetrics::default();
    for line in report(&policy, args.role, &args.methods, &metrics) {
        println!("{line}");
    }

    if args.metrics {
        print!("{}", metrics.render());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.client_code().as_str(), "{e}");
            eprintln!("rpcacl-check: {e}");
            ExitCode::from(2)
        }
    }
}
