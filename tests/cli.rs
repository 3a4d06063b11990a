//! Exit codes and output of the packcheck binary

mod common;

use common::{packcheck_bin, PackTree};
use std::path::Path;
use std::process::Command;

/// Output from a packcheck run
#[derive(Debug)]
struct RunOutput {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

/// Run packcheck isolated from the user's config and environment
fn run_packcheck(scratch: &Path, args: &[&str], envs: &[(&str, &str)]) -> RunOutput {
    let mut cmd = Command::new(packcheck_bin());
    cmd.args(args)
        .env("XDG_CONFIG_HOME", scratch)
        .env("NO_COLOR", "1")
        .env_remove("WEBCHAT_BASE_URL")
        .env_remove("GREENTIC_PACK_VALIDATE")
        .env_remove("RUST_LOG");
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let output = cmd.output().expect("Failed to run packcheck");
    RunOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        code: output.status.code(),
    }
}

#[test]
fn test_validate_success_exit_zero() {
    let tree = PackTree::new();
    tree.add_valid_pack("weather", &["forecast"]);
    tree.add_valid_pack("support", &["greeting"]);

    let root = tree.root();
    let out = run_packcheck(&tree.scratch(), &["validate", root.to_str().unwrap()], &[]);
    assert_eq!(out.code, Some(0), "{:?}", out);
    assert!(out.stdout.contains("Validated 2 pack(s) successfully."));
}

#[test]
fn test_validate_errors_exit_one() {
    let tree = PackTree::new();
    tree.add_valid_pack("weather", &["forecast"]);
    tree.remove("weather/README.md");

    let root = tree.root();
    let out = run_packcheck(&tree.scratch(), &["validate", root.to_str().unwrap()], &[]);
    assert_eq!(out.code, Some(1), "{:?}", out);
    assert!(out.stderr.contains("[error]"));
    assert!(out.stderr.contains("README.md is required"));
    assert!(!out.stdout.contains("successfully"));
}

#[test]
fn test_validate_missing_root_exit_one() {
    let tree = PackTree::new();
    let missing = tree.root().join("absent");
    let out = run_packcheck(&tree.scratch(), &["validate", missing.to_str().unwrap()], &[]);
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("does not exist"), "{:?}", out);
}

#[test]
fn test_external_warnings_do_not_change_exit_code() {
    let tree = PackTree::new();
    tree.add_valid_pack("weather", &["forecast"]);

    let root = tree.root();
    let empty_path = tree.scratch().join("empty-bin");
    std::fs::create_dir_all(&empty_path).unwrap();
    let out = run_packcheck(
        &tree.scratch(),
        &["validate", root.to_str().unwrap()],
        &[
            ("GREENTIC_PACK_VALIDATE", "1"),
            ("PATH", empty_path.to_str().unwrap()),
        ],
    );
    assert_eq!(out.code, Some(0), "{:?}", out);
    assert!(out.stdout.contains("[warn] "));
    assert!(out.stdout.contains("Skipping greentic-dev pack validate"));
    assert!(out.stdout.contains("Skipping greentic-pack sim"));

    let warn_at = out.stdout.find("[warn]").unwrap();
    let summary_at = out.stdout.find("Validated 1 pack(s)").unwrap();
    assert!(warn_at < summary_at);
}

#[test]
fn test_validate_json_report() {
    let tree = PackTree::new();
    tree.add_valid_pack("weather", &["forecast"]);
    tree.remove("weather/golden/forecast.json");

    let root = tree.root();
    let out = run_packcheck(
        &tree.scratch(),
        &["validate", "--json", root.to_str().unwrap()],
        &[],
    );
    assert_eq!(out.code, Some(1));
    let report: serde_json::Value = serde_json::from_str(&out.stdout).expect("valid json output");
    assert_eq!(report["errors"].as_array().unwrap().len(), 1);
    assert_eq!(report["errors"][0]["message"], "file not found");
}

#[test]
fn test_contract_offline_passes() {
    let tree = PackTree::new();
    let out = run_packcheck(&tree.scratch(), &["contract"], &[]);
    assert_eq!(out.code, Some(0), "{:?}", out);
    assert!(out.stdout.contains("in-process stub backend"));
    assert!(out.stdout.contains("Step 3"));
    assert!(out.stdout.contains("webchat.contract: all endpoints verified"));
}

#[test]
fn test_contract_unreachable_backend_exit_one() {
    let tree = PackTree::new();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}", port);
    let out = run_packcheck(
        &tree.scratch(),
        &["contract", "--timeout", "2"],
        &[("WEBCHAT_BASE_URL", url.as_str())],
    );
    assert_eq!(out.code, Some(1), "{:?}", out);
    assert!(out.stderr.contains("Error:"));
    assert!(!out.stdout.contains("all endpoints verified"));
}
