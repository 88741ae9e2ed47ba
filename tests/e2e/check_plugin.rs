use super::{TestContext, GO_MOD};
use assert_fs::prelude::*;
use predicates::prelude::*;

#[test]
fn test_missing_sum_file() {
    let ctx = TestContext::new();

    ctx.check_plugin()
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: open ./go.sum"));
}

#[test]
fn test_no_incompatibilities() {
    let ctx = TestContext::new();
    ctx.temp
        .child("go.sum")
        .write_str("golang.org/x/mod v0.6.10 h1:x\ngolang.org/x/mod v0.6.10/go.mod h1:y\n")
        .unwrap();

    ctx.check_plugin()
        .assert()
        .success()
        .stdout("No incompatibilities found!\n");
}

#[test]
fn test_reports_incompatibilities() {
    let ctx = TestContext::new();
    ctx.create_plugin();

    ctx.check_plugin()
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "golang.org/x/mod\n\thave: v0.6.0\n\twant: v0.6.10\n",
        ))
        .stderr(predicate::str::contains("Error: 3 incompatibilities found"));

    assert_eq!(ctx.read("go.mod"), GO_MOD);
}

#[test]
fn test_plugin_alias_and_runtime_mismatch() {
    let ctx = TestContext::new();
    ctx.create_plugin();

    ctx.plugcheck()
        .arg("plugin")
        .arg("--build-info")
        .arg(ctx.path("host.buildinfo"))
        .args(["-g", "1.1.0", "-l", ""])
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("go\n\thave: 1.1.0\n\twant: 1.20.4\n"))
        .stderr(predicate::str::contains("4 incompatibilities found"));
}

#[test]
fn test_format_prints_commands() {
    let ctx = TestContext::new();
    ctx.create_plugin();

    ctx.check_plugin()
        .arg("--format")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "go get github.com/luraproject/lura/v2@v2.3.0\n",
        ))
        .stdout(predicate::str::contains(
            "go mod edit --replace golang.org/x/mod=golang.org/x/mod@v0.6.10\n",
        ));
}

#[test]
fn test_fix_all() {
    let ctx = TestContext::new();
    ctx.create_plugin();

    ctx.check_plugin()
        .arg("--fix")
        .assert()
        .success()
        .stdout("3 incompatibilities fixed\n");

    let go_mod = ctx.read("go.mod");
    assert!(go_mod.contains("require github.com/luraproject/lura/v2 v2.3.0\n"));
    assert!(go_mod.contains("\tgolang.org/x/mod => golang.org/x/mod v0.6.10\n"));
    assert!(go_mod.contains("\tgolang.org/x/mod v0.6.0 // indirect\n"));
}

#[test]
fn test_fix_some() {
    let ctx = TestContext::new();
    ctx.create_plugin();

    ctx.check_plugin()
        .args(["--fix", "--go", "1.1.0"])
        .assert()
        .failure()
        .stdout("go\n\thave: 1.1.0\n\twant: 1.20.4\n3 incompatibilities fixed\n")
        .stderr(predicate::str::contains(
            "Error: 3 incompatibilities fixed, 1 left",
        ));
}

#[test]
fn test_fix_only_runtime_leaves_manifest() {
    let ctx = TestContext::new();
    ctx.temp
        .child("go.sum")
        .write_str("golang.org/x/mod v0.6.10 h1:x\n")
        .unwrap();
    ctx.temp.child("go.mod").write_str(GO_MOD).unwrap();

    ctx.check_plugin()
        .args(["--fix", "--go", "1.1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: 1 incompatibilities found"));

    assert_eq!(ctx.read("go.mod"), GO_MOD);
}

#[test]
fn test_json_output() {
    let ctx = TestContext::new();
    ctx.create_plugin();

    let output = ctx.check_plugin().arg("--json").output().unwrap();
    assert!(!output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["compatible"], false);
    assert_eq!(report["incompatibilities"].as_array().unwrap().len(), 3);
}

#[test]
fn test_fix_conflicts_with_json() {
    let ctx = TestContext::new();
    ctx.create_plugin();

    ctx.check_plugin()
        .args(["--fix", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_sum_flag_points_at_other_directory() {
    let ctx = TestContext::new();
    let plugin = ctx.temp.child("plugin");
    plugin.create_dir_all().unwrap();
    plugin.child("go.sum").write_str(super::GO_SUM).unwrap();
    plugin.child("go.mod").write_str(GO_MOD).unwrap();

    ctx.check_plugin()
        .args(["--sum", "plugin/go.sum", "--fix"])
        .assert()
        .success();

    let go_mod = std::fs::read_to_string(plugin.child("go.mod").path()).unwrap();
    assert!(go_mod.contains("replace ("));
}
