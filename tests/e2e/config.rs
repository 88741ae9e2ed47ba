use super::TestContext;
use predicates::prelude::*;

#[test]
fn test_config_show_defaults() {
    let ctx = TestContext::new();

    ctx.plugcheck()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sum_file: ./go.sum"))
        .stdout(predicate::str::contains("fix: false"));
}

#[test]
fn test_config_set_host_persists() {
    let ctx = TestContext::new();

    ctx.plugcheck()
        .args(["config", "set-host", "--go", "1.20.4", "--libc", "GLIBC-2.31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Host go version: 1.20.4"));

    ctx.plugcheck()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Go Version: 1.20.4\n"))
        .stdout(predicate::str::contains("Glibc Version: GLIBC-2.31\n"));
}

#[test]
fn test_configured_libc_is_the_plugin_default() {
    let ctx = TestContext::new();
    ctx.create_plugin();

    ctx.plugcheck()
        .args(["config", "set-host", "--libc", "GLIBC-2.31"])
        .assert()
        .success();

    // The plugin is assumed to share the host's libc unless told otherwise.
    ctx.plugcheck()
        .arg("check-plugin")
        .arg("--build-info")
        .arg(ctx.path("host.buildinfo"))
        .args(["--go", "1.20.4", "--fix"])
        .assert()
        .success()
        .stdout("3 incompatibilities fixed\n");
}
