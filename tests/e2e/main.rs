use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use std::path::PathBuf;

pub mod check_plugin;
pub mod config;

/// Build metadata of the host used by the tests, in `go version -m` layout.
pub const HOST_BUILD_INFO: &str = "/usr/bin/krakend: go1.20.4
\tpath\tgithub.com/krakendio/krakend-ce/v2/cmd/krakend-ce
\tmod\tgithub.com/krakendio/krakend-ce/v2\t(devel)\t
\tdep\tcloud.google.com/go\tv0.100.2\th1:a
\tdep\tgithub.com/Azure/azure-sdk-for-go\tv59.3.1+incompatible\th1:b
\tdep\tgithub.com/luraproject/lura/v2\tv2.3.0\th1:c
\tdep\tgolang.org/x/mod\tv0.6.0
\t=>\tgolang.org/x/mod\tv0.6.10\th1:d
\tbuild\tCGO_ENABLED=1
";

pub const GO_SUM: &str = "\
cloud.google.com/go v0.100.2 h1:t9Iw5QH5v4XtlEQaCtUY7x6sCABps8sW0acw7e2WQ6Y=
cloud.google.com/go v0.100.2/go.mod h1:4Xra9TjzAeYHrl5+oeLlzbM2k3mjVhZh4UqTZ//w99A=
github.com/Azure/azure-sdk-for-go v59.3.0+incompatible/go.mod h1:9XXNKU+eRnpl9moKnB4QOLf1HestfXbmab5FXxiDBjc=
github.com/luraproject/lura/v2 v2.2.0 h1:x
github.com/luraproject/lura/v2 v2.2.0/go.mod h1:y
golang.org/x/mod v0.6.0 h1:b9gGHsz9/HhJ3HF5DHQytPpuwocVTChQJK3AvoLefNM=
golang.org/x/mod v0.6.0/go.mod h1:4mET923SAdbXp2ki8ey+zGs1SLqsuM2Y0uvdZR/fUNI=
";

pub const GO_MOD: &str = "module github.com/example/plugin

go 1.20

require github.com/luraproject/lura/v2 v2.2.0

require (
\tcloud.google.com/go v0.100.2 // indirect
\tgithub.com/Azure/azure-sdk-for-go v59.3.0+incompatible // indirect
\tgolang.org/x/mod v0.6.0 // indirect
)
";

/// Test context that provides isolated environment for each test
pub struct TestContext {
    pub temp: TempDir,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Create a new test context with isolated environment
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.child("config").path()).unwrap();
        temp.child("host.buildinfo")
            .write_str(HOST_BUILD_INFO)
            .unwrap();
        Self { temp }
    }

    /// Create a Command for running plugcheck with proper environment
    pub fn plugcheck(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("plugcheck").unwrap();
        cmd.current_dir(&self.temp);

        // Keep plugcheck's config inside the test temp dir
        let config_dir = self.temp.child("config").to_path_buf();
        if cfg!(target_os = "windows") {
            cmd.env("APPDATA", &config_dir);
            cmd.env("USERPROFILE", self.temp.path());
        } else if cfg!(target_os = "linux") {
            cmd.env("XDG_CONFIG_HOME", &config_dir);
            cmd.env("HOME", self.temp.path());
        } else {
            cmd.env("HOME", self.temp.path());
        }
        cmd.env_remove("RUST_LOG");

        cmd
    }

    /// `check-plugin` against the test host, with the host's runtime version.
    pub fn check_plugin(&self) -> Command {
        let mut cmd = self.plugcheck();
        cmd.arg("check-plugin")
            .arg("--build-info")
            .arg(self.path("host.buildinfo"))
            .arg("--go")
            .arg("1.20.4")
            .arg("--libc")
            .arg("");
        cmd
    }

    /// Write a plugin's go.sum and go.mod into the temp dir.
    pub fn create_plugin(&self) {
        self.temp.child("go.sum").write_str(GO_SUM).unwrap();
        self.temp.child("go.mod").write_str(GO_MOD).unwrap();
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp.child(name).to_path_buf()
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).unwrap()
    }
}
