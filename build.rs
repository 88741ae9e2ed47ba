use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Embeds the binary's own build metadata so it can describe itself at runtime.
///
/// Writes `$OUT_DIR/build_info.txt` in the `go version -m` text layout, one
/// `dep` line per registry package recorded in the workspace lock file, and
/// exports the compiler version as `PLUGCHECK_RUNTIME_VERSION`.
fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let lock_path = manifest_dir.join("Cargo.lock");

    println!("cargo:rerun-if-changed={}", lock_path.display());
    println!("cargo:rerun-if-changed=build.rs");

    let mut info = format!(
        "\tpath\t{}\n\tmod\t{}\tv{}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    if let Ok(lock) = fs::read_to_string(&lock_path) {
        match registry_packages(&lock) {
            Ok(packages) => {
                for (name, version) in packages {
                    info.push_str(&format!("\tdep\t{}\tv{}\n", name, version));
                }
            }
            Err(e) => println!("cargo:warning=ignoring unreadable Cargo.lock: {}", e),
        }
    }

    let runtime = rustc_version().unwrap_or_default();
    if !runtime.is_empty() {
        info.push_str(&format!("\tbuild\truntime\t{}\n", runtime));
    }
    println!("cargo:rustc-env=PLUGCHECK_RUNTIME_VERSION={}", runtime);

    fs::write(out_dir.join("build_info.txt"), info).expect("failed to write build_info.txt");
}

/// The parts of `Cargo.lock` that describe a resolved package.
#[derive(Deserialize)]
struct Lock {
    #[serde(default)]
    package: Vec<Package>,
}

#[derive(Deserialize)]
struct Package {
    name: String,
    version: String,
    /// Absent for workspace and path packages.
    source: Option<String>,
}

/// Collect `(name, version)` of every package resolved from a registry or git source.
fn registry_packages(lock: &str) -> Result<Vec<(String, String)>, toml::de::Error> {
    let lock: Lock = toml::from_str(lock)?;
    Ok(lock
        .package
        .into_iter()
        .filter(|p| p.source.is_some())
        .map(|p| (p.name, p.version))
        .collect())
}

/// Ask the compiler for its version ("rustc 1.78.0 (9b00956e5 2024-04-29)" -> "1.78.0").
fn rustc_version() -> Option<String> {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let output = Command::new(rustc).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    text.split_whitespace().nth(1).map(str::to_string)
}
