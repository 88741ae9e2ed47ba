//! Build metadata of the host binary.
//!
//! The metadata uses the tab-separated layout printed by `go version -m`:
//!
//! ```text
//! /usr/bin/krakend: go1.20.4
//! 	path	github.com/krakendio/krakend-ce/v2/cmd/krakend-ce
//! 	mod	github.com/krakendio/krakend-ce/v2	(devel)
//! 	dep	github.com/ugorji/go	v1.1.4
//! 	=>	github.com/ugorji/go/codec	v0.0.0-20190204201341-e444a5086c43	h1:...
//! 	build	CGO_ENABLED=1
//! ```
//!
//! The plugcheck binary embeds its own metadata in the same layout at build time.

use super::descriptor::Descriptor;
use crate::di::LocalDescriber;
use plugcheck_core::{PlugcheckError, PlugcheckResult};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Metadata embedded into this binary by `build.rs`.
const EMBEDDED_BUILD_INFO: &str = include_str!(concat!(env!("OUT_DIR"), "/build_info.txt"));

/// Compiler version this binary was built with.
pub const BUILD_RUNTIME_VERSION: &str = env!("PLUGCHECK_RUNTIME_VERSION");

/// A module recorded in build metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    pub path: String,
    pub version: String,
    pub replace: Option<Box<Module>>,
}

impl Module {
    fn from_fields(fields: &[&str]) -> Option<Self> {
        let path = fields.first().filter(|p| !p.is_empty())?;
        Some(Self {
            path: path.to_string(),
            version: fields.get(1).map(|v| v.to_string()).unwrap_or_default(),
            replace: None,
        })
    }

    /// The module actually linked: the replacement if there is one.
    pub fn resolved(&self) -> &Module {
        match self.replace {
            Some(ref replace) => replace,
            None => self,
        }
    }
}

/// Build metadata of a binary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildInfo {
    /// Toolchain version from the header line, without the `go` prefix.
    pub runtime_version: Option<String>,
    /// Package path of the main package.
    pub path: String,
    pub deps: Vec<Module>,
}

impl BuildInfo {
    /// Parse build metadata text.
    ///
    /// Only the header, `path`, `dep` and `=>` lines are read; `mod`, `build`
    /// and unrecognised lines are ignored.
    pub fn parse(text: &str) -> Self {
        let mut info = BuildInfo::default();

        for raw in text.lines() {
            if !raw.starts_with('\t') {
                // Header: "<file>: go1.20.4"
                if let Some((_, version)) = raw.rsplit_once(": ") {
                    let version = version.trim();
                    info.runtime_version =
                        Some(version.strip_prefix("go").unwrap_or(version).to_string());
                }
                continue;
            }

            let fields: Vec<&str> = raw.trim_start_matches('\t').split('\t').collect();
            let Some((kind, rest)) = fields.split_first() else {
                continue;
            };

            match *kind {
                "path" => {
                    info.path = rest.first().map(|p| p.to_string()).unwrap_or_default();
                }
                "dep" => {
                    if let Some(module) = Module::from_fields(rest) {
                        info.deps.push(module);
                    }
                }
                "=>" => {
                    let replacement = Module::from_fields(rest).map(Box::new);
                    match info.deps.last_mut() {
                        Some(last) => last.replace = replacement,
                        None => warn!("replacement line without a preceding dep"),
                    }
                }
                _ => {}
            }
        }

        info
    }

    /// Load build metadata from a dump file.
    pub fn load(path: &Path) -> PlugcheckResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| PlugcheckError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Build metadata embedded into the running binary.
    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_BUILD_INFO)
    }

    /// Module path -> version for every linked dependency, using replacements
    /// when present.
    pub fn dependencies(&self) -> HashMap<String, String> {
        self.deps
            .iter()
            .map(Module::resolved)
            .map(|m| (m.path.clone(), m.version.clone()))
            .collect()
    }
}

/// Runtime and libc versions of the host, supplied by the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostVersions {
    pub runtime: String,
    pub system_lib: String,
}

impl HostVersions {
    pub fn new(runtime: impl Into<String>, system_lib: impl Into<String>) -> Self {
        Self {
            runtime: runtime.into(),
            system_lib: system_lib.into(),
        }
    }
}

/// Describes the running binary from the metadata embedded at build time.
#[derive(Debug, Clone)]
pub struct EmbeddedDescriber {
    host: HostVersions,
    info: BuildInfo,
}

impl EmbeddedDescriber {
    pub fn new(host: HostVersions) -> Self {
        Self {
            host,
            info: BuildInfo::embedded(),
        }
    }
}

impl LocalDescriber for EmbeddedDescriber {
    fn describe(&self) -> Descriptor {
        Descriptor::new(
            self.host.runtime.clone(),
            self.host.system_lib.clone(),
            self.info.dependencies(),
        )
    }
}

/// Describes a host binary from a `go version -m` dump.
///
/// The toolchain version from the dump header takes precedence over the
/// supplied runtime version.
#[derive(Debug, Clone)]
pub struct DumpFileDescriber {
    host: HostVersions,
    info: BuildInfo,
}

impl DumpFileDescriber {
    pub fn load(path: &Path, host: HostVersions) -> PlugcheckResult<Self> {
        let info = BuildInfo::load(path)?;
        debug!(
            path = %path.display(),
            host = %info.path,
            deps = info.deps.len(),
            "loaded host build info"
        );
        Ok(Self::from_info(info, host))
    }

    pub fn from_info(info: BuildInfo, mut host: HostVersions) -> Self {
        if let Some(ref version) = info.runtime_version {
            host.runtime = version.clone();
        }
        Self { host, info }
    }
}

impl LocalDescriber for DumpFileDescriber {
    fn describe(&self) -> Descriptor {
        Descriptor::new(
            self.host.runtime.clone(),
            self.host.system_lib.clone(),
            self.info.dependencies(),
        )
    }
}
