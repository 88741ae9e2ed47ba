use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Name of the diff which represents the go runtime version.
pub const RUNTIME_NAME: &str = "go";

/// Name of the diff which represents the libc version.
pub const SYSTEM_LIB_NAME: &str = "libc";

/// Whether a diff name refers to one of the reserved scalar versions.
pub fn is_reserved(name: &str) -> bool {
    name == RUNTIME_NAME || name == SYSTEM_LIB_NAME
}

/// All the dependencies and versions required by a binary or a plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    pub runtime_version: String,
    pub system_lib_version: String,
    pub dependencies: HashMap<String, String>,
}

/// One incompatibility between two descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diff {
    pub name: String,
    pub expected: String,
    pub have: String,
}

impl Diff {
    pub fn new(name: impl Into<String>, expected: impl Into<String>, have: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expected: expected.into(),
            have: have.into(),
        }
    }

    /// Runtime and libc diffs cannot be fixed by editing a manifest.
    pub fn is_reserved(&self) -> bool {
        is_reserved(&self.name)
    }
}

impl Descriptor {
    pub fn new(
        runtime_version: impl Into<String>,
        system_lib_version: impl Into<String>,
        dependencies: HashMap<String, String>,
    ) -> Self {
        Self {
            runtime_version: runtime_version.into(),
            system_lib_version: system_lib_version.into(),
            dependencies,
        }
    }

    /// List the incompatibilities between `self` (the reference) and `other`.
    ///
    /// Only dependencies known to both sides are compared. The result is
    /// ordered runtime first, then libc, then dependencies sorted by name.
    pub fn compare(&self, other: &Descriptor) -> Vec<Diff> {
        let mut diffs: Vec<Diff> = self
            .dependencies
            .iter()
            .filter_map(|(name, expected)| match other.dependencies.get(name) {
                Some(have) if have != expected => Some(Diff::new(name, expected, have)),
                _ => None,
            })
            .collect();

        diffs.sort_by(|a, b| a.name.cmp(&b.name));

        if self.system_lib_version != other.system_lib_version {
            diffs.insert(
                0,
                Diff::new(SYSTEM_LIB_NAME, &self.system_lib_version, &other.system_lib_version),
            );
        }

        if self.runtime_version != other.runtime_version {
            diffs.insert(
                0,
                Diff::new(RUNTIME_NAME, &self.runtime_version, &other.runtime_version),
            );
        }

        debug!(
            reference = self.dependencies.len(),
            other = other.dependencies.len(),
            diffs = diffs.len(),
            "compared descriptors"
        );
        diffs
    }
}
