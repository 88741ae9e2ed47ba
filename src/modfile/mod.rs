//! Module manifest (`go.mod`) document model.
//!
//! The model keeps what the compatibility fixer needs to edit and rewrite a
//! manifest: `require` entries with their direct/indirect classification,
//! `replace` directives, and the remaining directives carried through
//! unchanged. Reading and writing go through [`ManifestFormat`] so the model
//! does not depend on one concrete syntax.

mod format;
mod parser;

use plugcheck_core::core::version::{compare_versions, Version};
use plugcheck_core::{PlugcheckError, PlugcheckResult};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors produced while reading or editing a manifest.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModFileError {
    #[error("{file}:{line}: {message}")]
    Syntax {
        file: String,
        line: usize,
        message: String,
    },

    #[error("{file}:{line}: unknown directive: {verb}")]
    UnknownDirective {
        file: String,
        line: usize,
        verb: String,
    },

    #[error("invalid module path {0:?}")]
    InvalidPath(String),

    #[error("invalid version {version:?} for {path}")]
    InvalidVersion { path: String, version: String },
}

/// A module requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Require {
    pub path: String,
    pub version: String,
    pub indirect: bool,
    /// Comment text other than the `indirect` marker.
    pub comment: Option<String>,
    /// Comment lines directly above the entry.
    pub leading: Vec<String>,
}

impl Require {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            indirect: false,
            comment: None,
            leading: Vec::new(),
        }
    }

    pub fn indirect(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            indirect: true,
            ..Self::new(path, version)
        }
    }
}

/// A replace directive: `old [old_version] => new [new_version]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replace {
    pub old_path: String,
    pub old_version: Option<String>,
    pub new_path: String,
    /// Absent when the replacement is a local directory.
    pub new_version: Option<String>,
    pub comment: Option<String>,
    pub leading: Vec<String>,
}

/// An `exclude` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclude {
    pub path: String,
    pub version: String,
    pub comment: Option<String>,
    pub leading: Vec<String>,
}

/// A directive the fixer never edits (`retract`, `godebug`), kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDirective {
    pub verb: String,
    /// The directive line, trailing comment included.
    pub text: String,
    pub leading: Vec<String>,
}

/// Comments attached to a single-line directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    pub leading: Vec<String>,
    pub trailing: Option<String>,
}

/// A parsed module manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModFile {
    /// Comment lines before the `module` directive.
    pub header: Vec<String>,
    pub module: String,
    /// Trailing comment of the `module` line, e.g. a deprecation notice.
    pub module_comment: Option<String>,
    pub go: Option<String>,
    pub go_comments: Comments,
    pub toolchain: Option<String>,
    pub toolchain_comments: Comments,
    pub require: Vec<Require>,
    pub exclude: Vec<Exclude>,
    pub replace: Vec<Replace>,
    pub other: Vec<RawDirective>,
}

/// Whether a replacement target is a local directory rather than a module.
pub fn is_local_path(path: &str) -> bool {
    path.starts_with("./")
        || path.starts_with("../")
        || path.starts_with('/')
        || path == "."
        || path == ".."
        || path.starts_with(".\\")
        || path.starts_with("..\\")
}

fn check_path(path: &str) -> Result<(), ModFileError> {
    if path.is_empty() || path.chars().any(char::is_whitespace) {
        return Err(ModFileError::InvalidPath(path.to_string()));
    }
    Ok(())
}

fn check_version(path: &str, version: &str) -> Result<(), ModFileError> {
    Version::parse(version).map_err(|_| ModFileError::InvalidVersion {
        path: path.to_string(),
        version: version.to_string(),
    })?;
    Ok(())
}

impl ModFile {
    /// Module paths required with the `// indirect` marker.
    pub fn indirect_requires(&self) -> HashSet<String> {
        self.require
            .iter()
            .filter(|r| r.indirect)
            .map(|r| r.path.clone())
            .collect()
    }

    /// Set the requirement list to `reqs`.
    ///
    /// Entries for paths already required keep their position, comments and
    /// classification and take the new version. New entries keep the
    /// classification they carry, so direct additions land in the direct
    /// block and never in the indirect one.
    pub fn set_require_separate_indirect(&mut self, reqs: Vec<Require>) {
        let mut merged: Vec<Require> = Vec::with_capacity(reqs.len());
        let mut index: HashMap<String, usize> = HashMap::new();

        for req in reqs {
            match index.get(&req.path) {
                Some(&i) => merged[i].version = req.version,
                None => {
                    index.insert(req.path.clone(), merged.len());
                    merged.push(req);
                }
            }
        }

        self.require = merged;
    }

    /// Add or update a replace directive.
    ///
    /// Existing replacements of `old_path` that match `old_version` (any
    /// version when `old_version` is `None`) are collapsed into one entry
    /// pointing at the new target.
    pub fn add_replace(
        &mut self,
        old_path: &str,
        old_version: Option<&str>,
        new_path: &str,
        new_version: Option<&str>,
    ) -> Result<(), ModFileError> {
        check_path(old_path)?;
        check_path(new_path)?;
        if let Some(v) = old_version {
            check_version(old_path, v)?;
        }
        match new_version {
            Some(v) => check_version(new_path, v)?,
            None if !is_local_path(new_path) => {
                return Err(ModFileError::InvalidVersion {
                    path: new_path.to_string(),
                    version: String::new(),
                })
            }
            None => {}
        }

        let matches = |r: &Replace| {
            r.old_path == old_path
                && (old_version.is_none() || r.old_version.as_deref() == old_version)
        };

        let mut updated = false;
        self.replace.retain_mut(|r| {
            if !matches(&*r) {
                return true;
            }
            if updated {
                return false;
            }
            r.old_version = old_version.map(str::to_string);
            r.new_path = new_path.to_string();
            r.new_version = new_version.map(str::to_string);
            updated = true;
            true
        });

        if !updated {
            self.replace.push(Replace {
                old_path: old_path.to_string(),
                old_version: old_version.map(str::to_string),
                new_path: new_path.to_string(),
                new_version: new_version.map(str::to_string),
                comment: None,
                leading: Vec::new(),
            });
        }

        debug!(old_path, ?new_version, "added replace");
        Ok(())
    }

    /// Remove duplicate directives, keeping the last occurrence of each.
    pub fn cleanup(&mut self) {
        fn dedup_last<T, K: Eq + std::hash::Hash>(items: &mut Vec<T>, key: impl Fn(&T) -> K) {
            let mut seen = HashSet::new();
            let mut kept: Vec<T> = Vec::with_capacity(items.len());
            for item in items.drain(..).rev() {
                if seen.insert(key(&item)) {
                    kept.push(item);
                }
            }
            kept.reverse();
            *items = kept;
        }

        dedup_last(&mut self.require, |r| r.path.clone());
        dedup_last(&mut self.replace, |r| (r.old_path.clone(), r.old_version.clone()));
        dedup_last(&mut self.exclude, |e| (e.path.clone(), e.version.clone()));
    }

    /// Requirements split into (direct, indirect), each sorted by path then version.
    pub fn require_blocks(&self) -> (Vec<&Require>, Vec<&Require>) {
        let (mut direct, mut indirect): (Vec<&Require>, Vec<&Require>) =
            self.require.iter().partition(|r| !r.indirect);
        let by_path = |a: &&Require, b: &&Require| {
            a.path
                .cmp(&b.path)
                .then_with(|| compare_versions(&a.version, &b.version))
        };
        direct.sort_by(by_path);
        indirect.sort_by(by_path);
        (direct, indirect)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path, format: &dyn ManifestFormat) -> PlugcheckResult<Self> {
        let data = fs::read_to_string(path).map_err(|source| PlugcheckError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path.display().to_string();
        format
            .parse(&name, &data)
            .map_err(|e| PlugcheckError::ManifestParse(e.to_string()))
    }

    /// Format and write the manifest, replacing the file in one rename.
    pub fn save(&self, path: &Path, format: &dyn ManifestFormat) -> PlugcheckResult<()> {
        let data = format.format(self);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp = path.with_file_name(format!(".{}.tmp", file_name));

        let write_err = |source| PlugcheckError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        };
        fs::write(&tmp, data).map_err(write_err)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }
        debug!(path = %path.display(), "wrote manifest");
        Ok(())
    }
}

/// Reader/writer for a concrete manifest syntax.
pub trait ManifestFormat {
    /// Parse manifest text; `file` is used in error messages.
    fn parse(&self, file: &str, data: &str) -> Result<ModFile, ModFileError>;

    /// Render the manifest in canonical form.
    fn format(&self, doc: &ModFile) -> String;
}

/// The `go.mod` syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoModFormat;

impl ManifestFormat for GoModFormat {
    fn parse(&self, file: &str, data: &str) -> Result<ModFile, ModFileError> {
        parser::parse(file, data)
    }

    fn format(&self, doc: &ModFile) -> String {
        format::format(doc)
    }
}
