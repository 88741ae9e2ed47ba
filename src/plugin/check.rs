//! Checking one plugin against the host.

use super::descriptor::Diff;
use super::patcher::{apply_fixes, fix_command, output_fixes};
use super::sumfile::describe_file;
use crate::di::{ConfigProvider, LocalDescriber};
use crate::modfile::{GoModFormat, ModFile};
use plugcheck_core::core::path::manifest_for;
use plugcheck_core::{PlugcheckError, PlugcheckResult};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything one check run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// The plugin's `go.sum`; its `go.mod` is expected in the same directory.
    pub sum_file: PathBuf,
    /// Runtime version the plugin was built with.
    pub go_version: String,
    /// libc version the plugin was built against.
    pub libc_version: String,
    /// Print fix commands instead of have/want pairs.
    pub suggest: bool,
    /// Patch the plugin's `go.mod`.
    pub fix: bool,
    /// Print the incompatibilities as JSON.
    pub json: bool,
}

impl CheckOptions {
    /// Defaults taken from configuration. The plugin is assumed to be built
    /// with the host's runtime and libc until told otherwise.
    pub fn from_config(config: &dyn ConfigProvider) -> Self {
        Self {
            sum_file: config.sum_file(),
            go_version: config.host_go_version().to_string(),
            libc_version: config.host_libc_version().to_string(),
            suggest: config.suggest_commands(),
            fix: config.fix(),
            json: false,
        }
    }
}

#[derive(Serialize)]
struct JsonDiff<'a> {
    #[serde(flatten)]
    diff: &'a Diff,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix: Option<String>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    compatible: bool,
    incompatibilities: Vec<JsonDiff<'a>>,
}

/// Compare a plugin against the host and report, or fix, the differences.
///
/// Returns an error when incompatibilities remain, so callers can map the
/// outcome straight to an exit status.
pub fn check<W: Write>(
    out: &mut W,
    opts: &CheckOptions,
    host: &dyn LocalDescriber,
) -> PlugcheckResult<()> {
    let plugin = describe_file(&opts.sum_file, &opts.go_version, &opts.libc_version)?;
    let diffs = host.describe().compare(&plugin);
    info!(
        sum_file = %opts.sum_file.display(),
        diffs = diffs.len(),
        "checked plugin"
    );

    if diffs.is_empty() && !opts.json {
        writeln!(out, "No incompatibilities found!")?;
        return Ok(());
    }

    let manifest_path = manifest_for(&opts.sum_file);
    let mut manifest = None;
    let mut indirects = HashSet::new();
    if !diffs.is_empty() && (opts.suggest || opts.fix) {
        let doc = ModFile::load(&manifest_path, &GoModFormat)?;
        indirects = doc.indirect_requires();
        debug!(indirect = indirects.len(), "loaded manifest");
        manifest = Some(doc);
    }

    let fixed = match manifest {
        Some(ref mut doc) if opts.fix => {
            apply_fixes(out, &diffs, doc, &indirects, &manifest_path, &GoModFormat)?
        }
        _ if opts.json => {
            write_json(out, &diffs, &indirects, opts.suggest)?;
            0
        }
        _ => {
            output_fixes(out, &diffs, &indirects, opts.suggest)?;
            0
        }
    };

    summarize(diffs.len(), fixed)
}

fn write_json<W: Write>(
    out: &mut W,
    diffs: &[Diff],
    indirects: &HashSet<String>,
    suggest: bool,
) -> PlugcheckResult<()> {
    let report = JsonReport {
        compatible: diffs.is_empty(),
        incompatibilities: diffs
            .iter()
            .map(|diff| JsonDiff {
                diff,
                fix: (suggest && !diff.is_reserved()).then(|| fix_command(diff, indirects)),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

/// Map the number of diffs and fixes to the reported outcome.
pub fn summarize(total: usize, fixed: usize) -> PlugcheckResult<()> {
    if total == fixed {
        Ok(())
    } else if fixed > 0 {
        Err(PlugcheckError::PartiallyFixed {
            fixed,
            left: total - fixed,
        })
    } else {
        Err(PlugcheckError::Incompatible(total))
    }
}
