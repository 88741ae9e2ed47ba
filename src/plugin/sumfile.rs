//! Reads a `go.sum` lock file into a dependency version map.
//!
//! Each line is `<module> <version>[/go.mod] <hash>`. The `/go.mod` variant
//! records the checksum of the module's manifest rather than its sources and
//! collapses onto the same version. When a module appears with several
//! versions the highest by semantic-version precedence wins.

use super::descriptor::Descriptor;
use plugcheck_core::core::version::compare_versions;
use plugcheck_core::{PlugcheckError, PlugcheckResult};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Suffix marking a version token as the checksum of the module's `go.mod`.
pub const MANIFEST_SUFFIX: &str = "/go.mod";

/// Strip the manifest-checksum suffix from a version token.
pub fn clean_version(version: &str) -> &str {
    match version.strip_suffix(MANIFEST_SUFFIX) {
        Some(v) if !v.is_empty() => v,
        _ => version,
    }
}

/// Parse a lock-file stream into a module -> highest version map.
///
/// Lines with fewer than two fields are skipped.
pub fn parse_version_map<R: Read>(reader: R) -> io::Result<HashMap<String, String>> {
    let mut deps: HashMap<String, String> = HashMap::new();
    let mut lines = 0usize;

    for line in BufReader::new(reader).split(b'\n') {
        let line = line?;
        lines += 1;
        let line = String::from_utf8_lossy(&line);
        let mut fields = line.split_whitespace();
        let (Some(name), Some(version)) = (fields.next(), fields.next()) else {
            continue;
        };
        let version = clean_version(version);

        let current = deps.get(name).map(String::as_str).unwrap_or("");
        if compare_versions(current, version) != Ordering::Less {
            continue;
        }
        deps.insert(name.to_string(), version.to_string());
    }

    debug!(lines, modules = deps.len(), "parsed lock file");
    Ok(deps)
}

/// Build a descriptor from a lock-file stream and the declared runtime and libc versions.
pub fn describe<R: Read>(
    reader: R,
    runtime_version: &str,
    system_lib_version: &str,
) -> io::Result<Descriptor> {
    Ok(Descriptor::new(
        runtime_version,
        system_lib_version,
        parse_version_map(reader)?,
    ))
}

/// Open a lock file and describe it.
///
/// The file is closed before returning on every path.
pub fn describe_file(
    path: &Path,
    runtime_version: &str,
    system_lib_version: &str,
) -> PlugcheckResult<Descriptor> {
    let file = File::open(path).map_err(|source| PlugcheckError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    describe_from(path, file, runtime_version, system_lib_version)
}

/// Describe an opened lock file; read failures are reported against `path`.
fn describe_from<R: Read>(
    path: &Path,
    reader: R,
    runtime_version: &str,
    system_lib_version: &str,
) -> PlugcheckResult<Descriptor> {
    describe(reader, runtime_version, system_lib_version).map_err(|source| {
        PlugcheckError::LockRead {
            path: path.to_path_buf(),
            source,
        }
    })
}
