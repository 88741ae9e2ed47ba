//! Reporting incompatibilities and fixing them in the plugin manifest.

use super::descriptor::Diff;
use crate::modfile::{ManifestFormat, ModFile, Require};
use plugcheck_core::{PlugcheckError, PlugcheckResult};
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

/// Print a diff as a name followed by the installed and wanted versions.
fn print_plain<W: Write>(out: &mut W, diff: &Diff) -> io::Result<()> {
    writeln!(out, "{}", diff.name)?;
    writeln!(out, "\thave: {}", diff.have)?;
    writeln!(out, "\twant: {}", diff.expected)
}

/// The command that fixes a dependency diff by hand.
pub fn fix_command(diff: &Diff, indirects: &HashSet<String>) -> String {
    if indirects.contains(&diff.name) {
        format!(
            "go mod edit --replace {}={}@{}",
            diff.name, diff.name, diff.expected
        )
    } else {
        format!("go get {}@{}", diff.name, diff.expected)
    }
}

/// Print every diff.
///
/// With `suggest` set, dependency diffs are printed as the command that fixes
/// them. Runtime and libc diffs are always printed in the plain form.
pub fn output_fixes<W: Write>(
    out: &mut W,
    diffs: &[Diff],
    indirects: &HashSet<String>,
    suggest: bool,
) -> io::Result<()> {
    for diff in diffs {
        if suggest && !diff.is_reserved() {
            writeln!(out, "{}", fix_command(diff, indirects))?;
        } else {
            print_plain(out, diff)?;
        }
    }
    Ok(())
}

/// Fix what can be fixed by editing the manifest and return how many diffs
/// were fixed.
///
/// Direct dependencies get their requirement set to the wanted version;
/// indirect ones are pinned with a replace directive. Runtime and libc diffs
/// are printed and left. The manifest at `path` is only rewritten when at
/// least one diff was fixed.
pub fn apply_fixes<W: Write>(
    out: &mut W,
    diffs: &[Diff],
    manifest: &mut ModFile,
    indirects: &HashSet<String>,
    path: &Path,
    format: &dyn ManifestFormat,
) -> PlugcheckResult<usize> {
    let mut replaces: Vec<&Diff> = Vec::new();
    let mut requires: Vec<Require> = Vec::new();

    for diff in diffs {
        if diff.is_reserved() {
            print_plain(out, diff)?;
        } else if indirects.contains(&diff.name) {
            replaces.push(diff);
        } else {
            requires.push(Require::new(&diff.name, &diff.expected));
        }
    }

    let fixed = requires.len() + replaces.len();

    if !requires.is_empty() {
        let mut all = manifest.require.clone();
        all.extend(requires);
        manifest.set_require_separate_indirect(all);
    }

    for diff in replaces {
        manifest
            .add_replace(&diff.name, None, &diff.name, Some(&diff.expected))
            .map_err(|e| PlugcheckError::ManifestEdit(e.to_string()))?;
    }

    if fixed > 0 {
        manifest.cleanup();
        manifest.save(path, format)?;
        info!(fixed, path = %path.display(), "patched manifest");
        writeln!(out, "{} incompatibilities fixed", fixed)?;
    } else {
        debug!("nothing to patch");
    }

    Ok(fixed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modfile::GoModFormat;
    use std::fs;
    use tempfile::TempDir;

    const GO_MOD: &str = "module github.com/example/plugin

go 1.20

require github.com/luraproject/lura/v2 v2.2.0

require golang.org/x/mod v0.6.0 // indirect
";

    fn indirects() -> HashSet<String> {
        ["golang.org/x/mod".to_string()].into_iter().collect()
    }

    fn setup() -> (TempDir, std::path::PathBuf, ModFile) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("go.mod");
        fs::write(&path, GO_MOD).unwrap();
        let manifest = ModFile::load(&path, &GoModFormat).unwrap();
        (temp, path, manifest)
    }

    #[test]
    fn test_output_plain() {
        let mut out = Vec::new();
        let diffs = vec![Diff::new("golang.org/x/mod", "v0.6.10", "v0.6.0")];
        output_fixes(&mut out, &diffs, &HashSet::new(), false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "golang.org/x/mod\n\thave: v0.6.0\n\twant: v0.6.10\n"
        );
    }

    #[test]
    fn test_output_suggestions() {
        let mut out = Vec::new();
        let diffs = vec![
            Diff::new("go", "1.20.4", "1.19"),
            Diff::new("github.com/luraproject/lura/v2", "v2.3.0", "v2.2.0"),
            Diff::new("golang.org/x/mod", "v0.6.10", "v0.6.0"),
        ];
        output_fixes(&mut out, &diffs, &indirects(), true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "go\n\thave: 1.19\n\twant: 1.20.4\n\
             go get github.com/luraproject/lura/v2@v2.3.0\n\
             go mod edit --replace golang.org/x/mod=golang.org/x/mod@v0.6.10\n"
        );
    }

    #[test]
    fn test_indirect_gets_replace() {
        let (_temp, path, mut manifest) = setup();
        let mut out = Vec::new();
        let diffs = vec![Diff::new("golang.org/x/mod", "v0.6.10", "v0.6.0")];

        let fixed =
            apply_fixes(&mut out, &diffs, &mut manifest, &indirects(), &path, &GoModFormat)
                .unwrap();
        assert_eq!(fixed, 1);

        let written = ModFile::load(&path, &GoModFormat).unwrap();
        assert_eq!(written.replace.len(), 1);
        assert_eq!(written.replace[0].old_path, "golang.org/x/mod");
        assert_eq!(written.replace[0].new_version.as_deref(), Some("v0.6.10"));
        let req = written
            .require
            .iter()
            .find(|r| r.path == "golang.org/x/mod")
            .unwrap();
        assert_eq!(req.version, "v0.6.0");
        assert!(req.indirect);
        assert_eq!(String::from_utf8(out).unwrap(), "1 incompatibilities fixed\n");
    }

    #[test]
    fn test_direct_gets_require() {
        let (_temp, path, mut manifest) = setup();
        let mut out = Vec::new();
        let diffs = vec![
            Diff::new("github.com/luraproject/lura/v2", "v2.3.0", "v2.2.0"),
            Diff::new("github.com/new/dep", "v1.0.0", "v0.9.0"),
        ];

        let fixed =
            apply_fixes(&mut out, &diffs, &mut manifest, &indirects(), &path, &GoModFormat)
                .unwrap();
        assert_eq!(fixed, 2);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "module github.com/example/plugin

go 1.20

require (
\tgithub.com/luraproject/lura/v2 v2.3.0
\tgithub.com/new/dep v1.0.0
)

require golang.org/x/mod v0.6.0 // indirect
"
        );
    }

    #[test]
    fn test_reserved_not_fixed() {
        let (_temp, path, mut manifest) = setup();
        let mut out = Vec::new();
        let diffs = vec![
            Diff::new("go", "1.20.4", "1.1.0"),
            Diff::new("libc", "GLIBC-2.31", ""),
        ];

        let fixed =
            apply_fixes(&mut out, &diffs, &mut manifest, &indirects(), &path, &GoModFormat)
                .unwrap();
        assert_eq!(fixed, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "go\n\thave: 1.1.0\n\twant: 1.20.4\nlibc\n\thave: \n\twant: GLIBC-2.31\n"
        );
        // Untouched, byte for byte.
        assert_eq!(fs::read_to_string(&path).unwrap(), GO_MOD);
    }

    #[test]
    fn test_mixed_counts_only_dependencies() {
        let (_temp, path, mut manifest) = setup();
        let mut out = Vec::new();
        let diffs = vec![
            Diff::new("go", "1.20.4", "1.1.0"),
            Diff::new("golang.org/x/mod", "v0.6.10", "v0.6.0"),
        ];

        let fixed =
            apply_fixes(&mut out, &diffs, &mut manifest, &indirects(), &path, &GoModFormat)
                .unwrap();
        assert_eq!(fixed, 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("go\n\thave: 1.1.0\n"));
        assert!(text.ends_with("1 incompatibilities fixed\n"));
    }

    #[test]
    fn test_fix_keeps_deprecation_and_retract_comments() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("go.mod");
        fs::write(
            &path,
            "module example.com/plugin // Deprecated: use example.com/plugin/v2

go 1.20

require github.com/luraproject/lura/v2 v2.2.0

// Published with a broken API.
retract v1.0.1
",
        )
        .unwrap();
        let mut manifest = ModFile::load(&path, &GoModFormat).unwrap();
        let mut out = Vec::new();
        let diffs = vec![Diff::new("github.com/luraproject/lura/v2", "v2.3.0", "v2.2.0")];

        let fixed =
            apply_fixes(&mut out, &diffs, &mut manifest, &HashSet::new(), &path, &GoModFormat)
                .unwrap();
        assert_eq!(fixed, 1);

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "module example.com/plugin // Deprecated: use example.com/plugin/v2

go 1.20

require github.com/luraproject/lura/v2 v2.3.0

// Published with a broken API.
retract v1.0.1
"
        );
    }

    #[test]
    fn test_bad_replace_version_fails() {
        let (_temp, path, mut manifest) = setup();
        let mut out = Vec::new();
        let diffs = vec![Diff::new("golang.org/x/mod", "not-a-version", "v0.6.0")];

        let err = apply_fixes(&mut out, &diffs, &mut manifest, &indirects(), &path, &GoModFormat)
            .unwrap_err();
        assert!(matches!(err, PlugcheckError::ManifestEdit(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), GO_MOD);
    }
}
