use super::{Comments, ModFile, Replace, Require};
use plugcheck_core::core::version::compare_versions;

/// Quote a token when it cannot be written bare.
fn token(s: &str) -> String {
    let needs_quotes = s.is_empty()
        || s.chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '(' || c == ')' || c == '\'')
        || s.contains("//")
        || s.contains("=>");
    if needs_quotes {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

fn comment_line(text: &str) -> String {
    if text.is_empty() {
        "//".to_string()
    } else {
        format!("// {}", text)
    }
}

fn with_comment(mut line: String, comment: Option<&str>) -> String {
    if let Some(comment) = comment {
        line.push(' ');
        line.push_str(&comment_line(comment));
    }
    line
}

/// A single-line directive preceded by its own comment lines.
fn commented(line: String, comments: &Comments) -> String {
    let mut lines: Vec<String> = comments.leading.iter().map(|c| comment_line(c)).collect();
    lines.push(with_comment(line, comments.trailing.as_deref()));
    lines.join("\n")
}

fn require_entry(r: &Require) -> String {
    let line = format!("{} {}", token(&r.path), token(&r.version));
    let comment = match (r.indirect, r.comment.as_deref()) {
        (true, Some(extra)) => Some(format!("indirect; {}", extra)),
        (true, None) => Some("indirect".to_string()),
        (false, Some(extra)) => Some(extra.to_string()),
        (false, None) => None,
    };
    with_comment(line, comment.as_deref())
}

fn replace_entry(r: &Replace) -> String {
    let mut line = token(&r.old_path);
    if let Some(ref v) = r.old_version {
        line.push(' ');
        line.push_str(&token(v));
    }
    line.push_str(" => ");
    line.push_str(&token(&r.new_path));
    if let Some(ref v) = r.new_version {
        line.push(' ');
        line.push_str(&token(v));
    }
    with_comment(line, r.comment.as_deref())
}

/// Write one directive block: single-line when it holds one entry without
/// leading comments, parenthesized otherwise.
fn block(out: &mut Vec<String>, verb: &str, entries: &[(Vec<String>, String)]) {
    match entries {
        [] => {}
        [(leading, entry)] if leading.is_empty() => {
            out.push(format!("{} {}", verb, entry));
        }
        _ => {
            let mut section = format!("{} (\n", verb);
            for (leading, entry) in entries {
                for text in leading {
                    section.push('\t');
                    section.push_str(&comment_line(text));
                    section.push('\n');
                }
                section.push('\t');
                section.push_str(entry);
                section.push('\n');
            }
            section.push(')');
            out.push(section);
        }
    }
}

/// Render a manifest canonically.
///
/// Sections appear in a fixed order separated by blank lines; direct and
/// indirect requirements get their own blocks; entries within a block are
/// sorted.
pub(super) fn format(doc: &ModFile) -> String {
    let mut sections: Vec<String> = Vec::new();

    let mut head: Vec<String> = doc.header.iter().map(|c| comment_line(c)).collect();
    head.push(with_comment(
        format!("module {}", token(&doc.module)),
        doc.module_comment.as_deref(),
    ));
    sections.push(head.join("\n"));

    if let Some(ref go) = doc.go {
        sections.push(commented(format!("go {}", go), &doc.go_comments));
    }
    if let Some(ref toolchain) = doc.toolchain {
        sections.push(commented(
            format!("toolchain {}", toolchain),
            &doc.toolchain_comments,
        ));
    }

    let (direct, indirect) = doc.require_blocks();
    for requires in [direct, indirect] {
        let entries: Vec<_> = requires
            .into_iter()
            .map(|r| (r.leading.clone(), require_entry(r)))
            .collect();
        block(&mut sections, "require", &entries);
    }

    let mut excludes: Vec<_> = doc.exclude.iter().collect();
    excludes.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then_with(|| compare_versions(&a.version, &b.version))
    });
    let entries: Vec<_> = excludes
        .into_iter()
        .map(|e| {
            let line = format!("{} {}", token(&e.path), token(&e.version));
            (e.leading.clone(), with_comment(line, e.comment.as_deref()))
        })
        .collect();
    block(&mut sections, "exclude", &entries);

    let mut replaces: Vec<_> = doc.replace.iter().collect();
    replaces.sort_by(|a, b| {
        a.old_path.cmp(&b.old_path).then_with(|| {
            compare_versions(
                a.old_version.as_deref().unwrap_or(""),
                b.old_version.as_deref().unwrap_or(""),
            )
        })
    });
    let entries: Vec<_> = replaces
        .into_iter()
        .map(|r| (r.leading.clone(), replace_entry(r)))
        .collect();
    block(&mut sections, "replace", &entries);

    for directive in &doc.other {
        let mut lines: Vec<String> = directive.leading.iter().map(|c| comment_line(c)).collect();
        lines.push(directive.text.clone());
        sections.push(lines.join("\n"));
    }

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}
