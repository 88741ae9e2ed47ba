use super::{Comments, Exclude, ModFile, ModFileError, RawDirective, Replace, Require};

/// Split a line into its code and the text of a trailing `//` comment.
fn split_comment(line: &str) -> (&str, Option<&str>) {
    let mut in_quotes = false;
    let mut escaped = false;
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if in_quotes {
            match b {
                b'\\' if !escaped => escaped = true,
                b'"' if !escaped => in_quotes = false,
                _ => escaped = false,
            }
            continue;
        }
        match b {
            b'"' => in_quotes = true,
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                return (&line[..i], Some(line[i + 2..].trim()));
            }
            _ => {}
        }
    }
    (line, None)
}

/// Split code into tokens, unquoting interpreted string literals.
fn tokenize(code: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut chars = code.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '"' {
            chars.next();
            let mut token = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' => match chars.next() {
                        Some(escaped) => token.push(escaped),
                        None => break,
                    },
                    '"' => {
                        closed = true;
                        break;
                    }
                    _ => token.push(c),
                }
            }
            if !closed {
                return Err("unterminated quoted string".to_string());
            }
            tokens.push(token);
            continue;
        }
        // "=>" is its own token even without surrounding spaces.
        if c == '=' {
            chars.next();
            if chars.peek() == Some(&'>') {
                chars.next();
                tokens.push("=>".to_string());
                continue;
            }
            let mut token = String::from("=");
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
            tokens.push(token);
            continue;
        }

        let mut token = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || (c == '=' && token_ends_before_arrow(&chars)) {
                break;
            }
            token.push(c);
            chars.next();
        }
        tokens.push(token);
    }

    Ok(tokens)
}

fn token_ends_before_arrow(chars: &std::iter::Peekable<std::str::Chars<'_>>) -> bool {
    let mut ahead = chars.clone();
    ahead.next();
    ahead.peek() == Some(&'>')
}

/// Parser state for one manifest.
struct Parser<'a> {
    file: &'a str,
    doc: ModFile,
    /// Standalone comment lines waiting for the next entry.
    pending: Vec<String>,
    seen_module: bool,
}

impl<'a> Parser<'a> {
    fn syntax(&self, line: usize, message: impl Into<String>) -> ModFileError {
        ModFileError::Syntax {
            file: self.file.to_string(),
            line,
            message: message.into(),
        }
    }

    fn directive(
        &mut self,
        line: usize,
        verb: &str,
        args: &[String],
        comment: Option<&str>,
        raw: &str,
    ) -> Result<(), ModFileError> {
        match verb {
            "module" => {
                let [path] = args else {
                    return Err(self.syntax(line, "usage: module module/path"));
                };
                if self.seen_module {
                    return Err(self.syntax(line, "repeated module statement"));
                }
                self.seen_module = true;
                self.doc.module = path.clone();
                self.doc.module_comment = non_empty(comment);
                self.doc.header.append(&mut self.pending);
            }
            "go" => {
                let [version] = args else {
                    return Err(self.syntax(line, "usage: go 1.23"));
                };
                self.doc.go = Some(version.clone());
                self.doc.go_comments = self.comments(comment);
            }
            "toolchain" => {
                let [name] = args else {
                    return Err(self.syntax(line, "usage: toolchain go1.23.4"));
                };
                self.doc.toolchain = Some(name.clone());
                self.doc.toolchain_comments = self.comments(comment);
            }
            "require" => {
                let [path, version] = args else {
                    return Err(self.syntax(line, "usage: require module/path v1.2.3"));
                };
                let (indirect, comment) = classify_comment(comment);
                self.doc.require.push(Require {
                    path: path.clone(),
                    version: version.clone(),
                    indirect,
                    comment,
                    leading: std::mem::take(&mut self.pending),
                });
            }
            "exclude" => {
                let [path, version] = args else {
                    return Err(self.syntax(line, "usage: exclude module/path v1.2.3"));
                };
                self.doc.exclude.push(Exclude {
                    path: path.clone(),
                    version: version.clone(),
                    comment: non_empty(comment),
                    leading: std::mem::take(&mut self.pending),
                });
            }
            "replace" => {
                let replace = self.replace(line, args, comment)?;
                self.doc.replace.push(replace);
            }
            "retract" | "godebug" => {
                self.doc.other.push(RawDirective {
                    verb: verb.to_string(),
                    text: raw.trim().to_string(),
                    leading: std::mem::take(&mut self.pending),
                });
            }
            _ => {
                return Err(ModFileError::UnknownDirective {
                    file: self.file.to_string(),
                    line,
                    verb: verb.to_string(),
                })
            }
        }
        Ok(())
    }

    fn replace(
        &mut self,
        line: usize,
        args: &[String],
        comment: Option<&str>,
    ) -> Result<Replace, ModFileError> {
        const USAGE: &str = "usage: replace module/path [v1.2.3] => other/module v1.4\n\t or replace module/path [v1.2.3] => ../local/directory";

        let Some(arrow) = args.iter().position(|a| a == "=>") else {
            return Err(self.syntax(line, USAGE));
        };
        let (old, new) = (&args[..arrow], &args[arrow + 1..]);

        let (old_path, old_version) = match old {
            [path] => (path.clone(), None),
            [path, version] => (path.clone(), Some(version.clone())),
            _ => return Err(self.syntax(line, USAGE)),
        };
        let (new_path, new_version) = match new {
            [path] if super::is_local_path(path) => (path.clone(), None),
            [path] => {
                return Err(self.syntax(
                    line,
                    format!("replacement module without version must be directory path (rooted or starting with . or ..): {}", path),
                ))
            }
            [path, version] => (path.clone(), Some(version.clone())),
            _ => return Err(self.syntax(line, USAGE)),
        };

        Ok(Replace {
            old_path,
            old_version,
            new_path,
            new_version,
            comment: non_empty(comment),
            leading: std::mem::take(&mut self.pending),
        })
    }

    fn comments(&mut self, trailing: Option<&str>) -> Comments {
        Comments {
            leading: std::mem::take(&mut self.pending),
            trailing: non_empty(trailing),
        }
    }
}

fn non_empty(comment: Option<&str>) -> Option<String> {
    comment.filter(|c| !c.is_empty()).map(str::to_string)
}

/// Split a require comment into the indirect marker and any remaining text.
fn classify_comment(comment: Option<&str>) -> (bool, Option<String>) {
    let Some(comment) = comment.map(str::trim).filter(|c| !c.is_empty()) else {
        return (false, None);
    };
    if comment == "indirect" {
        return (true, None);
    }
    if let Some(rest) = comment.strip_prefix("indirect;") {
        let rest = rest.trim();
        return (true, (!rest.is_empty()).then(|| rest.to_string()));
    }
    (false, Some(comment.to_string()))
}

/// Parse `go.mod` text.
pub(super) fn parse(file: &str, data: &str) -> Result<ModFile, ModFileError> {
    let mut parser = Parser {
        file,
        doc: ModFile::default(),
        pending: Vec::new(),
        seen_module: false,
    };
    let mut block: Option<(String, usize)> = None;

    for (i, raw) in data.lines().enumerate() {
        let line = i + 1;
        let (code, comment) = split_comment(raw);
        let tokens = tokenize(code).map_err(|message| parser.syntax(line, message))?;

        if tokens.is_empty() {
            match comment {
                Some(text) => parser.pending.push(text.to_string()),
                None => {
                    // A blank line detaches comments from the next entry,
                    // except for the header which is kept whole.
                    if parser.seen_module {
                        parser.pending.clear();
                    }
                }
            }
            continue;
        }

        if let Some((verb, _)) = block.clone() {
            if tokens.len() == 1 && tokens[0] == ")" {
                block = None;
                parser.pending.clear();
                continue;
            }
            let raw_entry = if verb == "retract" || verb == "godebug" {
                format!("{} {}", verb, raw.trim())
            } else {
                raw.to_string()
            };
            parser.directive(line, &verb, &tokens, comment, &raw_entry)?;
            continue;
        }

        let verb = tokens[0].as_str();
        let args = &tokens[1..];
        if args.len() == 1 && args[0] == "(" {
            if !matches!(verb, "require" | "exclude" | "replace" | "retract" | "godebug") {
                return Err(parser.syntax(line, format!("{} does not accept a block", verb)));
            }
            block = Some((verb.to_string(), line));
            continue;
        }
        parser.directive(line, verb, args, comment, raw)?;
    }

    if let Some((verb, line)) = block {
        return Err(parser.syntax(line, format!("unterminated {} block", verb)));
    }
    if !parser.seen_module {
        return Err(parser.syntax(1, "no module directive found"));
    }

    Ok(parser.doc)
}
