//! Pure path algorithms: expansion and normalization
//!
//! Both functions operate on strings only. Expansion substitutes `~` and
//! environment references; normalization collapses separators and resolves
//! `.`/`..` segments without touching the filesystem.

/// Expand tilde and environment references against the process environment.
///
/// See [`expand_path_with`] for the exact rules.
pub fn expand_path(input: &str) -> String {
    let home = dirs::home_dir()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();
    expand_path_with(input, &home, &|name| std::env::var(name).ok())
}

/// Expand tilde and environment references using an injected environment.
///
/// Rules:
/// - `~` alone becomes `home`; a leading `~/` becomes `home/`; a tilde
///   anywhere else is left untouched.
/// - `${VAR}` and bare `$VAR` substitute the variable's value, or the empty
///   string when unset (never left as literal text).
/// - `${VAR:-default}` substitutes `default` when the variable is unset or
///   empty.
pub fn expand_path_with(
    input: &str,
    home: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> String {
    let tilde_expanded = if input == "~" {
        home.to_string()
    } else if let Some(rest) = input.strip_prefix("~/") {
        format!("{}/{}", home, rest)
    } else {
        input.to_string()
    };

    expand_vars(&tilde_expanded, lookup)
}

fn expand_vars(input: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let Some(dollar) = input[i..].find('$') else {
            out.push_str(&input[i..]);
            break;
        };
        out.push_str(&input[i..i + dollar]);
        i += dollar;

        // Braced form: ${VAR} or ${VAR:-default}
        if i + 1 < bytes.len() && bytes[i + 1] == b'{' {
            if let Some(close) = input[i + 2..].find('}') {
                let body = &input[i + 2..i + 2 + close];
                let (name, default) = match body.find(":-") {
                    Some(idx) => (&body[..idx], Some(&body[idx + 2..])),
                    None => (body, None),
                };
                let value = lookup(name).filter(|v| !v.is_empty());
                match (value, default) {
                    (Some(v), _) => out.push_str(&v),
                    (None, Some(d)) => out.push_str(d),
                    (None, None) => {}
                }
                i += 2 + close + 1;
                continue;
            }
            // Unterminated brace: keep the dollar literally.
            out.push('$');
            i += 1;
            continue;
        }

        // Bare form: $VAR with [A-Za-z_][A-Za-z0-9_]*
        let name_start = i + 1;
        let mut name_end = name_start;
        while name_end < bytes.len() {
            let c = bytes[name_end];
            let valid = if name_end == name_start {
                c.is_ascii_alphabetic() || c == b'_'
            } else {
                c.is_ascii_alphanumeric() || c == b'_'
            };
            if !valid {
                break;
            }
            name_end += 1;
        }

        if name_end == name_start {
            // Lone dollar, not a reference.
            out.push('$');
            i += 1;
            continue;
        }

        let name = &input[name_start..name_end];
        if let Some(value) = lookup(name) {
            out.push_str(&value);
        }
        i = name_end;
    }

    out
}

/// Normalize a path string without filesystem access.
///
/// Collapses repeated separators, drops the trailing separator (except for
/// root), removes `.` segments, and resolves `..` against the preceding
/// segment. For absolute paths a leading `..` is dropped (cannot climb above
/// root); for relative paths leading `..` segments are preserved.
///
/// Idempotent: `normalize_path(normalize_path(p)) == normalize_path(p)`.
pub fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                match segments.last() {
                    Some(&"..") => segments.push(".."),
                    Some(_) => {
                        segments.pop();
                    }
                    None => {
                        if !absolute {
                            segments.push("..");
                        }
                        // Absolute: ".." above root is dropped.
                    }
                }
            }
            other => segments.push(other),
        }
    }

    if absolute {
        format!("/{}", segments.join("/"))
    } else if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

/// Validate an identifier used as a name component (tool names, profile
/// names): ASCII alphanumerics, `_` and `-`, non-empty.
pub fn validate_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
