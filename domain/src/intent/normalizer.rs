//! Conservative filename normalization
//!
//! Maps loose spoken references ("the readme", "license") to canonical
//! repository paths. The rules are ordered and first-match-wins; anything
//! that looks like a real repository path, or that the user spelled out
//! explicitly, passes through untouched.

/// Normalize a loose file reference to a canonical path.
///
/// Rules, in order:
/// 1. A path containing a separator is explicit — unchanged.
/// 2. An explicit token in the original intent (quoted, or shaped like
///    `segment/segment.ext`) wins over any heuristic.
/// 3. Case-insensitive canonical table (readme/package/license variants).
/// 4. Prefix rules: `readme.*` → `README.md`, `package.*` → `package.json`,
///    `license.*` → `LICENSE`.
/// 5. Otherwise unchanged.
pub fn normalize_file_path(path: &str, intent: Option<&str>) -> String {
    if path.contains('/') {
        return path.to_string();
    }

    if let Some(intent) = intent
        && let Some(explicit) = explicit_path_token(intent)
    {
        return explicit;
    }

    let lower = path.to_lowercase();
    match lower.as_str() {
        "readme" | "readme.md" | "readme.markdown" => "README.md".to_string(),
        "package" | "package.json" => "package.json".to_string(),
        "license" | "license.md" | "license.txt" => "LICENSE".to_string(),
        _ => {
            if lower.starts_with("readme.") {
                "README.md".to_string()
            } else if lower.starts_with("package.") {
                "package.json".to_string()
            } else if lower.starts_with("license.") {
                "LICENSE".to_string()
            } else {
                path.to_string()
            }
        }
    }
}

/// Find an explicitly spelled path in the intent text.
///
/// Either a quoted span (quote characters at word boundaries, so
/// apostrophes inside words like "what's" don't count), or a
/// whitespace-delimited token shaped like `segment/segment.ext`.
fn explicit_path_token(intent: &str) -> Option<String> {
    for quote in ['"', '\''] {
        if let Some(span) = quoted_span(intent, quote) {
            return Some(span);
        }
    }

    intent.split_whitespace().find_map(|raw| {
        let token = raw.trim_end_matches([',', '.', '?', '!', ';', ':']);
        let (dir, file) = token.rsplit_once('/')?;
        if dir.is_empty() || file.is_empty() {
            return None;
        }
        let has_extension = file
            .rsplit_once('.')
            .is_some_and(|(stem, ext)| !stem.is_empty() && !ext.is_empty());
        has_extension.then(|| token.to_string())
    })
}

/// Extract the contents of the first quoted span whose quotes sit at word
/// boundaries.
fn quoted_span(intent: &str, quote: char) -> Option<String> {
    let chars: Vec<char> = intent.chars().collect();
    let mut open: Option<usize> = None;

    for (i, &c) in chars.iter().enumerate() {
        if c != quote {
            continue;
        }
        match open {
            None => {
                let at_word_start = i == 0 || chars[i - 1].is_whitespace();
                if at_word_start {
                    open = Some(i);
                }
            }
            Some(start) => {
                let at_word_end =
                    i + 1 == chars.len() || !chars[i + 1].is_alphanumeric();
                if at_word_end {
                    let inner: String = chars[start + 1..i].iter().collect();
                    if !inner.is_empty() {
                        return Some(inner);
                    }
                    open = None;
                }
            }
        }
    }

    None
}
