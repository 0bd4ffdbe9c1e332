use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

// 從第一個 `{` 貪婪匹配到最後一個 `}`
static GREEDY_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("static regex is valid"));

/// Pulls a JSON object out of free-form model output.
///
/// The first-`{`-to-last-`}` span is tried first. If that span does not
/// parse (for example when the prose after the object contains stray
/// braces), each balanced `{...}` candidate is tried in order and the first
/// one that parses wins.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let greedy = GREEDY_OBJECT.find(text)?;
    if let Ok(value) = serde_json::from_str::<Value>(greedy.as_str()) {
        return Some(value);
    }

    tracing::debug!("Greedy JSON span did not parse, scanning balanced objects");
    balanced_objects(text)
        .into_iter()
        .find_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
}

/// Top-level `{...}` spans with braces inside string literals ignored.
fn balanced_objects(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if depth > 0 && in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = idx;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    spans.push(&text[start..=idx]);
                }
            }
            _ => {}
        }
    }

    spans
}
