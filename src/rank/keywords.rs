//! Keyword extraction from persona and job descriptions.

use regex::Regex;
use serde_json::Value;

/// Word tokens of `persona + " " + job`.
///
/// The job is lowercased before tokenizing; the persona keeps its case.
/// Duplicates are kept in order, since they weight the query document.
pub fn parse_persona_and_job(persona: &str, job: &str) -> Vec<String> {
    let word = Regex::new(r"\b\w+\b").unwrap();
    let text = format!("{} {}", persona, job.to_lowercase());
    word.find_iter(&text).map(|m| m.as_str().to_string()).collect()
}

/// Flatten a persona or job value from a request into plain text.
///
/// Strings are used as-is; objects and arrays contribute their string and
/// number leaves joined by spaces, e.g. `{"role": "Travel Planner"}`.
pub fn value_to_text(value: &Value) -> String {
    let mut parts = Vec::new();
    collect_leaves(value, &mut parts);
    parts.join(" ")
}

fn collect_leaves(value: &Value, parts: &mut Vec<String>) {
    match value {
        Value::String(s) => parts.push(s.clone()),
        Value::Number(n) => parts.push(n.to_string()),
        Value::Bool(b) => parts.push(b.to_string()),
        Value::Array(items) => items.iter().for_each(|v| collect_leaves(v, parts)),
        Value::Object(map) => map.values().for_each(|v| collect_leaves(v, parts)),
        Value::Null => {}
    }
}
