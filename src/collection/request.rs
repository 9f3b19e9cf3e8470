//! Collection input request: persona and job lookup.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::rank::value_to_text;

/// Keys tried, in order, for the persona.
pub const PERSONA_KEYS: &[&str] = &["persona", "Persona", "PERSONA", "user_persona", "target_persona"];

/// Keys tried, in order, for the job to be done.
pub const JOB_KEYS: &[&str] = &[
    "job_to_be_done",
    "job",
    "Job",
    "JOB",
    "task",
    "objective",
    "job_description",
];

/// Persona and job read from a collection's input file.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionRequest {
    /// Persona value as found in the input (string or object)
    pub persona: Value,
    /// Job value as found in the input (string or object)
    pub job: Value,
}

impl CollectionRequest {
    /// Read and parse a request file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a request from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Resolve persona and job from a parsed JSON object.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::MissingField("request is not a JSON object".to_string()))?;

        let persona = lookup(map, PERSONA_KEYS);
        let job = lookup(map, JOB_KEYS);

        if persona.is_none() || job.is_none() {
            log::debug!(
                "Available keys in request: {:?}",
                map.keys().collect::<Vec<_>>()
            );
        }

        let (persona_key, persona) =
            persona.ok_or_else(|| Error::MissingField("persona".to_string()))?;
        let (job_key, job) = job.ok_or_else(|| Error::MissingField("job".to_string()))?;
        log::debug!("Found persona under '{}', job under '{}'", persona_key, job_key);

        Ok(Self {
            persona: persona.clone(),
            job: job.clone(),
        })
    }

    /// Persona flattened to text.
    pub fn persona_text(&self) -> String {
        value_to_text(&self.persona)
    }

    /// Job flattened to text.
    pub fn job_text(&self) -> String {
        value_to_text(&self.job)
    }
}

/// First key present with a non-empty value.
fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
    keys.iter()
        .find_map(|key| map.get(*key).filter(|v| is_present(v)).map(|v| (*key, v)))
}

/// Emptiness as a loosely typed config reader sees it: null, false, zero,
/// and empty strings, arrays or objects are all absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primary_keys() {
        let request = CollectionRequest::from_json(
            r#"{"persona": "Travel Planner", "job_to_be_done": "Plan a 4-day trip"}"#,
        )
        .unwrap();
        assert_eq!(request.persona_text(), "Travel Planner");
        assert_eq!(request.job_text(), "Plan a 4-day trip");
    }

    #[test]
    fn test_alternative_keys_in_priority_order() {
        let request = CollectionRequest::from_value(&json!({
            "user_persona": "Chef",
            "Persona": "HR professional",
            "objective": "later",
            "task": "Prepare a menu",
        }))
        .unwrap();
        assert_eq!(request.persona_text(), "HR professional");
        assert_eq!(request.job_text(), "Prepare a menu");
    }

    #[test]
    fn test_empty_values_skipped() {
        let request = CollectionRequest::from_value(&json!({
            "persona": "",
            "PERSONA": "Analyst",
            "job_to_be_done": {},
            "job": null,
            "Job": "Review reports",
        }))
        .unwrap();
        assert_eq!(request.persona, json!("Analyst"));
        assert_eq!(request.job, json!("Review reports"));
    }

    #[test]
    fn test_object_values() {
        let request = CollectionRequest::from_value(&json!({
            "persona": {"role": "Food Contractor"},
            "job_to_be_done": {"task": "Prepare a vegetarian buffet"},
        }))
        .unwrap();
        assert_eq!(request.persona_text(), "Food Contractor");
        assert_eq!(request.job_text(), "Prepare a vegetarian buffet");
        assert_eq!(request.persona, json!({"role": "Food Contractor"}));
    }

    #[test]
    fn test_missing_persona() {
        let result = CollectionRequest::from_value(&json!({"job": "Do things"}));
        assert!(matches!(result, Err(Error::MissingField(f)) if f == "persona"));
    }

    #[test]
    fn test_missing_job() {
        let result = CollectionRequest::from_value(&json!({"persona": "Someone", "task": ""}));
        assert!(matches!(result, Err(Error::MissingField(f)) if f == "job"));
    }

    #[test]
    fn test_not_an_object() {
        assert!(CollectionRequest::from_json("[1, 2]").is_err());
        assert!(matches!(
            CollectionRequest::from_json("{broken"),
            Err(Error::Json(_))
        ));
    }
}
