//! Defensive parsing of the extraction answer.
//!
//! The answer is expected to be a JSON array, possibly wrapped in a markdown
//! code fence or surrounded by prose. Each element is checked against the
//! candidate schema; invalid elements are rejected with a reason instead of
//! being passed downstream.

use crate::errors::{AppError, AppResult};
use crate::models::candidate::{ParsedCandidate, RejectedEntry};
use crate::models::event_type::EventType;
use serde_json::{Map, Value};

#[derive(Debug, Default)]
pub struct ParsedResponse {
    pub candidates: Vec<ParsedCandidate>,
    pub rejected: Vec<RejectedEntry>,
}

/// Balanced `[...]` slice starting at byte `start` (which must be a `[`),
/// skipping brackets inside strings.
fn balanced_array(text: &str, start: usize) -> Option<&str> {
    let candidate = &text[start..];

    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in candidate.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&candidate[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// First `[...]` in prose that parses as JSON. Later `[` positions are
/// tried when an earlier one ("[note]") is not JSON.
fn embedded_array(text: &str) -> Option<Result<Value, serde_json::Error>> {
    let mut last_err = None;

    for (start, _) in text.match_indices('[') {
        let Some(slice) = balanced_array(text, start) else {
            continue;
        };
        match serde_json::from_str::<Value>(slice) {
            Ok(v) => return Some(Ok(v)),
            Err(e) => last_err = Some(e),
        }
    }

    last_err.map(Err)
}

/// Strip a surrounding ```json / ``` fence, if any.
fn unfence(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        // drop the info string ("json", "JSON", ...)
        let body_start = after.find('\n').map(|n| n + 1).unwrap_or(0);
        let body = &after[body_start..];
        if let Some(end) = body.find("```") {
            return body[..end].trim();
        }
        return body.trim();
    }

    trimmed
}

/// Locate the JSON array inside a raw model answer. An empty answer is an
/// empty array.
pub fn extract_json_array(raw: &str) -> AppResult<Value> {
    let body = unfence(raw);
    if body.is_empty() {
        return Ok(Value::Array(Vec::new()));
    }

    let value = match serde_json::from_str::<Value>(body) {
        Ok(v) => v,
        Err(first) => match embedded_array(body) {
            Some(Ok(v)) => v,
            Some(Err(e)) => {
                return Err(AppError::ExtractionFailure(format!(
                    "malformed JSON array: {e}"
                )));
            }
            None => {
                return Err(AppError::ExtractionFailure(format!(
                    "answer is not JSON: {first}"
                )));
            }
        },
    };

    match value {
        Value::Array(_) => Ok(value),
        Value::Null => Ok(Value::Array(Vec::new())),
        other => Err(AppError::ExtractionFailure(format!(
            "expected a list of records, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn required_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a str, String> {
    match obj.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim()),
        Some(Value::String(_)) => Err(format!("`{key}` is empty")),
        Some(other) => Err(format!("`{key}` must be a string, got {}", kind_of(other))),
        None => Err(format!("missing `{key}`")),
    }
}

fn optional_str(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() || s.eq_ignore_ascii_case("null") => {
            Ok(None)
        }
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(other) => Err(format!(
            "`{key}` must be a string or null, got {}",
            kind_of(other)
        )),
    }
}

fn validate(value: &Value) -> Result<ParsedCandidate, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| format!("entry is {}, not an object", kind_of(value)))?;

    let raw_name = required_str(obj, "rawName")?.to_string();

    let type_label = required_str(obj, "type")?;
    let event_type = EventType::from_label(type_label)
        .ok_or_else(|| format!("`type` must be IN or OUT, got {type_label:?}"))?;

    let time = required_str(obj, "time")?.to_string();

    let confidence = match obj.get("confidence") {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| "`confidence` is not a finite number".to_string())?,
        Some(other) => {
            return Err(format!(
                "`confidence` must be a number, got {}",
                kind_of(other)
            ));
        }
        None => return Err("missing `confidence`".to_string()),
    };

    Ok(ParsedCandidate {
        raw_name,
        matched_sewadar_id: optional_str(obj, "matchedSewadarId")?,
        event_type,
        time,
        counter: optional_str(obj, "counter")?,
        confidence: confidence.clamp(0.0, 1.0),
    })
}

/// Parse a raw answer into validated candidates and rejected entries.
pub fn parse_candidates(raw: &str) -> AppResult<ParsedResponse> {
    let Value::Array(items) = extract_json_array(raw)? else {
        return Err(AppError::ExtractionFailure("expected a list of records".into()));
    };

    let mut out = ParsedResponse::default();
    for (index, item) in items.iter().enumerate() {
        match validate(item) {
            Ok(c) => out.candidates.push(c),
            Err(reason) => out.rejected.push(RejectedEntry { index, reason }),
        }
    }
    Ok(out)
}
