//! Model response parsing and validation.
//!
//! Responses are expected to be a single JSON object, but models wrap it in
//! code fences or surround it with prose often enough that both are handled.

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::DiscoveryError;
use crate::types::LeadAnalysis;

/// Parse and validate a raw model response.
///
/// # Errors
///
/// Returns [`DiscoveryError::Parse`] when no JSON object can be recovered.
pub(crate) fn parse_analysis(raw: &str) -> Result<LeadAnalysis, DiscoveryError> {
    let object = extract_object(raw)?;
    Ok(validate(&object))
}

fn strip_code_fences(raw: &str) -> String {
    let fence = Regex::new(r"```(?:json|JSON)?\s*|\s*```").expect("valid regex");
    fence.replace_all(raw, "").trim().to_string()
}

fn extract_object(raw: &str) -> Result<Map<String, Value>, DiscoveryError> {
    let text = strip_code_fences(raw);

    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(&text) {
        return Ok(object);
    }

    for span in balanced_spans(&text) {
        if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(span) {
            return Ok(object);
        }
    }

    let preview: String = text.chars().take(80).collect();
    Err(DiscoveryError::Parse(format!(
        "no JSON object in response: {preview:?}"
    )))
}

/// Every balanced `{...}` span, in order of its opening brace. Braces inside
/// JSON string literals do not count toward nesting.
fn balanced_spans(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.match_indices('{')
        .filter_map(move |(start, _)| span_end(&text[start..]).map(|len| &text[start..start + len]))
}

/// Byte length of the balanced span starting at `text[0] == '{'`.
fn span_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Clamp every score into `[0.0, 1.0]`; missing or non-numeric values become `0.0`.
pub(crate) fn validate(object: &Map<String, Value>) -> LeadAnalysis {
    LeadAnalysis {
        intent_score: score(object, "intent_score"),
        decision_maker_score: score(object, "decision_maker_score"),
        urgency_score: score(object, "urgency_score"),
        relevance_score: score(object, "relevance_score"),
        overall_confidence: score(object, "overall_confidence"),
        key_insights: insights(object),
    }
}

fn score(object: &Map<String, Value>, key: &str) -> f64 {
    let value = match object.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value
        .filter(|v| v.is_finite())
        .map_or(0.0, |v| v.clamp(0.0, 1.0))
}

fn insights(object: &Map<String, Value>) -> Vec<String> {
    match object.get("key_insights") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}
