//! Validation of model classification replies
//!
//! The reply is untrusted: it is parsed as generic JSON first and every
//! required field is type-checked before an assessment is built from it.

use serde_json::Value;

use crate::model::Assessment;
use crate::service::analysis::error::ClassifierError;

/// Parse and validate a model reply into an assessment.
///
/// Checks:
/// 1. The trimmed reply is valid JSON
/// 2. It is an object with a boolean `success`
/// 3. `confidence` is a number (clamped to [0, 1] afterwards)
/// 4. `reason` is a non-blank string
pub fn parse_classifier_reply(reply: &str) -> Result<Assessment, ClassifierError> {
    let parsed: Value = serde_json::from_str(reply.trim())
        .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))?;

    let Some(object) = parsed.as_object() else {
        return Err(ClassifierError::InvalidResponseStructure(format!(
            "expected a JSON object, got {}",
            json_type(&parsed)
        )));
    };

    let success = match object.get("success") {
        Some(Value::Bool(b)) => *b,
        other => return Err(field_error("success", "boolean", other)),
    };

    let confidence = match object.get("confidence").and_then(Value::as_f64) {
        Some(c) => c,
        None => return Err(field_error("confidence", "number", object.get("confidence"))),
    };

    let reason = match object.get("reason") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::String(_)) => {
            return Err(ClassifierError::InvalidResponseStructure(
                "field 'reason' is empty".to_string(),
            ));
        }
        other => return Err(field_error("reason", "string", other)),
    };

    Ok(Assessment::new(success, confidence, reason))
}

fn field_error(field: &str, expected: &str, found: Option<&Value>) -> ClassifierError {
    let found = found.map(json_type).unwrap_or("nothing");
    ClassifierError::InvalidResponseStructure(format!(
        "field '{}' must be a {}, found {}",
        field, expected, found
    ))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
