//! Method documents and share links.
//!
//! A method is exported as a pretty-printed JSON document. A share link
//! carries the same document inline:
//!
//! ```text
//! <base>#/methods?import=<base64(percent-encoded JSON)>
//! ```
//!
//! Importing always assigns a fresh ID so that a re-imported method never
//! collides with the one it was exported from.

use base64::{Engine, engine::general_purpose::STANDARD};
use jiff::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::{LabError, Result},
    models::BrewMethod,
    params::CreateMethod,
};

const IMPORT_MARKER: &str = "import=";

/// Pretty JSON document for a method.
pub fn method_to_json(method: &BrewMethod) -> Result<String> {
    Ok(serde_json::to_string_pretty(method)?)
}

/// File name for an exported method: each whitespace run becomes one `-`,
/// including runs at either end.
///
/// ```rust
/// # use brewlab_core::export::export_file_name_for;
/// assert_eq!(export_file_name_for("Kasuya  4:6 method"), "Kasuya-4:6-method.json");
/// ```
pub fn export_file_name(method: &BrewMethod) -> String {
    export_file_name_for(&method.name)
}

/// [`export_file_name`] for a bare method name.
pub fn export_file_name_for(name: &str) -> String {
    let mut file_name = String::with_capacity(name.len() + 5);
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                file_name.push('-');
            }
            in_whitespace = true;
        } else {
            file_name.push(c);
            in_whitespace = false;
        }
    }
    file_name.push_str(".json");
    file_name
}

/// Parse and validate an exported method document.
///
/// The returned method has a fresh ID and creation time; any ID in the
/// document is ignored.
pub fn method_from_json(json: &str) -> Result<BrewMethod> {
    let value: Value = serde_json::from_str(json)?;
    validate_document(&value)?;

    let params: CreateMethod = serde_json::from_value(value)?;
    let now = Timestamp::now();
    Ok(BrewMethod {
        id: Uuid::new_v4(),
        name: params.name,
        category: params.category,
        recommended_temp: params.recommended_temp,
        recommended_ratio: params.recommended_ratio,
        steps: params.steps,
        description: params.description,
        created_at: now,
        updated_at: now,
    })
}

fn invalid(field: &str, reason: &str) -> LabError {
    LabError::invalid_input(field).with_reason(reason)
}

/// Structural checks on an import document before it is deserialized.
fn validate_document(value: &Value) -> Result<()> {
    let doc = value
        .as_object()
        .ok_or_else(|| invalid("document", "Expected a JSON object"))?;

    if !doc.get("name").is_some_and(Value::is_string) {
        return Err(invalid("name", "Expected a string"));
    }
    if !doc.get("category").is_some_and(Value::is_string) {
        return Err(invalid("category", "Expected a string"));
    }

    let steps = doc
        .get("steps")
        .and_then(Value::as_array)
        .filter(|steps| !steps.is_empty())
        .ok_or_else(|| invalid("steps", "Expected a non-empty array"))?;

    for (index, step) in steps.iter().enumerate() {
        let field = format!("steps[{index}]");
        let step = step
            .as_object()
            .ok_or_else(|| invalid(&field, "Expected an object"))?;

        if !step.get("name").is_some_and(Value::is_string) {
            return Err(invalid(&format!("{field}.name"), "Expected a string"));
        }
        if !step
            .get("type")
            .or_else(|| step.get("kind"))
            .is_some_and(Value::is_string)
        {
            return Err(invalid(&format!("{field}.type"), "Expected a string"));
        }
        if !step
            .get("duration")
            .or_else(|| step.get("durationSeconds"))
            .is_some_and(Value::is_number)
        {
            return Err(invalid(&format!("{field}.duration"), "Expected a number"));
        }
    }

    Ok(())
}

/// Build a share link for `method` rooted at `base`.
pub fn share_link(method: &BrewMethod, base: &str) -> Result<String> {
    let json = serde_json::to_string(method)?;
    let payload = STANDARD.encode(urlencoding::encode(&json).as_bytes());
    Ok(format!(
        "{}#/methods?{IMPORT_MARKER}{payload}",
        base.trim_end_matches('/')
    ))
}

/// Decode a share link, or a bare payload, back into a method.
///
/// Anything that does not decode to a valid method document yields `None`.
pub fn parse_share_link(link: &str) -> Option<BrewMethod> {
    let link = link.trim();
    let payload = match link.find(IMPORT_MARKER) {
        Some(pos) => {
            let rest = &link[pos + IMPORT_MARKER.len()..];
            rest.split('&').next().unwrap_or(rest)
        }
        None => link,
    };

    let bytes = STANDARD.decode(payload).ok()?;
    let encoded = String::from_utf8(bytes).ok()?;
    let json = urlencoding::decode(&encoded).ok()?;
    method_from_json(&json).ok()
}
