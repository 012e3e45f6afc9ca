//! Schema checks applied to every raw entry before it enters a registry.

use serde_json::Value;
use tracing::debug;

use super::types::{Collection, RawEntry, ResourceRef};
use crate::{CollectionError, Result};

const TITLE_KEY: &str = "title";
const RESOURCES_KEY: &str = "resources";

/// Validate a raw entry and normalize it into a [`Collection`].
///
/// A missing or `null` title becomes the empty string and a missing
/// `resources` key becomes an empty list. Anything else that does not match
/// `{ title?: string, resources?: [non-empty string] }` is rejected.
pub fn validate(raw: &RawEntry) -> Result<Collection> {
    if raw.id.trim().is_empty() {
        return Err(invalid(raw, "id must be a non-empty string"));
    }

    let body = raw
        .body
        .as_object()
        .ok_or_else(|| invalid(raw, format!("expected an object, found {}", type_name(&raw.body))))?;

    let title = match body.get(TITLE_KEY) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(title)) => title.clone(),
        Some(other) => {
            return Err(invalid(
                raw,
                format!("title must be a string, found {}", type_name(other)),
            ))
        }
    };

    let resources = match body.get(RESOURCES_KEY) {
        None => Vec::new(),
        Some(Value::Array(items)) => validate_resources(raw, items)?,
        Some(other) => {
            return Err(invalid(
                raw,
                format!("resources must be a list of strings, found {}", type_name(other)),
            ))
        }
    };

    for key in body.keys() {
        if key != TITLE_KEY && key != RESOURCES_KEY {
            debug!(id = %raw.id, key = %key, "Ignoring unknown collection key");
        }
    }

    Ok(Collection { title, resources })
}

fn validate_resources(raw: &RawEntry, items: &[Value]) -> Result<Vec<ResourceRef>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(reference) if reference.is_empty() => Err(invalid(
                raw,
                format!("resources[{index}] is an empty reference"),
            )),
            Value::String(reference) => Ok(ResourceRef::new(reference.as_str())),
            other => Err(invalid(
                raw,
                format!("resources[{index}] must be a string, found {}", type_name(other)),
            )),
        })
        .collect()
}

fn invalid(raw: &RawEntry, reason: impl Into<String>) -> CollectionError {
    CollectionError::InvalidEntry {
        id: raw.id.clone(),
        position: raw.position.clone(),
        reason: reason.into(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
