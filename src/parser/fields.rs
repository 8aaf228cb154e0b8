//! Lenient serde helpers for quote fields whose shape depends on which
//! builder tabs were visited.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read an include toggle. Only a JSON boolean is kept; anything else
/// (absent, `null`, strings, numbers) reads as "not set".
pub fn deserialize_toggle<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => Some(b),
        _ => None,
    })
}

/// Read an on/off flag. Only a JSON `true` switches it on; `null`, strings
/// and numbers read as off.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value == Value::Bool(true))
}

/// An optional cost is included unless it was explicitly switched off.
#[inline]
pub fn is_included(toggle: Option<bool>) -> bool {
    toggle != Some(false)
}

/// Read a list of line items. `null` or a non-array becomes an empty list
/// and entries that are not objects of the right shape are dropped.
pub fn deserialize_lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        if !value.is_null() {
            tracing::warn!("Expected a list of line items, ignoring {}", value);
        }
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Dropping malformed line item: {}", e);
                None
            }
        })
        .collect())
}

/// Read an optional text field, treating blank strings as absent.
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(&value))
}

/// Text form of a JSON value for identity and label fields.
pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
