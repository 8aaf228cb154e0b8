//! Quote document reader.

use crate::error::{QuoteError, Result};
use crate::model::{Client, QuoteDocument};
use serde_json::Value;
use std::path::Path;

/// Parse a quote document from JSON text.
///
/// Only a syntactically broken document is an error. Malformed field values
/// are coerced to zero or dropped.
pub fn parse_quote_str(content: &str) -> Result<QuoteDocument> {
    let document: QuoteDocument = serde_json::from_str(content)?;
    tracing::debug!(
        loaded = document.is_persisted(),
        stones = document.quote.stone_categories.len(),
        findings = document.quote.findings.len(),
        variations = document.variations.len(),
        "Parsed quote document"
    );
    Ok(document)
}

/// Read and parse a quote document from disk.
pub fn parse_quote_file(path: &Path) -> Result<QuoteDocument> {
    let content = read_json_text(path)?;
    parse_quote_str(&content)
}

/// Read a client file.
///
/// Accepts a full client record (`{"id", "name", "pricing_template"}`) or a
/// bare pricing template, either as an object or as a JSON-encoded string.
pub fn parse_client_file(path: &Path) -> Result<Client> {
    let content = read_json_text(path)?;
    let value: Value = serde_json::from_str(&content)?;

    let is_record = value
        .as_object()
        .is_some_and(|obj| obj.contains_key("pricing_template"));

    let client = if is_record {
        serde_json::from_value(value)?
    } else {
        Client {
            pricing_template: value,
            ..Default::default()
        }
    };

    tracing::debug!(client_id = ?client.id, "Parsed client file");
    Ok(client)
}

/// Read a JSON file, rejecting missing and blank files.
pub(crate) fn read_json_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(QuoteError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        return Err(QuoteError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    Ok(content)
}
