//! Quote documents as exchanged with the persistence API.

use crate::parser::{deserialize_flag, deserialize_lenient_list, deserialize_optional_text};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::quote::Quote;
use super::variation::Variation;

/// Workflow status of a saved quote. Set by the caller, never computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Completed,
    PendingApproval,
    Approved,
    Rejected,
}

impl QuoteStatus {
    /// Parse a status name, accepting the wire spelling.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "completed" => Some(Self::Completed),
            "pending_approval" => Some(Self::PendingApproval),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Completed => write!(f, "completed"),
            Self::PendingApproval => write!(f, "pending_approval"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A quote as fetched from the API or read from disk.
///
/// A document with an `id` is a previously saved quote whose pricing values
/// are authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteDocument {
    #[serde(
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        deserialize_with = "deserialize_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<QuoteStatus>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub collection_mode: bool,
    #[serde(deserialize_with = "deserialize_lenient_list")]
    pub variations: Vec<Variation>,
    #[serde(flatten)]
    pub quote: Quote,
}

/// Unknown status names read as "no status" rather than failing the load.
fn deserialize_status<'de, D>(deserializer: D) -> Result<Option<QuoteStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(QuoteStatus::from_name))
}

impl QuoteDocument {
    pub fn new(quote: Quote) -> Self {
        Self {
            quote,
            ..Default::default()
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Payload handed to the persistence API on save/submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveQuoteRequest {
    pub status: QuoteStatus,
    pub collection_mode: bool,
    pub variations: Vec<Variation>,
    #[serde(flatten)]
    pub quote: Quote,
}
