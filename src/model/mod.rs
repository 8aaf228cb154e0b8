//! Data model types for quotes, line items, variations and clients.

mod client;
mod document;
mod line_item;
mod quote;
mod variation;

pub use client::{Client, ClientPricingTemplate};
pub use document::{QuoteDocument, QuoteStatus, SaveQuoteRequest};
pub use line_item::{FindingField, FindingLine, StoneField, StoneLine};
pub use quote::{Quote, QuoteField};
pub use variation::{Variation, VariationField, VariationList};
