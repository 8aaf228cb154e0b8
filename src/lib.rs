//! quote-calc - Pricing core for custom jewelry quotes.
//!
//! This library prices a quote from its raw form values: metal (standard or
//! per-variation in collection mode), stones, CAD, manufacturing, finishing
//! and findings, each with its own markup. It also carries the quote-builder
//! state that seeds pricing parameters from a client's pricing template.
//!
//! # Example
//!
//! ```no_run
//! use quote_calc_rs::{open_quote, generate_summary, PricingDefaults};
//! use std::path::Path;
//!
//! let builder = open_quote(Path::new("quote.json"), None, PricingDefaults::default()).unwrap();
//! let calculation = builder.calculation();
//! let summary = generate_summary(
//!     &builder.to_document(),
//!     &calculation,
//!     &builder.variation_breakdowns(),
//! )
//! .unwrap();
//! println!("{}", summary);
//! ```

pub mod builder;
pub mod calculation;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod validation;

// Re-exports for convenience
pub use builder::{apply_client_template, QuoteBuilder};
pub use calculation::{
    calculate_quote, variation_breakdowns, QuoteCalculation, SectionBreakdown, SectionKind,
    Totals, VariationBreakdown,
};
pub use config::{PricingDefaults, PricingParameter};
pub use error::{ErrorCode, QuoteError, Result};
pub use model::{
    Client, ClientPricingTemplate, FindingLine, Quote, QuoteDocument, QuoteField, QuoteStatus,
    SaveQuoteRequest, StoneLine, Variation, VariationList,
};
pub use parser::{parse_client_file, parse_quote_file, parse_quote_str, Amount};
pub use report::{generate_json, generate_summary};
pub use validation::{validate_for_status, validate_quote, ValidationResult};

/// Open a quote file in a builder session.
///
/// A document without an `id` is a new quote. When a client is given, a new
/// quote takes its pricing parameters from the client's template (falling
/// back to `defaults`). A new quote that names a `client_id` but has no
/// client file takes every pricing parameter from `defaults`. A saved quote
/// keeps the values it was saved with.
///
/// The client's own `id` wins over the document's `client_id`.
pub fn open_quote(
    input_path: &std::path::Path,
    client: Option<&Client>,
    defaults: PricingDefaults,
) -> Result<QuoteBuilder> {
    let document = parse_quote_file(input_path)?;
    let mut builder = QuoteBuilder::from_document(document, defaults);

    if let Some(client) = client {
        let client_id = client
            .id
            .clone()
            .or_else(|| builder.quote().client_id.clone());
        if client_id.is_none() {
            tracing::warn!("Client file has no id and the quote has no client; template ignored");
        }
        let template = client.template();
        builder.select_client_with_template(client_id.as_deref(), Some(&template));
    }

    Ok(builder)
}
