//! Quote-builder state: client-template inheritance, edits and
//! collection-mode variations feeding the calculation engine.

mod inheritance;
mod state;

pub use inheritance::apply_client_template;
pub use state::QuoteBuilder;
