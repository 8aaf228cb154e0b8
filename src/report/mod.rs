//! Quote summary output.

mod summary;

pub use summary::{generate_json, generate_summary};
