//! Quote validation module.

mod validate;

pub use validate::{validate_for_status, validate_quote, ValidationResult};
