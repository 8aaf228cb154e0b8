//! Input decoding: numeric coercion, lenient field readers and quote files.

mod document;
mod fields;
mod number;

pub use document::{parse_client_file, parse_quote_file, parse_quote_str};
pub(crate) use document::read_json_text;
pub use fields::*;
pub use number::{finite_or_zero, parse_float_prefix, to_number_or_zero, Amount};
