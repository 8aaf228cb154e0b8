//! Pre-save checks for a quote.
//!
//! The calculator never rejects input; these checks run only when a quote is
//! about to be saved or submitted.

use crate::calculation::QuoteCalculation;
use crate::error::{QuoteError, Result};
use crate::model::{Quote, QuoteStatus, Variation};

/// Outcome of the pre-save checks. Errors block a save; warnings are only
/// reported.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationResult {
    pub passed: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            passed: true,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// A failed result carrying one error.
    pub fn error(message: impl Into<String>) -> Self {
        let mut result = Self::ok();
        result.add_error(message);
        result
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Record an error; the result no longer passes.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.passed = false;
        self.errors.push(message.into());
    }

    /// Fold the messages of a sub-check into this result.
    pub fn merge(&mut self, other: ValidationResult) {
        self.passed &= other.passed;
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }

    /// Downgrade every error to a warning. Drafts may be saved incomplete.
    pub fn relaxed(mut self) -> Self {
        self.warnings.append(&mut self.errors);
        self.passed = true;
        self
    }

    /// `Err(QuoteError::Validation)` when any error was recorded.
    pub fn into_result(self) -> Result<ValidationResult> {
        if self.passed {
            return Ok(self);
        }
        Err(QuoteError::Validation {
            errors: self.errors,
        })
    }
}

/// Validate a quote before it is saved.
pub fn validate_quote(
    quote: &Quote,
    collection_mode: bool,
    variations: &[Variation],
    calculation: &QuoteCalculation,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if quote.client_id.is_none() {
        result.add_error("No client selected");
    }

    if collection_mode && !variations.is_empty() {
        result.merge(validate_variations(variations));
    } else {
        if collection_mode {
            result.add_warning("Collection mode is on but no variations were added");
        }
        if quote.metal_type.is_none() {
            result.add_error("No metal type selected");
        }
        if quote.metal_weight.get() <= 0.0 {
            result.add_error(format!(
                "Metal weight must be greater than zero (got {})",
                quote.metal_weight
            ));
        }
    }

    result.merge(validate_line_items(quote));
    result.merge(validate_non_negative(quote));

    if calculation.totals.total_price <= 0.0 {
        result.add_warning("Total price is zero");
    } else if calculation.totals.profit < 0.0 {
        result.add_warning(format!(
            "Quote is priced below cost (profit {:.2})",
            calculation.totals.profit
        ));
    }

    result
}

/// Validate for a target status. Drafts never fail.
pub fn validate_for_status(
    quote: &Quote,
    collection_mode: bool,
    variations: &[Variation],
    calculation: &QuoteCalculation,
    status: QuoteStatus,
) -> ValidationResult {
    let result = validate_quote(quote, collection_mode, variations, calculation);
    if status.is_draft() {
        result.relaxed()
    } else {
        result
    }
}

/// Collection-mode checks.
fn validate_variations(variations: &[Variation]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if !variations.iter().any(|v| v.enabled) {
        result.add_error("Collection mode requires at least one enabled variation");
    }

    for variation in variations.iter().filter(|v| v.enabled) {
        let label = if variation.name.is_empty() {
            variation.id.as_str()
        } else {
            variation.name.as_str()
        };
        if variation.metal_type.is_none() {
            result.add_error(format!("Variation '{}': No metal type selected", label));
        }
        if variation.metal_weight.get() <= 0.0 {
            result.add_error(format!(
                "Variation '{}': Metal weight must be greater than zero",
                label
            ));
        }
    }

    result
}

/// Line items with nothing to price are probably leftovers.
fn validate_line_items(quote: &Quote) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for (idx, line) in quote.stone_categories.iter().enumerate() {
        if line.count.is_zero() {
            result.add_warning(format!("Stone line {}: Count is zero", idx + 1));
        }
    }

    for (idx, line) in quote.findings.iter().enumerate() {
        if line.count.is_zero() {
            result.add_warning(format!("Finding line {}: Count is zero", idx + 1));
        }
    }

    result
}

fn validate_non_negative(quote: &Quote) -> ValidationResult {
    let mut result = ValidationResult::ok();

    let fields = [
        ("metal_weight", quote.metal_weight),
        ("metal_spot_price", quote.metal_spot_price),
        ("cad_hours", quote.cad_hours),
        ("manufacturing_hours", quote.manufacturing_hours),
        ("finishing_cost", quote.finishing_cost),
        ("plating_cost", quote.plating_cost),
    ];

    for (name, value) in fields {
        if value.get() < 0.0 {
            result.add_warning(format!("{} is negative ({})", name, value));
        }
    }

    result
}
