//! Quote pricing: section formulas and the aggregate engine.

mod engine;
mod sections;

pub use engine::{
    calculate_quote, variation_breakdowns, QuoteCalculation, SectionKind, Sections, Totals,
    VariationBreakdown,
};
pub use sections::{
    apply_markup, cad_section, findings_section, finishing_section, manufacturing_section,
    metal_section, stones_section, variation_section, variations_metal_section, SectionBreakdown,
};
