//! Quote calculation engine.
//!
//! [`calculate_quote`] is a pure function of its inputs: it never fails, has
//! no side effects beyond trace logging, and returns bit-identical results
//! for identical inputs. Callers re-run it after every edit.

use crate::model::{Quote, Variation};
use crate::parser::finite_or_zero;
use serde::{Deserialize, Serialize};

use super::sections::{
    cad_section, findings_section, finishing_section, manufacturing_section, metal_section,
    stones_section, variation_section, variations_metal_section, SectionBreakdown,
};

/// The six cost/price buckets of a quote, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Metal,
    Stones,
    Cad,
    Manufacturing,
    Finishing,
    Findings,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Metal,
        SectionKind::Stones,
        SectionKind::Cad,
        SectionKind::Manufacturing,
        SectionKind::Finishing,
        SectionKind::Findings,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Metal => "Metal",
            SectionKind::Stones => "Stones",
            SectionKind::Cad => "CAD",
            SectionKind::Manufacturing => "Manufacturing",
            SectionKind::Finishing => "Finishing",
            SectionKind::Findings => "Findings",
        }
    }
}

/// Per-section breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sections {
    pub metal: SectionBreakdown,
    pub stones: SectionBreakdown,
    pub cad: SectionBreakdown,
    pub manufacturing: SectionBreakdown,
    pub finishing: SectionBreakdown,
    pub findings: SectionBreakdown,
}

impl Sections {
    pub fn get(&self, kind: SectionKind) -> SectionBreakdown {
        match kind {
            SectionKind::Metal => self.metal,
            SectionKind::Stones => self.stones,
            SectionKind::Cad => self.cad,
            SectionKind::Manufacturing => self.manufacturing,
            SectionKind::Finishing => self.finishing,
            SectionKind::Findings => self.findings,
        }
    }

    /// Sections in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, SectionBreakdown)> + '_ {
        SectionKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Aggregate figures across all sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal_cost: f64,
    pub total_price: f64,
    pub profit: f64,
    /// Profit as a percentage of total price; 0 when the price is 0.
    pub margin: f64,
}

impl Totals {
    pub fn from_sections(sections: &Sections) -> Self {
        let (subtotal_cost, total_price) = sections
            .iter()
            .fold((0.0, 0.0), |(cost, price), (_, s)| (cost + s.cost, price + s.price));

        // Sums of large finite sections can still overflow.
        let subtotal_cost = finite_or_zero(subtotal_cost);
        let total_price = finite_or_zero(total_price);

        let profit = finite_or_zero(total_price - subtotal_cost);
        let margin = if total_price > 0.0 {
            finite_or_zero((profit / total_price) * 100.0)
        } else {
            0.0
        };

        Self {
            subtotal_cost,
            total_price,
            profit,
            margin,
        }
    }
}

/// Output of the calculation engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteCalculation {
    pub sections: Sections,
    pub totals: Totals,
}

/// One variation's own figures, for display next to the summed metal line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariationBreakdown {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    /// Zero for disabled variations.
    pub cost: f64,
    /// Zero for disabled variations.
    pub price: f64,
}

/// Compute every section and the totals.
///
/// Collection-mode pricing replaces the standard metal entry only when the
/// mode is on and at least one variation exists, even if none is enabled.
pub fn calculate_quote(
    quote: &Quote,
    collection_mode: bool,
    variations: &[Variation],
) -> QuoteCalculation {
    let metal = if collection_mode && !variations.is_empty() {
        variations_metal_section(variations)
    } else {
        metal_section(quote)
    };

    let sections = Sections {
        metal,
        stones: stones_section(quote),
        cad: cad_section(quote),
        manufacturing: manufacturing_section(quote),
        finishing: finishing_section(quote),
        findings: findings_section(quote),
    };
    let totals = Totals::from_sections(&sections);

    tracing::trace!(
        collection_mode,
        subtotal_cost = totals.subtotal_cost,
        total_price = totals.total_price,
        "Recalculated quote"
    );

    QuoteCalculation { sections, totals }
}

/// Per-variation figures in list order.
pub fn variation_breakdowns(variations: &[Variation]) -> Vec<VariationBreakdown> {
    variations
        .iter()
        .map(|v| {
            let section = if v.enabled {
                variation_section(v)
            } else {
                SectionBreakdown::ZERO
            };
            VariationBreakdown {
                id: v.id.clone(),
                name: v.name.clone(),
                enabled: v.enabled,
                cost: section.cost,
                price: section.price,
            }
        })
        .collect()
}
