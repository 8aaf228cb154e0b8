//! Per-section cost and price formulas.
//!
//! Each function reads already-coerced [`Amount`](crate::parser::Amount)
//! fields, so no input can yield NaN. Markups on the stone and finding
//! sections apply once to the summed line costs, never per line.

use crate::model::{Quote, Variation};
use crate::parser::{finite_or_zero, is_included};
use serde::{Deserialize, Serialize};

/// Cost and sell price of one section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionBreakdown {
    pub cost: f64,
    pub price: f64,
}

impl SectionBreakdown {
    pub const ZERO: SectionBreakdown = SectionBreakdown {
        cost: 0.0,
        price: 0.0,
    };

    /// Price a cost with a markup percentage. A cost or price that
    /// overflowed reads as 0.
    pub fn with_markup(cost: f64, markup_pct: f64) -> Self {
        let cost = finite_or_zero(cost);
        Self {
            cost,
            price: finite_or_zero(apply_markup(cost, markup_pct)),
        }
    }
}

/// `cost * (1 + markup/100)`.
#[inline]
pub fn apply_markup(cost: f64, markup_pct: f64) -> f64 {
    cost * (1.0 + markup_pct / 100.0)
}

/// Metal cost with wastage added to the weight before pricing.
#[inline]
fn metal_cost(weight: f64, spot_price: f64, wastage_pct: f64) -> f64 {
    (weight + weight * wastage_pct / 100.0) * spot_price
}

/// Standard (single metal entry) metal section.
pub fn metal_section(quote: &Quote) -> SectionBreakdown {
    let cost = metal_cost(
        quote.metal_weight.get(),
        quote.metal_spot_price.get(),
        quote.metal_wastage.get(),
    );
    SectionBreakdown::with_markup(cost, quote.metal_markup.get())
}

/// One variation priced on its own metal inputs. Disabled variations are
/// still priced here; callers decide whether they count.
pub fn variation_section(variation: &Variation) -> SectionBreakdown {
    let cost = metal_cost(
        variation.metal_weight.get(),
        variation.metal_spot_price.get(),
        variation.metal_wastage.get(),
    );
    SectionBreakdown::with_markup(cost, variation.metal_markup.get())
}

/// Collection-mode metal section: the sum over enabled variations.
pub fn variations_metal_section(variations: &[Variation]) -> SectionBreakdown {
    let (cost, price) = variations
        .iter()
        .filter(|v| v.enabled)
        .map(variation_section)
        .fold((0.0, 0.0), |(cost, price), s| (cost + s.cost, price + s.price));

    SectionBreakdown {
        cost: finite_or_zero(cost),
        price: finite_or_zero(price),
    }
}

pub fn cad_section(quote: &Quote) -> SectionBreakdown {
    let rendering = if is_included(quote.include_rendering_cost) {
        quote.cad_rendering_cost.get()
    } else {
        0.0
    };
    let technical = if is_included(quote.include_technical_cost) {
        quote.cad_technical_cost.get()
    } else {
        0.0
    };

    let cost = quote.cad_hours.get() * quote.cad_base_rate.get() + rendering + technical;
    SectionBreakdown::with_markup(cost, quote.cad_markup.get())
}

pub fn manufacturing_section(quote: &Quote) -> SectionBreakdown {
    let cost = quote.manufacturing_hours.get() * quote.manufacturing_base_rate.get();
    SectionBreakdown::with_markup(cost, quote.manufacturing_markup.get())
}

pub fn stones_section(quote: &Quote) -> SectionBreakdown {
    let cost = quote
        .stone_categories
        .iter()
        .fold(0.0, |sum, line| sum + line.line_cost());
    SectionBreakdown::with_markup(cost, quote.stone_markup.get())
}

pub fn finishing_section(quote: &Quote) -> SectionBreakdown {
    let plating = if is_included(quote.include_plating_cost) {
        quote.plating_cost.get()
    } else {
        0.0
    };

    let cost = quote.finishing_cost.get() + plating;
    SectionBreakdown::with_markup(cost, quote.finishing_markup.get())
}

pub fn findings_section(quote: &Quote) -> SectionBreakdown {
    let cost = quote
        .findings
        .iter()
        .fold(0.0, |sum, line| sum + line.line_cost());
    SectionBreakdown::with_markup(cost, quote.findings_markup.get())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;
    use crate::model::{FindingLine, StoneLine};
    use crate::parser::Amount;

    fn amt(n: f64) -> Amount {
        Amount::new(n)
    }

    #[test]
    fn test_overflowing_stone_line_prices_at_zero() {
        let quote = Quote {
            stone_categories: vec![StoneLine::new(1e200, 1e200, 0.0)],
            stone_markup: amt(-100.0),
            ..Default::default()
        };
        assert_eq!(stones_section(&quote), SectionBreakdown::ZERO);
    }

    #[test]
    fn test_apply_markup() {
        assert_eq!(apply_markup(100.0, 50.0), 150.0);
        assert_eq!(apply_markup(100.0, 0.0), 100.0);
        assert_eq!(apply_markup(0.0, 80.0), 0.0);
        assert_eq!(apply_markup(200.0, -25.0), 150.0);
    }

    #[test]
    fn test_metal_with_wastage() {
        let quote = Quote {
            metal_weight: amt(10.0),
            metal_spot_price: amt(1000.0),
            metal_wastage: amt(10.0),
            metal_markup: amt(50.0),
            ..Default::default()
        };
        let metal = metal_section(&quote);
        assert!(approx_eq(metal.cost, 11000.0));
        assert!(approx_eq(metal.price, 16500.0));
    }

    #[test]
    fn test_cad_toggles() {
        let mut quote = Quote {
            cad_hours: amt(5.0),
            cad_base_rate: amt(850.0),
            cad_rendering_cost: amt(500.0),
            cad_technical_cost: amt(300.0),
            cad_markup: amt(100.0),
            ..Default::default()
        };
        assert_eq!(cad_section(&quote).cost, 5050.0);

        quote.include_rendering_cost = Some(false);
        assert_eq!(cad_section(&quote).cost, 4550.0);
        assert_eq!(cad_section(&quote).price, 9100.0);

        quote.include_technical_cost = Some(false);
        assert_eq!(cad_section(&quote).cost, 4250.0);

        quote.include_rendering_cost = Some(true);
        quote.include_technical_cost = None;
        assert_eq!(cad_section(&quote).cost, 5050.0);
    }

    #[test]
    fn test_manufacturing() {
        let quote = Quote {
            manufacturing_hours: amt(3.0),
            manufacturing_base_rate: amt(600.0),
            manufacturing_markup: amt(25.0),
            ..Default::default()
        };
        let section = manufacturing_section(&quote);
        assert_eq!(section.cost, 1800.0);
        assert_eq!(section.price, 2250.0);
    }

    #[test]
    fn test_stones_global_markup() {
        let quote = Quote {
            stone_categories: vec![
                StoneLine::new(2.0, 100.0, 50.0),
                StoneLine::new(1.0, 200.0, 0.0),
            ],
            stone_markup: amt(50.0),
            ..Default::default()
        };
        let section = stones_section(&quote);
        assert_eq!(section.cost, 500.0);
        assert_eq!(section.price, 750.0);
    }

    #[test]
    fn test_finishing_plating_toggle() {
        let mut quote = Quote {
            finishing_cost: amt(400.0),
            plating_cost: amt(250.0),
            finishing_markup: amt(20.0),
            ..Default::default()
        };
        assert_eq!(finishing_section(&quote).cost, 650.0);
        assert!(approx_eq(finishing_section(&quote).price, 780.0));

        quote.include_plating_cost = Some(false);
        assert_eq!(finishing_section(&quote).cost, 400.0);
    }

    #[test]
    fn test_findings() {
        let quote = Quote {
            findings: vec![FindingLine::new(2.0, 15.0), FindingLine::new(1.0, 40.0)],
            findings_markup: amt(100.0),
            ..Default::default()
        };
        let section = findings_section(&quote);
        assert_eq!(section.cost, 70.0);
        assert_eq!(section.price, 140.0);
    }

    #[test]
    fn test_variations_skip_disabled() {
        let on = Variation {
            id: "var-1".into(),
            enabled: true,
            metal_weight: amt(5.0),
            metal_spot_price: amt(1000.0),
            ..Default::default()
        };
        let off = Variation {
            id: "var-2".into(),
            enabled: false,
            metal_weight: amt(100.0),
            metal_spot_price: amt(1000.0),
            ..Default::default()
        };
        let section = variations_metal_section(&[on.clone(), off.clone()]);
        assert_eq!(section, SectionBreakdown { cost: 5000.0, price: 5000.0 });
        assert_eq!(variation_section(&off).cost, 100000.0);
    }
}
