//! Plain-text and JSON quote summaries.
//!
//! Figures are rounded to two decimals here for display only; the
//! calculation itself is never rounded.

use crate::calculation::{QuoteCalculation, SectionKind, VariationBreakdown};
use crate::error::Result;
use crate::model::QuoteDocument;
use std::fmt::Write;

/// Width of the label column.
const LABEL_WIDTH: usize = 16;

/// Width of each figure column.
const FIGURE_WIDTH: usize = 14;

/// Render a fixed-width summary table.
pub fn generate_summary(
    document: &QuoteDocument,
    calculation: &QuoteCalculation,
    variations: &[VariationBreakdown],
) -> Result<String> {
    let mut output = String::new();

    write_header(&mut output, document)?;
    write_sections(&mut output, document, calculation, variations)?;
    write_totals(&mut output, calculation)?;

    Ok(output)
}

/// Render the calculation as pretty JSON.
pub fn generate_json(calculation: &QuoteCalculation) -> Result<String> {
    Ok(serde_json::to_string_pretty(calculation)?)
}

fn write_header(output: &mut String, document: &QuoteDocument) -> std::fmt::Result {
    let quote = &document.quote;
    let fields = [
        ("Quote", document.id.clone()),
        ("Status", document.status.map(|s| s.to_string())),
        ("Client", quote.client_id.clone()),
        ("Piece", quote.piece_category.clone()),
        ("Brief", quote.brief_id.clone()),
        ("Metal", quote.metal_type.clone()),
    ];

    let mut wrote_any = false;
    for (label, value) in fields {
        if let Some(value) = value {
            writeln!(output, "{}: {}", label, value)?;
            wrote_any = true;
        }
    }
    if wrote_any {
        writeln!(output)?;
    }
    Ok(())
}

fn write_sections(
    output: &mut String,
    document: &QuoteDocument,
    calculation: &QuoteCalculation,
    variations: &[VariationBreakdown],
) -> std::fmt::Result {
    writeln!(
        output,
        "{:<lw$}{:>fw$}{:>fw$}",
        "Section",
        "Cost",
        "Price",
        lw = LABEL_WIDTH,
        fw = FIGURE_WIDTH
    )?;
    writeln!(output, "{}", "-".repeat(LABEL_WIDTH + 2 * FIGURE_WIDTH))?;

    let show_variations = document.collection_mode && !variations.is_empty();

    for (kind, section) in calculation.sections.iter() {
        write_row(output, kind.label(), section.cost, section.price)?;

        if kind == SectionKind::Metal && show_variations {
            for variation in variations {
                write_variation_row(output, variation)?;
            }
        }
    }

    writeln!(output, "{}", "-".repeat(LABEL_WIDTH + 2 * FIGURE_WIDTH))
}

fn write_row(output: &mut String, label: &str, cost: f64, price: f64) -> std::fmt::Result {
    writeln!(
        output,
        "{:<lw$}{:>fw$.2}{:>fw$.2}",
        label,
        cost,
        price,
        lw = LABEL_WIDTH,
        fw = FIGURE_WIDTH
    )
}

fn write_variation_row(output: &mut String, variation: &VariationBreakdown) -> std::fmt::Result {
    let name: String = if variation.name.is_empty() {
        variation.id.clone()
    } else {
        variation.name.chars().take(LABEL_WIDTH - 2).collect()
    };

    if variation.enabled {
        writeln!(
            output,
            "  {:<lw$}{:>fw$.2}{:>fw$.2}",
            name,
            variation.cost,
            variation.price,
            lw = LABEL_WIDTH - 2,
            fw = FIGURE_WIDTH
        )
    } else {
        writeln!(
            output,
            "  {:<lw$}{:>w$}",
            name,
            "disabled",
            lw = LABEL_WIDTH - 2,
            w = 2 * FIGURE_WIDTH
        )
    }
}

fn write_totals(output: &mut String, calculation: &QuoteCalculation) -> std::fmt::Result {
    let totals = &calculation.totals;
    let rows = [
        ("Subtotal cost", totals.subtotal_cost),
        ("Total price", totals.total_price),
        ("Profit", totals.profit),
    ];

    for (label, value) in rows {
        writeln!(
            output,
            "{:<lw$}{:>fw$.2}",
            label,
            value,
            lw = LABEL_WIDTH,
            fw = FIGURE_WIDTH
        )?;
    }

    writeln!(
        output,
        "{:<lw$}{:>fw$.2}%",
        "Margin",
        totals.margin,
        lw = LABEL_WIDTH,
        fw = FIGURE_WIDTH - 1
    )
}
