//! The quote record: one manufacturing cost estimate.

use crate::config::{PricingDefaults, PricingParameter};
use crate::parser::{
    deserialize_lenient_list, deserialize_optional_text, deserialize_toggle, text_from_value,
    Amount,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::line_item::{FindingLine, StoneLine};

/// Quote input. Every field is optional and defaults to zero/empty, since
/// the set of fields present depends on which builder tabs were visited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    // Identity
    #[serde(
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_id: Option<String>,
    #[serde(
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub piece_category: Option<String>,
    #[serde(
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub brief_id: Option<String>,

    // Metal
    #[serde(
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub metal_type: Option<String>,
    /// Grams.
    pub metal_weight: Amount,
    /// Currency per gram.
    pub metal_spot_price: Amount,
    pub metal_wastage: Amount,
    pub metal_markup: Amount,

    // CAD
    pub cad_hours: Amount,
    pub cad_base_rate: Amount,
    pub cad_rendering_cost: Amount,
    pub cad_technical_cost: Amount,
    pub cad_markup: Amount,
    #[serde(
        deserialize_with = "deserialize_toggle",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_rendering_cost: Option<bool>,
    #[serde(
        deserialize_with = "deserialize_toggle",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_technical_cost: Option<bool>,

    // Manufacturing
    pub manufacturing_hours: Amount,
    pub manufacturing_base_rate: Amount,
    pub manufacturing_markup: Amount,

    // Stones
    #[serde(deserialize_with = "deserialize_lenient_list")]
    pub stone_categories: Vec<StoneLine>,
    pub stone_markup: Amount,

    // Finishing
    pub finishing_cost: Amount,
    pub plating_cost: Amount,
    pub finishing_markup: Amount,
    #[serde(
        deserialize_with = "deserialize_toggle",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_plating_cost: Option<bool>,

    // Findings
    #[serde(deserialize_with = "deserialize_lenient_list")]
    pub findings: Vec<FindingLine>,
    pub findings_markup: Amount,
}

/// A single editable scalar field of a [`Quote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteField {
    ClientId,
    PieceCategory,
    BriefId,
    MetalType,
    MetalWeight,
    MetalSpotPrice,
    CadHours,
    ManufacturingHours,
    IncludeRenderingCost,
    IncludeTechnicalCost,
    IncludePlatingCost,
    Pricing(PricingParameter),
}

impl QuoteField {
    /// Resolve a JSON field name.
    pub fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "client_id" => QuoteField::ClientId,
            "piece_category" => QuoteField::PieceCategory,
            "brief_id" => QuoteField::BriefId,
            "metal_type" => QuoteField::MetalType,
            "metal_weight" => QuoteField::MetalWeight,
            "metal_spot_price" => QuoteField::MetalSpotPrice,
            "cad_hours" => QuoteField::CadHours,
            "manufacturing_hours" => QuoteField::ManufacturingHours,
            "include_rendering_cost" => QuoteField::IncludeRenderingCost,
            "include_technical_cost" => QuoteField::IncludeTechnicalCost,
            "include_plating_cost" => QuoteField::IncludePlatingCost,
            other => {
                return PricingParameter::ALL
                    .into_iter()
                    .find(|p| p.field_name() == other)
                    .map(QuoteField::Pricing)
            }
        };
        Some(field)
    }
}

impl Quote {
    /// A blank quote with every pricing parameter taken from `defaults`.
    pub fn with_defaults(defaults: &PricingDefaults) -> Self {
        let mut quote = Quote::default();
        for parameter in PricingParameter::ALL {
            quote.set_pricing_parameter(parameter, defaults.value_for(parameter));
        }
        quote
    }

    pub fn pricing_parameter(&self, parameter: PricingParameter) -> Amount {
        match parameter {
            PricingParameter::MetalWastage => self.metal_wastage,
            PricingParameter::MetalMarkup => self.metal_markup,
            PricingParameter::CadBaseRate => self.cad_base_rate,
            PricingParameter::CadRenderingCost => self.cad_rendering_cost,
            PricingParameter::CadTechnicalCost => self.cad_technical_cost,
            PricingParameter::CadMarkup => self.cad_markup,
            PricingParameter::ManufacturingBaseRate => self.manufacturing_base_rate,
            PricingParameter::ManufacturingMarkup => self.manufacturing_markup,
            PricingParameter::StoneMarkup => self.stone_markup,
            PricingParameter::FinishingCost => self.finishing_cost,
            PricingParameter::PlatingCost => self.plating_cost,
            PricingParameter::FinishingMarkup => self.finishing_markup,
            PricingParameter::FindingsMarkup => self.findings_markup,
        }
    }

    pub fn set_pricing_parameter(&mut self, parameter: PricingParameter, value: Amount) {
        let slot = match parameter {
            PricingParameter::MetalWastage => &mut self.metal_wastage,
            PricingParameter::MetalMarkup => &mut self.metal_markup,
            PricingParameter::CadBaseRate => &mut self.cad_base_rate,
            PricingParameter::CadRenderingCost => &mut self.cad_rendering_cost,
            PricingParameter::CadTechnicalCost => &mut self.cad_technical_cost,
            PricingParameter::CadMarkup => &mut self.cad_markup,
            PricingParameter::ManufacturingBaseRate => &mut self.manufacturing_base_rate,
            PricingParameter::ManufacturingMarkup => &mut self.manufacturing_markup,
            PricingParameter::StoneMarkup => &mut self.stone_markup,
            PricingParameter::FinishingCost => &mut self.finishing_cost,
            PricingParameter::PlatingCost => &mut self.plating_cost,
            PricingParameter::FinishingMarkup => &mut self.finishing_markup,
            PricingParameter::FindingsMarkup => &mut self.findings_markup,
        };
        *slot = value;
    }

    /// Apply a single form edit, coercing the raw value.
    pub fn set(&mut self, field: QuoteField, value: &Value) {
        match field {
            QuoteField::ClientId => self.client_id = text_from_value(value),
            QuoteField::PieceCategory => self.piece_category = text_from_value(value),
            QuoteField::BriefId => self.brief_id = text_from_value(value),
            QuoteField::MetalType => self.metal_type = text_from_value(value),
            QuoteField::MetalWeight => self.metal_weight = Amount::from_value(value),
            QuoteField::MetalSpotPrice => self.metal_spot_price = Amount::from_value(value),
            QuoteField::CadHours => self.cad_hours = Amount::from_value(value),
            QuoteField::ManufacturingHours => {
                self.manufacturing_hours = Amount::from_value(value)
            }
            QuoteField::IncludeRenderingCost => self.include_rendering_cost = value.as_bool(),
            QuoteField::IncludeTechnicalCost => self.include_technical_cost = value.as_bool(),
            QuoteField::IncludePlatingCost => self.include_plating_cost = value.as_bool(),
            QuoteField::Pricing(parameter) => {
                self.set_pricing_parameter(parameter, Amount::from_value(value))
            }
        }
    }
}
