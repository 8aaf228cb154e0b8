//! Pricing defaults and numeric tolerances.
//!
//! The defaults are the fallback for every pricing parameter when the
//! selected client has no pricing template, or the template leaves a field
//! unset.

use crate::error::Result;
use crate::parser::{read_json_text, Amount};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Default metal wastage (%).
pub const DEFAULT_METAL_WASTAGE: f64 = 10.0;

/// Default metal markup (%).
pub const DEFAULT_METAL_MARKUP: f64 = 20.0;

/// Default CAD hourly rate.
pub const DEFAULT_CAD_BASE_RATE: f64 = 850.0;

/// Default flat rendering cost added to CAD.
pub const DEFAULT_CAD_RENDERING_COST: f64 = 500.0;

/// Default flat technical-drawing cost added to CAD.
pub const DEFAULT_CAD_TECHNICAL_COST: f64 = 300.0;

/// Default CAD markup (%).
pub const DEFAULT_CAD_MARKUP: f64 = 25.0;

/// Default manufacturing hourly rate.
pub const DEFAULT_MANUFACTURING_BASE_RATE: f64 = 650.0;

/// Default manufacturing markup (%).
pub const DEFAULT_MANUFACTURING_MARKUP: f64 = 25.0;

/// Default stone markup (%), applied to the summed stone cost.
pub const DEFAULT_STONE_MARKUP: f64 = 20.0;

/// Default flat finishing cost.
pub const DEFAULT_FINISHING_COST: f64 = 400.0;

/// Default flat plating cost.
pub const DEFAULT_PLATING_COST: f64 = 250.0;

/// Default finishing markup (%).
pub const DEFAULT_FINISHING_MARKUP: f64 = 25.0;

/// Default findings markup (%), applied to the summed findings cost.
pub const DEFAULT_FINDINGS_MARKUP: f64 = 20.0;

/// The pricing parameters a client template can override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingParameter {
    MetalWastage,
    MetalMarkup,
    CadBaseRate,
    CadRenderingCost,
    CadTechnicalCost,
    CadMarkup,
    ManufacturingBaseRate,
    ManufacturingMarkup,
    StoneMarkup,
    FinishingCost,
    PlatingCost,
    FinishingMarkup,
    FindingsMarkup,
}

impl PricingParameter {
    pub const ALL: [PricingParameter; 13] = [
        PricingParameter::MetalWastage,
        PricingParameter::MetalMarkup,
        PricingParameter::CadBaseRate,
        PricingParameter::CadRenderingCost,
        PricingParameter::CadTechnicalCost,
        PricingParameter::CadMarkup,
        PricingParameter::ManufacturingBaseRate,
        PricingParameter::ManufacturingMarkup,
        PricingParameter::StoneMarkup,
        PricingParameter::FinishingCost,
        PricingParameter::PlatingCost,
        PricingParameter::FinishingMarkup,
        PricingParameter::FindingsMarkup,
    ];

    /// Field name as it appears in quote and template JSON.
    pub fn field_name(&self) -> &'static str {
        match self {
            PricingParameter::MetalWastage => "metal_wastage",
            PricingParameter::MetalMarkup => "metal_markup",
            PricingParameter::CadBaseRate => "cad_base_rate",
            PricingParameter::CadRenderingCost => "cad_rendering_cost",
            PricingParameter::CadTechnicalCost => "cad_technical_cost",
            PricingParameter::CadMarkup => "cad_markup",
            PricingParameter::ManufacturingBaseRate => "manufacturing_base_rate",
            PricingParameter::ManufacturingMarkup => "manufacturing_markup",
            PricingParameter::StoneMarkup => "stone_markup",
            PricingParameter::FinishingCost => "finishing_cost",
            PricingParameter::PlatingCost => "plating_cost",
            PricingParameter::FinishingMarkup => "finishing_markup",
            PricingParameter::FindingsMarkup => "findings_markup",
        }
    }
}

impl std::fmt::Display for PricingParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// Fallback pricing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingDefaults {
    pub metal_wastage: Amount,
    pub metal_markup: Amount,
    pub cad_base_rate: Amount,
    pub cad_rendering_cost: Amount,
    pub cad_technical_cost: Amount,
    pub cad_markup: Amount,
    pub manufacturing_base_rate: Amount,
    pub manufacturing_markup: Amount,
    pub stone_markup: Amount,
    pub finishing_cost: Amount,
    pub plating_cost: Amount,
    pub finishing_markup: Amount,
    pub findings_markup: Amount,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        Self {
            metal_wastage: Amount::new(DEFAULT_METAL_WASTAGE),
            metal_markup: Amount::new(DEFAULT_METAL_MARKUP),
            cad_base_rate: Amount::new(DEFAULT_CAD_BASE_RATE),
            cad_rendering_cost: Amount::new(DEFAULT_CAD_RENDERING_COST),
            cad_technical_cost: Amount::new(DEFAULT_CAD_TECHNICAL_COST),
            cad_markup: Amount::new(DEFAULT_CAD_MARKUP),
            manufacturing_base_rate: Amount::new(DEFAULT_MANUFACTURING_BASE_RATE),
            manufacturing_markup: Amount::new(DEFAULT_MANUFACTURING_MARKUP),
            stone_markup: Amount::new(DEFAULT_STONE_MARKUP),
            finishing_cost: Amount::new(DEFAULT_FINISHING_COST),
            plating_cost: Amount::new(DEFAULT_PLATING_COST),
            finishing_markup: Amount::new(DEFAULT_FINISHING_MARKUP),
            findings_markup: Amount::new(DEFAULT_FINDINGS_MARKUP),
        }
    }
}

impl PricingDefaults {
    /// Load an override table. Keys left out keep the built-in value.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = read_json_text(path)?;
        let defaults: PricingDefaults = serde_json::from_str(&content)?;
        tracing::debug!("Loaded pricing defaults from {}", path.display());
        Ok(defaults)
    }

    /// Look up the fallback for one parameter.
    pub fn value_for(&self, parameter: PricingParameter) -> Amount {
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
}

/// Tolerant comparison for money figures that went through a markup.
pub mod float_cmp {
    use super::EPS;

    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;
    use std::io::Write;

    #[test]
    fn test_defaults_cover_every_parameter() {
        let defaults = PricingDefaults::default();
        assert_eq!(defaults.value_for(PricingParameter::CadBaseRate).get(), 850.0);
        assert_eq!(
            defaults.value_for(PricingParameter::MetalWastage).get(),
            DEFAULT_METAL_WASTAGE
        );
        for parameter in PricingParameter::ALL {
            assert!(defaults.value_for(parameter).get() > 0.0, "{}", parameter);
        }
    }

    #[test]
    fn test_field_names_match_serde() {
        for parameter in PricingParameter::ALL {
            let json = serde_json::to_value(parameter).unwrap();
            assert_eq!(json.as_str(), Some(parameter.field_name()));
        }
    }

    #[test]
    fn test_partial_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"metal_markup": "35", "stone_markup": 40}}"#).unwrap();

        let defaults = PricingDefaults::from_json_file(file.path()).unwrap();
        assert_eq!(defaults.metal_markup.get(), 35.0);
        assert_eq!(defaults.stone_markup.get(), 40.0);
        assert_eq!(defaults.cad_base_rate.get(), DEFAULT_CAD_BASE_RATE);
    }

    #[test]
    fn test_missing_override_file() {
        let err = PricingDefaults::from_json_file(Path::new("/nonexistent/defaults.json"))
            .unwrap_err();
        assert!(matches!(err, QuoteError::FileNotFound { .. }));
    }

    #[test]
    fn test_float_cmp() {
        assert!(float_cmp::approx_eq(1.0, 1.00001));
        assert!(!float_cmp::approx_eq(1.0, 1.001));
    }
}
