//! Client records and their pricing templates.
//!
//! Clients are owned by the external API; the builder only reads their
//! templates when a quote is created or its client is switched.

use crate::config::{PricingDefaults, PricingParameter};
use crate::parser::{deserialize_optional_text, Amount};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-client override of the pricing defaults. `None` means "use the
/// default for this field".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientPricingTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal_wastage: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal_markup: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cad_base_rate: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cad_rendering_cost: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cad_technical_cost: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cad_markup: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_base_rate: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_markup: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stone_markup: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finishing_cost: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plating_cost: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finishing_markup: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings_markup: Option<Amount>,
}

impl ClientPricingTemplate {
    /// Decode a template as stored on the client record: either a JSON
    /// object or a JSON-encoded string. Anything unparseable is the empty
    /// template.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::from_object(value),
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(parsed @ Value::Object(_)) => Self::from_object(&parsed),
                Ok(_) => {
                    tracing::warn!("Pricing template string is not an object, ignoring");
                    Self::default()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse pricing template: {}", e);
                    Self::default()
                }
            },
            Value::Null => Self::default(),
            other => {
                tracing::warn!("Unexpected pricing template type: {}", other);
                Self::default()
            }
        }
    }

    fn from_object(value: &Value) -> Self {
        // Every field is lenient, so an object always decodes.
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// The template's override for one parameter, if set.
    pub fn value_for(&self, parameter: PricingParameter) -> Option<Amount> {
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

    /// Template value if present, otherwise the default.
    pub fn resolve(&self, parameter: PricingParameter, defaults: &PricingDefaults) -> Amount {
        self.value_for(parameter)
            .unwrap_or_else(|| defaults.value_for(parameter))
    }

    pub fn is_empty(&self) -> bool {
        PricingParameter::ALL
            .into_iter()
            .all(|p| self.value_for(p).is_none())
    }
}

/// A client as returned by the external API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub id: Option<String>,
    #[serde(
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Raw template as stored: object, JSON string, or null.
    pub pricing_template: Value,
}

impl Client {
    pub fn template(&self) -> ClientPricingTemplate {
        ClientPricingTemplate::from_value(&self.pricing_template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_object() {
        let template = ClientPricingTemplate::from_value(&json!({
            "metal_markup": 35,
            "cad_base_rate": "900",
            "stone_markup": null,
        }));
        assert_eq!(template.metal_markup, Some(Amount::new(35.0)));
        assert_eq!(template.cad_base_rate, Some(Amount::new(900.0)));
        assert_eq!(template.stone_markup, None);
        assert_eq!(template.findings_markup, None);
    }

    #[test]
    fn test_from_encoded_string() {
        let template =
            ClientPricingTemplate::from_value(&json!(r#"{"finishing_markup": 12.5}"#));
        assert_eq!(template.finishing_markup, Some(Amount::new(12.5)));
    }

    #[test]
    fn test_unparseable_string_is_empty() {
        assert!(ClientPricingTemplate::from_value(&json!("{not json")).is_empty());
        assert!(ClientPricingTemplate::from_value(&json!("[1, 2]")).is_empty());
        assert!(ClientPricingTemplate::from_value(&json!(17)).is_empty());
        assert!(ClientPricingTemplate::from_value(&Value::Null).is_empty());
    }

    #[test]
    fn test_resolve_falls_back_to_defaults() {
        let defaults = PricingDefaults::default();
        let template = ClientPricingTemplate {
            metal_markup: Some(Amount::new(50.0)),
            ..Default::default()
        };
        assert_eq!(
            template.resolve(PricingParameter::MetalMarkup, &defaults).get(),
            50.0
        );
        assert_eq!(
            template.resolve(PricingParameter::CadMarkup, &defaults),
            defaults.cad_markup
        );
    }

    #[test]
    fn test_non_numeric_template_value_is_present_but_zero() {
        let template = ClientPricingTemplate::from_value(&json!({"plating_cost": "n/a"}));
        assert_eq!(template.plating_cost, Some(Amount::ZERO));
    }

    #[test]
    fn test_client_record() {
        let client: Client = serde_json::from_value(json!({
            "id": 7,
            "name": "Atelier Noor",
            "pricing_template": "{\"metal_wastage\": 6}",
        }))
        .unwrap();
        assert_eq!(client.id.as_deref(), Some("7"));
        assert_eq!(client.template().metal_wastage, Some(Amount::new(6.0)));
    }
}
