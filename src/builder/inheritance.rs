//! Client pricing-template inheritance.

use crate::config::{PricingDefaults, PricingParameter};
use crate::model::{ClientPricingTemplate, Quote};

/// Overwrite every pricing parameter of `quote` with the template's value,
/// or the default where the template is absent or leaves the field unset.
///
/// Non-pricing fields (weights, hours, line items) are left alone.
pub fn apply_client_template(
    quote: &mut Quote,
    template: Option<&ClientPricingTemplate>,
    defaults: &PricingDefaults,
) {
    let mut from_template = 0;
    for parameter in PricingParameter::ALL {
        let value = match template {
            Some(template) => {
                if template.value_for(parameter).is_some() {
                    from_template += 1;
                }
                template.resolve(parameter, defaults)
            }
            None => defaults.value_for(parameter),
        };
        quote.set_pricing_parameter(parameter, value);
    }

    tracing::debug!(
        client_id = quote.client_id.as_deref().unwrap_or(""),
        from_template,
        from_defaults = PricingParameter::ALL.len() - from_template,
        "Applied client pricing"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoneLine;
    use crate::parser::Amount;

    #[test]
    fn test_template_values_win() {
        let defaults = PricingDefaults::default();
        let template = ClientPricingTemplate {
            metal_markup: Some(Amount::new(45.0)),
            plating_cost: Some(Amount::new(0.0)),
            ..Default::default()
        };
        let mut quote = Quote::default();
        apply_client_template(&mut quote, Some(&template), &defaults);

        assert_eq!(quote.metal_markup.get(), 45.0);
        assert!(quote.plating_cost.is_zero());
        assert_eq!(quote.cad_base_rate, defaults.cad_base_rate);
        assert_eq!(quote.findings_markup, defaults.findings_markup);
    }

    #[test]
    fn test_no_template_uses_defaults() {
        let defaults = PricingDefaults::default();
        let mut quote = Quote {
            stone_markup: Amount::new(99.0),
            ..Default::default()
        };
        apply_client_template(&mut quote, None, &defaults);
        assert_eq!(quote, Quote::with_defaults(&defaults));
    }

    #[test]
    fn test_non_pricing_fields_untouched() {
        let defaults = PricingDefaults::default();
        let mut quote = Quote {
            metal_weight: Amount::new(7.0),
            cad_hours: Amount::new(4.0),
            manufacturing_hours: Amount::new(2.0),
            stone_categories: vec![StoneLine::new(3.0, 20.0, 5.0)],
            metal_type: Some("Platinum".into()),
            ..Default::default()
        };
        let before = quote.clone();
        apply_client_template(&mut quote, None, &defaults);

        assert_eq!(quote.metal_weight, before.metal_weight);
        assert_eq!(quote.cad_hours, before.cad_hours);
        assert_eq!(quote.manufacturing_hours, before.manufacturing_hours);
        assert_eq!(quote.stone_categories, before.stone_categories);
        assert_eq!(quote.metal_type, before.metal_type);
    }
}
