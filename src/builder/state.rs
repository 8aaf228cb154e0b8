//! Quote-builder session state.
//!
//! The builder owns the quote being edited, the collection-mode flag and
//! the variations, and recomputes the calculation after every edit.

use crate::calculation::{
    calculate_quote, variation_breakdowns, QuoteCalculation, VariationBreakdown,
};
use crate::config::PricingDefaults;
use crate::error::{QuoteError, Result};
use crate::model::{
    Client, ClientPricingTemplate, FindingField, FindingLine, Quote, QuoteDocument, QuoteField,
    QuoteStatus, SaveQuoteRequest, StoneField, StoneLine, VariationField, VariationList,
};
use crate::parser::text_from_value;
use crate::validation::{validate_for_status, ValidationResult};
use serde_json::Value;

use super::inheritance::apply_client_template;

/// Editing session for one quote.
#[derive(Debug, Clone)]
pub struct QuoteBuilder {
    id: Option<String>,
    status: Option<QuoteStatus>,
    quote: Quote,
    collection_mode: bool,
    variations: VariationList,
    defaults: PricingDefaults,
    clients: Vec<Client>,
    /// Set when the quote came from a saved record; disables template
    /// inheritance for the whole session.
    loaded: bool,
}

impl QuoteBuilder {
    /// Start a new quote seeded from the pricing defaults.
    pub fn new(defaults: PricingDefaults) -> Self {
        Self {
            id: None,
            status: None,
            quote: Quote::with_defaults(&defaults),
            collection_mode: false,
            variations: VariationList::new(),
            defaults,
            clients: Vec::new(),
            loaded: false,
        }
    }

    /// Open a previously saved quote. Its values are used as-is.
    pub fn load(document: QuoteDocument, defaults: PricingDefaults) -> Self {
        tracing::debug!(id = ?document.id, "Loading saved quote");
        Self {
            id: document.id,
            status: document.status,
            quote: document.quote,
            collection_mode: document.collection_mode,
            variations: VariationList::from_variations(document.variations),
            defaults,
            clients: Vec::new(),
            loaded: true,
        }
    }

    /// Open a document: saved ones load, unsaved ones start a new quote
    /// carrying the document's fields.
    ///
    /// A new document that already names a client gets its pricing
    /// parameters from the defaults, as if the client had been selected
    /// without a template. Without a client the values are kept as typed.
    pub fn from_document(document: QuoteDocument, defaults: PricingDefaults) -> Self {
        if document.is_persisted() {
            return Self::load(document, defaults);
        }
        let mut quote = document.quote;
        if quote.client_id.is_some() {
            apply_client_template(&mut quote, None, &defaults);
        }
        Self {
            id: None,
            status: document.status,
            quote,
            collection_mode: document.collection_mode,
            variations: VariationList::from_variations(document.variations),
            defaults,
            clients: Vec::new(),
            loaded: false,
        }
    }

    /// Provide the client list used to resolve templates on client changes.
    pub fn with_clients(mut self, clients: Vec<Client>) -> Self {
        self.clients = clients;
        self
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn variations(&self) -> &VariationList {
        &self.variations
    }

    pub fn collection_mode(&self) -> bool {
        self.collection_mode
    }

    pub fn defaults(&self) -> &PricingDefaults {
        &self.defaults
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Recompute sections and totals from the current state.
    pub fn calculation(&self) -> QuoteCalculation {
        calculate_quote(&self.quote, self.collection_mode, self.variations.as_slice())
    }

    pub fn variation_breakdowns(&self) -> Vec<VariationBreakdown> {
        variation_breakdowns(self.variations.as_slice())
    }

    // ==================== Client selection ====================

    /// Select a client from the known client list.
    pub fn select_client(&mut self, client_id: Option<&str>) -> QuoteCalculation {
        let template = client_id
            .and_then(|id| self.clients.iter().find(|c| c.id.as_deref() == Some(id)))
            .map(Client::template);
        self.select_client_with_template(client_id, template.as_ref())
    }

    /// Select a client record directly.
    pub fn select_client_record(&mut self, client: &Client) -> QuoteCalculation {
        let template = client.template();
        self.select_client_with_template(client.id.as_deref(), Some(&template))
    }

    /// Set the client and, for a new quote, re-seed every pricing parameter
    /// from the template (falling back to defaults). Manual edits to those
    /// parameters are overwritten on every switch.
    pub fn select_client_with_template(
        &mut self,
        client_id: Option<&str>,
        template: Option<&ClientPricingTemplate>,
    ) -> QuoteCalculation {
        let client_id = client_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        self.quote.client_id = client_id;

        if self.quote.client_id.is_none() {
            tracing::debug!("Client cleared");
        } else if self.loaded {
            tracing::debug!(
                client_id = ?self.quote.client_id,
                "Saved quote keeps its pricing on client change"
            );
        } else {
            apply_client_template(&mut self.quote, template, &self.defaults);
        }

        self.calculation()
    }

    // ==================== Field edits ====================

    /// Apply one form edit and recompute.
    pub fn set_field(&mut self, field: QuoteField, value: Value) -> QuoteCalculation {
        if field == QuoteField::ClientId {
            let client_id = text_from_value(&value);
            return self.select_client(client_id.as_deref());
        }

        tracing::debug!(?field, %value, "Quote field edited");
        self.quote.set(field, &value);
        self.calculation()
    }

    pub fn add_stone_line(&mut self) -> usize {
        self.quote.stone_categories.push(StoneLine::default());
        self.quote.stone_categories.len() - 1
    }

    pub fn update_stone_line(
        &mut self,
        index: usize,
        field: StoneField,
        value: Value,
    ) -> Result<QuoteCalculation> {
        let len = self.quote.stone_categories.len();
        let line = self
            .quote
            .stone_categories
            .get_mut(index)
            .ok_or(QuoteError::LineNotFound {
                kind: "stone",
                index,
                len,
            })?;
        line.set(field, &value);
        Ok(self.calculation())
    }

    pub fn remove_stone_line(&mut self, index: usize) -> Result<StoneLine> {
        let len = self.quote.stone_categories.len();
        if index >= len {
            return Err(QuoteError::LineNotFound {
                kind: "stone",
                index,
                len,
            });
        }
        Ok(self.quote.stone_categories.remove(index))
    }

    pub fn add_finding_line(&mut self) -> usize {
        self.quote.findings.push(FindingLine::default());
        self.quote.findings.len() - 1
    }

    pub fn update_finding_line(
        &mut self,
        index: usize,
        field: FindingField,
        value: Value,
    ) -> Result<QuoteCalculation> {
        let len = self.quote.findings.len();
        let line = self
            .quote
            .findings
            .get_mut(index)
            .ok_or(QuoteError::LineNotFound {
                kind: "finding",
                index,
                len,
            })?;
        line.set(field, &value);
        Ok(self.calculation())
    }

    pub fn remove_finding_line(&mut self, index: usize) -> Result<FindingLine> {
        let len = self.quote.findings.len();
        if index >= len {
            return Err(QuoteError::LineNotFound {
                kind: "finding",
                index,
                len,
            });
        }
        Ok(self.quote.findings.remove(index))
    }

    // ==================== Collection mode ====================

    pub fn set_collection_mode(&mut self, enabled: bool) -> QuoteCalculation {
        tracing::debug!(enabled, "Collection mode toggled");
        self.collection_mode = enabled;
        self.calculation()
    }

    /// Add a variation and return its id.
    pub fn add_variation(&mut self, name: Option<&str>) -> String {
        self.variations.add(name, &self.quote).id.clone()
    }

    pub fn update_variation(
        &mut self,
        id: &str,
        field: VariationField,
        value: Value,
    ) -> Result<QuoteCalculation> {
        self.variations.update(id, field, &value)?;
        Ok(self.calculation())
    }

    pub fn set_variation_enabled(&mut self, id: &str, enabled: bool) -> Result<QuoteCalculation> {
        self.variations.set_enabled(id, enabled)?;
        Ok(self.calculation())
    }

    pub fn remove_variation(&mut self, id: &str) -> Result<QuoteCalculation> {
        let removed = self.variations.remove(id)?;
        tracing::debug!(id = %removed.id, "Removed variation");
        Ok(self.calculation())
    }

    // ==================== Save ====================

    /// Check the quote against the rules for `status`.
    pub fn validate(&self, status: QuoteStatus) -> ValidationResult {
        validate_for_status(
            &self.quote,
            self.collection_mode,
            self.variations.as_slice(),
            &self.calculation(),
            status,
        )
    }

    /// Build the save payload after validating for `status`.
    pub fn save_request(&self, status: QuoteStatus) -> Result<SaveQuoteRequest> {
        let validation = self.validate(status).into_result()?;
        for warning in &validation.warnings {
            tracing::warn!("{}", warning);
        }

        Ok(SaveQuoteRequest {
            status,
            collection_mode: self.collection_mode,
            variations: self.variations.to_vec(),
            quote: self.quote.clone(),
        })
    }

    /// Snapshot the session as a document.
    pub fn to_document(&self) -> QuoteDocument {
        QuoteDocument {
            id: self.id.clone(),
            status: self.status,
            collection_mode: self.collection_mode,
            variations: self.variations.to_vec(),
            quote: self.quote.clone(),
        }
    }
}

impl Default for QuoteBuilder {
    fn default() -> Self {
        Self::new(PricingDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;
    use crate::config::PricingParameter;
    use crate::parser::Amount;
    use serde_json::json;

    fn clients() -> Vec<Client> {
        vec![
            Client {
                id: Some("c-1".into()),
                name: Some("Maison Aurel".into()),
                pricing_template: json!({"metal_markup": 40, "cad_base_rate": 1000}),
            },
            Client {
                id: Some("c-2".into()),
                name: Some("Walk-in".into()),
                pricing_template: Value::Null,
            },
        ]
    }

    #[test]
    fn test_new_quote_starts_from_defaults() {
        let builder = QuoteBuilder::default();
        let d = PricingDefaults::default();
        assert!(!builder.is_loaded());
        assert_eq!(builder.quote().metal_markup, d.metal_markup);

        // Only the flat CAD and finishing costs are non-zero on a blank quote.
        let cad = (d.cad_rendering_cost.get() + d.cad_technical_cost.get())
            * (1.0 + d.cad_markup.get() / 100.0);
        let finishing = (d.finishing_cost.get() + d.plating_cost.get())
            * (1.0 + d.finishing_markup.get() / 100.0);
        assert_eq!(builder.calculation().totals.total_price, cad + finishing);
    }

    #[test]
    fn test_select_client_applies_template() {
        let mut builder = QuoteBuilder::default().with_clients(clients());
        builder.select_client(Some("c-1"));
        assert_eq!(builder.quote().client_id.as_deref(), Some("c-1"));
        assert_eq!(builder.quote().metal_markup.get(), 40.0);
        assert_eq!(builder.quote().cad_base_rate.get(), 1000.0);
        assert_eq!(
            builder.quote().stone_markup,
            PricingDefaults::default().stone_markup
        );
    }

    #[test]
    fn test_client_switch_overwrites_manual_edits() {
        let mut builder = QuoteBuilder::default().with_clients(clients());
        builder.select_client(Some("c-1"));
        builder.set_field(
            QuoteField::Pricing(PricingParameter::MetalMarkup),
            json!("75"),
        );
        builder.set_field(QuoteField::MetalWeight, json!("9"));
        assert_eq!(builder.quote().metal_markup.get(), 75.0);

        builder.set_field(QuoteField::ClientId, json!("c-2"));
        assert_eq!(
            builder.quote().metal_markup,
            PricingDefaults::default().metal_markup
        );
        assert_eq!(builder.quote().metal_weight.get(), 9.0);

        // Re-selecting the same client also re-applies.
        builder.set_field(
            QuoteField::Pricing(PricingParameter::MetalMarkup),
            json!(75),
        );
        builder.select_client(Some("c-2"));
        assert_eq!(
            builder.quote().metal_markup,
            PricingDefaults::default().metal_markup
        );
    }

    #[test]
    fn test_unknown_client_falls_back_to_defaults() {
        let mut builder = QuoteBuilder::default();
        builder.set_field(QuoteField::Pricing(PricingParameter::CadMarkup), json!(5));
        builder.select_client(Some("c-404"));
        assert_eq!(builder.quote().client_id.as_deref(), Some("c-404"));
        assert_eq!(builder.quote().cad_markup, PricingDefaults::default().cad_markup);
    }

    #[test]
    fn test_clearing_client_keeps_pricing() {
        let mut builder = QuoteBuilder::default().with_clients(clients());
        builder.select_client(Some("c-1"));
        builder.select_client(None);
        assert!(builder.quote().client_id.is_none());
        assert_eq!(builder.quote().metal_markup.get(), 40.0);
    }

    #[test]
    fn test_loaded_quote_ignores_templates() {
        let document = QuoteDocument {
            id: Some("q-1".into()),
            quote: Quote {
                metal_markup: Amount::new(12.0),
                client_id: Some("c-2".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut builder =
            QuoteBuilder::load(document, PricingDefaults::default()).with_clients(clients());
        builder.select_client(Some("c-1"));
        assert_eq!(builder.quote().client_id.as_deref(), Some("c-1"));
        assert_eq!(builder.quote().metal_markup.get(), 12.0);
        assert!(builder.quote().cad_base_rate.is_zero());
    }

    #[test]
    fn test_variation_flow() {
        let mut builder = QuoteBuilder::default();
        builder.set_field(QuoteField::Pricing(PricingParameter::MetalWastage), json!(0));
        builder.set_field(QuoteField::Pricing(PricingParameter::MetalMarkup), json!(0));
        builder.set_field(QuoteField::MetalWeight, json!(50));
        builder.set_field(QuoteField::MetalSpotPrice, json!(1000));
        builder.set_collection_mode(true);

        // Collection mode with no variations still prices the standard metal.
        assert_eq!(builder.calculation().sections.metal.cost, 50000.0);

        let a = builder.add_variation(Some("Yellow"));
        let b = builder.add_variation(None);
        builder
            .update_variation(&a, VariationField::MetalWeight, json!("5"))
            .unwrap();
        builder
            .update_variation(&a, VariationField::MetalSpotPrice, json!(1000))
            .unwrap();
        builder
            .update_variation(&b, VariationField::MetalWeight, json!(100))
            .unwrap();
        builder
            .update_variation(&b, VariationField::MetalSpotPrice, json!(1000))
            .unwrap();
        let calc = builder.set_variation_enabled(&b, false).unwrap();
        assert_eq!(calc.sections.metal.cost, 5000.0);
        assert_eq!(calc.sections.metal.price, 5000.0);
        assert_eq!(builder.variations().len(), 2);

        let calc = builder.remove_variation(&a).unwrap();
        assert_eq!(calc.sections.metal.cost, 0.0);
        assert!(builder.remove_variation(&a).is_err());
    }

    #[test]
    fn test_line_editing() {
        let mut builder = QuoteBuilder::default();
        builder.set_field(QuoteField::Pricing(PricingParameter::StoneMarkup), json!(50));
        let first = builder.add_stone_line();
        builder
            .update_stone_line(first, StoneField::Count, json!(2))
            .unwrap();
        builder
            .update_stone_line(first, StoneField::CostPerStone, json!("100"))
            .unwrap();
        builder
            .update_stone_line(first, StoneField::SettingCost, json!(50))
            .unwrap();
        let second = builder.add_stone_line();
        builder
            .update_stone_line(second, StoneField::Count, json!(1))
            .unwrap();
        let calc = builder
            .update_stone_line(second, StoneField::CostPerStone, json!(200))
            .unwrap();
        assert_eq!(calc.sections.stones.cost, 500.0);
        assert_eq!(calc.sections.stones.price, 750.0);

        builder.remove_stone_line(0).unwrap();
        assert_eq!(builder.calculation().sections.stones.cost, 200.0);

        let err = builder
            .update_stone_line(5, StoneField::Count, json!(1))
            .unwrap_err();
        assert!(matches!(err, QuoteError::LineNotFound { index: 5, len: 1, .. }));

        let idx = builder.add_finding_line();
        builder
            .update_finding_line(idx, FindingField::Count, json!(3))
            .unwrap();
        let calc = builder
            .update_finding_line(idx, FindingField::Cost, json!(10))
            .unwrap();
        assert_eq!(calc.sections.findings.cost, 30.0);
        assert!(builder.remove_finding_line(1).is_err());
        builder.remove_finding_line(0).unwrap();
        assert_eq!(builder.calculation().sections.findings.cost, 0.0);
    }

    #[test]
    fn test_save_request_requires_valid_quote() {
        let mut builder = QuoteBuilder::default().with_clients(clients());
        assert!(builder.save_request(QuoteStatus::Draft).is_ok());
        assert!(matches!(
            builder.save_request(QuoteStatus::Completed),
            Err(QuoteError::Validation { .. })
        ));

        builder.select_client(Some("c-1"));
        builder.set_field(QuoteField::MetalType, json!("18k Yellow Gold"));
        builder.set_field(QuoteField::MetalWeight, json!(4.5));
        builder.set_field(QuoteField::MetalSpotPrice, json!(6100));
        let request = builder.save_request(QuoteStatus::Completed).unwrap();
        assert_eq!(request.status, QuoteStatus::Completed);
        assert_eq!(request.quote.client_id.as_deref(), Some("c-1"));
    }

    #[test]
    fn test_new_document_with_client_takes_defaults() {
        let document = QuoteDocument::new(Quote {
            client_id: Some("c-1".into()),
            metal_weight: Amount::new(10.0),
            metal_spot_price: Amount::new(1000.0),
            metal_markup: Amount::new(50.0),
            ..Default::default()
        });
        let defaults = PricingDefaults::default();
        let builder = QuoteBuilder::from_document(document, defaults.clone());

        assert!(!builder.is_loaded());
        assert_eq!(builder.quote().metal_wastage, defaults.metal_wastage);
        assert_eq!(builder.quote().metal_markup, defaults.metal_markup);
        assert_eq!(builder.quote().metal_weight.get(), 10.0);
        assert!(approx_eq(builder.calculation().sections.metal.price, 13200.0));
    }

    #[test]
    fn test_new_document_without_client_keeps_values() {
        let document = QuoteDocument::new(Quote {
            metal_markup: Amount::new(50.0),
            ..Default::default()
        });
        let builder = QuoteBuilder::from_document(document, PricingDefaults::default());
        assert_eq!(builder.quote().metal_markup.get(), 50.0);
        assert!(builder.quote().cad_base_rate.is_zero());
    }

    #[test]
    fn test_to_document_round_trips_through_load() {
        let mut builder = QuoteBuilder::default();
        builder.set_collection_mode(true);
        builder.add_variation(Some("Rose"));
        let mut document = builder.to_document();
        document.id = Some("q-9".into());

        let reopened = QuoteBuilder::load(document, PricingDefaults::default());
        assert!(reopened.collection_mode());
        assert_eq!(reopened.variations().len(), 1);
        assert_eq!(reopened.calculation(), builder.calculation());
    }
}
