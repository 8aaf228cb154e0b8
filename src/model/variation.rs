//! Collection-mode metal variations.
//!
//! In collection mode the quote prices several alternate metal designs
//! instead of a single metal entry. Variations are identified by ids that
//! stay stable across edits and are never reused within a session.

use crate::error::{QuoteError, Result};
use crate::parser::{deserialize_flag, deserialize_optional_text, text_from_value, Amount};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::quote::Quote;

/// Prefix of generated variation ids.
const ID_PREFIX: &str = "var-";

/// One alternate metal design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variation {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub name: String,
    /// Only an explicit `true` counts; disabled variations stay in the list
    /// but price at zero.
    #[serde(deserialize_with = "deserialize_flag")]
    pub enabled: bool,
    #[serde(
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub metal_type: Option<String>,
    pub metal_weight: Amount,
    pub metal_spot_price: Amount,
    pub metal_wastage: Amount,
    pub metal_markup: Amount,
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(&value).unwrap_or_default())
}

/// Editable fields of a [`Variation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationField {
    Name,
    Enabled,
    MetalType,
    MetalWeight,
    MetalSpotPrice,
    MetalWastage,
    MetalMarkup,
}

impl Variation {
    pub fn set(&mut self, field: VariationField, value: &Value) {
        match field {
            VariationField::Name => self.name = text_from_value(value).unwrap_or_default(),
            VariationField::Enabled => self.enabled = *value == Value::Bool(true),
            VariationField::MetalType => self.metal_type = text_from_value(value),
            VariationField::MetalWeight => self.metal_weight = Amount::from_value(value),
            VariationField::MetalSpotPrice => self.metal_spot_price = Amount::from_value(value),
            VariationField::MetalWastage => self.metal_wastage = Amount::from_value(value),
            VariationField::MetalMarkup => self.metal_markup = Amount::from_value(value),
        }
    }
}

/// Ordered variations of one quote-builder session.
#[derive(Debug, Clone)]
pub struct VariationList {
    items: Vec<Variation>,
    next_seq: u64,
}

impl Default for VariationList {
    fn default() -> Self {
        Self::new()
    }
}

impl VariationList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_seq: 1,
        }
    }

    /// Adopt previously saved variations. Ids that are blank or duplicated
    /// get fresh ones; generated ids continue after the highest one seen.
    pub fn from_variations(variations: Vec<Variation>) -> Self {
        let highest = variations
            .iter()
            .filter_map(|v| v.id.strip_prefix(ID_PREFIX)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        let mut list = Self {
            items: Vec::with_capacity(variations.len()),
            next_seq: highest + 1,
        };

        for mut variation in variations {
            if variation.id.is_empty() || list.contains(&variation.id) {
                let fresh = list.allocate_id();
                tracing::debug!(old = %variation.id, new = %fresh, "Reassigned variation id");
                variation.id = fresh;
            }
            list.items.push(variation);
        }

        list
    }

    fn allocate_id(&mut self) -> String {
        loop {
            let id = format!("{}{}", ID_PREFIX, self.next_seq);
            self.next_seq += 1;
            if !self.contains(&id) {
                return id;
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|v| v.id == id)
    }

    /// Add a variation inheriting the parent's current wastage and markup.
    pub fn add(&mut self, name: Option<&str>, parent: &Quote) -> &Variation {
        let id = self.allocate_id();
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Variation {}", self.items.len() + 1));

        tracing::debug!(id = %id, name = %name, "Adding variation");

        self.items.push(Variation {
            id,
            name,
            enabled: true,
            metal_type: None,
            metal_weight: Amount::ZERO,
            metal_spot_price: Amount::ZERO,
            metal_wastage: parent.metal_wastage,
            metal_markup: parent.metal_markup,
        });
        &self.items[self.items.len() - 1]
    }

    pub fn get(&self, id: &str) -> Option<&Variation> {
        self.items.iter().find(|v| v.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Variation> {
        self.items
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| QuoteError::VariationNotFound { id: id.to_string() })
    }

    pub fn update(&mut self, id: &str, field: VariationField, value: &Value) -> Result<()> {
        self.get_mut(id)?.set(field, value);
        Ok(())
    }

    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<()> {
        self.get_mut(id)?.enabled = enabled;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Variation> {
        let index = self
            .items
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| QuoteError::VariationNotFound { id: id.to_string() })?;
        Ok(self.items.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variation> {
        self.items.iter()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &Variation> {
        self.items.iter().filter(|v| v.enabled)
    }

    pub fn as_slice(&self) -> &[Variation] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<Variation> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
