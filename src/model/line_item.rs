//! Stone and finding line items.

use crate::parser::{deserialize_optional_text, text_from_value, Amount};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of the stones tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoneLine {
    /// Free-form description (e.g. "Diamond 1.2mm round").
    #[serde(
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub stone_type: Option<String>,
    pub count: Amount,
    pub cost_per_stone: Amount,
    pub setting_cost: Amount,
}

/// Editable fields of a [`StoneLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoneField {
    StoneType,
    Count,
    CostPerStone,
    SettingCost,
}

impl StoneLine {
    pub fn new(count: f64, cost_per_stone: f64, setting_cost: f64) -> Self {
        Self {
            stone_type: None,
            count: count.into(),
            cost_per_stone: cost_per_stone.into(),
            setting_cost: setting_cost.into(),
        }
    }

    /// `count * (cost_per_stone + setting_cost)`, before markup.
    pub fn line_cost(&self) -> f64 {
        self.count.get() * (self.cost_per_stone.get() + self.setting_cost.get())
    }

    pub fn set(&mut self, field: StoneField, value: &Value) {
        match field {
            StoneField::StoneType => self.stone_type = text_from_value(value),
            StoneField::Count => self.count = Amount::from_value(value),
            StoneField::CostPerStone => self.cost_per_stone = Amount::from_value(value),
            StoneField::SettingCost => self.setting_cost = Amount::from_value(value),
        }
    }
}

/// One row of the findings tab (clasps, posts, jump rings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindingLine {
    #[serde(
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    pub count: Amount,
    pub cost: Amount,
}

/// Editable fields of a [`FindingLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingField {
    Name,
    Count,
    Cost,
}

impl FindingLine {
    pub fn new(count: f64, cost: f64) -> Self {
        Self {
            name: None,
            count: count.into(),
            cost: cost.into(),
        }
    }

    /// `count * cost`, before markup.
    pub fn line_cost(&self) -> f64 {
        self.count.get() * self.cost.get()
    }

    pub fn set(&mut self, field: FindingField, value: &Value) {
        match field {
            FindingField::Name => self.name = text_from_value(value),
            FindingField::Count => self.count = Amount::from_value(value),
            FindingField::Cost => self.cost = Amount::from_value(value),
        }
    }
}
