//! Line Items
//!
//! Sub-rows of jobs and purchase orders: a part or labor charge with a
//! quantity and a unit rate.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a line item charges for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemKind {
    #[default]
    Part,
    Labor,
}

impl LineItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemKind::Part => "part",
            LineItemKind::Labor => "labor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "part" => Some(LineItemKind::Part),
            "labor" | "labour" => Some(LineItemKind::Labor),
            _ => None,
        }
    }
}

/// A single charge row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub kind: LineItemKind,
    /// Referenced part (None for labor)
    pub reference_id: Option<u32>,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    pub unit_rate: Decimal,
}

impl LineItem {
    /// Fresh zero-quantity row
    pub fn new(kind: LineItemKind) -> Self {
        Self {
            kind,
            reference_id: None,
            description: String::new(),
            quantity: 0,
            unit_rate: Decimal::ZERO,
        }
    }

    /// Quantity × unit rate; `None` when the amount overflows
    pub fn line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_rate)
    }
}

/// Σ quantity × unit rate; `None` when any amount overflows
pub fn total(items: &[LineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.line_total()?))
}

/// Editable column of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineItemField {
    Kind,
    /// Selecting the referenced part; auto-populates rate and description
    Reference,
    Description,
    Quantity,
    UnitRate,
}

impl LineItemField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemField::Kind => "kind",
            LineItemField::Reference => "referenceId",
            LineItemField::Description => "description",
            LineItemField::Quantity => "quantity",
            LineItemField::UnitRate => "unitRate",
        }
    }

    /// Error key for this column of row `index`
    pub fn error_key(&self, index: usize) -> String {
        format!("lineItems[{}].{}", index, self.as_str())
    }
}

/// What the form knows about a referenced part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub unit_rate: Decimal,
}

/// Reference table used to auto-populate line items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCatalog {
    entries: BTreeMap<u32, CatalogEntry>,
}

impl ReferenceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u32, entry: CatalogEntry) {
        self.entries.insert(id, entry);
    }

    pub fn get(&self, id: u32) -> Option<&CatalogEntry> {
        self.entries.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by id, for selector options
    pub fn options(&self) -> impl Iterator<Item = (u32, &CatalogEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }
}

impl FromIterator<(u32, CatalogEntry)> for ReferenceCatalog {
    fn from_iter<I: IntoIterator<Item = (u32, CatalogEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
