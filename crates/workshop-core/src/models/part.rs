//! Inventory Part

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{seed, seed_number, seed_optional};
use crate::display::{Cell, Tabular};
use crate::entity::{Entity, Listable};
use crate::form::{Editable, FieldKind, FieldSpec, FormSchema, Rule};
use crate::line_item::{CatalogEntry, ReferenceCatalog};
use crate::status::Status;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: u32,
    pub part_number: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub quantity_in_stock: i64,
    pub reorder_level: i64,
    pub supplier_id: Option<u32>,
}

/// Which price a line item picks up from a part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pricing {
    /// Purchase orders buy at cost
    Cost,
    /// Jobs charge the customer the selling price
    Selling,
}

impl Part {
    /// Stock level derived from quantity and reorder level
    pub fn stock_status(&self) -> Status {
        if self.quantity_in_stock <= 0 {
            Status::OutOfStock
        } else if self.quantity_in_stock <= self.reorder_level {
            Status::LowStock
        } else {
            Status::InStock
        }
    }

    pub fn catalog_entry(&self, pricing: Pricing) -> CatalogEntry {
        CatalogEntry {
            name: self.name.clone(),
            unit_rate: match pricing {
                Pricing::Cost => self.cost_price,
                Pricing::Selling => self.selling_price,
            },
        }
    }

    /// Line-item reference table for a set of parts
    pub fn catalog(parts: &[Part], pricing: Pricing) -> ReferenceCatalog {
        parts.iter().map(|p| (p.id, p.catalog_entry(pricing))).collect()
    }
}

impl Entity for Part {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> String {
        format!("{} ({})", self.name, self.part_number)
    }
}

impl Listable for Part {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.part_number.as_str()]
    }

    fn status(&self) -> Option<Status> {
        Some(self.stock_status())
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

static SCHEMA: FormSchema = FormSchema {
    resource: "part",
    fields: &[
        FieldSpec::new("partNumber", "Part Number", FieldKind::Text).required(),
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("description", "Description", FieldKind::Text),
        FieldSpec::new("category", "Category", FieldKind::Text).required(),
        FieldSpec::new("costPrice", "Cost Price", FieldKind::Decimal).required().rule(Rule::Positive),
        FieldSpec::new("sellingPrice", "Selling Price", FieldKind::Decimal).required().rule(Rule::Positive),
        FieldSpec::new("quantityInStock", "Quantity in Stock", FieldKind::Integer)
            .required()
            .rule(Rule::NonNegative),
        FieldSpec::new("reorderLevel", "Reorder Level", FieldKind::Integer)
            .required()
            .rule(Rule::NonNegative),
        FieldSpec::new("supplierId", "Supplier", FieldKind::Reference),
    ],
    record_locks: &[],
    joins: &[],
    line_items: false,
    min_line_items: 0,
};

impl Editable for Part {
    fn schema() -> &'static FormSchema {
        &SCHEMA
    }

    fn seed_fields(&self) -> BTreeMap<&'static str, String> {
        seed([
            ("partNumber", self.part_number.clone()),
            ("name", self.name.clone()),
            ("description", seed_optional(&self.description)),
            ("category", self.category.clone()),
            ("costPrice", self.cost_price.to_string()),
            ("sellingPrice", self.selling_price.to_string()),
            ("quantityInStock", self.quantity_in_stock.to_string()),
            ("reorderLevel", self.reorder_level.to_string()),
            ("supplierId", seed_number(self.supplier_id)),
        ])
    }

    fn defaults() -> BTreeMap<&'static str, String> {
        seed([("quantityInStock", "0".to_string()), ("reorderLevel", "0".to_string())])
    }
}

impl Tabular for Part {
    fn columns() -> &'static [&'static str] {
        &["Part #", "Name", "Category", "Price", "Stock", "Status"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.part_number),
            Cell::text(&self.name),
            Cell::text(&self.category),
            Cell::money(self.selling_price),
            Cell::text(self.quantity_in_stock.to_string()),
            Cell::Badge(self.stock_status()),
        ]
    }

    fn details(&self) -> Vec<(&'static str, Cell)> {
        vec![
            ("Part Number", Cell::text(&self.part_number)),
            ("Name", Cell::text(&self.name)),
            ("Description", Cell::optional(self.description.as_deref())),
            ("Category", Cell::text(&self.category)),
            ("Cost Price", Cell::money(self.cost_price)),
            ("Selling Price", Cell::money(self.selling_price)),
            ("In Stock", Cell::text(self.quantity_in_stock.to_string())),
            ("Reorder Level", Cell::text(self.reorder_level.to_string())),
            ("Stock Status", Cell::Badge(self.stock_status())),
        ]
    }
}
