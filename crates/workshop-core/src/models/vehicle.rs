//! Vehicle

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{seed, seed_number, seed_optional};
use crate::display::{Cell, Tabular};
use crate::entity::{Entity, Listable};
use crate::form::{Editable, FieldKind, FieldSpec, FormSchema, Rule};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: u32,
    pub customer_id: u32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub license_plate: String,
    pub color: Option<String>,
    pub mileage: Option<i64>,
}

impl Entity for Vehicle {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    /// `2019 Toyota Corolla`
    fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

impl Listable for Vehicle {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.make.as_str(),
            self.model.as_str(),
            self.vin.as_str(),
            self.license_plate.as_str(),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(&self.make)
    }
}

static SCHEMA: FormSchema = FormSchema {
    resource: "vehicle",
    fields: &[
        FieldSpec::new("customerId", "Owner", FieldKind::Reference).required(),
        FieldSpec::new("make", "Make", FieldKind::Text).required(),
        FieldSpec::new("model", "Model", FieldKind::Text).required(),
        FieldSpec::new("year", "Year", FieldKind::Integer).required().rule(Rule::Year),
        FieldSpec::new("vin", "VIN", FieldKind::Text).required().rule(Rule::ExactLength(17)),
        FieldSpec::new("licensePlate", "License Plate", FieldKind::Text).required(),
        FieldSpec::new("color", "Color", FieldKind::Text),
        FieldSpec::new("mileage", "Mileage", FieldKind::Integer).rule(Rule::NonNegative),
    ],
    record_locks: &[],
    joins: &[],
    line_items: false,
    min_line_items: 0,
};

impl Editable for Vehicle {
    fn schema() -> &'static FormSchema {
        &SCHEMA
    }

    fn seed_fields(&self) -> BTreeMap<&'static str, String> {
        seed([
            ("customerId", self.customer_id.to_string()),
            ("make", self.make.clone()),
            ("model", self.model.clone()),
            ("year", self.year.to_string()),
            ("vin", self.vin.clone()),
            ("licensePlate", self.license_plate.clone()),
            ("color", seed_optional(&self.color)),
            ("mileage", seed_number(self.mileage)),
        ])
    }
}

impl Tabular for Vehicle {
    fn columns() -> &'static [&'static str] {
        &["Vehicle", "Plate", "VIN", "Owner"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.title()),
            Cell::text(&self.license_plate),
            Cell::text(&self.vin),
            Cell::text(format!("#{}", self.customer_id)),
        ]
    }

    fn details(&self) -> Vec<(&'static str, Cell)> {
        vec![
            ("Vehicle", Cell::text(self.title())),
            ("License Plate", Cell::text(&self.license_plate)),
            ("VIN", Cell::text(&self.vin)),
            ("Color", Cell::optional(self.color.as_deref())),
            ("Mileage", Cell::text(seed_number(self.mileage))),
            ("Owner", Cell::text(format!("Customer #{}", self.customer_id))),
        ]
    }
}
