//! Purchase Order
//!
//! Once an order has been sent to the supplier its header (number, supplier,
//! order date) is frozen; received, completed and cancelled orders are
//! read-only altogether.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{seed, seed_number, seed_optional};
use crate::display::{Cell, Tabular};
use crate::entity::{Entity, Listable};
use crate::form::{Editable, FieldKind, FieldSpec, FormSchema};
use crate::format;
use crate::line_item::LineItem;
use crate::status::Status;

pub const STATUS_CHOICES: &[&str] = &[
    "DRAFT",
    "PENDING",
    "ORDERED",
    "PARTIALLY_RECEIVED",
    "RECEIVED",
    "COMPLETED",
    "CANCELLED",
];

const SENT: &[Status] = &[Status::Ordered, Status::PartiallyReceived];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: u32,
    pub order_number: String,
    pub supplier_id: u32,
    pub order_date: NaiveDate,
    pub expected_date: Option<NaiveDate>,
    pub status: Status,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub total: Decimal,
    pub notes: Option<String>,
}

impl Entity for PurchaseOrder {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> String {
        format!("Purchase order {}", self.order_number)
    }
}

impl Listable for PurchaseOrder {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.order_number.as_str()];
        if let Some(notes) = &self.notes {
            fields.push(notes);
        }
        fields
    }

    fn status(&self) -> Option<Status> {
        Some(self.status)
    }
}

static SCHEMA: FormSchema = FormSchema {
    resource: "purchase order",
    fields: &[
        FieldSpec::new("orderNumber", "Order Number", FieldKind::Text)
            .required()
            .locked_in(SENT),
        FieldSpec::new("supplierId", "Supplier", FieldKind::Reference)
            .required()
            .locked_in(SENT),
        FieldSpec::new("orderDate", "Order Date", FieldKind::Date)
            .required()
            .locked_in(SENT),
        FieldSpec::new("expectedDate", "Expected Date", FieldKind::Date),
        FieldSpec::new("status", "Status", FieldKind::Choice(STATUS_CHOICES)).required(),
        FieldSpec::new("notes", "Notes", FieldKind::Text),
    ],
    record_locks: &[Status::Received, Status::Completed, Status::Cancelled],
    joins: &[],
    line_items: true,
    min_line_items: 1,
};

impl Editable for PurchaseOrder {
    fn schema() -> &'static FormSchema {
        &SCHEMA
    }

    fn seed_fields(&self) -> BTreeMap<&'static str, String> {
        seed([
            ("orderNumber", self.order_number.clone()),
            ("supplierId", self.supplier_id.to_string()),
            ("orderDate", format::date_input_value(self.order_date)),
            ("expectedDate", seed_number(self.expected_date.map(format::date_input_value))),
            ("status", self.status.key().to_uppercase()),
            ("notes", seed_optional(&self.notes)),
        ])
    }

    fn seed_line_items(&self) -> Vec<LineItem> {
        self.line_items.clone()
    }

    fn lock_status(&self) -> Option<Status> {
        Some(self.status)
    }

    fn defaults() -> BTreeMap<&'static str, String> {
        seed([("status", "DRAFT".to_string())])
    }
}

impl Tabular for PurchaseOrder {
    fn columns() -> &'static [&'static str] {
        &["Order #", "Supplier", "Ordered", "Expected", "Total", "Status"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.order_number),
            Cell::text(format!("#{}", self.supplier_id)),
            Cell::date(self.order_date),
            Cell::optional_date(self.expected_date),
            Cell::money(self.total),
            Cell::Badge(self.status),
        ]
    }

    fn details(&self) -> Vec<(&'static str, Cell)> {
        vec![
            ("Order Number", Cell::text(&self.order_number)),
            ("Status", Cell::Badge(self.status)),
            ("Supplier", Cell::text(format!("Supplier #{}", self.supplier_id))),
            ("Order Date", Cell::date(self.order_date)),
            ("Expected Date", Cell::optional_date(self.expected_date)),
            ("Lines", Cell::text(self.line_items.len().to_string())),
            ("Total", Cell::money(self.total)),
            ("Notes", Cell::optional(self.notes.as_deref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormController;
    use crate::payload::FieldValue;

    fn order(status: Status) -> PurchaseOrder {
        PurchaseOrder {
            id: 1,
            order_number: "PO-7".into(),
            supplier_id: 3,
            order_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            expected_date: NaiveDate::from_ymd_opt(2024, 5, 9),
            status,
            line_items: Vec::new(),
            total: Decimal::ZERO,
            notes: None,
        }
    }

    #[test]
    fn test_new_order_starts_as_draft() {
        let form = FormController::<PurchaseOrder>::create();
        assert_eq!(form.field("status"), "DRAFT");
    }

    #[test]
    fn test_locks_by_status() {
        assert_eq!(order(Status::Received).edit_block(), Some(Status::Received));
        assert_eq!(order(Status::Ordered).edit_block(), None);

        let form = FormController::edit(&order(Status::PartiallyReceived)).unwrap();
        assert_eq!(form.field_lock("orderDate"), Some(Status::PartiallyReceived));
        assert_eq!(form.field_lock("expectedDate"), None);

        let draft = FormController::edit(&order(Status::Draft)).unwrap();
        assert_eq!(draft.field_lock("orderNumber"), None);
    }

    #[test]
    fn test_dates_seed_as_input_values() {
        let form = FormController::edit(&order(Status::Draft)).unwrap();
        assert_eq!(form.field("orderDate"), "2024-05-02");
        assert_eq!(form.field("expectedDate"), "2024-05-09");
    }

    #[test]
    fn test_expected_date_is_optional() {
        let mut po = order(Status::Draft);
        po.expected_date = None;
        po.line_items = vec![LineItem {
            quantity: 1,
            reference_id: Some(4),
            ..LineItem::new(crate::line_item::LineItemKind::Part)
        }];
        let payload = FormController::edit(&po).unwrap().compose().unwrap();
        assert_eq!(payload.get("expectedDate"), Some(&FieldValue::Null));
        assert_eq!(payload.text("status"), Some("DRAFT"));
    }
}
