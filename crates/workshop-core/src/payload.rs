//! Save Payload
//!
//! The typed body a form composes on submit and hands to
//! [`DataSource::create`](crate::source::DataSource::create) /
//! [`DataSource::update`](crate::source::DataSource::update).

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::line_item::LineItem;

/// A field converted to its final type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// `Null` for `None`, otherwise the mapped value
    pub fn optional<V>(value: Option<V>, f: impl FnOnce(V) -> FieldValue) -> Self {
        value.map(f).unwrap_or(FieldValue::Null)
    }
}

/// Composed save body: flat field map, plus line items and total for forms
/// that carry them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.fields.get(name) {
            Some(FieldValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn decimal(&self, name: &str) -> Option<Decimal> {
        match self.fields.get(name) {
            Some(FieldValue::Decimal(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::LineItemKind;

    #[test]
    fn test_serializes_flat_with_line_items() {
        let payload = Payload {
            line_items: Some(vec![LineItem::new(LineItemKind::Labor)]),
            total: Some(Decimal::ZERO),
            ..Payload::new()
        }
        .with("orderNumber", FieldValue::text("PO-7"))
        .with("notes", FieldValue::Null)
        .with("supplierId", FieldValue::Integer(3));

        let json = payload.to_json();
        assert_eq!(json["orderNumber"], "PO-7");
        assert!(json["notes"].is_null());
        assert_eq!(json["supplierId"], 3);
        assert_eq!(json["lineItems"][0]["kind"], "LABOR");
        assert_eq!(json["total"], "0");
    }

    #[test]
    fn test_plain_payload_omits_line_items() {
        let json = Payload::new().with("name", FieldValue::text("Acme")).to_json();
        assert!(json.get("lineItems").is_none());
        assert!(json.get("total").is_none());
    }
}
