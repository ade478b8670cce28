//! Supplier

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{seed, seed_optional};
use crate::display::{Cell, Tabular};
use crate::entity::{Entity, Listable};
use crate::form::{Editable, FieldKind, FieldSpec, FormSchema};
use crate::status::Status;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: u32,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Entity for Supplier {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

impl Listable for Supplier {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()];
        if let Some(contact) = &self.contact_name {
            fields.push(contact);
        }
        fields
    }

    fn status(&self) -> Option<Status> {
        Some(if self.active { Status::Active } else { Status::Inactive })
    }
}

static SCHEMA: FormSchema = FormSchema {
    resource: "supplier",
    fields: &[
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("contactName", "Contact", FieldKind::Text),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::new("phone", "Phone", FieldKind::Phone).required(),
        FieldSpec::new("address", "Address", FieldKind::Text),
        FieldSpec::new("active", "Active", FieldKind::Bool).required(),
    ],
    record_locks: &[],
    joins: &[],
    line_items: false,
    min_line_items: 0,
};

impl Editable for Supplier {
    fn schema() -> &'static FormSchema {
        &SCHEMA
    }

    fn seed_fields(&self) -> BTreeMap<&'static str, String> {
        seed([
            ("name", self.name.clone()),
            ("contactName", seed_optional(&self.contact_name)),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("address", seed_optional(&self.address)),
            ("active", self.active.to_string()),
        ])
    }

    fn defaults() -> BTreeMap<&'static str, String> {
        seed([("active", "true".to_string())])
    }
}

impl Tabular for Supplier {
    fn columns() -> &'static [&'static str] {
        &["Name", "Contact", "Email", "Phone", "Status"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.name),
            Cell::optional(self.contact_name.as_deref()),
            Cell::text(&self.email),
            Cell::text(&self.phone),
            Cell::Badge(self.status().unwrap_or(Status::Active)),
        ]
    }

    fn details(&self) -> Vec<(&'static str, Cell)> {
        vec![
            ("Name", Cell::text(&self.name)),
            ("Contact", Cell::optional(self.contact_name.as_deref())),
            ("Email", Cell::text(&self.email)),
            ("Phone", Cell::text(&self.phone)),
            ("Address", Cell::optional(self.address.as_deref())),
            ("Active", Cell::yes_no(self.active)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormController;
    use crate::payload::FieldValue;

    #[test]
    fn test_new_supplier_defaults_to_active() {
        let form = FormController::<Supplier>::create();
        assert_eq!(form.field("active"), "true");
    }

    #[test]
    fn test_active_flag_round_trips_as_bool() {
        let supplier = Supplier {
            id: 3,
            name: "Acme Auto Parts".into(),
            contact_name: Some("Rita".into()),
            email: "orders@acme.test".into(),
            phone: "+1 555 010 0200".into(),
            address: None,
            active: false,
        };
        let payload = FormController::edit(&supplier).unwrap().compose().unwrap();
        assert_eq!(payload.get("active"), Some(&FieldValue::Bool(false)));
        assert_eq!(supplier.status(), Some(Status::Inactive));
    }
}
