//! Customer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{seed, seed_optional};
use crate::display::{Cell, Tabular};
use crate::entity::{Entity, Listable};
use crate::form::{Editable, FieldKind, FieldSpec, FormSchema};
use crate::format::full_name;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

impl Entity for Customer {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> String {
        self.full_name()
    }
}

impl Listable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.first_name.as_str(), self.last_name.as_str(), self.phone.as_str()];
        if let Some(email) = &self.email {
            fields.push(email);
        }
        fields
    }
}

static SCHEMA: FormSchema = FormSchema {
    resource: "customer",
    fields: &[
        FieldSpec::new("firstName", "First Name", FieldKind::Text).required(),
        FieldSpec::new("lastName", "Last Name", FieldKind::Text).required(),
        FieldSpec::new("email", "Email", FieldKind::Email),
        FieldSpec::new("phone", "Phone", FieldKind::Phone).required(),
        FieldSpec::new("address", "Address", FieldKind::Text),
        FieldSpec::new("notes", "Notes", FieldKind::Text),
    ],
    record_locks: &[],
    joins: &[],
    line_items: false,
    min_line_items: 0,
};

impl Editable for Customer {
    fn schema() -> &'static FormSchema {
        &SCHEMA
    }

    fn seed_fields(&self) -> BTreeMap<&'static str, String> {
        seed([
            ("firstName", self.first_name.clone()),
            ("lastName", self.last_name.clone()),
            ("email", seed_optional(&self.email)),
            ("phone", self.phone.clone()),
            ("address", seed_optional(&self.address)),
            ("notes", seed_optional(&self.notes)),
        ])
    }
}

impl Tabular for Customer {
    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Address"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.full_name()),
            Cell::optional(self.email.as_deref()),
            Cell::text(&self.phone),
            Cell::optional(self.address.as_deref()),
        ]
    }

    fn details(&self) -> Vec<(&'static str, Cell)> {
        vec![
            ("Name", Cell::text(self.full_name())),
            ("Email", Cell::optional(self.email.as_deref())),
            ("Phone", Cell::text(&self.phone)),
            ("Address", Cell::optional(self.address.as_deref())),
            ("Notes", Cell::optional(self.notes.as_deref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::LocalFilter;
    use crate::form::FormController;

    fn customer(id: u32, first: &str, last: &str, phone: &str) -> Customer {
        Customer {
            id,
            first_name: first.into(),
            last_name: last.into(),
            email: Some(format!("{}@example.com", first.to_lowercase())),
            phone: phone.into(),
            address: None,
            notes: None,
        }
    }

    #[test]
    fn test_search_covers_name_email_and_phone() {
        let c = customer(1, "John", "Doe", "555-0101");
        let by = |term: &str| LocalFilter { search_term: term.into(), ..Default::default() }.matches(&c);
        assert!(by("doe"));
        assert!(by("JOHN@"));
        assert!(by("0101"));
        assert!(!by("smith"));
    }

    #[test]
    fn test_deserializes_api_json() {
        let json = r#"{"id":4,"firstName":"Jane","lastName":"Smith","email":"jane@example.com","phone":"555-0102","address":null,"notes":null}"#;
        let c: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(c.title(), "Jane Smith");
        assert_eq!(c.cells()[3], Cell::text("—"));
    }

    #[test]
    fn test_customer_without_email_saves_unchanged() {
        let json = r#"{"id":9,"firstName":"Walk","lastName":"In","phone":"555-0199"}"#;
        let c: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(c.email, None);
        assert_eq!(c.cells()[1], Cell::text("—"));

        let form = FormController::<Customer>::edit(&c).unwrap();
        assert!(form.validate().is_empty());
        assert!(form.compose().is_ok());
    }
}
