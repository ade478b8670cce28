//! Staff Users and Roles

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{seed, seed_optional};
use crate::display::{Cell, Tabular};
use crate::entity::{Entity, Listable};
use crate::form::{Editable, FieldKind, FieldSpec, FormSchema, Rule};
use crate::format;
use crate::status::Status;

pub const ROLE_CHOICES: &[&str] = &["ADMIN", "MANAGER", "TECHNICIAN", "CLERK"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub active: bool,
}

impl Entity for User {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> String {
        self.full_name.clone()
    }
}

impl Listable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.username.as_str(), self.full_name.as_str(), self.email.as_str()]
    }

    fn status(&self) -> Option<Status> {
        Some(if self.active { Status::Active } else { Status::Inactive })
    }

    fn category(&self) -> Option<&str> {
        Some(&self.role)
    }
}

static USER_SCHEMA: FormSchema = FormSchema {
    resource: "user",
    fields: &[
        FieldSpec::new("username", "Username", FieldKind::Text)
            .required()
            .rule(Rule::MinLength(3)),
        FieldSpec::new("fullName", "Full Name", FieldKind::Text).required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::new("role", "Role", FieldKind::Choice(ROLE_CHOICES)).required(),
        FieldSpec::new("active", "Active", FieldKind::Bool).required(),
    ],
    record_locks: &[],
    joins: &[],
    line_items: false,
    min_line_items: 0,
};

impl Editable for User {
    fn schema() -> &'static FormSchema {
        &USER_SCHEMA
    }

    fn seed_fields(&self) -> BTreeMap<&'static str, String> {
        seed([
            ("username", self.username.clone()),
            ("fullName", self.full_name.clone()),
            ("email", self.email.clone()),
            ("role", self.role.to_uppercase()),
            ("active", self.active.to_string()),
        ])
    }

    fn defaults() -> BTreeMap<&'static str, String> {
        seed([("role", "TECHNICIAN".to_string()), ("active", "true".to_string())])
    }
}

impl Tabular for User {
    fn columns() -> &'static [&'static str] {
        &["Username", "Name", "Email", "Role", "Status"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.username),
            Cell::text(&self.full_name),
            Cell::text(&self.email),
            Cell::text(format::humanize_key(&self.role)),
            Cell::Badge(self.status().unwrap_or(Status::Active)),
        ]
    }

    fn details(&self) -> Vec<(&'static str, Cell)> {
        vec![
            ("Username", Cell::text(&self.username)),
            ("Full Name", Cell::text(&self.full_name)),
            ("Email", Cell::text(&self.email)),
            ("Role", Cell::text(format::humanize_key(&self.role))),
            ("Active", Cell::yes_no(self.active)),
        ]
    }
}

/// Permission role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
}

impl Entity for Role {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> String {
        format::humanize_key(&self.name)
    }
}

impl Listable for Role {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(d) = &self.description {
            fields.push(d);
        }
        fields
    }
}

static ROLE_SCHEMA: FormSchema = FormSchema {
    resource: "role",
    fields: &[
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("description", "Description", FieldKind::Text),
    ],
    record_locks: &[],
    joins: &[],
    line_items: false,
    min_line_items: 0,
};

impl Editable for Role {
    fn schema() -> &'static FormSchema {
        &ROLE_SCHEMA
    }

    fn seed_fields(&self) -> BTreeMap<&'static str, String> {
        seed([
            ("name", self.name.clone()),
            ("description", seed_optional(&self.description)),
        ])
    }
}

impl Tabular for Role {
    fn columns() -> &'static [&'static str] {
        &["Role", "Description"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::text(self.title()), Cell::optional(self.description.as_deref())]
    }

    fn details(&self) -> Vec<(&'static str, Cell)> {
        vec![
            ("Role", Cell::text(self.title())),
            ("Key", Cell::text(&self.name)),
            ("Description", Cell::optional(self.description.as_deref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::LocalFilter;
    use crate::form::FormController;
    use crate::testing::RecordingNotifier;

    fn user(role: &str, active: bool) -> User {
        User {
            id: 4,
            username: "sjones".into(),
            full_name: "Sam Jones".into(),
            email: "sam@workshop.test".into(),
            role: role.into(),
            active,
        }
    }

    #[test]
    fn test_username_min_length() {
        let n = RecordingNotifier::default();
        let mut form = FormController::edit(&user("TECHNICIAN", true)).unwrap();
        assert!(form.validate().is_empty());
        form.set_field("username", "sj", &n).unwrap();
        assert_eq!(
            form.validate().get("username").map(String::as_str),
            Some("Username must be at least 3 characters")
        );
    }

    #[test]
    fn test_role_filter_is_case_insensitive() {
        let filter = LocalFilter {
            category: Some("technician".into()),
            ..LocalFilter::default()
        };
        assert!(filter.matches(&user("TECHNICIAN", true)));
        assert!(!filter.matches(&user("CLERK", true)));
    }

    #[test]
    fn test_inactive_badge() {
        assert_eq!(user("CLERK", false).cells()[4], Cell::Badge(Status::Inactive));
        assert_eq!(user("CLERK", false).cells()[3], Cell::text("Clerk"));
    }
}
