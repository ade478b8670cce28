//! Domain Models
//!
//! Records served by the workshop REST API. Field names follow the API's
//! camelCase JSON; form field names match them so a composed payload can be
//! posted as-is.

pub mod customer;
pub mod job;
pub mod part;
pub mod purchase_order;
pub mod supplier;
pub mod user;
pub mod vehicle;

pub use customer::Customer;
pub use job::Job;
pub use part::{Part, Pricing};
pub use purchase_order::PurchaseOrder;
pub use supplier::Supplier;
pub use user::{Role, User};
pub use vehicle::Vehicle;

use std::collections::BTreeMap;

/// Raw input value of an optional text field
pub(crate) fn seed_optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Raw input value of an optional id/number field
pub(crate) fn seed_number<N: ToString>(value: Option<N>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

/// Build a seed map from `(field, value)` pairs
pub(crate) fn seed<const N: usize>(pairs: [(&'static str, String); N]) -> BTreeMap<&'static str, String> {
    pairs.into_iter().collect()
}
