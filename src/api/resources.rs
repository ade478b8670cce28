//! Endpoint paths per record type

use workshop_core::models::{Customer, Job, Part, PurchaseOrder, Role, Supplier, User, Vehicle};

/// Record type served under `{base_url}/{PATH}`
pub trait ApiResource {
    const PATH: &'static str;
}

impl ApiResource for Customer {
    const PATH: &'static str = "customers";
}

impl ApiResource for Vehicle {
    const PATH: &'static str = "vehicles";
}

impl ApiResource for Job {
    const PATH: &'static str = "jobs";
}

impl ApiResource for Part {
    const PATH: &'static str = "parts";
}

impl ApiResource for PurchaseOrder {
    const PATH: &'static str = "purchase-orders";
}

impl ApiResource for Supplier {
    const PATH: &'static str = "suppliers";
}

impl ApiResource for User {
    const PATH: &'static str = "users";
}

impl ApiResource for Role {
    const PATH: &'static str = "roles";
}
