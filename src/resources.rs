//! Resource Screens
//!
//! Per-resource settings for the generic [`ResourcePage`](crate::components::ResourcePage).

use chrono::NaiveDateTime;

use workshop_core::calendar::Scheduled;
use workshop_core::models::user::ROLE_CHOICES;
use workshop_core::models::{Customer, Job, Part, Pricing, PurchaseOrder, Role, Supplier, User, Vehicle};
use workshop_core::Status;

pub const PART_CATEGORIES: &[&str] = &[
    "Brakes",
    "Electrical",
    "Engine",
    "Filters",
    "Fluids",
    "Suspension",
    "Tires",
];

/// Settings of one resource screen
pub struct ResourceDescriptor<T> {
    /// Heading
    pub title: &'static str,
    /// Plural name for list messages
    pub plural: &'static str,
    /// Status filter options; empty hides the filter
    pub statuses: &'static [Status],
    /// Category filter options; empty hides the filter
    pub categories: &'static [&'static str],
    /// Price list used by line items
    pub pricing: Option<Pricing>,
    /// Schedule read by the calendar view; `None` disables the calendar
    pub schedule: Option<fn(&T) -> Option<NaiveDateTime>>,
    /// Saving or deleting invalidates the parts catalog
    pub refreshes_catalog: bool,
}

impl<T> Clone for ResourceDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResourceDescriptor<T> {}

impl<T> ResourceDescriptor<T> {
    const fn plain(title: &'static str, plural: &'static str) -> Self {
        Self {
            title,
            plural,
            statuses: &[],
            categories: &[],
            pricing: None,
            schedule: None,
            refreshes_catalog: false,
        }
    }
}

pub fn jobs() -> ResourceDescriptor<Job> {
    ResourceDescriptor {
        statuses: Status::JOB,
        pricing: Some(Pricing::Selling),
        schedule: Some(<Job as Scheduled>::scheduled_at),
        ..ResourceDescriptor::plain("Jobs", "jobs")
    }
}

pub fn customers() -> ResourceDescriptor<Customer> {
    ResourceDescriptor::plain("Customers", "customers")
}

pub fn vehicles() -> ResourceDescriptor<Vehicle> {
    ResourceDescriptor::plain("Vehicles", "vehicles")
}

pub fn parts() -> ResourceDescriptor<Part> {
    ResourceDescriptor {
        statuses: Status::STOCK,
        categories: PART_CATEGORIES,
        refreshes_catalog: true,
        ..ResourceDescriptor::plain("Inventory", "parts")
    }
}

pub fn purchase_orders() -> ResourceDescriptor<PurchaseOrder> {
    ResourceDescriptor {
        statuses: Status::PURCHASE_ORDER,
        pricing: Some(Pricing::Cost),
        ..ResourceDescriptor::plain("Purchase Orders", "purchase orders")
    }
}

pub fn suppliers() -> ResourceDescriptor<Supplier> {
    ResourceDescriptor {
        statuses: Status::ACTIVITY,
        ..ResourceDescriptor::plain("Suppliers", "suppliers")
    }
}

pub fn users() -> ResourceDescriptor<User> {
    ResourceDescriptor {
        statuses: Status::ACTIVITY,
        categories: ROLE_CHOICES,
        ..ResourceDescriptor::plain("Users", "users")
    }
}

pub fn roles() -> ResourceDescriptor<Role> {
    ResourceDescriptor::plain("Roles", "roles")
}
