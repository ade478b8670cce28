//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use workshop_core::models::{Part, Pricing};
use workshop_core::ReferenceCatalog;

/// Top-level screens
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Jobs,
    Customers,
    Vehicles,
    Parts,
    PurchaseOrders,
    Suppliers,
    Users,
    Roles,
}

impl Tab {
    pub const ALL: [Tab; 8] = [
        Tab::Jobs,
        Tab::Customers,
        Tab::Vehicles,
        Tab::Parts,
        Tab::PurchaseOrders,
        Tab::Suppliers,
        Tab::Users,
        Tab::Roles,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Jobs => "Jobs",
            Tab::Customers => "Customers",
            Tab::Vehicles => "Vehicles",
            Tab::Parts => "Inventory",
            Tab::PurchaseOrders => "Purchase Orders",
            Tab::Suppliers => "Suppliers",
            Tab::Users => "Users",
            Tab::Roles => "Roles",
        }
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Screen shown in the main area
    pub active_tab: Tab,
    /// Parts offered by line-item editors
    pub parts: Vec<Part>,
    /// Version counter for the parts catalog (increment to trigger reload)
    pub parts_version: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Line-item catalog priced for a job or a purchase order
pub fn store_catalog(store: &AppStore, pricing: Pricing) -> ReferenceCatalog {
    store.parts().with_untracked(|parts| Part::catalog(parts, pricing))
}

/// Mark the parts catalog stale
pub fn store_invalidate_parts(store: &AppStore) {
    store.parts_version().update(|v| *v += 1);
}
