//! UI Components
//!
//! Reusable Leptos components.

mod calendar_view;
mod customer_lookup;
mod data_table;
mod detail_panel;
mod entity_form;
mod line_item_editor;
mod list_toolbar;
mod log_panel;
mod pagination;
mod resource_page;
mod status_badge;
mod toast_stack;

pub use calendar_view::CalendarView;
pub use customer_lookup::CustomerLookup;
pub use data_table::DataTable;
pub use detail_panel::DetailPanel;
pub use entity_form::EntityForm;
pub use line_item_editor::LineItemEditor;
pub use list_toolbar::ListToolbar;
pub use log_panel::LogPanel;
pub use pagination::Pagination;
pub use resource_page::ResourcePage;
pub use status_badge::{CellView, StatusBadge};
pub use toast_stack::ToastStack;
