//! Status Badge and Cell Components

use leptos::prelude::*;

use workshop_core::{Cell, Status};

/// Colored pill for a record status
#[component]
pub fn StatusBadge(status: Status) -> impl IntoView {
    view! {
        <span class=status.badge().css_class()>{status.label()}</span>
    }
}

/// One formatted table or detail value
#[component]
pub fn CellView(cell: Cell) -> impl IntoView {
    match cell {
        Cell::Text(text) => view! { <span class="cell-text">{text}</span> }.into_any(),
        Cell::Badge(status) => view! { <StatusBadge status=status /> }.into_any(),
    }
}
