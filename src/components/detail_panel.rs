//! Detail Panel Component
//!
//! Read-only view of one record, with its line items when it has any.

use leptos::prelude::*;

use workshop_core::format::format_currency;
use workshop_core::{Cell, LineItem};

use super::CellView;

#[component]
pub fn DetailPanel(
    #[prop(into)] heading: Signal<String>,
    #[prop(into)] fields: Signal<Vec<(&'static str, Cell)>>,
    #[prop(into)] line_items: Signal<Vec<LineItem>>,
    #[prop(into)] on_edit: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
    #[prop(into)] on_refresh: Callback<()>,
    #[prop(into)] on_back: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="detail-panel">
            <div class="detail-header">
                <button class="back-btn" on:click=move |_| on_back.run(())>"← Back"</button>
                <h2>{move || heading.get()}</h2>
                <button class="refresh-btn" on:click=move |_| on_refresh.run(())>"Refresh"</button>
                <button class="edit-btn" on:click=move |_| on_edit.run(())>"Edit"</button>
                <button class="delete-btn" on:click=move |_| on_delete.run(())>"Delete"</button>
            </div>
            <dl class="detail-fields">
                {move || fields.get().into_iter().map(|(label, cell)| view! {
                    <dt>{label}</dt>
                    <dd><CellView cell=cell /></dd>
                }).collect_view()}
            </dl>
            {move || {
                let items = line_items.get();
                (!items.is_empty()).then(|| view! {
                    <table class="line-items readonly">
                        <thead>
                            <tr>
                                <th>"Type"</th>
                                <th>"Description"</th>
                                <th>"Qty"</th>
                                <th>"Rate"</th>
                                <th>"Amount"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {items.into_iter().map(|row| view! {
                                <tr>
                                    <td>{row.kind.as_str()}</td>
                                    <td>{row.description.clone()}</td>
                                    <td>{row.quantity}</td>
                                    <td>{format_currency(row.unit_rate)}</td>
                                    <td>{row.line_total().map(format_currency).unwrap_or_default()}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                })
            }}
        </div>
    }
}
