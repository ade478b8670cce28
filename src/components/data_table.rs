//! Data Table Component
//!
//! Rows of pre-formatted cells with view/edit/delete actions. Row callbacks
//! receive the index into the visible rows.

use leptos::prelude::*;

use workshop_core::Cell;

use super::CellView;

#[component]
pub fn DataTable(
    columns: &'static [&'static str],
    #[prop(into)] rows: Signal<Vec<Vec<Cell>>>,
    #[prop(into)] empty_message: Signal<Option<String>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] on_view: Callback<usize>,
    #[prop(into)] on_edit: Callback<usize>,
    #[prop(into)] on_delete: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="table-wrap" class:loading=move || loading.get()>
            <table class="data-table">
                <thead>
                    <tr>
                        {columns.iter().map(|column| view! { <th>{*column}</th> }).collect_view()}
                        <th class="actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows.get().into_iter().enumerate().map(|(index, cells)| view! {
                        <tr class="data-row" on:click=move |_| on_view.run(index)>
                            {cells.into_iter().map(|cell| view! { <td><CellView cell=cell /></td> }).collect_view()}
                            <td class="actions">
                                <button
                                    class="edit-btn"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        on_edit.run(index);
                                    }
                                >
                                    "Edit"
                                </button>
                                <button
                                    class="delete-btn"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        on_delete.run(index);
                                    }
                                >
                                    "Delete"
                                </button>
                            </td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
            {move || empty_message.get().map(|message| view! { <p class="empty-state">{message}</p> })}
        </div>
    }
}
