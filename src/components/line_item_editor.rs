//! Line Item Editor Component
//!
//! Editable part/labor rows with the running total. Every change goes back
//! to the form controller through `on_update`; the total shown is the
//! controller's.

use leptos::prelude::*;
use rust_decimal::Decimal;

use workshop_core::format::format_currency;
use workshop_core::{LineItem, LineItemField, LineItemKind};

#[component]
pub fn LineItemEditor(
    #[prop(into)] items: Signal<Vec<LineItem>>,
    #[prop(into)] total: Signal<Decimal>,
    /// Part id and name pairs for the reference selector
    #[prop(into)] options: Signal<Vec<(u32, String)>>,
    #[prop(into)] error: Callback<String, Option<String>>,
    #[prop(into)] on_add: Callback<LineItemKind>,
    #[prop(into)] on_remove: Callback<usize>,
    #[prop(into)] on_update: Callback<(usize, LineItemField, String)>,
) -> impl IntoView {
    let field_error = move |index: usize, field: LineItemField| {
        error.run(field.error_key(index)).map(|message| view! { <span class="field-error">{message}</span> })
    };

    view! {
        <fieldset class="line-items">
            <legend>"Line items"</legend>
            <table>
                <thead>
                    <tr>
                        <th>"Type"</th>
                        <th>"Part"</th>
                        <th>"Description"</th>
                        <th>"Qty"</th>
                        <th>"Rate"</th>
                        <th>"Amount"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || items.get().into_iter().enumerate().map(|(index, row)| {
                        let kind = row.kind;
                        let reference = row.reference_id;
                        view! {
                            <tr>
                                <td>
                                    <select on:change=move |ev| on_update.run((index, LineItemField::Kind, event_target_value(&ev)))>
                                        <option value="part" selected={kind == LineItemKind::Part}>"Part"</option>
                                        <option value="labor" selected={kind == LineItemKind::Labor}>"Labor"</option>
                                    </select>
                                </td>
                                <td>
                                    {(kind == LineItemKind::Part).then(|| view! {
                                        <select on:change=move |ev| on_update.run((index, LineItemField::Reference, event_target_value(&ev)))>
                                            <option value="" selected={reference.is_none()}>"Select a part"</option>
                                            {options.get().into_iter().map(|(id, name)| view! {
                                                <option value={id.to_string()} selected={reference == Some(id)}>{name}</option>
                                            }).collect_view()}
                                        </select>
                                    })}
                                    {field_error(index, LineItemField::Reference)}
                                </td>
                                <td>
                                    <input
                                        type="text"
                                        prop:value={row.description.clone()}
                                        on:change=move |ev| on_update.run((index, LineItemField::Description, event_target_value(&ev)))
                                    />
                                    {field_error(index, LineItemField::Description)}
                                </td>
                                <td>
                                    <input
                                        type="number"
                                        min="0"
                                        class="qty-input"
                                        prop:value={row.quantity.to_string()}
                                        on:change=move |ev| on_update.run((index, LineItemField::Quantity, event_target_value(&ev)))
                                    />
                                    {field_error(index, LineItemField::Quantity)}
                                </td>
                                <td>
                                    <input
                                        type="text"
                                        inputmode="decimal"
                                        class="rate-input"
                                        prop:value={row.unit_rate.to_string()}
                                        on:change=move |ev| on_update.run((index, LineItemField::UnitRate, event_target_value(&ev)))
                                    />
                                    {field_error(index, LineItemField::UnitRate)}
                                </td>
                                <td class="amount">{row.line_total().map(format_currency).unwrap_or_default()}</td>
                                <td>
                                    <button type="button" class="remove-btn" on:click=move |_| on_remove.run(index)>
                                        "×"
                                    </button>
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>
            {move || error.run("lineItems".to_string()).map(|message| view! { <p class="field-error">{message}</p> })}
            <div class="line-items-footer">
                <button type="button" on:click=move |_| on_add.run(LineItemKind::Part)>"+ Part"</button>
                <button type="button" on:click=move |_| on_add.run(LineItemKind::Labor)>"+ Labor"</button>
                <span class="line-items-total">"Total: " {move || format_currency(total.get())}</span>
            </div>
        </fieldset>
    }
}
