//! Entity Form Component
//!
//! Renders a record's form schema and forwards every edit to the
//! [`FormController`]. Submission itself is run by the owning page.

use leptos::prelude::*;

use workshop_core::form::{match_choice, parse_bool, FieldKind, FieldSpec};
use workshop_core::format::humanize_key;
use workshop_core::models::Customer;
use workshop_core::{Editable, Entity, FormController, LineItemField, LineItemKind};

use super::{CustomerLookup, LineItemEditor};
use crate::context::use_app_context;

type FormSignal<T> = RwSignal<Option<FormController<T>>>;

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Phone => "tel",
        FieldKind::Integer | FieldKind::Reference => "number",
        FieldKind::Date => "date",
        FieldKind::Time => "time",
        _ => "text",
    }
}

#[component]
fn FieldInput<T>(spec: FieldSpec, form: FormSignal<T>) -> impl IntoView
where
    T: Editable + Send + Sync,
    T::Id: Send + Sync,
{
    let ctx = use_app_context();
    let name = spec.name;

    let value = move || form.with(|f| f.as_ref().map(|f| f.field(name).to_string()).unwrap_or_default());
    let locked = move || form.with(|f| f.as_ref().and_then(|f| f.field_lock(name)).is_some());
    let error = move || form.with(|f| f.as_ref().and_then(|f| f.error(name)).map(str::to_string));
    let set = move |raw: String| {
        form.update(|f| {
            if let Some(f) = f.as_mut() {
                if let Err(err) = f.set_field(name, &raw, &ctx) {
                    log::debug!("[FORM] {} rejected: {}", name, err);
                }
            }
        })
    };

    let input = match spec.kind {
        FieldKind::Bool => view! {
            <input
                type="checkbox"
                id=name
                prop:checked=move || parse_bool(&value()).unwrap_or(false)
                disabled=locked
                on:change=move |ev| set(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        FieldKind::Choice(options) => view! {
            <select id=name disabled=locked on:change=move |ev| set(event_target_value(&ev))>
                <option value="">"Select..."</option>
                {options.iter().map(|&option| view! {
                    <option value=option selected=move || match_choice(options, &value()) == Some(option)>
                        {humanize_key(option)}
                    </option>
                }).collect_view()}
            </select>
        }
        .into_any(),
        kind => view! {
            <input
                type=input_type(kind)
                id=name
                inputmode={if kind == FieldKind::Decimal { "decimal" } else { "text" }}
                prop:value=value
                disabled=locked
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    let lookup = (name == "customerId").then(|| {
        let pick = Callback::new(move |customer: Customer| set(customer.id().to_string()));
        view! {
            <Show when=move || !locked()>
                <CustomerLookup on_select=pick />
            </Show>
        }
    });

    view! {
        <div class="form-field" class:has-error=move || error().is_some() class:locked=locked>
            <label for=name>
                {spec.label}
                {spec.required.then_some(" *")}
            </label>
            {input}
            {lookup}
            {move || error().map(|message| view! { <span class="field-error">{message}</span> })}
        </div>
    }
}

#[component]
pub fn EntityForm<T>(
    form: FormSignal<T>,
    #[prop(into)] on_submit: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView
where
    T: Editable + Send + Sync,
    T::Id: Send + Sync,
{
    let schema = T::schema();
    let heading = move || {
        let creating = form.with(|f| f.as_ref().map_or(true, |f| f.is_create()));
        if creating {
            format!("New {}", schema.resource)
        } else {
            format!("Edit {}", schema.resource)
        }
    };
    let submitting = move || form.with(|f| f.as_ref().is_some_and(|f| f.is_submitting()));

    let line_items = schema.line_items.then(|| {
        let items = Signal::derive(move || form.with(|f| f.as_ref().map(|f| f.line_items().to_vec()).unwrap_or_default()));
        let total = Signal::derive(move || form.with(|f| f.as_ref().map(|f| f.total()).unwrap_or_default()));
        let options = Signal::derive(move || {
            form.with(|f| {
                f.as_ref()
                    .map(|f| f.catalog().options().map(|(id, entry)| (id, entry.name.clone())).collect())
                    .unwrap_or_default()
            })
        });
        let error = Callback::new(move |key: String| form.with(|f| f.as_ref().and_then(|f| f.error(&key)).map(str::to_string)));
        let on_add = Callback::new(move |kind: LineItemKind| {
            form.update(|f| {
                if let Some(f) = f.as_mut() {
                    f.add_line_item(kind);
                }
            })
        });
        let on_remove = Callback::new(move |index: usize| {
            form.update(|f| {
                if let Some(Err(err)) = f.as_mut().map(|f| f.remove_line_item(index)) {
                    log::debug!("[FORM] remove line {}: {}", index, err);
                }
            })
        });
        let on_update = Callback::new(move |(index, field, raw): (usize, LineItemField, String)| {
            form.update(|f| {
                if let Some(Err(err)) = f.as_mut().map(|f| f.update_line_item(index, field, &raw)) {
                    log::debug!("[FORM] line {} rejected: {}", index, err);
                }
            })
        });
        view! {
            <LineItemEditor
                items=items
                total=total
                options=options
                error=error
                on_add=on_add
                on_remove=on_remove
                on_update=on_update
            />
        }
    });

    view! {
        <form
            class="entity-form"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <h2>{heading}</h2>
            {schema.fields.iter().map(|spec| view! { <FieldInput spec=*spec form=form /> }).collect_view()}
            {line_items}
            <div class="form-actions">
                <button type="submit" class="save-btn" disabled=submitting>
                    {move || if submitting() { "Saving..." } else { "Save" }}
                </button>
                <button type="button" class="cancel-btn" on:click=move |_| on_cancel.run(())>
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
