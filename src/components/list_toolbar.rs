//! List Toolbar Component
//!
//! Search box, status and category filters, and the create/calendar actions
//! above a resource list.

use leptos::prelude::*;

use workshop_core::format::humanize_key;
use workshop_core::Status;

/// Empty select value stands for "no filter"
fn selection(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[component]
pub fn ListToolbar(
    title: &'static str,
    statuses: &'static [Status],
    categories: &'static [&'static str],
    #[prop(into)] search: Signal<String>,
    #[prop(into)] on_search: Callback<String>,
    #[prop(into)] on_status: Callback<Option<String>>,
    #[prop(into)] on_category: Callback<Option<String>>,
    #[prop(into)] on_create: Callback<()>,
    #[prop(default = None)] on_calendar: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="list-toolbar">
            <h2>{title}</h2>
            <input
                type="search"
                class="search-input"
                placeholder="Search..."
                prop:value=move || search.get()
                on:input=move |ev| on_search.run(event_target_value(&ev))
            />
            {(!statuses.is_empty()).then(|| view! {
                <select class="status-filter" on:change=move |ev| on_status.run(selection(event_target_value(&ev)))>
                    <option value="">"All statuses"</option>
                    {statuses.iter().map(|status| view! {
                        <option value=status.key()>{status.label()}</option>
                    }).collect_view()}
                </select>
            })}
            {(!categories.is_empty()).then(|| view! {
                <select class="category-filter" on:change=move |ev| on_category.run(selection(event_target_value(&ev)))>
                    <option value="">"All categories"</option>
                    {categories.iter().map(|category| view! {
                        <option value=*category>{humanize_key(category)}</option>
                    }).collect_view()}
                </select>
            })}
            {on_calendar.map(|show| view! {
                <button class="calendar-btn" on:click=move |_| show.run(())>"Calendar"</button>
            })}
            <button class="create-btn" on:click=move |_| on_create.run(())>"New"</button>
        </div>
    }
}
