//! Customer Lookup Component
//!
//! Type-ahead search for the customer of a vehicle or job.

use leptos::prelude::*;
use leptos::task::spawn_local;

use workshop_core::models::Customer;
use workshop_core::{DataSource, Entity, LookupController};

use crate::api::RestSource;
use crate::context::use_app_context;

#[component]
pub fn CustomerLookup(#[prop(into)] on_select: Callback<Customer>) -> impl IntoView {
    let ctx = use_app_context();
    let source = StoredValue::new_local(RestSource::<Customer>::new(&ctx.api_base()));
    let lookup = RwSignal::new(LookupController::<Customer>::new());

    let search = move |query: String| {
        let Some(ticket) = lookup.try_update(|l| l.begin(&query)).flatten() else {
            return;
        };
        let source = source.get_value();
        spawn_local(async move {
            let result = source.search(&ticket.query).await;
            lookup.update(|l| {
                l.complete(ticket, result, &ctx);
            });
        });
    };

    let choose = move |id: u32| {
        if let Some(customer) = lookup.try_update(|l| l.choose(id)).flatten() {
            on_select.run(customer);
        }
    };

    view! {
        <div class="lookup">
            <input
                type="search"
                class="lookup-input"
                placeholder="Find customer by name, phone or email"
                prop:value=move || lookup.with(|l| l.query().to_string())
                on:input=move |ev| search(event_target_value(&ev))
            />
            <Show when=move || lookup.with(|l| l.is_searching())>
                <span class="lookup-busy">"Searching..."</span>
            </Show>
            <ul class="lookup-results">
                {move || lookup.with(|l| {
                    l.results().iter().map(|customer| {
                        let id = customer.id();
                        let label = format!("{} ({})", customer.title(), customer.phone);
                        view! {
                            <li>
                                <button type="button" on:click=move |_| choose(id)>{label}</button>
                            </li>
                        }
                    }).collect_view()
                })}
            </ul>
        </div>
    }
}
