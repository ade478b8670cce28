//! Workshop Admin App
//!
//! Tab bar on top, one resource screen below, toasts and the log panel on
//! the side.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use workshop_core::models::Part;
use workshop_core::{AppConfig, DataSource, PageRequest};

use crate::api::RestSource;
use crate::components::{LogPanel, ResourcePage, ToastStack};
use crate::context::AppContext;
use crate::resources;
use crate::store::{AppState, AppStateStoreFields, Tab};

/// Records fetched for the line-item parts catalog
const CATALOG_SIZE: usize = 500;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(config, signal(Vec::new()));
    let store = Store::new(AppState::default());

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    // Reload the parts catalog when it is invalidated
    Effect::new(move |_| {
        let version = store.parts_version().get();
        let source = RestSource::<Part>::new(&ctx.api_base());
        spawn_local(async move {
            match source.fetch_page(&PageRequest::first(CATALOG_SIZE)).await {
                Ok(page) => {
                    log::debug!("[APP] parts catalog v{}: {} parts", version, page.items.len());
                    store.parts().set(page.items);
                }
                Err(err) => log::warn!("[APP] parts catalog failed to load: {}", err),
            }
        });
    });

    let active = move || store.active_tab().get();

    view! {
        <div class="app-layout">
            <nav class="tab-bar">
                {Tab::ALL
                    .iter()
                    .map(|&tab| {
                        let tab_class = move || if active() == tab { "tab active" } else { "tab" };
                        view! {
                            <button class=tab_class on:click=move |_| store.active_tab().set(tab)>
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <main class="main-content">
                {move || match active() {
                    Tab::Jobs => view! { <ResourcePage descriptor=resources::jobs() /> }.into_any(),
                    Tab::Customers => view! { <ResourcePage descriptor=resources::customers() /> }.into_any(),
                    Tab::Vehicles => view! { <ResourcePage descriptor=resources::vehicles() /> }.into_any(),
                    Tab::Parts => view! { <ResourcePage descriptor=resources::parts() /> }.into_any(),
                    Tab::PurchaseOrders => {
                        view! { <ResourcePage descriptor=resources::purchase_orders() /> }.into_any()
                    }
                    Tab::Suppliers => view! { <ResourcePage descriptor=resources::suppliers() /> }.into_any(),
                    Tab::Users => view! { <ResourcePage descriptor=resources::users() /> }.into_any(),
                    Tab::Roles => view! { <ResourcePage descriptor=resources::roles() /> }.into_any(),
                }}
            </main>

            <aside class="side-column">
                <LogPanel />
            </aside>

            <ToastStack />
        </div>
    }
}
