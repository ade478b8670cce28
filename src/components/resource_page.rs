//! Resource Page Component
//!
//! One screen per resource: the list controller, view router and form
//! controller of a record type wired to the REST source. Async work runs in
//! `spawn_local`; results go back to the controllers through their tickets.

use leptos::prelude::*;
use leptos::task::spawn_local;

use workshop_core::{
    ApplyOutcome, DataSource, Editable, Entity, FetchTicket, FormController, ListController, Tabular, ViewEvent,
    ViewRouter,
};

use super::{CalendarView, DataTable, DetailPanel, EntityForm, ListToolbar, Pagination};
use crate::api::{Resource, RestSource};
use crate::context::{use_app_context, BrowserConfirm};
use crate::resources::ResourceDescriptor;
use crate::store::{store_catalog, store_invalidate_parts, use_app_store};

/// Apply a list change and return the fetch it asks for
fn issue<T: Resource>(
    list: RwSignal<ListController<T>>,
    change: impl FnOnce(&mut ListController<T>) -> Option<FetchTicket>,
) -> Option<FetchTicket> {
    list.try_update(change).flatten()
}

#[component]
pub fn ResourcePage<T: Resource>(descriptor: ResourceDescriptor<T>) -> impl IntoView
where
    T::Id: Send + Sync,
{
    let ctx = use_app_context();
    let store = use_app_store();
    let source = StoredValue::new_local(RestSource::<T>::new(&ctx.api_base()));
    let list = RwSignal::new(ListController::<T>::new(descriptor.plural, ctx.page_size()));
    let router = RwSignal::new(match descriptor.schedule {
        Some(_) => ViewRouter::<T>::with_calendar(),
        None => ViewRouter::<T>::new(),
    });
    let form = RwSignal::new(None::<FormController<T>>);

    // ========================
    // List fetching
    // ========================

    let run_fetch = move |ticket: FetchTicket| {
        let source = source.get_value();
        spawn_local(async move {
            let mut ticket = ticket;
            loop {
                let result = source.fetch_page(&ticket.request).await;
                match list.try_update(|l| l.apply(ticket, result, &ctx)) {
                    Some(ApplyOutcome::Refetch(next)) => ticket = next,
                    _ => break,
                }
            }
        });
    };

    if let Some(ticket) = list.try_update(|l| l.mount()) {
        run_fetch(ticket);
    }

    // ========================
    // View routing
    // ========================

    let open_form = move || {
        let editing = router.with_untracked(|r| r.editing().cloned());
        match FormController::for_editing(editing.as_ref()) {
            Ok(mut controller) => {
                if let Some(pricing) = descriptor.pricing {
                    controller.set_catalog(store_catalog(&store, pricing));
                }
                form.set(Some(controller));
            }
            Err(err) => log::warn!("[{}] cannot open form: {}", descriptor.plural, err),
        }
    };

    let send = move |event: ViewEvent<T>| {
        let Some(result) = router.try_update(|r| r.dispatch(event, &ctx)) else {
            return;
        };
        match result {
            Ok(transition) => {
                if transition.to == "form" {
                    open_form();
                } else if transition.from == "form" {
                    form.set(None);
                }
                if transition.refresh_list {
                    if let Some(ticket) = list.try_update(|l| l.refresh()) {
                        run_fetch(ticket);
                    }
                }
            }
            Err(err) => log::debug!("[{}] {}", descriptor.plural, err),
        }
    };

    // ========================
    // List actions
    // ========================

    let item_at = move |index: usize| list.with_untracked(|l| l.visible_items().get(index).map(|item| (*item).clone()));

    let delete = move |item: T| {
        if !list.with_untracked(|l| l.confirm_delete(&item, &BrowserConfirm)) {
            return;
        }
        let id = item.id();
        let source = source.get_value();
        spawn_local(async move {
            let result = source.delete(id).await;
            let removed = list.try_update(|l| l.apply_delete(id, result, &ctx)).unwrap_or(false);
            if !removed {
                return;
            }
            if descriptor.refreshes_catalog {
                store_invalidate_parts(&store);
            }
            let shown = router.with_untracked(|r| r.selected().map(|s| s.id()) == Some(id));
            if shown {
                send(ViewEvent::Deleted(id));
            }
        });
    };

    let on_search = Callback::new(move |term: String| {
        if let Some(ticket) = issue(list, |l| l.set_search(&term)) {
            run_fetch(ticket);
        }
    });
    let on_status = Callback::new(move |status: Option<String>| {
        if let Some(ticket) = issue(list, |l| l.set_status_filter(status)) {
            run_fetch(ticket);
        }
    });
    let on_category = Callback::new(move |category: Option<String>| {
        if let Some(ticket) = issue(list, |l| l.set_category_filter(category)) {
            run_fetch(ticket);
        }
    });
    let on_goto = Callback::new(move |index: usize| {
        if let Some(ticket) = issue(list, |l| l.goto_page(index)) {
            run_fetch(ticket);
        }
    });
    let on_view = Callback::new(move |index: usize| {
        if let Some(item) = item_at(index) {
            send(ViewEvent::View(item));
        }
    });
    let on_edit = Callback::new(move |index: usize| {
        if let Some(item) = item_at(index) {
            send(ViewEvent::Edit(item));
        }
    });
    let on_delete = Callback::new(move |index: usize| {
        if let Some(item) = item_at(index) {
            delete(item);
        }
    });
    let on_create = Callback::new(move |_: ()| send(ViewEvent::Create));
    let on_calendar = descriptor
        .schedule
        .map(|_| Callback::new(move |_: ()| send(ViewEvent::ShowCalendar)));

    let rows = Signal::derive(move || list.with(|l| l.visible_items().into_iter().map(|item| item.cells()).collect::<Vec<_>>()));
    let empty_message = Signal::derive(move || list.with(|l| l.empty_message()));
    let loading = Signal::derive(move || list.with(|l| l.is_loading()));
    let pagination = Signal::derive(move || list.with(|l| l.pagination()));
    let search = Signal::derive(move || list.with(|l| l.request().search_term.clone()));
    let page_items = Signal::derive(move || list.with(|l| l.items().to_vec()));

    // ========================
    // Form actions
    // ========================

    let on_submit = Callback::new(move |_: ()| {
        let Some(ticket) = form.try_update(|f| f.as_mut().and_then(|f| f.begin_submit())).flatten() else {
            return;
        };
        let source = source.get_value();
        spawn_local(async move {
            let result = ticket.execute::<T, _>(&source).await;
            let event = form
                .try_update(|f| f.as_mut().and_then(|f| f.finish_submit(result, &ctx)))
                .flatten();
            if let Some(event) = event {
                if descriptor.refreshes_catalog {
                    store_invalidate_parts(&store);
                }
                send(event);
            }
        });
    });
    let on_cancel = Callback::new(move |_: ()| {
        let event = form
            .try_update(|f| f.as_mut().map(|f| f.cancel()))
            .flatten()
            .unwrap_or(ViewEvent::Cancel);
        send(event);
    });

    // ========================
    // Detail actions
    // ========================

    let selected = Memo::new(move |_| router.with(|r| r.selected().cloned()));
    let on_detail_edit = Callback::new(move |_: ()| send(ViewEvent::EditSelected));
    let on_detail_back = Callback::new(move |_: ()| send(ViewEvent::Back));
    let on_detail_delete = Callback::new(move |_: ()| {
        if let Some(item) = selected.get_untracked() {
            delete(item);
        }
    });
    let on_detail_refresh = Callback::new(move |_: ()| {
        let Some(id) = selected.with_untracked(|s| s.as_ref().map(|item| item.id())) else {
            return;
        };
        let source = source.get_value();
        spawn_local(async move {
            let fresh = source.get(id).await;
            let transition = router.try_update(|r| r.refresh_selected(fresh, &ctx)).flatten();
            if transition.is_some_and(|t| t.refresh_list) {
                if let Some(ticket) = list.try_update(|l| l.refresh()) {
                    run_fetch(ticket);
                }
            }
        });
    });

    let mode = Memo::new(move |_| router.with(|r| r.state().name()));

    view! {
        <section class="resource-page">
            {move || match mode.get() {
                "form" => view! {
                    <EntityForm form=form on_submit=on_submit on_cancel=on_cancel />
                }
                .into_any(),
                "detail" => view! {
                    <DetailPanel
                        heading=Signal::derive(move || selected.get().map(|item| item.title()).unwrap_or_default())
                        fields=Signal::derive(move || selected.get().map(|item| item.details()).unwrap_or_default())
                        line_items=Signal::derive(move || selected.get().map(|item| item.seed_line_items()).unwrap_or_default())
                        on_edit=on_detail_edit
                        on_delete=on_detail_delete
                        on_refresh=on_detail_refresh
                        on_back=on_detail_back
                    />
                }
                .into_any(),
                "calendar" => match descriptor.schedule {
                    Some(schedule) => view! {
                        <CalendarView
                            items=page_items
                            schedule=schedule
                            on_select=Callback::new(move |item: T| send(ViewEvent::SelectFromCalendar(item)))
                            on_back=Callback::new(move |_: ()| send(ViewEvent::Back))
                        />
                    }
                    .into_any(),
                    None => ().into_any(),
                },
                _ => view! {
                    <div class="list-view">
                        <ListToolbar
                            title=descriptor.title
                            statuses=descriptor.statuses
                            categories=descriptor.categories
                            search=search
                            on_search=on_search
                            on_status=on_status
                            on_category=on_category
                            on_create=on_create
                            on_calendar=on_calendar
                        />
                        <DataTable
                            columns=T::columns()
                            rows=rows
                            empty_message=empty_message
                            loading=loading
                            on_view=on_view
                            on_edit=on_edit
                            on_delete=on_delete
                        />
                        <Pagination model=pagination on_goto=on_goto />
                    </div>
                }
                .into_any(),
            }}
        </section>
    }
}
