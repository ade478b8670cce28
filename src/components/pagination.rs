//! Pagination Component

use leptos::prelude::*;

use workshop_core::PaginationView;

/// Previous / page links / Next. Renders nothing for a single page.
#[component]
pub fn Pagination(
    #[prop(into)] model: Signal<Option<PaginationView>>,
    #[prop(into)] on_goto: Callback<usize>,
) -> impl IntoView {
    move || {
        model.get().map(|p| {
            let current = p.current;
            view! {
                <nav class="pagination">
                    <button
                        class="page-btn"
                        disabled={!p.previous_enabled}
                        on:click=move |_| on_goto.run(current.saturating_sub(1))
                    >
                        "Previous"
                    </button>
                    {p.pages.iter().map(|&index| {
                        let class = if index == current { "page-link active" } else { "page-link" };
                        view! {
                            <button class=class on:click=move |_| on_goto.run(index)>
                                {PaginationView::label(index)}
                            </button>
                        }
                    }).collect_view()}
                    <button
                        class="page-btn"
                        disabled={!p.next_enabled}
                        on:click=move |_| on_goto.run(current + 1)
                    >
                        "Next"
                    </button>
                </nav>
            }
        })
    }
}
