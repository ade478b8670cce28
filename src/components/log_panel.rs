//! Log Panel Component
//!
//! Footer toggle showing the recent records kept by the console logger.

use leptos::prelude::*;

const RECENT: usize = 100;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (open, set_open) = signal(false);
    let (lines, set_lines) = signal(String::new());

    let toggle = move |_| {
        let opening = !open.get_untracked();
        if opening {
            set_lines.set(console_logger::dump(RECENT));
        }
        set_open.set(opening);
    };

    view! {
        <footer class="log-panel">
            <button class="log-toggle" on:click=toggle>
                {move || if open.get() { "Hide log" } else { "Show log" }}
            </button>
            <Show when=move || open.get()>
                <pre class="log-lines">{move || lines.get()}</pre>
            </Show>
        </footer>
    }
}
