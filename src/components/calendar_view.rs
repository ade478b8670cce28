//! Calendar View Component
//!
//! Month grid of scheduled records from the current list page.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use leptos::prelude::*;

use workshop_core::calendar::{bucket_by, MonthCursor, WEEKDAYS};
use workshop_core::format::format_time;
use workshop_core::Entity;

/// Today's date from the browser clock
fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date()).unwrap_or_default()
}

#[component]
pub fn CalendarView<T>(
    #[prop(into)] items: Signal<Vec<T>>,
    schedule: fn(&T) -> Option<NaiveDateTime>,
    #[prop(into)] on_select: Callback<T>,
    #[prop(into)] on_back: Callback<()>,
) -> impl IntoView
where
    T: Entity + Send + Sync,
{
    let month = RwSignal::new(MonthCursor::containing(today()));

    let grid = move || {
        let cursor = month.get();
        items.with(|items| {
            let days = bucket_by(items, schedule);
            cursor
                .weeks()
                .into_iter()
                .flatten()
                .map(|slot| match slot {
                    None => view! { <div class="calendar-day outside"></div> }.into_any(),
                    Some(date) => {
                        let entries: Vec<T> = days
                            .get(&date)
                            .map(|bucket| bucket.iter().map(|item| (*item).clone()).collect())
                            .unwrap_or_default();
                        view! {
                            <div class="calendar-day">
                                <span class="calendar-date">{date.day()}</span>
                                {entries.into_iter().map(|item| {
                                    let time = schedule(&item).map(|at| format_time(at.time())).unwrap_or_default();
                                    let title = item.title();
                                    view! {
                                        <button class="calendar-entry" on:click=move |_| on_select.run(item.clone())>
                                            <span class="calendar-time">{time}</span>
                                            " "
                                            {title}
                                        </button>
                                    }
                                }).collect_view()}
                            </div>
                        }
                        .into_any()
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="calendar">
            <div class="calendar-header">
                <button class="back-btn" on:click=move |_| on_back.run(())>"← List"</button>
                <button on:click=move |_| month.update(|m| *m = m.previous())>"‹"</button>
                <h2>{move || month.get().title()}</h2>
                <button on:click=move |_| month.update(|m| *m = m.next())>"›"</button>
            </div>
            <div class="calendar-grid">
                {WEEKDAYS.iter().map(|day| view! { <div class="calendar-weekday">{day.to_string()}</div> }).collect_view()}
                {grid}
            </div>
        </div>
    }
}
