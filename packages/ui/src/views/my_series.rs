use chrono::{Duration, Local};
use dioxus::prelude::*;
use fitness::diary::{has_entry_on, series};

use crate::backend::use_backend;
use crate::views::ScreenHeader;

/// Days shown in the recent-activity grid.
const RECENT_DAYS: i64 = 28;

#[component]
pub fn MySeriesView(on_back: EventHandler<()>) -> Element {
    let backend = use_backend();
    let entries = use_resource(move || {
        let backend = backend.clone();
        async move { backend.list_entries().await }
    });

    rsx! {
        ScreenHeader { title: "My series", on_back: move |_| on_back.call(()) }
        match &*entries.read() {
            None => rsx! { p { class: "muted", "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "error-text", "{e.user_message()}" } },
            Some(Ok(entries)) => {
                let today = Local::now().date_naive();
                let stats = series(entries, today);
                let days: Vec<_> = (0..RECENT_DAYS)
                    .rev()
                    .map(|back| {
                        let day = today - Duration::days(back);
                        (day, has_entry_on(entries, day))
                    })
                    .collect();
                rsx! {
                    div {
                        class: "card card-accent",
                        h2 { "{stats.current} days in a row" }
                        p { class: "muted", "Best series: {stats.longest} days" }
                        p { class: "muted", "Days with an entry: {stats.active_days}" }
                    }
                    div {
                        class: "card",
                        h2 { "Last four weeks" }
                        div {
                            class: "streak-grid",
                            for (day, active) in days {
                                div {
                                    key: "{day}",
                                    class: if active { "streak-day active" } else { "streak-day" },
                                    {day.format("%d").to_string()}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
