use chrono::Local;
use dioxus::prelude::*;
use fitness::diary::series;
use fitness::measurements::latest_value;
use fitness::rewards::{evaluate, ActivityStats};
use fitness::{goal_progress, MeasurementType, Profile};

use crate::auth::use_auth;
use crate::backend::{use_backend, AppBackend};
use crate::icons::{FaLock, FaTrophy};
use crate::views::ScreenHeader;
use crate::Icon;

async fn load_stats(backend: &AppBackend, profile: Option<Profile>) -> Result<ActivityStats, api::ApiError> {
    let entries = backend.list_entries().await?;
    let measurements = backend.list_measurements(None).await?;
    let lessons = backend.lesson_progress().await?;
    let goal = profile.map(|p| {
        goal_progress(
            latest_value(&measurements, MeasurementType::Weight),
            p.initial_weight,
            p.target_weight,
            p.goal,
        )
    });
    Ok(ActivityStats {
        diary_entries: entries.len(),
        series: series(&entries, Local::now().date_naive()),
        measurements: measurements.len(),
        lessons_completed: lessons.total_completed(),
        goal,
    })
}

#[component]
pub fn RewardsView(on_back: EventHandler<()>) -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let stats = use_resource(move || {
        let backend = backend.clone();
        let profile = auth.read().profile.clone();
        async move { load_stats(&backend, profile).await }
    });

    rsx! {
        ScreenHeader { title: "Rewards", on_back: move |_| on_back.call(()) }
        match &*stats.read() {
            None => rsx! { p { class: "muted", "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "error-text", "{e.user_message()}" } },
            Some(Ok(activity)) => {
                let statuses = evaluate(activity);
                let unlocked = statuses.iter().filter(|s| s.unlocked()).count();
                let total = statuses.len();
                rsx! {
                    p { class: "muted", "{unlocked} of {total} unlocked" }
                    for status in statuses {
                        div {
                            key: "{status.reward.id}",
                            class: if status.unlocked() { "card reward" } else { "card reward locked" },
                            if status.unlocked() {
                                Icon { icon: FaTrophy, width: 24, height: 24 }
                            } else {
                                Icon { icon: FaLock, width: 24, height: 24 }
                            }
                            div {
                                h2 { "{status.reward.title}" }
                                p { class: "muted", "{status.reward.description}" }
                                p { class: "muted", "{status.progress} / {status.reward.threshold}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
