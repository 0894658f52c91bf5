use dioxus::prelude::*;
use fitness::{goal_progress, MeasurementType};

use crate::auth::use_auth;
use crate::backend::use_backend;
use crate::icons::{FaChartLine, FaFire, FaRulerVertical, FaTrophy};
use crate::views::ScreenHeader;
use crate::Icon;

#[component]
pub fn ProgressView(
    on_back: EventHandler<()>,
    on_open_rewards: EventHandler<()>,
    on_open_series: EventHandler<()>,
    on_open_measurements: EventHandler<()>,
    on_open_graph: EventHandler<MeasurementType>,
) -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let latest = use_resource(move || {
        let backend = backend.clone();
        async move { backend.latest_weight().await }
    });

    let state = auth();
    let profile = state.profile.as_ref();
    let initial = profile.and_then(|p| p.initial_weight);
    let target = profile.and_then(|p| p.target_weight);
    let goal = profile.and_then(|p| p.goal);

    rsx! {
        ScreenHeader { title: "Progress", on_back: move |_| on_back.call(()) }
        div {
            class: "card",
            onclick: move |_| on_open_graph.call(MeasurementType::Weight),
            h2 { "Weight goal" }
            match &*latest.read() {
                None => rsx! { p { class: "muted", "Loading..." } },
                Some(Err(e)) => rsx! { p { class: "error-text", "{e.user_message()}" } },
                Some(Ok(current)) => {
                    let progress = goal_progress(*current, initial, target, goal);
                    let width = format!("width: {}%", progress.percent);
                    let remaining = format!("{:.1} kg to go", progress.remaining);
                    let now = current.map(|w| format!("{w:.1} kg")).unwrap_or_else(|| "-".to_string());
                    let aim = target.map(|w| format!("{w:.1} kg")).unwrap_or_else(|| "-".to_string());
                    rsx! {
                        div { class: "progress-track", div { class: "progress-fill", style: "{width}" } }
                        div {
                            class: "card-row",
                            span { "{progress.percent}%" }
                            span { class: "muted", "{remaining}" }
                        }
                        div {
                            class: "card-row",
                            span { class: "muted", "Now {now}" }
                            span { class: "muted", "Target {aim}" }
                        }
                    }
                }
            }
        }
        button {
            class: "btn btn-outline choice",
            onclick: move |_| on_open_measurements.call(()),
            Icon { icon: FaRulerVertical, width: 16, height: 16 }
            "Body measurements"
        }
        button {
            class: "btn btn-outline choice",
            onclick: move |_| on_open_graph.call(MeasurementType::Weight),
            Icon { icon: FaChartLine, width: 16, height: 16 }
            "Weight graph"
        }
        button {
            class: "btn btn-outline choice",
            onclick: move |_| on_open_series.call(()),
            Icon { icon: FaFire, width: 16, height: 16 }
            "My series"
        }
        button {
            class: "btn btn-outline choice",
            onclick: move |_| on_open_rewards.call(()),
            Icon { icon: FaTrophy, width: 16, height: 16 }
            "Rewards"
        }
    }
}
