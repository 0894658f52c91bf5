use dioxus::prelude::*;
use fitness::{GraphSeries, MeasurementType};

use crate::backend::use_backend;
use crate::views::ScreenHeader;

const WIDTH: f64 = 300.0;
const HEIGHT: f64 = 200.0;
const PAD: f64 = 12.0;

fn plot(series: &GraphSeries) -> Vec<(f64, f64)> {
    series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = PAD + series.x(i) * (WIDTH - 2.0 * PAD);
            let y = HEIGHT - PAD - p.y * (HEIGHT - 2.0 * PAD);
            (x, y)
        })
        .collect()
}

#[component]
pub fn MeasurementGraphView(
    kind: MeasurementType,
    on_back: EventHandler<()>,
    on_open_measurements: EventHandler<()>,
) -> Element {
    let backend = use_backend();
    let mut selected = use_signal(move || kind);
    let series = use_resource(move || {
        let backend = backend.clone();
        let kind = selected();
        async move {
            let measurements = backend.list_measurements(Some(kind)).await?;
            Ok::<_, api::ApiError>(GraphSeries::build(&measurements, kind))
        }
    });

    let current = selected();

    rsx! {
        ScreenHeader { title: "{current.label()}", on_back: move |_| on_back.call(()) }
        div {
            class: "tags",
            for option_kind in MeasurementType::ALL {
                button {
                    key: "{option_kind}",
                    class: if option_kind == current { "choice selected" } else { "choice" },
                    onclick: move |_| selected.set(option_kind),
                    "{option_kind.label()}"
                }
            }
        }
        match &*series.read() {
            None => rsx! { p { class: "muted", "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "error-text", "{e.user_message()}" } },
            Some(Ok(None)) => rsx! {
                p { class: "muted", "No measurements yet." }
            },
            Some(Ok(Some(graph))) => {
                let coords = plot(graph);
                let line = coords
                    .iter()
                    .map(|(x, y)| format!("{x:.1},{y:.1}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                let unit = graph.kind.unit();
                let sign = if graph.change > 0.0 { "+" } else { "" };
                let min = format!("Min {:.1} {unit}", graph.min);
                let max = format!("Max {:.1} {unit}", graph.max);
                let change = format!("Change: {sign}{:.1} {unit}", graph.change);
                rsx! {
                    div {
                        class: "card",
                        svg {
                            class: "graph",
                            view_box: "0 0 {WIDTH} {HEIGHT}",
                            polyline { points: "{line}" }
                            for (i, (x, y)) in coords.iter().copied().enumerate() {
                                circle { key: "{i}", cx: "{x}", cy: "{y}", r: "3" }
                            }
                        }
                        div {
                            class: "card-row",
                            span { class: "muted", "{min}" }
                            span { class: "muted", "{max}" }
                        }
                        p { "{change}" }
                    }
                }
            }
        }
        button {
            class: "btn btn-outline",
            onclick: move |_| on_open_measurements.call(()),
            "All measurements"
        }
    }
}
