use dioxus::prelude::*;
use fitness::measurements::latest_by_type;
use fitness::validation::validate_measurement;
use fitness::MeasurementType;

use crate::alerts::{show_alert, show_error, use_alerts, AlertLevel};
use crate::backend::use_backend;
use crate::icons::FaChartLine;
use crate::views::ScreenHeader;
use crate::Icon;

#[component]
pub fn BodyMeasurementsView(on_back: EventHandler<()>, on_open_graph: EventHandler<MeasurementType>) -> Element {
    let backend = use_backend();
    let mut alerts = use_alerts();
    let mut kind = use_signal(MeasurementType::default);
    let mut value = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let mut measurements = use_resource({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            async move { backend.list_measurements(None).await }
        }
    });

    let handle_add = move |_| {
        let backend = backend.clone();
        async move {
            let parsed = match validate_measurement(&value()) {
                Ok(v) => v,
                Err(e) => {
                    show_alert(&mut alerts, AlertLevel::Error, "Check the value", &e.to_string());
                    return;
                }
            };
            saving.set(true);
            let result = backend.add_measurement(kind(), parsed).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    value.set(String::new());
                    measurements.restart();
                }
                Err(e) => show_error(&mut alerts, "Could not save the measurement", &e),
            }
        }
    };

    let selected = kind();

    rsx! {
        ScreenHeader { title: "Body measurements", on_back: move |_| on_back.call(()) }
        div {
            class: "card",
            h2 { "New measurement" }
            div {
                class: "field",
                label { r#for: "measure-kind", "Type" }
                select {
                    id: "measure-kind",
                    onchange: move |evt: FormEvent| {
                        if let Ok(parsed) = evt.value().parse::<MeasurementType>() {
                            kind.set(parsed);
                        }
                    },
                    for option_kind in MeasurementType::ALL {
                        option {
                            key: "{option_kind}",
                            value: "{option_kind}",
                            selected: option_kind == selected,
                            "{option_kind.label()}"
                        }
                    }
                }
            }
            div {
                class: "field",
                label { r#for: "measure-value", "Value, {selected.unit()}" }
                input {
                    id: "measure-value",
                    r#type: "text",
                    inputmode: "decimal",
                    value: value(),
                    oninput: move |evt: FormEvent| value.set(evt.value()),
                }
            }
            button {
                class: "btn btn-primary",
                disabled: saving(),
                onclick: handle_add,
                if saving() { "Saving..." } else { "Add" }
            }
        }
        match &*measurements.read() {
            None => rsx! { p { class: "muted", "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "error-text", "{e.user_message()}" } },
            Some(Ok(list)) => {
                let latest = latest_by_type(list);
                rsx! {
                    for row_kind in MeasurementType::ALL {
                        div {
                            key: "{row_kind}",
                            class: "card card-row",
                            onclick: move |_| on_open_graph.call(row_kind),
                            span { "{row_kind.label()}" }
                            span {
                                class: "muted",
                                {
                                    latest
                                        .get(&row_kind)
                                        .map(|m| format!("{:.1} {}", m.value, m.unit))
                                        .unwrap_or_else(|| "-".to_string())
                                }
                            }
                            Icon { icon: FaChartLine, width: 14, height: 14 }
                        }
                    }
                }
            }
        }
    }
}
