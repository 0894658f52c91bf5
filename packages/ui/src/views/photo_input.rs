use std::path::Path;

use dioxus::prelude::*;
use fitness::PickedPhoto;

use crate::alerts::{show_alert, use_alerts, AlertLevel};
use crate::icons::FaCamera;
use crate::Icon;

/// Button that opens the platform image picker.
#[component]
pub fn PhotoInput(label: String, #[props(default)] disabled: bool, on_pick: EventHandler<PickedPhoto>) -> Element {
    let mut alerts = use_alerts();

    rsx! {
        label {
            class: "btn btn-outline",
            Icon { icon: FaCamera, width: 16, height: 16 }
            "{label}"
            input {
                r#type: "file",
                accept: "image/*",
                style: "display: none",
                disabled,
                onchange: move |evt: FormEvent| async move {
                    let Some(engine) = evt.files() else {
                        return;
                    };
                    let Some(name) = engine.files().into_iter().next() else {
                        return;
                    };
                    match engine.read_file(&name).await {
                        Some(bytes) => on_pick.call(PickedPhoto::from_path(Path::new(&name), bytes)),
                        None => show_alert(
                            &mut alerts,
                            AlertLevel::Error,
                            "Photo",
                            "Could not read the selected image.",
                        ),
                    }
                },
            }
        }
    }
}
