use dioxus::prelude::*;

use crate::icons::FaArrowLeft;
use crate::Icon;

/// Screen title with an optional back button.
#[component]
pub fn ScreenHeader(title: String, on_back: Option<EventHandler<()>>) -> Element {
    rsx! {
        header {
            class: "screen-header",
            if let Some(on_back) = on_back {
                button {
                    class: "icon-button",
                    title: "Back",
                    onclick: move |_| on_back.call(()),
                    Icon { icon: FaArrowLeft, width: 18, height: 18 }
                }
            }
            h1 { "{title}" }
        }
    }
}
