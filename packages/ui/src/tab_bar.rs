//! Bottom tab bar shown on the main screens.

use dioxus::prelude::*;
use fitness::Tab;

use crate::icons::{FaBook, FaChartLine, FaGraduationCap, FaHouse, FaUser};
use crate::Icon;

#[component]
pub fn TabBar(active: Tab, on_select: EventHandler<Tab>) -> Element {
    rsx! {
        nav {
            class: "tab-bar",
            for tab in Tab::ALL {
                button {
                    key: "{tab.label()}",
                    class: if tab == active { "tab active" } else { "tab" },
                    onclick: move |_| on_select.call(tab),
                    TabIcon { tab }
                    span { "{tab.label()}" }
                }
            }
        }
    }
}

#[component]
fn TabIcon(tab: Tab) -> Element {
    match tab {
        Tab::Home => rsx! { Icon { icon: FaHouse, width: 20, height: 20 } },
        Tab::Courses => rsx! { Icon { icon: FaGraduationCap, width: 20, height: 20 } },
        Tab::Diary => rsx! { Icon { icon: FaBook, width: 20, height: 20 } },
        Tab::Progress => rsx! { Icon { icon: FaChartLine, width: 20, height: 20 } },
        Tab::Profile => rsx! { Icon { icon: FaUser, width: 20, height: 20 } },
    }
}
