use dioxus::prelude::*;
use fitness::menu::{daily_menu, total_kcal};

use crate::auth::use_auth;
use crate::views::ScreenHeader;

#[component]
pub fn DailyMenuView(on_back: EventHandler<()>) -> Element {
    let auth = use_auth();
    let goal = auth.read().profile.as_ref().and_then(|p| p.goal);
    let meals = daily_menu(goal);
    let kcal = total_kcal(meals);
    let plan = goal.map(|g| g.label()).unwrap_or("Maintain weight");

    rsx! {
        ScreenHeader { title: "Menu for today", on_back: move |_| on_back.call(()) }
        p { class: "muted", "{plan} · {kcal} kcal" }
        for meal in meals {
            div {
                key: "{meal.name}",
                class: "card",
                div {
                    class: "card-row",
                    h2 { "{meal.name}" }
                    span { class: "muted", "{meal.kcal} kcal" }
                }
                p { "{meal.dish}" }
            }
        }
    }
}
