use dioxus::prelude::*;

const FEATURES: [(&str, &str); 4] = [
    ("Food diary", "Photograph meals and tag them, one entry a day keeps the series going."),
    ("Progress", "Track weight and body measurements against your goal."),
    ("Courses", "Short lessons on nutrition, habits and movement."),
    ("Daily menu", "A meal plan that matches your goal."),
];

#[component]
pub fn OnboardingView(on_continue: EventHandler<()>) -> Element {
    rsx! {
        div {
            h1 { "FitTrack" }
            p { class: "muted", "Your weight goal, one day at a time." }
            for (title, text) in FEATURES {
                div {
                    key: "{title}",
                    class: "card",
                    h2 { "{title}" }
                    p { class: "muted", "{text}" }
                }
            }
            button {
                class: "btn btn-primary",
                onclick: move |_| on_continue.call(()),
                "Continue"
            }
        }
    }
}
