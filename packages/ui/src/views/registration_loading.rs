use dioxus::prelude::*;
use fitness::CompletionLatch;

use crate::timers::run_registration_completion;

/// Animated bar shown while the new account is "prepared". Calls
/// `on_complete` once when the animation has finished.
#[component]
pub fn RegistrationLoadingView(on_complete: EventHandler<()>) -> Element {
    let latch = use_hook(CompletionLatch::new);

    use_future(move || {
        let latch = latch.clone();
        async move {
            run_registration_completion(latch, move || on_complete.call(())).await;
        }
    });

    rsx! {
        div {
            class: "screen-loading",
            div {
                class: "card",
                style: "width: 100%",
                h2 { "Setting up your plan" }
                p { class: "muted", "Calculating your goal and daily menu..." }
                div {
                    class: "progress-track",
                    div { class: "registration-fill" }
                }
            }
        }
    }
}
