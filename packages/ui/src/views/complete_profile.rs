use dioxus::prelude::*;
use fitness::{CompleteProfileForm, Goal};

use crate::alerts::{show_alert, show_error, use_alerts, AlertLevel};
use crate::auth::{use_auth, AuthState};
use crate::backend::use_backend;

/// First-run form: name, goal, starting and target weight.
#[component]
pub fn CompleteProfileView(on_submitted: EventHandler<()>) -> Element {
    let backend = use_backend();
    let mut auth = use_auth();
    let mut alerts = use_alerts();
    let mut form = use_signal(CompleteProfileForm::default);
    let mut saving = use_signal(|| false);

    let handle_submit = move |_| {
        let backend = backend.clone();
        async move {
            let payload = match form.read().validate() {
                Ok(payload) => payload,
                Err(e) => {
                    show_alert(&mut alerts, AlertLevel::Error, "Check your profile", &e.to_string());
                    return;
                }
            };
            saving.set(true);
            let result = backend.complete_profile(&payload).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    match AuthState::fetch(&backend).await {
                        Ok(state) => auth.set(state),
                        Err(e) => tracing::warn!("reloading profile failed: {e}"),
                    }
                    on_submitted.call(());
                }
                Err(e) => show_error(&mut alerts, "Could not save your profile", &e),
            }
        }
    };

    let selected = form.read().goal;
    let target_hint = match selected {
        Some(Goal::Maintenance) => "Optional, defaults to your current weight",
        Some(Goal::WeightLoss) => "Below your current weight",
        Some(Goal::Gain) => "Above your current weight",
        None => "",
    };

    rsx! {
        div {
            h1 { "About you" }
            div {
                class: "field",
                label { r#for: "profile-name", "Name" }
                input {
                    id: "profile-name",
                    r#type: "text",
                    value: form.read().name.clone(),
                    oninput: move |evt: FormEvent| form.write().name = evt.value(),
                }
            }
            div {
                class: "field",
                label { "Goal" }
                div {
                    class: "choice-list",
                    for goal in Goal::ALL {
                        button {
                            key: "{goal}",
                            class: if selected == Some(goal) { "choice selected" } else { "choice" },
                            onclick: move |_| form.write().goal = Some(goal),
                            "{goal.label()}"
                        }
                    }
                }
            }
            div {
                class: "field",
                label { r#for: "profile-weight", "Current weight, kg" }
                input {
                    id: "profile-weight",
                    r#type: "text",
                    inputmode: "decimal",
                    value: form.read().weight.clone(),
                    oninput: move |evt: FormEvent| form.write().weight = evt.value(),
                }
            }
            div {
                class: "field",
                label { r#for: "profile-target", "Target weight, kg" }
                input {
                    id: "profile-target",
                    r#type: "text",
                    inputmode: "decimal",
                    value: form.read().target_weight.clone(),
                    oninput: move |evt: FormEvent| form.write().target_weight = evt.value(),
                }
                if !target_hint.is_empty() {
                    p { class: "muted", "{target_hint}" }
                }
            }
            button {
                class: "btn btn-primary",
                disabled: saving(),
                onclick: handle_submit,
                if saving() { "Saving..." } else { "Continue" }
            }
        }
    }
}
