use dioxus::prelude::*;

use crate::auth::{use_auth, AuthState};
use crate::backend::use_backend;

/// Email and password sign-in. Reports whether the profile is complete.
#[component]
pub fn LoginView(on_signed_in: EventHandler<bool>) -> Element {
    let backend = use_backend();
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |_| {
        let backend = backend.clone();
        async move {
            if email().trim().is_empty() || password().is_empty() {
                error.set(Some("Enter your email and password".to_string()));
                return;
            }
            error.set(None);
            loading.set(true);
            let result = match backend.sign_in_with_password(&email(), &password()).await {
                Ok(_) => AuthState::fetch(&backend).await,
                Err(e) => Err(e),
            };
            loading.set(false);
            match result {
                Ok(state) => {
                    let complete = state.profile_complete();
                    auth.set(state);
                    password.set(String::new());
                    on_signed_in.call(complete);
                }
                Err(e) => {
                    tracing::error!("sign-in failed: {e}");
                    error.set(Some(e.user_message()));
                }
            }
        }
    };

    rsx! {
        div {
            h1 { "Sign in" }
            div {
                class: "field",
                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    r#type: "email",
                    autocomplete: "email",
                    placeholder: "you@example.com",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
            }
            div {
                class: "field",
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
            }
            if let Some(message) = error() {
                p { class: "error-text", "{message}" }
            }
            button {
                class: "btn btn-primary",
                disabled: loading(),
                onclick: handle_submit,
                if loading() { "Signing in..." } else { "Sign in" }
            }
        }
    }
}
