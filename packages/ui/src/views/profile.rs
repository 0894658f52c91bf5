use dioxus::prelude::*;
use fitness::notifications::parse_reminder_time;
use fitness::{EditProfileForm, Goal, NotificationSettings, PickedPhoto, ReminderFrequency};

use crate::alerts::{show_alert, show_error, use_alerts, AlertLevel};
use crate::auth::{use_auth, AuthState};
use crate::backend::use_backend;
use crate::icons::{FaRightFromBracket, FaUser};
use crate::views::{ConfirmDialog, PhotoInput, ScreenHeader};
use crate::Icon;

/// Profile details, reminder preferences, avatar and logout.
#[component]
pub fn ProfileView(on_back: EventHandler<()>) -> Element {
    let auth = use_auth();
    let email = auth.read().user.as_ref().and_then(|u| u.email.clone()).unwrap_or_default();

    rsx! {
        ScreenHeader { title: "Profile", on_back: move |_| on_back.call(()) }
        AvatarCard { email }
        ProfileForm {}
        NotificationCard {}
        LogoutCard {}
    }
}

#[component]
fn AvatarCard(email: String) -> Element {
    let backend = use_backend();
    let mut alerts = use_alerts();
    let mut avatar_url = use_signal(|| Option::<String>::None);
    let mut uploading = use_signal(|| false);

    use_future({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            async move {
                match backend.find_avatar().await {
                    Ok(url) => avatar_url.set(url),
                    Err(e) => tracing::warn!("avatar lookup failed: {e}"),
                }
            }
        }
    });

    let handle_pick = move |photo: PickedPhoto| {
        let backend = backend.clone();
        spawn(async move {
            uploading.set(true);
            match backend.upload_avatar(&photo).await {
                Ok(url) => avatar_url.set(Some(url)),
                Err(e) => show_error(&mut alerts, "Could not upload the photo", &e),
            }
            uploading.set(false);
        });
    };

    let label = if uploading() { "Uploading..." } else { "Change photo" }.to_string();

    rsx! {
        div {
            class: "card card-row",
            if let Some(url) = avatar_url() {
                img { class: "avatar", src: "{url}" }
            } else {
                div { class: "avatar", Icon { icon: FaUser, width: 32, height: 32 } }
            }
            div {
                p { class: "muted", "{email}" }
                PhotoInput {
                    label,
                    disabled: uploading(),
                    on_pick: handle_pick,
                }
            }
        }
    }
}

fn form_from(state: &AuthState) -> EditProfileForm {
    let profile = state.profile.as_ref();
    EditProfileForm::prefill(
        profile.and_then(|p| p.name.as_deref()),
        profile.and_then(|p| p.goal),
        profile.and_then(|p| p.initial_weight),
        profile.and_then(|p| p.target_weight),
    )
}

#[component]
fn ProfileForm() -> Element {
    let backend = use_backend();
    let mut auth = use_auth();
    let mut alerts = use_alerts();
    let mut form = use_signal(|| form_from(&auth.read()));
    let mut saving = use_signal(|| false);

    let handle_save = move |_| {
        let backend = backend.clone();
        async move {
            let changes = match form.read().validate() {
                Ok(changes) => changes,
                Err(e) => {
                    show_alert(&mut alerts, AlertLevel::Error, "Check your profile", &e.to_string());
                    return;
                }
            };
            saving.set(true);
            let result = backend.update_profile(&changes).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    match AuthState::fetch(&backend).await {
                        Ok(state) => auth.set(state),
                        Err(e) => tracing::warn!("reloading profile failed: {e}"),
                    }
                    show_alert(&mut alerts, AlertLevel::Success, "Saved", "Your profile has been updated.");
                }
                Err(e) => show_error(&mut alerts, "Could not save your profile", &e),
            }
        }
    };

    let selected = form.read().goal;

    rsx! {
        div {
            class: "card",
            h2 { "Personal data" }
            div {
                class: "field",
                label { r#for: "edit-name", "Name" }
                input {
                    id: "edit-name",
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
                    for goal in EditProfileForm::GOALS {
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
                label { r#for: "edit-weight", "Starting weight, kg" }
                input {
                    id: "edit-weight",
                    r#type: "text",
                    inputmode: "decimal",
                    value: form.read().weight.clone(),
                    oninput: move |evt: FormEvent| form.write().weight = evt.value(),
                }
            }
            if selected != Some(Goal::Maintenance) {
                div {
                    class: "field",
                    label { r#for: "edit-target", "Target weight, kg" }
                    input {
                        id: "edit-target",
                        r#type: "text",
                        inputmode: "decimal",
                        value: form.read().target_weight.clone(),
                        oninput: move |evt: FormEvent| form.write().target_weight = evt.value(),
                    }
                }
            }
            button {
                class: "btn btn-primary",
                disabled: saving(),
                onclick: handle_save,
                if saving() { "Saving..." } else { "Save" }
            }
        }
    }
}

#[component]
fn NotificationCard() -> Element {
    let backend = use_backend();
    let mut alerts = use_alerts();
    let mut settings = use_signal(|| Option::<NotificationSettings>::None);
    // Last edit made on this screen, saved as soon as it is set.
    let pending = use_signal(|| Option::<NotificationSettings>::None);

    use_future({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            async move {
                match backend.load_notification_settings().await {
                    Ok(loaded) => settings.set(Some(loaded)),
                    Err(e) => {
                        tracing::error!("loading reminder settings failed: {e}");
                        settings.set(Some(NotificationSettings::default()));
                    }
                }
            }
        }
    });

    use_effect(move || {
        let Some(next) = pending() else {
            return;
        };
        let backend = backend.clone();
        spawn(async move {
            if let Err(e) = backend.save_notification_settings(&next).await {
                show_error(&mut alerts, "Could not save reminder settings", &e);
            }
        });
    });

    let Some(current) = settings() else {
        return rsx! {
            div { class: "card", h2 { "Reminders" } p { class: "muted", "Loading..." } }
        };
    };

    let update = move |next: NotificationSettings| {
        let (mut settings, mut pending) = (settings, pending);
        settings.set(Some(next));
        pending.set(Some(next));
    };
    let time_value = current.reminder_time.format("%H:%M").to_string();

    rsx! {
        div {
            class: "card",
            h2 { "Reminders" }
            div {
                class: "card-row field",
                label { r#for: "notify-enabled", "Notifications" }
                input {
                    id: "notify-enabled",
                    r#type: "checkbox",
                    checked: current.notifications_enabled,
                    onchange: move |evt: FormEvent| update(NotificationSettings {
                        notifications_enabled: evt.checked(),
                        ..current
                    }),
                }
            }
            div {
                class: "field",
                label { r#for: "notify-time", "Reminder time" }
                input {
                    id: "notify-time",
                    r#type: "time",
                    value: time_value,
                    onchange: move |evt: FormEvent| {
                        if let Some(reminder_time) = parse_reminder_time(&evt.value()) {
                            update(NotificationSettings { reminder_time, ..current });
                        }
                    },
                }
            }
            div {
                class: "field",
                label { r#for: "notify-frequency", "Frequency" }
                select {
                    id: "notify-frequency",
                    value: "{current.frequency.label()}",
                    onchange: move |evt: FormEvent| {
                        let frequency = ReminderFrequency::ALL
                            .into_iter()
                            .find(|f| f.label() == evt.value())
                            .unwrap_or_default();
                        update(NotificationSettings { frequency, ..current });
                    },
                    for frequency in ReminderFrequency::ALL {
                        option {
                            key: "{frequency}",
                            value: "{frequency.label()}",
                            selected: frequency == current.frequency,
                            "{frequency.label()}"
                        }
                    }
                }
            }
            div {
                class: "card-row field",
                label { r#for: "notify-diary", "Remind me to send the diary" }
                input {
                    id: "notify-diary",
                    r#type: "checkbox",
                    checked: current.send_diary_enabled,
                    onchange: move |evt: FormEvent| update(NotificationSettings {
                        send_diary_enabled: evt.checked(),
                        ..current
                    }),
                }
            }
        }
    }
}

#[component]
fn LogoutCard() -> Element {
    let backend = use_backend();
    let mut alerts = use_alerts();
    let mut confirming = use_signal(|| false);
    let mut busy = use_signal(|| false);

    // Navigation to login follows from the SIGNED_OUT event.
    let handle_logout = move |_| {
        let backend = backend.clone();
        spawn(async move {
            busy.set(true);
            let result = backend.sign_out().await;
            busy.set(false);
            confirming.set(false);
            if let Err(e) = result {
                show_error(&mut alerts, "Could not log out", &e);
            }
        });
    };

    rsx! {
        button {
            class: "btn btn-outline",
            onclick: move |_| confirming.set(true),
            Icon { icon: FaRightFromBracket, width: 16, height: 16 }
            "Log out"
        }
        if confirming() {
            ConfirmDialog {
                title: "Log out?",
                message: "You will need your email and password to sign in again.",
                confirm_label: "Log out",
                busy: busy(),
                on_confirm: handle_logout,
                on_cancel: move |_| confirming.set(false),
            }
        }
    }
}
