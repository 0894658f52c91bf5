use dioxus::prelude::*;
use fitness::{DiaryDraft, PickedPhoto};
use uuid::Uuid;

use crate::alerts::{show_alert, show_error, use_alerts, AlertLevel};
use crate::backend::use_backend;
use crate::icons::{FaClockRotateLeft, FaXmark};
use crate::views::{PhotoInput, ScreenHeader};
use crate::Icon;

/// New or edited diary entry: note, tags and one photo.
#[component]
pub fn DiaryEntryView(editing: Option<Uuid>, on_back: EventHandler<()>, on_open_history: EventHandler<()>) -> Element {
    let backend = use_backend();
    let mut alerts = use_alerts();
    let mut draft = use_signal(DiaryDraft::new);
    let mut saving = use_signal(|| false);

    let loader = use_resource({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            async move {
                let Some(id) = editing else {
                    return Ok(());
                };
                match backend.load_entry(id).await? {
                    Some(entry) => draft.set(DiaryDraft::from_entry(&entry)),
                    None => tracing::warn!(%id, "edited diary entry not found"),
                }
                Ok::<(), api::ApiError>(())
            }
        }
    });

    let handle_save = move |_| {
        let backend = backend.clone();
        async move {
            let current = draft();
            if let Err(e) = current.validate() {
                show_alert(&mut alerts, AlertLevel::Error, "Nothing to save", &e.to_string());
                return;
            }
            saving.set(true);
            let result = backend.save_entry(&current, editing).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    show_alert(&mut alerts, AlertLevel::Success, "Saved", "Your diary entry has been saved.");
                    on_open_history.call(());
                }
                Err(e) => show_error(&mut alerts, "Could not save the entry", &e),
            }
        }
    };

    let title = if editing.is_some() { "Edit entry" } else { "New entry" }.to_string();
    let photo_label = if draft.read().has_photo() { "Change photo" } else { "Add photo" }.to_string();
    let preview = {
        let d = draft.read();
        d.picked_photo
            .as_ref()
            .map(|p| p.data_uri())
            .or_else(|| d.existing_photo_url.clone())
    };
    let tags = draft.read().tags().to_vec();

    match &*loader.read() {
        Some(Err(e)) => {
            return rsx! {
                ScreenHeader { title: title.clone(), on_back: move |_| on_back.call(()) }
                p { class: "error-text", "{e.user_message()}" }
            };
        }
        None if editing.is_some() => {
            return rsx! {
                ScreenHeader { title: title.clone(), on_back: move |_| on_back.call(()) }
                p { class: "muted", "Loading..." }
            };
        }
        _ => {}
    }

    rsx! {
        ScreenHeader { title, on_back: move |_| on_back.call(()) }
        button {
            class: "btn btn-outline",
            onclick: move |_| on_open_history.call(()),
            Icon { icon: FaClockRotateLeft, width: 16, height: 16 }
            "History"
        }
        div {
            class: "field",
            label { r#for: "diary-note", "What did you eat?" }
            textarea {
                id: "diary-note",
                value: draft.read().note.clone(),
                oninput: move |evt: FormEvent| draft.write().note = evt.value(),
            }
        }
        div {
            class: "field",
            label { r#for: "diary-tag", "Tags" }
            div {
                class: "card-row",
                input {
                    id: "diary-tag",
                    r#type: "text",
                    placeholder: "breakfast, homemade...",
                    value: draft.read().tag_input.clone(),
                    oninput: move |evt: FormEvent| draft.write().tag_input = evt.value(),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            draft.write().add_tag();
                        }
                    },
                }
                button {
                    class: "btn btn-outline",
                    onclick: move |_| {
                        draft.write().add_tag();
                    },
                    "Add"
                }
            }
            div {
                class: "tags",
                for tag in tags {
                    span {
                        key: "{tag}",
                        class: "tag",
                        "{tag}"
                        button {
                            title: "Remove tag",
                            onclick: {
                                let tag = tag.clone();
                                move |_| draft.write().remove_tag(&tag)
                            },
                            Icon { icon: FaXmark, width: 10, height: 10 }
                        }
                    }
                }
            }
        }
        div {
            class: "field",
            if let Some(src) = preview {
                img { class: "photo-preview", src: "{src}" }
                button {
                    class: "btn btn-outline",
                    onclick: move |_| draft.write().clear_photo(),
                    "Remove photo"
                }
            }
            PhotoInput {
                label: photo_label,
                disabled: saving(),
                on_pick: move |photo: PickedPhoto| draft.write().set_photo(photo),
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
