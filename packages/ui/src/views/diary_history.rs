use dioxus::prelude::*;
use fitness::diary::sort_newest_first;
use uuid::Uuid;

use crate::backend::use_backend;
use crate::icons::{FaPen, FaPlus};
use crate::views::ScreenHeader;
use crate::Icon;

#[component]
pub fn DiaryHistoryView(on_back: EventHandler<()>, on_add: EventHandler<()>, on_edit: EventHandler<Uuid>) -> Element {
    let backend = use_backend();
    let entries = use_resource(move || {
        let backend = backend.clone();
        async move {
            let mut entries = backend.list_entries().await?;
            sort_newest_first(&mut entries);
            Ok::<_, api::ApiError>(entries)
        }
    });

    rsx! {
        ScreenHeader { title: "Diary", on_back: move |_| on_back.call(()) }
        button {
            class: "btn btn-primary",
            onclick: move |_| on_add.call(()),
            Icon { icon: FaPlus, width: 16, height: 16 }
            "New entry"
        }
        match &*entries.read() {
            None => rsx! { p { class: "muted", "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "error-text", "{e.user_message()}" } },
            Some(Ok(list)) if list.is_empty() => rsx! {
                p { class: "muted", "No entries yet. Your first one starts the series." }
            },
            Some(Ok(list)) => rsx! {
                for entry in list.iter().cloned() {
                    div {
                        key: "{entry.id}",
                        class: "card",
                        div {
                            class: "card-row",
                            span {
                                class: "muted",
                                {entry.created_at.with_timezone(&chrono::Local).format("%d.%m.%Y %H:%M").to_string()}
                            }
                            button {
                                class: "icon-button",
                                title: "Edit",
                                onclick: move |_| on_edit.call(entry.id),
                                Icon { icon: FaPen, width: 14, height: 14 }
                            }
                        }
                        if let Some(url) = entry.photo_url.clone() {
                            img { class: "photo-preview", src: "{url}" }
                        }
                        if let Some(note) = entry.note.clone() {
                            p { "{note}" }
                        }
                        div {
                            class: "tags",
                            for tag in entry.tags.iter() {
                                span { key: "{tag}", class: "tag", "{tag}" }
                            }
                        }
                    }
                }
            },
        }
    }
}
