use dioxus::prelude::*;
use fitness::courses::{CourseProgress, CATALOG};

use crate::alerts::{show_error, use_alerts};
use crate::backend::use_backend;
use crate::icons::FaCircleCheck;
use crate::views::ScreenHeader;
use crate::Icon;

#[component]
pub fn CoursesView(on_back: EventHandler<()>) -> Element {
    let backend = use_backend();
    let mut alerts = use_alerts();
    let mut progress = use_signal(|| Option::<CourseProgress>::None);
    let mut error = use_signal(|| Option::<String>::None);

    use_future({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            async move {
                match backend.lesson_progress().await {
                    Ok(loaded) => progress.set(Some(loaded)),
                    Err(e) => {
                        tracing::error!("loading lesson progress failed: {e}");
                        error.set(Some(e.user_message()));
                    }
                }
            }
        }
    });

    let complete = move |(module_id, lesson_id): (&'static str, &'static str)| {
        let backend = backend.clone();
        spawn(async move {
            match backend.complete_lesson(module_id, lesson_id).await {
                Ok(()) => {
                    if let Some(p) = progress.write().as_mut() {
                        p.mark_completed(module_id, lesson_id);
                    }
                }
                Err(e) => show_error(&mut alerts, "Could not save progress", &e),
            }
        });
    };

    let Some(done) = progress() else {
        return rsx! {
            ScreenHeader { title: "Courses", on_back: move |_| on_back.call(()) }
            if let Some(message) = error() {
                p { class: "error-text", "{message}" }
            } else {
                p { class: "muted", "Loading..." }
            }
        };
    };

    rsx! {
        ScreenHeader { title: "Courses", on_back: move |_| on_back.call(()) }
        for module in CATALOG {
            div {
                key: "{module.id}",
                class: "card",
                div {
                    class: "card-row",
                    h2 { "{module.title}" }
                    span { class: "muted", "{done.module_percent(module)}%" }
                }
                for lesson in module.lessons {
                    div {
                        key: "{lesson.id}",
                        class: "card-row field",
                        div {
                            p { "{lesson.title}" }
                            p { class: "muted", "{lesson.summary} · {lesson.minutes} min" }
                        }
                        if done.is_completed(module.id, lesson.id) {
                            span { title: "Completed", Icon { icon: FaCircleCheck, width: 18, height: 18 } }
                        } else {
                            button {
                                class: "btn btn-outline",
                                onclick: {
                                    let mut complete = complete.clone();
                                    move |_| complete((module.id, lesson.id))
                                },
                                "Done"
                            }
                        }
                    }
                }
            }
        }
    }
}
