use dioxus::prelude::*;
use fitness::courses::CourseProgress;
use fitness::menu::{daily_menu, total_kcal};
use fitness::goal_progress;

use crate::auth::use_auth;
use crate::backend::{use_backend, AppBackend};

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    latest_weight: Option<f64>,
    diary_sent_today: bool,
    courses: CourseProgress,
}

impl HomeData {
    async fn load(backend: &AppBackend) -> Result<Self, api::ApiError> {
        Ok(Self {
            latest_weight: backend.latest_weight().await?,
            diary_sent_today: backend.has_entry_today().await?,
            courses: backend.lesson_progress().await?,
        })
    }
}

#[component]
pub fn HomeView(
    on_open_diary: EventHandler<()>,
    on_open_menu: EventHandler<()>,
    on_open_courses: EventHandler<()>,
    on_open_progress: EventHandler<()>,
) -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let data = use_resource(move || {
        let backend = backend.clone();
        async move { HomeData::load(&backend).await }
    });

    let state = auth();
    let profile = state.profile.as_ref();
    let name = profile.and_then(|p| p.name.clone()).unwrap_or_default();
    let goal = profile.and_then(|p| p.goal);
    let meals = daily_menu(goal);
    let kcal = total_kcal(meals);

    rsx! {
        div {
            h1 { "Hi, {name}" }
            match &*data.read() {
                None => rsx! { p { class: "muted", "Loading..." } },
                Some(Err(e)) => rsx! { p { class: "error-text", "{e.user_message()}" } },
                Some(Ok(home)) => {
                    let progress = goal_progress(
                        home.latest_weight,
                        profile.and_then(|p| p.initial_weight),
                        profile.and_then(|p| p.target_weight),
                        goal,
                    );
                    let width = format!("width: {}%", progress.percent);
                    let remaining = format!("{:.1} kg to go", progress.remaining);
                    let current = home.courses.current_lesson();
                    rsx! {
                        div {
                            class: "card",
                            onclick: move |_| on_open_progress.call(()),
                            h2 { "Goal progress" }
                            div { class: "progress-track", div { class: "progress-fill", style: "{width}" } }
                            div {
                                class: "card-row",
                                span { "{progress.percent}%" }
                                span { class: "muted", "{remaining}" }
                            }
                        }
                        if !home.diary_sent_today {
                            div {
                                class: "card card-accent",
                                h2 { "Diary not sent today" }
                                p { class: "muted", "Add today's meals to keep your series going." }
                                button {
                                    class: "btn btn-outline",
                                    onclick: move |_| on_open_diary.call(()),
                                    "Open diary"
                                }
                            }
                        } else {
                            div {
                                class: "card",
                                onclick: move |_| on_open_diary.call(()),
                                h2 { "Diary" }
                                p { class: "muted", "Today's entry is saved." }
                            }
                        }
                        div {
                            class: "card",
                            onclick: move |_| on_open_courses.call(()),
                            h2 { "Current lesson" }
                            if let Some(current) = current {
                                p { "{current.module.title}, lesson {current.number}" }
                                p { class: "muted", "{current.lesson.title} · {current.lesson.minutes} min" }
                            } else {
                                p { class: "muted", "All lessons completed." }
                            }
                        }
                    }
                }
            }
            div {
                class: "card",
                onclick: move |_| on_open_menu.call(()),
                h2 { "Menu for today" }
                p { class: "muted", "{meals.len()} meals · {kcal} kcal" }
            }
        }
    }
}
