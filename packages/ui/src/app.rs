//! The app shell: providers, the screen switch and the registration fallback
//! timer.

use dioxus::prelude::*;
use fitness::{MeasurementType, NavEvent, Screen, Tab};
use uuid::Uuid;

use crate::alerts::{AlertHost, Alerts};
use crate::auth::{use_nav, AuthProvider};
use crate::backend::use_backend;
use crate::tab_bar::TabBar;
use crate::timers::sleep_ms;
use crate::views::{
    BodyMeasurementsView, CompleteProfileView, CoursesView, DailyMenuView, DiaryEntryView,
    DiaryHistoryView, HomeView, LoginView, MeasurementGraphView, MySeriesView, OnboardingView,
    ProfileView, ProgressView, RegistrationLoadingView, RewardsView,
};
use crate::FITTRACK_CSS;

/// Root component. Expects an [`crate::AppBackend`] in context.
#[component]
pub fn AppShell() -> Element {
    use_context_provider(|| Signal::new(Alerts::default()));

    rsx! {
        document::Stylesheet { href: FITTRACK_CSS }
        AuthProvider {
            ScreenSwitch {}
            AlertHost {}
        }
    }
}

#[component]
fn ScreenSwitch() -> Element {
    let mut nav = use_nav();
    let backend = use_backend();
    let fallback_ms = backend.app_config().onboarding.registration_fallback_ms;
    let screen = use_memo(move || nav.read().screen());

    // Leaves the loading screen if its own completion callback never fires.
    use_effect(move || {
        if screen() == Screen::RegistrationLoading {
            spawn(async move {
                sleep_ms(fallback_ms).await;
                nav.write().dispatch(NavEvent::RegistrationFallback);
            });
        }
    });

    if nav.read().is_checking_session() {
        return rsx! {
            div { class: "screen-loading", "Loading..." }
        };
    }

    let go = move |event: NavEvent| {
        let mut nav = nav;
        nav.write().dispatch(event);
    };
    let current = screen();

    rsx! {
        div {
            class: "app-shell",
            main {
                class: "screen",
                match current {
                    Screen::Onboarding => rsx! {
                        OnboardingView { on_continue: move |_| go(NavEvent::Continue) }
                    },
                    Screen::Login => rsx! {
                        LoginView {
                            on_signed_in: move |profile_complete: bool| go(NavEvent::SignedIn { profile_complete }),
                        }
                    },
                    Screen::CompleteProfile => rsx! {
                        CompleteProfileView { on_submitted: move |_| go(NavEvent::ProfileSubmitted) }
                    },
                    Screen::RegistrationLoading => rsx! {
                        RegistrationLoadingView { on_complete: move |_| go(NavEvent::RegistrationComplete) }
                    },
                    Screen::Home => rsx! {
                        HomeView {
                            on_open_diary: move |_| go(NavEvent::OpenDiary),
                            on_open_menu: move |_| go(NavEvent::OpenMenu),
                            on_open_courses: move |_| go(NavEvent::Tab(Tab::Courses)),
                            on_open_progress: move |_| go(NavEvent::Tab(Tab::Progress)),
                        }
                    },
                    Screen::DiaryEntry => rsx! {
                        DiaryEntryView {
                            editing: nav.read().editing_entry(),
                            on_back: move |_| go(NavEvent::Back),
                            on_open_history: move |_| go(NavEvent::OpenDiaryHistory),
                        }
                    },
                    Screen::DiaryHistory => rsx! {
                        DiaryHistoryView {
                            on_back: move |_| go(NavEvent::Back),
                            on_add: move |_| go(NavEvent::AddDiaryEntry),
                            on_edit: move |id: Uuid| go(NavEvent::EditDiaryEntry(id)),
                        }
                    },
                    Screen::Profile => rsx! {
                        ProfileView { on_back: move |_| go(NavEvent::Back) }
                    },
                    Screen::Courses => rsx! {
                        CoursesView { on_back: move |_| go(NavEvent::Back) }
                    },
                    Screen::DailyMenu => rsx! {
                        DailyMenuView { on_back: move |_| go(NavEvent::Back) }
                    },
                    Screen::Progress => rsx! {
                        ProgressView {
                            on_back: move |_| go(NavEvent::Back),
                            on_open_rewards: move |_| go(NavEvent::OpenRewards),
                            on_open_series: move |_| go(NavEvent::OpenMySeries),
                            on_open_measurements: move |_| go(NavEvent::OpenBodyMeasurements),
                            on_open_graph: move |kind: MeasurementType| go(NavEvent::OpenGraph(kind)),
                        }
                    },
                    Screen::Rewards => rsx! {
                        RewardsView { on_back: move |_| go(NavEvent::Back) }
                    },
                    Screen::MySeries => rsx! {
                        MySeriesView { on_back: move |_| go(NavEvent::Back) }
                    },
                    Screen::BodyMeasurements => rsx! {
                        BodyMeasurementsView {
                            on_back: move |_| go(NavEvent::Back),
                            on_open_graph: move |kind: MeasurementType| go(NavEvent::OpenGraph(kind)),
                        }
                    },
                    Screen::MeasurementGraph => rsx! {
                        MeasurementGraphView {
                            kind: nav.read().measurement_type(),
                            on_back: move |_| go(NavEvent::Back),
                            on_open_measurements: move |_| go(NavEvent::OpenBodyMeasurements),
                        }
                    },
                }
            }
            if let Some(active) = current.active_tab() {
                TabBar { active, on_select: move |tab: Tab| go(NavEvent::Tab(tab)) }
            }
        }
    }
}

/// Why the backend could not be configured at start-up.
#[derive(Clone, Debug)]
pub struct StartupError(pub String);

/// Root component used instead of [`AppShell`] when configuration failed.
#[component]
pub fn StartupFailed() -> Element {
    let StartupError(message) = use_context::<StartupError>();
    rsx! {
        document::Stylesheet { href: FITTRACK_CSS }
        div {
            class: "screen-loading",
            div {
                class: "card",
                h2 { "FitTrack cannot start" }
                p { class: "error-text", "{message}" }
                p { class: "muted", "Set SUPABASE_URL and SUPABASE_ANON_KEY in the environment or a .env file." }
            }
        }
    }
}
