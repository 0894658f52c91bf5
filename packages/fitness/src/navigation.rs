//! # Screen navigation
//!
//! The app has no router: the current screen is a single [`Screen`] value held
//! by a [`Navigator`]. Screens report user intent as [`NavEvent`]s and the
//! navigator maps `(current screen, event)` to the next screen. Events a
//! screen never emits are ignored, there is no history stack and no rollback.
//!
//! ## Session-driven transitions
//!
//! On start the navigator is in the *checking session* state and the UI shows a
//! loading placeholder. [`Navigator::finish_session_check`] settles the first
//! real screen. Afterwards [`Navigator::on_auth_event`] reacts to sign-in and
//! sign-out events; `INITIAL_SESSION`/`SIGNED_IN` events that arrive while the
//! check is still running are dropped so they cannot race it.
//!
//! ## Registration loading
//!
//! After the profile form is submitted the user sees an animated loading
//! screen. Two things try to leave it: the screen's own completion callback
//! (guarded by a [`CompletionLatch`]) and a fallback timer owned by the app.
//! Both transitions only apply while the current screen is still
//! [`Screen::RegistrationLoading`], so home is entered exactly once.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{AuthEvent, MeasurementType};

/// Duration of the registration progress animation.
pub const REGISTRATION_ANIMATION_MS: u64 = 2000;
/// When the loading screen decides its animation is done.
pub const REGISTRATION_COMPLETE_AFTER_MS: u64 = 2100;
/// Pause between the screen deciding it is done and calling back.
pub const REGISTRATION_CALLBACK_DELAY_MS: u64 = 100;
/// Default app-level fallback in case the callback never fires.
pub const REGISTRATION_FALLBACK_MS: u64 = 2500;

/// Every view the app can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Onboarding,
    Login,
    CompleteProfile,
    RegistrationLoading,
    Home,
    DiaryEntry,
    DiaryHistory,
    Profile,
    Courses,
    DailyMenu,
    Progress,
    Rewards,
    MySeries,
    BodyMeasurements,
    MeasurementGraph,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Onboarding => "onboarding",
            Screen::Login => "login",
            Screen::CompleteProfile => "completeProfile",
            Screen::RegistrationLoading => "registrationLoading",
            Screen::Home => "home",
            Screen::DiaryEntry => "diaryEntry",
            Screen::DiaryHistory => "diaryHistory",
            Screen::Profile => "profile",
            Screen::Courses => "courses",
            Screen::DailyMenu => "dailyMenu",
            Screen::Progress => "progress",
            Screen::Rewards => "rewards",
            Screen::MySeries => "mySeries",
            Screen::BodyMeasurements => "bodyMeasurements",
            Screen::MeasurementGraph => "measurementGraph",
        }
    }

    /// Tab highlighted in the bottom bar, `None` for screens without one.
    pub fn active_tab(&self) -> Option<Tab> {
        match self {
            Screen::Home => Some(Tab::Home),
            Screen::Courses => Some(Tab::Courses),
            Screen::DiaryEntry | Screen::DiaryHistory => Some(Tab::Diary),
            Screen::Progress
            | Screen::Rewards
            | Screen::MySeries
            | Screen::BodyMeasurements
            | Screen::MeasurementGraph => Some(Tab::Progress),
            Screen::Profile => Some(Tab::Profile),
            Screen::Onboarding
            | Screen::Login
            | Screen::CompleteProfile
            | Screen::RegistrationLoading
            | Screen::DailyMenu => None,
        }
    }

    /// The diary tab lands on the history list from these screens and on a
    /// blank entry form everywhere else.
    fn diary_tab_opens_history(&self) -> bool {
        matches!(
            self,
            Screen::Home | Screen::DiaryEntry | Screen::DiaryHistory | Screen::MeasurementGraph
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bottom tab bar entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Home,
    Courses,
    Diary,
    Progress,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Courses, Tab::Diary, Tab::Progress, Tab::Profile];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Courses => "Courses",
            Tab::Diary => "Diary",
            Tab::Progress => "Progress",
            Tab::Profile => "Profile",
        }
    }
}

/// User intent reported by a screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavEvent {
    /// Onboarding "continue" button.
    Continue,
    /// Password sign-in succeeded.
    SignedIn { profile_complete: bool },
    /// Completion form saved.
    ProfileSubmitted,
    /// Loading screen finished its animation.
    RegistrationComplete,
    /// App-level fallback timer for the loading screen elapsed.
    RegistrationFallback,
    OpenDiary,
    OpenMenu,
    OpenRewards,
    OpenMySeries,
    OpenBodyMeasurements,
    OpenGraph(MeasurementType),
    OpenDiaryHistory,
    AddDiaryEntry,
    EditDiaryEntry(Uuid),
    Back,
    Tab(Tab),
}

/// Outcome of the start-up session check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCheck {
    NoSession,
    Failed,
    Active { profile_complete: bool },
}

/// Holds the current screen plus the small amount of state screens hand to
/// each other (edited diary entry, selected measurement type).
#[derive(Clone, Debug, PartialEq)]
pub struct Navigator {
    screen: Screen,
    checking_session: bool,
    editing_entry: Option<Uuid>,
    measurement_type: MeasurementType,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// A navigator that is still waiting for the session check.
    pub fn new() -> Self {
        Self {
            screen: Screen::Onboarding,
            checking_session: true,
            editing_entry: None,
            measurement_type: MeasurementType::default(),
        }
    }

    /// A navigator positioned on `screen` with the session check done.
    pub fn at(screen: Screen) -> Self {
        Self {
            screen,
            checking_session: false,
            ..Self::new()
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_checking_session(&self) -> bool {
        self.checking_session
    }

    /// Diary entry opened for editing, `None` when composing a new one.
    pub fn editing_entry(&self) -> Option<Uuid> {
        self.editing_entry
    }

    /// Measurement type the graph screen should plot.
    pub fn measurement_type(&self) -> MeasurementType {
        self.measurement_type
    }

    /// Mark the start-up session check as running again.
    pub fn begin_session_check(&mut self) {
        self.checking_session = true;
    }

    /// Settle the first screen once the stored session has been examined.
    pub fn finish_session_check(&mut self, outcome: SessionCheck) -> Screen {
        self.checking_session = false;
        let next = match outcome {
            SessionCheck::Active { profile_complete } => Self::signed_in_screen(profile_complete),
            SessionCheck::NoSession | SessionCheck::Failed => Screen::Onboarding,
        };
        self.go(next);
        next
    }

    /// React to an auth state change. Returns the new screen when it changed.
    pub fn on_auth_event(&mut self, event: AuthEvent, profile_complete: bool) -> Option<Screen> {
        if self.checking_session && matches!(event, AuthEvent::InitialSession | AuthEvent::SignedIn) {
            debug!(?event, "ignoring auth event during session check");
            return None;
        }
        let next = match event {
            AuthEvent::SignedOut => Screen::Login,
            AuthEvent::SignedIn => Self::signed_in_screen(profile_complete),
            AuthEvent::InitialSession | AuthEvent::TokenRefreshed => return None,
        };
        self.go(next)
    }

    /// Apply a screen event. Returns the new screen when it changed.
    pub fn dispatch(&mut self, event: NavEvent) -> Option<Screen> {
        let Some(next) = self.target(event) else {
            debug!(screen = %self.screen, ?event, "event not handled on this screen");
            return None;
        };
        match event {
            NavEvent::OpenGraph(kind) => self.measurement_type = kind,
            NavEvent::EditDiaryEntry(id) => self.editing_entry = Some(id),
            NavEvent::AddDiaryEntry => self.editing_entry = None,
            _ => {}
        }
        self.go(next)
    }

    fn target(&self, event: NavEvent) -> Option<Screen> {
        use Screen::*;

        let screen = self.screen;
        match event {
            NavEvent::Continue if screen == Onboarding => Some(Login),
            NavEvent::SignedIn { profile_complete } if screen == Login => {
                Some(Self::signed_in_screen(profile_complete))
            }
            NavEvent::ProfileSubmitted if screen == CompleteProfile => Some(RegistrationLoading),
            NavEvent::RegistrationComplete | NavEvent::RegistrationFallback
                if screen == RegistrationLoading =>
            {
                Some(Home)
            }
            NavEvent::OpenDiary if screen == Home => Some(DiaryHistory),
            NavEvent::OpenMenu if screen == Home => Some(DailyMenu),
            NavEvent::OpenRewards if screen == Progress => Some(Rewards),
            NavEvent::OpenMySeries if screen == Progress => Some(MySeries),
            NavEvent::OpenBodyMeasurements if matches!(screen, Progress | MeasurementGraph) => {
                Some(BodyMeasurements)
            }
            NavEvent::OpenGraph(_) if matches!(screen, Progress | BodyMeasurements) => {
                Some(MeasurementGraph)
            }
            NavEvent::OpenDiaryHistory if screen == DiaryEntry => Some(DiaryHistory),
            NavEvent::AddDiaryEntry | NavEvent::EditDiaryEntry(_) if screen == DiaryHistory => {
                Some(DiaryEntry)
            }
            NavEvent::Back => match screen {
                DailyMenu | Courses | Profile | DiaryHistory | DiaryEntry | Progress => Some(Home),
                BodyMeasurements | Rewards | MySeries => Some(Progress),
                MeasurementGraph => Some(BodyMeasurements),
                _ => None,
            },
            NavEvent::Tab(tab) => {
                screen.active_tab()?;
                Some(match tab {
                    Tab::Home => Home,
                    Tab::Courses => Courses,
                    Tab::Diary if screen.diary_tab_opens_history() => DiaryHistory,
                    Tab::Diary => DiaryEntry,
                    Tab::Progress => Progress,
                    Tab::Profile => Profile,
                })
            }
            _ => None,
        }
    }

    fn signed_in_screen(profile_complete: bool) -> Screen {
        if profile_complete {
            Screen::Home
        } else {
            Screen::CompleteProfile
        }
    }

    fn go(&mut self, next: Screen) -> Option<Screen> {
        let from = self.screen;
        if from == Screen::DiaryEntry && next != Screen::DiaryEntry {
            self.editing_entry = None;
        }
        if from == next {
            return None;
        }
        info!(%from, to = %next, "screen transition");
        self.screen = next;
        Some(next)
    }
}

/// One-shot flag shared between the loading screen's timer and its callback.
#[derive(Clone, Debug, Default)]
pub struct CompletionLatch {
    fired: Arc<AtomicBool>,
}

impl CompletionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` for the first caller only.
    pub fn fire(&self) -> bool {
        !self.fired.swap(true, Ordering::AcqRel)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}
