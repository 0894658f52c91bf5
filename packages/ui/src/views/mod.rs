mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod header;
pub use header::ScreenHeader;

mod onboarding;
pub use onboarding::OnboardingView;

mod login;
pub use login::LoginView;

mod complete_profile;
pub use complete_profile::CompleteProfileView;

mod registration_loading;
pub use registration_loading::RegistrationLoadingView;

mod home;
pub use home::HomeView;

mod diary_entry;
pub use diary_entry::DiaryEntryView;

mod diary_history;
pub use diary_history::DiaryHistoryView;

mod profile;
pub use profile::ProfileView;

mod courses;
pub use courses::CoursesView;

mod daily_menu;
pub use daily_menu::DailyMenuView;

mod progress;
pub use progress::ProgressView;

mod rewards;
pub use rewards::RewardsView;

mod my_series;
pub use my_series::MySeriesView;

mod body_measurements;
pub use body_measurements::BodyMeasurementsView;

mod measurement_graph;
pub use measurement_graph::MeasurementGraphView;

mod photo_input;
pub use photo_input::PhotoInput;
