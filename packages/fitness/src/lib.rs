pub mod courses;
pub mod diary;
pub mod measurements;
pub mod menu;
pub mod models;
pub mod navigation;
pub mod notifications;
pub mod photo;
pub mod progress;
pub mod rewards;
pub mod validation;

pub use diary::{DiaryDraft, Series};
pub use measurements::GraphSeries;
pub use models::{
    AuthEvent, BodyMeasurement, DiaryEntry, DiaryEntryWrite, Goal, LessonProgress,
    MeasurementType, NewMeasurement, NewProfile, Profile, ProfileChanges,
};
pub use navigation::{CompletionLatch, NavEvent, Navigator, Screen, SessionCheck, Tab};
pub use notifications::{NotificationSettings, ReminderFrequency};
pub use photo::{PhotoError, PickedPhoto};
pub use progress::{goal_progress, GoalProgress};
pub use validation::{CompleteProfileForm, EditProfileForm, ProfilePayload, ValidationError};
