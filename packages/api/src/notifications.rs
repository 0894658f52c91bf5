//! `notification_settings`: one row per user.

use fitness::notifications::NotificationSettingsRow;
use fitness::NotificationSettings;
use store::SessionStore;

use crate::client::Backend;
use crate::error::ApiError;
use crate::rest::Query;

const TABLE: &str = "notification_settings";

impl<S: SessionStore> Backend<S> {
    /// Stored settings, or the defaults when the user has none yet.
    pub async fn load_notification_settings(&self) -> Result<NotificationSettings, ApiError> {
        let query = Query::from(TABLE).select("*").eq("user_id", self.user_id()?);
        let row: Option<NotificationSettingsRow> = self.maybe_single(&query).await?;
        Ok(row
            .map(|r| NotificationSettings::from_row(&r))
            .unwrap_or_default())
    }

    pub async fn save_notification_settings(&self, settings: &NotificationSettings) -> Result<(), ApiError> {
        let user_id = self.user_id()?;
        let own = Query::from(TABLE).eq("user_id", user_id);
        if self.exists(&own).await? {
            self.update(&own, &settings.to_row(None)).await
        } else {
            self.insert(TABLE, &settings.to_row(Some(user_id))).await
        }
    }
}
