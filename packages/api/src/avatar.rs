//! Profile pictures in the avatar bucket.

use chrono::Utc;
use fitness::photo::{avatar_path, content_type};
use fitness::PickedPhoto;
use store::SessionStore;

use crate::client::Backend;
use crate::error::ApiError;

/// Extensions tried, in order, when looking for an existing avatar.
pub const AVATAR_PROBE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Lifetime of the signed URL used for private buckets.
pub const SIGNED_URL_SECS: u64 = 3600;

impl<S: SessionStore> Backend<S> {
    /// URL of the user's avatar, if one has been uploaded.
    pub async fn find_avatar(&self) -> Result<Option<String>, ApiError> {
        let user_id = self.user_id()?;
        let bucket = &self.app.storage.avatar_bucket;
        for ext in AVATAR_PROBE_EXTENSIONS {
            let url = self.public_url(bucket, &avatar_path(user_id, ext));
            if self.url_exists(&url).await {
                return Ok(Some(url));
            }
        }
        Ok(None)
    }

    /// Upload a new avatar and return a URL to display it. The public URL
    /// gets a cache-busting `t` parameter; when it is not reachable (private
    /// bucket) a signed URL is returned instead.
    pub async fn upload_avatar(&self, photo: &PickedPhoto) -> Result<String, ApiError> {
        let user_id = self.user_id()?;
        let bucket = &self.app.storage.avatar_bucket;
        let ext = photo.avatar_extension();
        let path = avatar_path(user_id, ext);
        let mime = photo
            .mime_type
            .clone()
            .unwrap_or_else(|| content_type(ext).to_string());

        self.upload(bucket, &path, photo.bytes.clone(), &mime).await?;

        let public = self.public_url(bucket, &path);
        if self.url_exists(&public).await {
            return Ok(format!("{public}?t={}", Utc::now().timestamp_millis()));
        }
        tracing::warn!("avatar public URL unreachable, using a signed URL");
        self.signed_url(bucket, &path, SIGNED_URL_SECS).await
    }

    /// Upload from a `data:` URI as produced by web pickers.
    pub async fn upload_avatar_data_uri(&self, uri: &str) -> Result<String, ApiError> {
        let photo = PickedPhoto::from_data_uri(uri)?;
        self.upload_avatar(&photo).await
    }
}
