//! # Diary entries
//!
//! Reads are scoped to the signed-in user. [`Backend::save_entry`] runs the
//! whole save flow of the entry form:
//!
//! 1. If a new photo was picked, re-encode it (falling back to the original
//!    bytes), remove the photo it replaces (failures ignored), upload it to
//!    `<photo_bucket>/<user>/<millis>.<ext>` and take its public URL.
//! 2. Update the entry (with `updated_at`) when editing, insert it otherwise.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use fitness::diary::sort_newest_first;
use fitness::photo::{diary_photo_path, prepare_diary_photo, stored_photo_path};
use fitness::{DiaryDraft, DiaryEntry, DiaryEntryWrite, PickedPhoto};
use serde::Serialize;
use store::SessionStore;
use uuid::Uuid;

use crate::client::Backend;
use crate::error::ApiError;
use crate::rest::Query;

const TABLE: &str = "diary_entries";

#[derive(Serialize)]
struct NewEntry<'a> {
    user_id: Uuid,
    #[serde(flatten)]
    write: &'a DiaryEntryWrite,
}

#[derive(Serialize)]
struct EntryUpdate<'a> {
    #[serde(flatten)]
    write: &'a DiaryEntryWrite,
    updated_at: DateTime<Utc>,
}

/// UTC bounds `[start, end)` of a local calendar day.
fn local_day_bounds(day: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let resolve = |at: &NaiveDateTime| Local.from_local_datetime(at);
    let start = first_valid_instant(day.and_hms_opt(0, 0, 0)?, resolve)?;
    let end = first_valid_instant(day.succ_opt()?.and_hms_opt(0, 0, 0)?, resolve)?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Earliest instant at or after the local wall-clock time `at`. When `at`
/// falls in a DST gap, steps forward in quarter hours to where the clock
/// resumes.
fn first_valid_instant<T>(
    at: NaiveDateTime,
    resolve: impl Fn(&NaiveDateTime) -> LocalResult<T>,
) -> Option<T> {
    for step in 0..=MAX_GAP_STEPS {
        let probe = at + Duration::minutes(15 * step);
        match resolve(&probe) {
            LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => {
                if step > 0 {
                    tracing::warn!(%at, resolved = %probe, "local time skipped by DST");
                }
                return Some(t);
            }
            LocalResult::None => {}
        }
    }
    None
}

const MAX_GAP_STEPS: i64 = 12;

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl<S: SessionStore> Backend<S> {
    /// All entries, newest first.
    pub async fn list_entries(&self) -> Result<Vec<DiaryEntry>, ApiError> {
        let query = Query::from(TABLE)
            .select("*")
            .eq("user_id", self.user_id()?)
            .order("created_at", false);
        let mut entries: Vec<DiaryEntry> = self.select(&query).await?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    pub async fn load_entry(&self, id: Uuid) -> Result<Option<DiaryEntry>, ApiError> {
        let query = Query::from(TABLE)
            .select("*")
            .eq("id", id)
            .eq("user_id", self.user_id()?);
        self.maybe_single(&query).await
    }

    /// Whether an entry was written on `day` in local time.
    pub async fn has_entry_on(&self, day: NaiveDate) -> Result<bool, ApiError> {
        let Some((start, end)) = local_day_bounds(day) else {
            tracing::warn!(%day, "no valid local time on this day, treating as empty");
            return Ok(false);
        };
        let query = Query::from(TABLE)
            .eq("user_id", self.user_id()?)
            .gte("created_at", timestamp(start))
            .lt("created_at", timestamp(end));
        self.exists(&query).await
    }

    pub async fn has_entry_today(&self) -> Result<bool, ApiError> {
        self.has_entry_on(Local::now().date_naive()).await
    }

    /// Validate and save the draft; `editing` is the id of the entry being
    /// edited, if any.
    pub async fn save_entry(&self, draft: &DiaryDraft, editing: Option<Uuid>) -> Result<(), ApiError> {
        draft.validate()?;
        let user_id = self.user_id()?;

        let photo_url = match &draft.picked_photo {
            Some(photo) => {
                let replaced = editing.and(draft.photo_to_replace());
                Some(self.upload_diary_photo(user_id, photo, replaced).await?)
            }
            None => draft.existing_photo_url.clone(),
        };
        let write = draft.to_write(photo_url);

        match editing {
            Some(id) => {
                let query = Query::from(TABLE).eq("id", id).eq("user_id", user_id);
                let update = EntryUpdate {
                    write: &write,
                    updated_at: Utc::now(),
                };
                self.update(&query, &update).await?;
                tracing::info!(%id, "diary entry updated");
            }
            None => {
                self.insert(TABLE, &NewEntry { user_id, write: &write }).await?;
                tracing::info!("diary entry created");
            }
        }
        Ok(())
    }

    async fn upload_diary_photo(
        &self,
        user_id: Uuid,
        photo: &PickedPhoto,
        replaced: Option<&str>,
    ) -> Result<String, ApiError> {
        let bucket = &self.app.storage.photo_bucket;
        let upload = prepare_diary_photo(
            photo,
            self.app.diary.photo_max_width,
            self.app.diary.photo_quality,
        );

        if let Some(old) = replaced.and_then(|url| stored_photo_path(user_id, url)) {
            if let Err(e) = self.remove(bucket, &[old]).await {
                tracing::warn!("could not remove replaced photo: {e}");
            }
        }

        let path = diary_photo_path(user_id, Utc::now().timestamp_millis(), upload.extension);
        self.upload(bucket, &path, upload.bytes, upload.content_type)
            .await?;
        Ok(self.public_url(bucket, &path))
    }
}
