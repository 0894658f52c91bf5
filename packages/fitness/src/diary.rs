//! # Diary drafts, same-day checks and series
//!
//! [`DiaryDraft`] is the in-progress state of the diary entry form: note text,
//! the tag list, and either a freshly picked photo or the URL of the photo
//! already attached to an entry being edited.
//!
//! The free functions answer questions about the saved history:
//! [`has_entry_on`] drives the "diary not sent" card on the home screen and
//! [`series`] computes the current and longest streak of days with an entry.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};

use crate::models::{DiaryEntry, DiaryEntryWrite};
use crate::photo::PickedPhoto;
use crate::validation::ValidationError;

/// Form state for creating or editing a diary entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiaryDraft {
    pub note: String,
    tags: Vec<String>,
    pub tag_input: String,
    pub picked_photo: Option<PickedPhoto>,
    pub existing_photo_url: Option<String>,
}

impl DiaryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft pre-filled from a saved entry.
    pub fn from_entry(entry: &DiaryEntry) -> Self {
        let mut draft = Self {
            note: entry.note.clone().unwrap_or_default(),
            existing_photo_url: entry.photo_url.clone(),
            ..Self::default()
        };
        for tag in &entry.tags {
            draft.insert_tag(tag);
        }
        draft
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Move the tag input into the tag list. Blank and duplicate tags are
    /// rejected and leave the input untouched.
    pub fn add_tag(&mut self) -> bool {
        let candidate = self.tag_input.clone();
        if self.insert_tag(&candidate) {
            self.tag_input.clear();
            true
        } else {
            false
        }
    }

    fn insert_tag(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn set_photo(&mut self, photo: PickedPhoto) {
        self.picked_photo = Some(photo);
    }

    /// Drop both the new pick and the saved photo.
    pub fn clear_photo(&mut self) {
        self.picked_photo = None;
        self.existing_photo_url = None;
    }

    /// The saved photo that a freshly picked one will replace on save.
    pub fn photo_to_replace(&self) -> Option<&str> {
        self.picked_photo
            .as_ref()
            .and(self.existing_photo_url.as_deref())
    }

    pub fn has_photo(&self) -> bool {
        self.picked_photo.is_some() || self.existing_photo_url.is_some()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.note.trim().is_empty() && self.tags.is_empty() && !self.has_photo() {
            return Err(ValidationError::EmptyDiaryEntry);
        }
        Ok(())
    }

    /// Columns to write once the photo (if any) has been uploaded.
    pub fn to_write(&self, photo_url: Option<String>) -> DiaryEntryWrite {
        let note = self.note.trim();
        DiaryEntryWrite {
            note: (!note.is_empty()).then(|| note.to_string()),
            tags: self.tags.clone(),
            photo_url,
        }
    }
}

/// Calendar day of an entry in the device's local time zone.
pub fn local_day<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

/// Whether any entry was created on `day` (local time).
pub fn has_entry_on(entries: &[DiaryEntry], day: NaiveDate) -> bool {
    entries.iter().any(|e| local_day(&e.created_at) == day)
}

/// Streak statistics over the diary history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Series {
    /// Consecutive days ending today (or yesterday, if today has no entry yet).
    pub current: u32,
    /// Longest run of consecutive days ever.
    pub longest: u32,
    /// Number of distinct days with an entry.
    pub active_days: u32,
}

/// Compute streaks from entry dates as seen on `today`.
pub fn series(entries: &[DiaryEntry], today: NaiveDate) -> Series {
    let days: BTreeSet<NaiveDate> = entries.iter().map(|e| local_day(&e.created_at)).collect();
    series_from_days(&days, today)
}

fn series_from_days(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> Series {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;
    for day in days {
        run = match previous {
            Some(p) if *day - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(*day);
    }

    let mut cursor = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };
    let mut current = 0u32;
    while days.contains(&cursor) {
        current += 1;
        cursor -= Duration::days(1);
    }

    Series {
        current,
        longest,
        active_days: days.len() as u32,
    }
}

/// History ordering: newest entry first.
pub fn sort_newest_first(entries: &mut [DiaryEntry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};
    use uuid::Uuid;

    fn entry_on(day: NaiveDate) -> DiaryEntry {
        let local = Local
            .from_local_datetime(&day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()))
            .single()
            .unwrap();
        DiaryEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            note: Some("lunch".to_string()),
            tags: vec![],
            photo_url: None,
            created_at: local.with_timezone(&Utc),
            updated_at: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_tags_behave_like_a_set() {
        let mut draft = DiaryDraft::new();
        draft.tag_input = "  breakfast ".to_string();
        assert!(draft.add_tag());
        assert!(draft.tag_input.is_empty());

        draft.tag_input = "breakfast".to_string();
        assert!(!draft.add_tag());
        assert_eq!(draft.tag_input, "breakfast");

        draft.tag_input = "   ".to_string();
        assert!(!draft.add_tag());

        draft.tag_input = "walk".to_string();
        draft.add_tag();
        assert_eq!(draft.tags(), ["breakfast", "walk"]);

        draft.remove_tag("breakfast");
        assert_eq!(draft.tags(), ["walk"]);
    }

    #[test]
    fn test_empty_draft_is_rejected() {
        let mut draft = DiaryDraft::new();
        draft.note = "   ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::EmptyDiaryEntry));

        draft.existing_photo_url = Some("https://cdn/x.jpg".to_string());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_write_payload_trims_note() {
        let mut draft = DiaryDraft::new();
        draft.note = "  oatmeal  ".to_string();
        let write = draft.to_write(None);
        assert_eq!(write.note.as_deref(), Some("oatmeal"));

        draft.note = " ".to_string();
        assert_eq!(draft.to_write(None).note, None);
    }

    #[test]
    fn test_new_photo_replaces_existing() {
        let mut entry = entry_on(day(2026, 3, 1));
        entry.photo_url = Some("https://cdn/old.jpg".to_string());
        entry.tags = vec!["a".to_string(), "a".to_string()];
        let mut draft = DiaryDraft::from_entry(&entry);
        assert_eq!(draft.tags(), ["a"]);
        assert_eq!(draft.photo_to_replace(), None);
        draft.set_photo(PickedPhoto::new(vec![1, 2, 3], Some("image/png".to_string()), None));
        assert_eq!(draft.photo_to_replace(), Some("https://cdn/old.jpg"));
        assert!(draft.has_photo());
        draft.clear_photo();
        assert!(!draft.has_photo());
    }

    #[test]
    fn test_same_day_check() {
        let entries = vec![entry_on(day(2026, 3, 1)), entry_on(day(2026, 3, 3))];
        assert!(has_entry_on(&entries, day(2026, 3, 1)));
        assert!(!has_entry_on(&entries, day(2026, 3, 2)));
        assert!(!has_entry_on(&[], day(2026, 3, 2)));
    }

    #[test]
    fn test_series() {
        let entries: Vec<_> = [1, 2, 3, 5, 6, 6, 7]
            .into_iter()
            .map(|d| entry_on(day(2026, 3, d)))
            .collect();
        let s = series(&entries, day(2026, 3, 7));
        assert_eq!(s.current, 3);
        assert_eq!(s.longest, 3);
        assert_eq!(s.active_days, 6);

        // Today not written yet: streak still counts up to yesterday.
        let s = series(&entries, day(2026, 3, 8));
        assert_eq!(s.current, 3);

        let s = series(&entries, day(2026, 3, 10));
        assert_eq!(s.current, 0);
        assert_eq!(series(&[], day(2026, 3, 10)), Series::default());
    }

    #[test]
    fn test_sort_newest_first() {
        let mut entries = vec![entry_on(day(2026, 3, 1)), entry_on(day(2026, 3, 4)), entry_on(day(2026, 3, 2))];
        sort_newest_first(&mut entries);
        assert_eq!(local_day(&entries[0].created_at), day(2026, 3, 4));
        assert_eq!(local_day(&entries[2].created_at), day(2026, 3, 1));
    }
}
