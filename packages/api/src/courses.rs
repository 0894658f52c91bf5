//! `lesson_progress` rows.

use chrono::Utc;
use fitness::courses::CourseProgress;
use fitness::LessonProgress;
use store::SessionStore;

use crate::client::Backend;
use crate::error::ApiError;
use crate::rest::Query;

const TABLE: &str = "lesson_progress";

impl<S: SessionStore> Backend<S> {
    pub async fn lesson_progress(&self) -> Result<CourseProgress, ApiError> {
        let query = Query::from(TABLE).select("*").eq("user_id", self.user_id()?);
        let rows: Vec<LessonProgress> = self.select(&query).await?;
        Ok(CourseProgress::from_rows(&rows))
    }

    pub async fn complete_lesson(&self, module_id: &str, lesson_id: &str) -> Result<(), ApiError> {
        let user_id = self.user_id()?;
        let row = LessonProgress {
            user_id,
            module_id: module_id.to_string(),
            lesson_id: lesson_id.to_string(),
            completed: true,
            completed_at: Some(Utc::now()),
        };
        let own = Query::from(TABLE)
            .eq("user_id", user_id)
            .eq("module_id", module_id)
            .eq("lesson_id", lesson_id);
        if self.exists(&own).await? {
            self.update(&own, &row).await?;
        } else {
            self.insert(TABLE, &row).await?;
        }
        tracing::info!(module_id, lesson_id, "lesson completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{signed_in, USER_ID};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_progress_from_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/lesson_progress"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"user_id": USER_ID, "module_id": "habits", "lesson_id": "sleep", "completed": true, "completed_at": "2026-03-01T08:00:00Z"},
                {"user_id": USER_ID, "module_id": "habits", "lesson_id": "food-diary", "completed": false, "completed_at": null}
            ])))
            .mount(&server)
            .await;

        let backend = signed_in(&server).await;
        let progress = backend.lesson_progress().await.unwrap();
        assert!(progress.is_completed("habits", "sleep"));
        assert!(!progress.is_completed("habits", "food-diary"));
    }

    #[tokio::test]
    async fn test_complete_new_lesson_inserts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/lesson_progress"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/lesson_progress"))
            .and(body_partial_json(json!({"module_id": "movement", "lesson_id": "steps", "completed": true})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let backend = signed_in(&server).await;
        backend.complete_lesson("movement", "steps").await.unwrap();
    }
}
