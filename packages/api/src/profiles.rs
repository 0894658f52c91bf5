//! `user_profiles` rows and the profile completion flow.

use fitness::{MeasurementType, NewMeasurement, NewProfile, Profile, ProfileChanges, ProfilePayload};
use store::SessionStore;

use crate::client::Backend;
use crate::error::ApiError;
use crate::rest::Query;

const TABLE: &str = "user_profiles";

impl<S: SessionStore> Backend<S> {
    fn own_profile(&self) -> Result<Query, ApiError> {
        Ok(Query::from(TABLE).eq("user_id", self.user_id()?))
    }

    /// The signed-in user's profile, if one has been created.
    pub async fn load_profile(&self) -> Result<Option<Profile>, ApiError> {
        self.maybe_single(&self.own_profile()?.select("*")).await
    }

    pub async fn create_profile(&self, changes: &ProfileChanges) -> Result<(), ApiError> {
        let row = NewProfile {
            user_id: self.user_id()?,
            changes: changes.clone(),
        };
        self.insert(TABLE, &row).await
    }

    pub async fn update_profile(&self, changes: &ProfileChanges) -> Result<(), ApiError> {
        self.update(&self.own_profile()?, changes).await
    }

    /// Save the completion form: update the row if it exists, create it
    /// otherwise, then record the starting weight as the first measurement.
    /// A failed measurement insert does not fail the call.
    pub async fn complete_profile(&self, payload: &ProfilePayload) -> Result<(), ApiError> {
        let user_id = self.user_id()?;
        let changes = payload.changes();
        if self.exists(&self.own_profile()?).await? {
            self.update_profile(&changes).await?;
        } else {
            self.create_profile(&changes).await?;
        }
        tracing::info!(%user_id, goal = %payload.goal, "profile completed");

        let weight = NewMeasurement::new(user_id, MeasurementType::Weight, payload.weight);
        if let Err(e) = self.insert("body_measurements", &weight).await {
            tracing::warn!("could not record starting weight: {e}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{signed_in, USER_ID};
    use fitness::Goal;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> ProfilePayload {
        ProfilePayload {
            name: "Anna".to_string(),
            goal: Goal::WeightLoss,
            weight: 90.0,
            target_weight: 80.0,
        }
    }

    #[tokio::test]
    async fn test_load_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/user_profiles"))
            .and(query_param("user_id", format!("eq.{USER_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user_id": USER_ID,
                "name": "Anna",
                "goal": "maintenance",
                "initial_weight": 70.0,
                "target_weight": null
            })))
            .mount(&server)
            .await;

        let backend = signed_in(&server).await;
        let profile = backend.load_profile().await.unwrap().unwrap();
        assert!(profile.is_complete());
        assert_eq!(profile.goal, Some(Goal::Maintenance));
        assert_eq!(profile.target_weight, None);
    }

    #[tokio::test]
    async fn test_complete_profile_creates_missing_row() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/user_profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/user_profiles"))
            .and(body_partial_json(json!({"user_id": USER_ID, "name": "Anna", "goal": "weight_loss"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/body_measurements"))
            .and(body_partial_json(json!({"measurement_type": "weight", "value": 90.0, "unit": "kg"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let backend = signed_in(&server).await;
        backend.complete_profile(&payload()).await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_profile_updates_and_ignores_measurement_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/user_profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"user_id": USER_ID}])))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/user_profiles"))
            .and(body_partial_json(json!({"target_weight": 80.0})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/body_measurements"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let backend = signed_in(&server).await;
        assert!(backend.complete_profile(&payload()).await.is_ok());
    }

    #[tokio::test]
    async fn test_requires_session() {
        let server = MockServer::start().await;
        let backend = crate::test_support::backend(&server, store::MemorySessionStore::new());
        assert!(matches!(backend.load_profile().await, Err(ApiError::NotAuthenticated)));
    }
}
