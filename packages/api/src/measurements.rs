//! `body_measurements` rows.

use fitness::{BodyMeasurement, MeasurementType, NewMeasurement};
use store::SessionStore;

use crate::client::Backend;
use crate::error::ApiError;
use crate::rest::Query;

const TABLE: &str = "body_measurements";

impl<S: SessionStore> Backend<S> {
    pub async fn add_measurement(&self, kind: MeasurementType, value: f64) -> Result<(), ApiError> {
        let row = NewMeasurement::new(self.user_id()?, kind, value);
        self.insert(TABLE, &row).await?;
        tracing::info!(kind = %kind, value, "measurement recorded");
        Ok(())
    }

    /// Measurements oldest first, optionally of one type only.
    pub async fn list_measurements(
        &self,
        kind: Option<MeasurementType>,
    ) -> Result<Vec<BodyMeasurement>, ApiError> {
        let mut query = Query::from(TABLE).select("*").eq("user_id", self.user_id()?);
        if let Some(kind) = kind {
            query = query.eq("measurement_type", kind);
        }
        self.select(&query.order("created_at", true)).await
    }

    /// The most recent weigh-in.
    pub async fn latest_weight(&self) -> Result<Option<f64>, ApiError> {
        let query = Query::from(TABLE)
            .select("*")
            .eq("user_id", self.user_id()?)
            .eq("measurement_type", MeasurementType::Weight)
            .order("created_at", false)
            .limit(1);
        let rows: Vec<BodyMeasurement> = self.select(&query).await?;
        Ok(rows.first().map(|m| m.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{signed_in, USER_ID};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_add_measurement_sends_unit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/body_measurements"))
            .and(body_json(json!({
                "user_id": USER_ID,
                "measurement_type": "waist",
                "value": 82.5,
                "unit": "cm"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let backend = signed_in(&server).await;
        backend.add_measurement(MeasurementType::Waist, 82.5).await.unwrap();
    }

    #[tokio::test]
    async fn test_latest_weight() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/body_measurements"))
            .and(query_param("measurement_type", "eq.weight"))
            .and(query_param("order", "created_at.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "7f3d4f7e-8c1e-4a39-9a53-1f1b1f0f6a10",
                "user_id": USER_ID,
                "measurement_type": "weight",
                "value": 84.2,
                "unit": "kg",
                "created_at": "2026-03-01T08:00:00Z"
            }])))
            .mount(&server)
            .await;

        let backend = signed_in(&server).await;
        assert_eq!(backend.latest_weight().await.unwrap(), Some(84.2));
    }

    #[tokio::test]
    async fn test_no_weight_yet() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/body_measurements"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let backend = signed_in(&server).await;
        assert_eq!(backend.latest_weight().await.unwrap(), None);
        assert!(backend.list_measurements(None).await.unwrap().is_empty());
    }
}
