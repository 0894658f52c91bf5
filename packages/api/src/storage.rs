//! Object storage: upload, remove, public and signed URLs.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use store::SessionStore;

use crate::client::Backend;
use crate::error::ApiError;

/// Cache lifetime sent with every upload, in seconds.
pub const UPLOAD_CACHE_SECS: u32 = 3600;

impl<S> Backend<S> {
    /// Public URL of an object; valid only for public buckets.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.config
            .endpoint(&format!("/storage/v1/object/public/{bucket}/{path}"))
    }

    /// HEAD the URL; any failure counts as "not there".
    pub async fn url_exists(&self, url: &str) -> bool {
        match self.http.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("HEAD {url} failed: {e}");
                false
            }
        }
    }
}

impl<S: SessionStore> Backend<S> {
    /// Upload (or overwrite) an object.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError> {
        let size = bytes.len();
        let request = self
            .authed(Method::POST, &format!("/storage/v1/object/{bucket}/{path}"))
            .await?
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, format!("max-age={UPLOAD_CACHE_SECS}"))
            .header("x-upsert", "true")
            .body(bytes);
        self.send(request).await?;
        tracing::info!(bucket, path, size, "uploaded object");
        Ok(())
    }

    pub async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), ApiError> {
        let request = self
            .authed(Method::DELETE, &format!("/storage/v1/object/{bucket}"))
            .await?
            .json(&json!({ "prefixes": paths }));
        self.send(request).await?;
        tracing::info!(bucket, count = paths.len(), "removed objects");
        Ok(())
    }

    /// Time-limited URL for an object in a private bucket.
    pub async fn signed_url(&self, bucket: &str, path: &str, expires_in: u64) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        struct Signed {
            #[serde(rename = "signedURL")]
            signed_url: String,
        }

        let request = self
            .authed(Method::POST, &format!("/storage/v1/object/sign/{bucket}/{path}"))
            .await?
            .json(&json!({ "expiresIn": expires_in }));
        let body = self.send(request).await?.text().await?;
        let signed: Signed = serde_json::from_str(&body)?;
        Ok(self.config.endpoint(&format!("/storage/v1{}", signed.signed_url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::backend;
    use store::MemorySessionStore;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_upload_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/storage/v1/object/diary-photos/u/1.jpg"))
            .and(header("x-upsert", "true"))
            .and(header("cache-control", "max-age=3600"))
            .and(header("content-type", "image/jpeg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Key": "diary-photos/u/1.jpg"})))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend(&server, MemorySessionStore::new());
        backend
            .upload("diary-photos", "u/1.jpg", vec![0xff, 0xd8], "image/jpeg")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_and_sign() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/storage/v1/object/avatar"))
            .and(body_json(json!({"prefixes": ["u/avatar.png"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/storage/v1/object/sign/avatar/u/avatar.png"))
            .and(body_json(json!({"expiresIn": 3600})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "signedURL": "/object/sign/avatar/u/avatar.png?token=abc"
            })))
            .mount(&server)
            .await;

        let backend = backend(&server, MemorySessionStore::new());
        backend.remove("avatar", &["u/avatar.png".to_string()]).await.unwrap();
        let url = backend.signed_url("avatar", "u/avatar.png", 3600).await.unwrap();
        assert_eq!(
            url,
            format!("{}/storage/v1/object/sign/avatar/u/avatar.png?token=abc", server.uri())
        );
    }

    #[tokio::test]
    async fn test_public_url_and_probe() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/storage/v1/object/public/avatar/u/avatar.jpg"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let backend = backend(&server, MemorySessionStore::new());
        let url = backend.public_url("avatar", "u/avatar.jpg");
        assert_eq!(url, format!("{}/storage/v1/object/public/avatar/u/avatar.jpg", server.uri()));
        assert!(backend.url_exists(&url).await);
        assert!(!backend.url_exists(&backend.public_url("avatar", "u/avatar.png")).await);
    }
}
