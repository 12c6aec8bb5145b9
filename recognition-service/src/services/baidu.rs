//! Baidu AI image-recognition client.
//!
//! Both recognition endpoints are plain relays: the inbound payload is
//! forwarded with minimal transformation and the upstream body is
//! returned verbatim to the caller.

use crate::config::BaiduConfig;
use crate::services::metrics;
use anyhow::anyhow;
use axum::http::header::CONTENT_TYPE;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::{json, Map, Value};
use service_core::error::AppError;
use std::time::Duration;

const DISH_CLASSIFY_PATH: &str = "/rest/2.0/image-classify/v2/dish";
const COMBINATION_PATH: &str = "/api/v1/solution/direct/imagerecognition/combination";

/// Baidu client holding the shared connection pool and credentials.
#[derive(Clone)]
pub struct BaiduClient {
    client: Client,
    config: BaiduConfig,
}

impl BaiduClient {
    /// Create a new Baidu client with an explicit request timeout.
    pub fn new(config: BaiduConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::ConfigError(anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Send an image to the dish-classification endpoint.
    ///
    /// The outbound body is `image=<value>` with the value encoded per
    /// form-urlencoding rules, so payloads containing `&`, `=`, or `%`
    /// survive the trip intact.
    pub async fn classify_dish(&self, image: &str) -> Result<String, AppError> {
        let body = dish_form_body(image)?;
        let url = format!("{}{}", self.config.api_base_url, DISH_CLASSIFY_PATH);

        let request = self
            .client
            .post(&url)
            .query(&[(
                "access_token",
                self.config.dish_access_token.expose_secret().as_str(),
            )])
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);

        self.relay(request, "dish").await
    }

    /// Send an arbitrary request object to the combined-recognition
    /// endpoint, forcing `scenes` to `["ingredient"]`.
    pub async fn recognize_ingredients(
        &self,
        body: Map<String, Value>,
    ) -> Result<String, AppError> {
        let body = with_ingredient_scene(body);
        let url = format!("{}{}", self.config.api_base_url, COMBINATION_PATH);

        let request = self
            .client
            .post(&url)
            .query(&[(
                "access_token",
                self.config.ingredient_access_token.expose_secret().as_str(),
            )])
            .json(&body);

        self.relay(request, "ingredient").await
    }

    /// Execute an outbound request and classify the outcome.
    ///
    /// Success returns the raw upstream body; any non-2xx status is
    /// surfaced as an upstream failure rather than relayed as success.
    async fn relay(&self, request: reqwest::RequestBuilder, scene: &str) -> Result<String, AppError> {
        let response = request.send().await.map_err(|e| {
            metrics::record_upstream_call(scene, "transport_error");
            tracing::error!(scene, error = %e, "Baidu request failed");
            AppError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(AppError::from)?;

        tracing::debug!(scene, status = %status, "Baidu response received");

        if status.is_success() {
            metrics::record_upstream_call(scene, "ok");
            Ok(body)
        } else {
            metrics::record_upstream_call(scene, "upstream_error");
            tracing::error!(
                scene,
                status = %status,
                body = %body,
                "Baidu returned non-success status"
            );
            Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Build the form-urlencoded dish request body.
fn dish_form_body(image: &str) -> Result<String, AppError> {
    serde_urlencoded::to_string([("image", image)])
        .map_err(|e| AppError::InternalError(anyhow!("Failed to encode form body: {}", e)))
}

/// Overwrite `scenes` with the fixed single-element list, leaving all
/// other keys untouched.
fn with_ingredient_scene(mut body: Map<String, Value>) -> Map<String, Value> {
    body.insert("scenes".to_string(), json!(["ingredient"]));
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn form_body_is_literal_for_plain_values() {
        assert_eq!(dish_form_body("abc123").unwrap(), "image=abc123");
    }

    #[test]
    fn form_body_round_trips_reserved_characters() {
        let original = "a&b=c%d+e f";
        let body = dish_form_body(original).unwrap();

        let decoded: HashMap<String, String> = serde_urlencoded::from_str(&body).unwrap();
        assert_eq!(decoded["image"], original);
    }

    #[test]
    fn scenes_is_injected_when_absent() {
        let body = serde_json::from_str::<Map<String, Value>>(r#"{"foo":"bar"}"#).unwrap();
        let body = with_ingredient_scene(body);

        assert_eq!(body["scenes"], json!(["ingredient"]));
        assert_eq!(body["foo"], json!("bar"));
    }

    #[test]
    fn scenes_is_overwritten_not_merged() {
        let body =
            serde_json::from_str::<Map<String, Value>>(r#"{"scenes":["dish","logo"]}"#).unwrap();
        let body = with_ingredient_scene(body);

        assert_eq!(body["scenes"], json!(["ingredient"]));
    }
}
