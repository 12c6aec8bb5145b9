//! Relay handlers for the two recognition endpoints.
//!
//! Each handler validates the inbound payload, makes a single outbound
//! call, and returns the upstream body unmodified. There is no retry,
//! caching, or session state; every request is independent.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

use crate::services::metrics;
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Deserialize, Validate)]
pub struct DishRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "image is required"))]
    pub image: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn recognize_dish(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<DishRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    request.validate().map_err(|e| {
        metrics::record_relay_request("dish", "rejected");
        AppError::from(e)
    })?;

    match state.baidu.classify_dish(&request.image).await {
        Ok(body) => {
            metrics::record_relay_request("dish", "ok");
            Ok(raw_json(body))
        }
        Err(e) => {
            metrics::record_relay_request("dish", "failed");
            Err(e)
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn recognize_ingredient(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<Map<String, Value>>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    match state.baidu.recognize_ingredients(request).await {
        Ok(body) => {
            metrics::record_relay_request("ingredient", "ok");
            Ok(raw_json(body))
        }
        Err(e) => {
            metrics::record_relay_request("ingredient", "failed");
            Err(e)
        }
    }
}

/// Relay the upstream body byte-for-byte as JSON.
fn raw_json(body: String) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "application/json")],
        body,
    )
}
