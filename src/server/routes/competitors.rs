//! Competitor lookup handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::Value;

use crate::competitor::CompetitorsResponse;
use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Deserialize)]
pub struct CompetitorsRequest {
    #[serde(default)]
    pub website: Option<Value>,
}

/// The website to look up, if the field holds one. Non-empty strings pass
/// through untouched; non-zero numbers and `true` are taken as their JSON
/// text. Everything else counts as missing.
fn website_from(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(website) if !website.is_empty() => Some(website),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// POST /api/competitors - Discover and enrich competitors of `website`.
pub async fn find_competitors(
    State(state): State<AppState>,
    body: Result<Json<CompetitorsRequest>, JsonRejection>,
) -> Result<Json<CompetitorsResponse>, ApiError> {
    let website = match body {
        Ok(Json(request)) => website_from(request.website).ok_or(ApiError::MissingWebsite)?,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected competitors request body");
            return Err(ApiError::MissingWebsite);
        }
    };

    // A spawned task turns a panic in the engine into a JoinError.
    let engine = state.engine.clone();
    let lookup = website.clone();
    let result = tokio::spawn(async move { engine.find(&lookup).await }).await;

    match result {
        Ok(Ok(competitors)) => Ok(Json(CompetitorsResponse { competitors })),
        Ok(Err(e)) => {
            tracing::error!(website = %website, error = %e, "competitor lookup failed");
            Err(ApiError::Internal)
        }
        Err(e) => {
            tracing::error!(website = %website, error = %e, "competitor lookup task aborted");
            Err(ApiError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn website_from_accepts_non_empty_strings() {
        assert_eq!(website_from(Some(json!("example.com"))).as_deref(), Some("example.com"));
        assert_eq!(website_from(Some(json!("  "))).as_deref(), Some("  "));
    }

    #[test]
    fn website_from_stringifies_truthy_scalars() {
        assert_eq!(website_from(Some(json!(123))).as_deref(), Some("123"));
        assert_eq!(website_from(Some(json!(true))).as_deref(), Some("true"));
    }

    #[test]
    fn website_from_rejects_empty_and_falsy_values() {
        assert_eq!(website_from(None), None);
        assert_eq!(website_from(Some(json!(""))), None);
        assert_eq!(website_from(Some(Value::Null)), None);
        assert_eq!(website_from(Some(json!(0))), None);
        assert_eq!(website_from(Some(json!(false))), None);
        assert_eq!(website_from(Some(json!(["a.com"]))), None);
        assert_eq!(website_from(Some(json!({"url": "a.com"}))), None);
    }
}
