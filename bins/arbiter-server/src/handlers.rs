// HTTP route handlers for the arbiter server

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use tracing::{info, warn};

use arbiter_core::{runner, types::RunRequest};

use crate::AppState;

/// POST /run - Judge a submission against its test cases
///
/// A body that fails to parse is the only request-level error (400);
/// per-case execution failures come back as `passed: false` entries
/// inside a 200 response.
pub async fn run_submission(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RunRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected malformed run request");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    info!(
        language = %request.language,
        test_cases = request.test_cases.len(),
        source_size = request.code.len(),
        "Run request received"
    );

    let results = runner::run_cases(
        state.executor.as_ref(),
        &request.language,
        &request.code,
        &request.test_cases,
    )
    .await;

    (StatusCode::OK, Json(results)).into_response()
}

/// GET /status - Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
