use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::error_codes;
use crate::api::models::ApiError;
use crate::metrics::METRICS;
use crate::prioritizer::gemini_client::ModelError;
use crate::prioritizer::models::{PrioritizeRequest, PrioritizeResponse};
use crate::prioritizer::service::PrioritizerService;

/// Upper bound on tasks per request
const MAX_TASKS_PER_REQUEST: usize = 100;

/// Prioritizer API state
#[derive(Clone)]
pub struct PrioritizerState {
    pub service: Arc<PrioritizerService>,
}

/// Prioritize a task list
///
/// POST /api/v1/tasks/prioritize
pub async fn prioritize_tasks(
    State(state): State<PrioritizerState>,
    Json(request): Json<PrioritizeRequest>,
) -> Result<Json<PrioritizeResponse>, (StatusCode, Json<ApiError>)> {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    info!(
        %request_id,
        task_count = request.tasks.len(),
        language = request.language.as_str(),
        "prioritize request"
    );

    if request.tasks.len() > MAX_TASKS_PER_REQUEST {
        METRICS.record_prioritize(false);
        METRICS
            .prioritize_request_duration
            .with_label_values(&["prioritize"])
            .observe(start.elapsed().as_secs_f64());
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                error_codes::VALIDATION_ERROR,
                format!("tasks cannot exceed {MAX_TASKS_PER_REQUEST}"),
            )),
        ));
    }

    match state
        .service
        .prioritize(&request.tasks, request.language, Utc::now())
        .await
    {
        Ok(response) => {
            METRICS.record_prioritize(true);
            METRICS
                .prioritize_request_duration
                .with_label_values(&["prioritize"])
                .observe(start.elapsed().as_secs_f64());
            Ok(Json(response))
        }
        Err(e) => {
            METRICS.record_prioritize(false);
            METRICS
                .prioritize_request_duration
                .with_label_values(&["prioritize"])
                .observe(start.elapsed().as_secs_f64());

            let (status, code) = match &e {
                ModelError::Disabled => {
                    (StatusCode::SERVICE_UNAVAILABLE, error_codes::UPSTREAM_DISABLED)
                }
                ModelError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, error_codes::TIMEOUT),
                _ => (StatusCode::BAD_GATEWAY, error_codes::UPSTREAM_ERROR),
            };

            error!(%request_id, error = %e, "prioritization failed");
            // Detail stays in the logs; the caller gets the generic message.
            Err((
                status,
                Json(ApiError::new(code, request.language.failure_message())),
            ))
        }
    }
}
