//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Storage reachable
/// - **503 Service Unavailable**: Storage probe failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "postgres reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = check_storage(&state).await;
    let healthy = storage.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { storage },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    let backend = state.health.backend();

    match state.health.ping().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{backend} reachable")),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("{backend} error: {e}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::CommentSettings;
    use crate::domain::repositories::MockHealthRepository;
    use crate::error::AppError;
    use crate::infrastructure::Repositories;
    use crate::infrastructure::memory::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    fn state_with(health: MockHealthRepository) -> AppState {
        let mut repos = Repositories::memory(Arc::new(MemoryStore::new()));
        repos.health = Arc::new(health);
        AppState::new(repos, CommentSettings::default(), false)
    }

    #[tokio::test]
    async fn test_unreachable_storage_is_degraded() {
        let mut health = MockHealthRepository::new();
        health.expect_backend().return_const("postgres");
        health
            .expect_ping()
            .times(1)
            .returning(|| Err(AppError::internal("Database error", json!({}))));

        let Err((status, Json(body))) = health_handler(State(state_with(health))).await else {
            panic!("expected a degraded response");
        };

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.checks.storage.status, "error");
        assert_eq!(
            body.checks.storage.message.as_deref(),
            Some("postgres error: Database error")
        );
    }

    #[tokio::test]
    async fn test_reachable_storage_is_healthy() {
        let mut health = MockHealthRepository::new();
        health.expect_backend().return_const("postgres");
        health.expect_ping().times(1).returning(|| Ok(()));

        let Ok(Json(body)) = health_handler(State(state_with(health))).await else {
            panic!("expected a healthy response");
        };

        assert_eq!(body.status, "healthy");
        assert_eq!(
            body.checks.storage.message.as_deref(),
            Some("postgres reachable")
        );
    }
}
