use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use nazaris_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: Option<bool>,
    site: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let health_status = service.get_status().await;
    let HealthStatus { email, site } = health_status;

    let status = if health_status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = HealthResponse {
        http: true,
        email,
        site,
    };

    (status, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use nazaris_core_health_contracts::MockHealthFeatureService;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let health = MockHealthFeatureService::new().with_get_status(HealthStatus {
            email: None,
            site: true,
        });

        // Act
        let (status, body) = get(health).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"http":true,"email":null,"site":true}"#);
    }

    #[tokio::test]
    async fn unhealthy() {
        // Arrange
        let health = MockHealthFeatureService::new().with_get_status(HealthStatus {
            email: Some(false),
            site: true,
        });

        // Act
        let (status, body) = get(health).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"http":true,"email":false,"site":true}"#);
    }

    async fn get(health: MockHealthFeatureService) -> (StatusCode, String) {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let response = router(Arc::new(health)).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }
}
