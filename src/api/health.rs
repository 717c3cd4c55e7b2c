//! Health check endpoints for liveness and readiness checks

use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::service::{TestResultAnalyzer, TestStore};

#[derive(Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessStatus {
    pub status: String,
    pub version: String,
    pub dependencies: DependencyHealth,
}

#[derive(Serialize, ToSchema)]
pub struct DependencyHealth {
    pub test_store: String,
    pub llm: String,
}

/// Liveness endpoint
///
/// Always returns 200 OK if the service is running.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is alive", body = HealthStatus)
    ),
    tag = "health"
)]
#[get("/api/health")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness endpoint
///
/// Returns 200 OK when the test directory is usable. The LLM provider is
/// optional and only reported.
#[utoipa::path(
    get,
    path = "/api/health/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessStatus),
        (status = 503, description = "Service is not ready", body = ReadinessStatus)
    ),
    tag = "health"
)]
#[get("/api/health/ready")]
pub async fn readiness(
    store: web::Data<TestStore>,
    analyzer: web::Data<TestResultAnalyzer>,
) -> impl Responder {
    let store_status = match tokio::fs::metadata(store.dir()).await {
        Ok(meta) if meta.is_dir() => "healthy",
        Ok(_) => {
            tracing::error!(dir = %store.dir().display(), "Test store path is not a directory");
            "unhealthy"
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                dir = %store.dir().display(),
                "Test store health check failed"
            );
            "unhealthy"
        }
    };

    // Non-critical
    let llm_status = if analyzer.has_model() {
        "configured"
    } else {
        "disabled"
    };

    let all_healthy = store_status == "healthy";

    let status = ReadinessStatus {
        status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dependencies: DependencyHealth {
            test_store: store_status.to_string(),
            llm: llm_status.to_string(),
        },
    };

    if all_healthy {
        HttpResponse::Ok().json(status)
    } else {
        HttpResponse::ServiceUnavailable().json(status)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(liveness).service(readiness);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    use crate::api::ApiData;
    use crate::api::test_support::test_state;

    #[actix_web::test]
    async fn test_liveness() {
        let dir = tempfile::tempdir().unwrap();
        let data = ApiData::new(&test_state(dir.path(), None).await);
        let app = test::init_service(App::new().configure(|cfg| data.configure(cfg))).await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn test_readiness_reports_dependencies() {
        let dir = tempfile::tempdir().unwrap();
        let data = ApiData::new(&test_state(dir.path(), None).await);
        let app = test::init_service(App::new().configure(|cfg| data.configure(cfg))).await;

        let req = test::TestRequest::get()
            .uri("/api/health/ready")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["dependencies"]["test_store"], "healthy");
        assert_eq!(body["dependencies"]["llm"], "disabled");
    }

    #[actix_web::test]
    async fn test_readiness_fails_when_directory_is_gone() {
        let root = tempfile::tempdir().unwrap();
        let tests_dir = root.path().join("tests");
        let data = ApiData::new(&test_state(&tests_dir, None).await);
        std::fs::remove_dir(&tests_dir).unwrap();
        let app = test::init_service(App::new().configure(|cfg| data.configure(cfg))).await;

        let req = test::TestRequest::get()
            .uri("/api/health/ready")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
