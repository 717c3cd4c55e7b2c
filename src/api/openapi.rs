//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::analysis::{self, AnalyzeRequest};
use crate::api::error::ErrorResponse;
use crate::api::health::{self, DependencyHealth, HealthStatus, ReadinessStatus};
use crate::api::tests::{self as test_routes, MessageRequest};
use crate::model::{
    AnalysisMethod, Assessment, GeneratedTest, RunStatus, TestDocument, TestRun, TestSummary,
    Verdict,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "E2E Test Agent API",
        description = "Generate, run and analyze end-to-end tests with rule-based and model-assisted verdicts"
    ),
    paths(
        analysis::analyze,
        test_routes::list_tests,
        test_routes::get_test,
        test_routes::run_test,
        test_routes::create_test,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        AnalyzeRequest,
        MessageRequest,
        Verdict,
        Assessment,
        AnalysisMethod,
        RunStatus,
        TestSummary,
        TestDocument,
        GeneratedTest,
        TestRun,
        ErrorResponse,
        HealthStatus,
        ReadinessStatus,
        DependencyHealth,
    )),
    tags(
        (name = "analysis", description = "Test result analysis"),
        (name = "tests", description = "Stored tests, generation and execution"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_all_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/analyze",
            "/api/tests",
            "/api/tests/{file_id}",
            "/api/tests/{file_id}/run",
            "/api/message",
            "/api/health",
            "/api/health/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_yaml_renders() {
        let yaml = ApiDoc::openapi().to_yaml().unwrap();
        assert!(yaml.contains("/api/analyze"));
    }
}
