//! REST API endpoint for test result analysis

use actix_web::{HttpResponse, Responder, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::model::Verdict;
use crate::service::TestResultAnalyzer;

/// Analysis request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Test execution report. Anything other than a non-empty string is rejected
    /// with a `validation` verdict.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub result: serde_json::Value,
    /// Consult the model classifier when configured (default: true)
    #[serde(default = "default_use_model")]
    pub use_model: bool,
}

fn default_use_model() -> bool {
    true
}

/// Analyze a test execution report
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Verdict computed", body = Verdict)
    ),
    tag = "analysis"
)]
#[post("/api/analyze")]
pub async fn analyze(
    analyzer: web::Data<TestResultAnalyzer>,
    body: web::Json<AnalyzeRequest>,
) -> impl Responder {
    let request = body.into_inner();
    let report = request.result.as_str().unwrap_or_default();

    let verdict = analyzer.analyze(report, request.use_model).await;

    tracing::debug!(
        method = %verdict.method,
        success = verdict.success(),
        confidence = verdict.confidence(),
        "Analysis request served"
    );

    HttpResponse::Ok().json(verdict)
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::api::ApiData;
    use crate::api::test_support::test_state;
    use crate::service::TextGenerator;
    use crate::service::llm::fake::FakeGenerator;

    async fn post_analyze(
        generator: Option<Arc<dyn TextGenerator>>,
        body: Value,
    ) -> Value {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path(), generator).await;
        let data = ApiData::new(&state);
        let app = test::init_service(App::new().configure(|cfg| data.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/api/analyze")
            .set_json(body)
            .to_request();
        test::call_and_read_body_json(&app, req).await
    }

    #[actix_web::test]
    async fn test_analyze_rule_based() {
        let body = post_analyze(
            None,
            json!({
                "result": "Test completed successfully. All steps passed and verification passed.",
                "useModel": false
            }),
        )
        .await;

        assert_eq!(body["success"], true);
        assert_eq!(body["method"], "rule-based-only");
        assert!(body["confidence"].as_f64().unwrap() > 0.8);
        assert!(body.get("fallbackResult").is_none());
    }

    #[actix_web::test]
    async fn test_analyze_rejects_non_string_and_empty() {
        for result in [json!(123), json!(null), json!(""), json!({"text": "passed"})] {
            let body = post_analyze(None, json!({ "result": result })).await;

            assert_eq!(body["success"], false);
            assert_eq!(body["confidence"], 1.0);
            assert_eq!(body["reason"], "Invalid or empty test result");
            assert_eq!(body["method"], "validation");
        }
    }

    #[actix_web::test]
    async fn test_analyze_missing_result_is_validation() {
        let body = post_analyze(None, json!({})).await;
        assert_eq!(body["method"], "validation");
    }

    #[actix_web::test]
    async fn test_analyze_ai_enhanced() {
        let generator: Arc<dyn TextGenerator> = Arc::new(FakeGenerator::replying(
            r#"{"success": false, "confidence": 0.75, "reason": "Unclear results suggest test failure"}"#,
        ));
        let body = post_analyze(
            Some(generator),
            json!({ "result": "Ambiguous test outcome with unclear results" }),
        )
        .await;

        assert_eq!(body["method"], "ai-enhanced");
        assert_eq!(body["success"], false);
        assert_eq!(body["confidence"], 0.75);
        let fallback = &body["fallbackResult"];
        assert!(fallback["success"].is_boolean());
        assert!(fallback["confidence"].is_number());
        assert!(fallback["reason"].is_string());
    }
}
