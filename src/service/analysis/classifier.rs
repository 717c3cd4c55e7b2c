//! Model-based classification of test execution reports

use std::sync::Arc;

use crate::model::Assessment;
use crate::service::analysis::error::ClassifierError;
use crate::service::analysis::prompts::{CLASSIFIER_SYSTEM_PROMPT, build_classification_prompt};
use crate::service::analysis::validation::parse_classifier_reply;
use crate::service::llm::TextGenerator;

/// Asks a text-generation model whether a report describes a pass or a fail.
///
/// One round trip per call: no retry, caching or batching.
#[derive(Clone)]
pub struct ModelClassifier {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl ModelClassifier {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Classify a report via the configured model
    pub async fn classify(&self, report: &str) -> Result<Assessment, ClassifierError> {
        let start_time = std::time::Instant::now();
        let prompt = build_classification_prompt(report);
        let prompt_length = prompt.len();

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt_length,
            "Initiating LLM call for test result classification"
        );

        let reply = self
            .generator
            .generate(&self.model, CLASSIFIER_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| {
                tracing::error!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "LLM call for test result classification failed"
                );
                ClassifierError::Provider(e.to_string())
            })?;

        tracing::info!(
            model = %self.model,
            elapsed_ms = start_time.elapsed().as_millis(),
            prompt_length = prompt_length,
            reply_length = reply.len(),
            "LLM call for test result classification completed"
        );

        parse_classifier_reply(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::llm::fake::FakeGenerator;

    fn classifier(generator: Arc<FakeGenerator>) -> ModelClassifier {
        ModelClassifier::new(generator, "gpt-test")
    }

    #[tokio::test]
    async fn test_classify_sends_prompts_and_parses_reply() {
        let generator = Arc::new(FakeGenerator::replying(
            r#"{"success": true, "confidence": 0.85, "reason": "All steps passed"}"#,
        ));
        let result = classifier(generator.clone())
            .classify("Step 1 passed")
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.confidence, 0.85);

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gpt-test");
        assert_eq!(calls[0].system, CLASSIFIER_SYSTEM_PROMPT);
        assert!(calls[0].user.contains("Step 1 passed"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_retried() {
        let generator = Arc::new(FakeGenerator::failing("rate limited"));
        let err = classifier(generator.clone())
            .classify("report")
            .await
            .unwrap_err();

        assert!(matches!(err, ClassifierError::Provider(_)));
        assert_eq!(err.kind(), "provider_error");
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_reply() {
        let generator = Arc::new(FakeGenerator::replying("I think it passed"));
        let err = classifier(generator).classify("report").await.unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_invalid_structure_reply() {
        let generator = Arc::new(FakeGenerator::replying(r#"{"success": true}"#));
        let err = classifier(generator).classify("report").await.unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidResponseStructure(_)));
    }
}
