//! Test generation and execution through the chat model
//!
//! Generation turns a free-form request into a Markdown test and stores it.
//! Execution asks the model to simulate the stored test, then classifies the
//! resulting report with the test result analyzer.

use std::sync::Arc;

use crate::model::{GeneratedTest, TestRun};
use crate::service::analysis::TestResultAnalyzer;
use crate::service::llm::{LlmError, TextGenerator};
use crate::service::test_store::{TestStore, TestStoreError};

/// System prompt for turning a request into a Markdown test
pub const GENERATION_SYSTEM_PROMPT: &str = "You are an AI assistant that generates high-quality end-to-end test prompts in Markdown format. Include clear titles and step-by-step instructions.";

/// System prompt for simulating a test run
pub const EXECUTION_SYSTEM_PROMPT: &str = "You are an AI test executor. Given a Markdown test prompt, simulate running the test and report results.";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TestRunnerError {
    #[error("LLM provider is not configured")]
    LlmUnavailable,

    #[error(transparent)]
    Store(#[from] TestStoreError),

    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),
}

/// Service generating and running Markdown tests
pub struct TestRunner {
    generator: Option<Arc<dyn TextGenerator>>,
    model: String,
    store: Arc<TestStore>,
    analyzer: Arc<TestResultAnalyzer>,
}

impl TestRunner {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        model: impl Into<String>,
        store: Arc<TestStore>,
        analyzer: Arc<TestResultAnalyzer>,
    ) -> Self {
        Self {
            generator,
            model: model.into(),
            store,
            analyzer,
        }
    }

    fn generator(&self) -> Result<&Arc<dyn TextGenerator>, TestRunnerError> {
        self.generator
            .as_ref()
            .ok_or(TestRunnerError::LlmUnavailable)
    }

    /// Generate a Markdown test from a request and store it
    pub async fn generate(&self, message: &str) -> Result<GeneratedTest, TestRunnerError> {
        let generator = self.generator()?;
        let start_time = std::time::Instant::now();

        let response = generator
            .generate(&self.model, GENERATION_SYSTEM_PROMPT, message)
            .await?;

        tracing::info!(
            model = %self.model,
            elapsed_ms = start_time.elapsed().as_millis(),
            response_length = response.len(),
            "Test generation completed"
        );

        let saved_test = self.store.save(&response).await?;

        Ok(GeneratedTest {
            response,
            saved_test,
        })
    }

    /// Execute a stored test and analyze the report
    pub async fn run(&self, file_id: &str) -> Result<TestRun, TestRunnerError> {
        let generator = self.generator()?;
        let test = self.store.get(file_id).await?;
        let start_time = std::time::Instant::now();

        let prompt = format!("Execute or verify the following test prompt:\n\n{}", test.content);
        let result = generator
            .generate(&self.model, EXECUTION_SYSTEM_PROMPT, &prompt)
            .await?;

        tracing::info!(
            file_id = %test.file_id,
            model = %self.model,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Test execution completed"
        );

        let analysis = self.analyzer.analyze(&result, true).await;

        tracing::info!(
            file_id = %test.file_id,
            success = analysis.success(),
            confidence = analysis.confidence(),
            method = %analysis.method,
            reason = %analysis.reason(),
            "Test run analyzed"
        );

        Ok(TestRun {
            file_id: test.file_id,
            status: analysis.status(),
            result,
            analysis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisMethod, RunStatus};
    use crate::service::analysis::{RuleScorer, ScoringRules};
    use crate::service::llm::fake::FakeGenerator;

    fn analyzer() -> Arc<TestResultAnalyzer> {
        Arc::new(TestResultAnalyzer::new(
            RuleScorer::new(ScoringRules::builtin().unwrap()),
            None,
        ))
    }

    fn llm(generator: &Arc<FakeGenerator>) -> Option<Arc<dyn TextGenerator>> {
        let generator: Arc<dyn TextGenerator> = generator.clone();
        Some(generator)
    }

    async fn store(dir: &tempfile::TempDir) -> Arc<TestStore> {
        Arc::new(TestStore::open(dir.path()).await.unwrap())
    }

    #[tokio::test]
    async fn test_generate_saves_reply() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(FakeGenerator::replying("# Checkout test\n\n1. Add item to cart"));
        let runner = TestRunner::new(llm(&generator), "gpt-chat", store(&dir).await, analyzer());

        let generated = runner.generate("Test the checkout").await.unwrap();

        assert_eq!(generated.saved_test.title, "Checkout test");
        assert!(dir.path().join(&generated.saved_test.file_id).exists());

        let calls = generator.calls();
        assert_eq!(calls[0].model, "gpt-chat");
        assert_eq!(calls[0].system, GENERATION_SYSTEM_PROMPT);
        assert_eq!(calls[0].user, "Test the checkout");
    }

    #[tokio::test]
    async fn test_run_executes_and_analyzes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("login.md"), "# Login\n\n1. Sign in").unwrap();
        let generator = Arc::new(FakeGenerator::replying(
            "Test failed with error occurred. Assertion failed and test case failed.",
        ));
        let runner = TestRunner::new(llm(&generator), "gpt-chat", store(&dir).await, analyzer());

        let run = runner.run("login.md").await.unwrap();

        assert_eq!(run.file_id, "login.md");
        assert_eq!(run.status, RunStatus::Failed);
        assert!(!run.analysis.success());
        assert_eq!(run.analysis.method, AnalysisMethod::RuleBasedOnly);

        let calls = generator.calls();
        assert_eq!(calls[0].system, EXECUTION_SYSTEM_PROMPT);
        assert!(calls[0].user.contains("# Login"));
    }

    #[tokio::test]
    async fn test_run_missing_test() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(FakeGenerator::replying("unused"));
        let runner = TestRunner::new(llm(&generator), "gpt-chat", store(&dir).await, analyzer());

        let err = runner.run("missing.md").await.unwrap_err();
        assert!(matches!(err, TestRunnerError::Store(TestStoreError::NotFound(_))));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_without_generator_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let runner = TestRunner::new(None, "gpt-chat", store(&dir).await, analyzer());

        assert!(matches!(
            runner.generate("anything").await,
            Err(TestRunnerError::LlmUnavailable)
        ));
        assert!(matches!(
            runner.run("any.md").await,
            Err(TestRunnerError::LlmUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let runner = TestRunner::new(
            llm(&Arc::new(FakeGenerator::failing("quota exceeded"))),
            "gpt-chat",
            store(&dir).await,
            analyzer(),
        );

        let err = runner.generate("anything").await.unwrap_err();
        assert!(matches!(err, TestRunnerError::Llm(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
