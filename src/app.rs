//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::sync::Arc;

use crate::model::Config;
use crate::service::analysis::{ModelClassifier, RuleScorer, RulesError, ScoringRules};
use crate::service::test_store::TestStoreError;
use crate::service::{LlmClient, TestResultAnalyzer, TestRunner, TestStore, TextGenerator};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Two-stage test result analyzer
    pub analyzer: Arc<TestResultAnalyzer>,
    /// Markdown test document storage
    pub store: Arc<TestStore>,
    /// Test generation and execution service
    pub runner: Arc<TestRunner>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Scoring rule compilation from configuration
    /// 2. LLM client initialization (optional, requires OPENAI_API_KEY)
    /// 3. Test store initialization
    /// 4. Service dependency graph construction
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let rules = ScoringRules::from_config(&config.analyzer)?;

        let generator: Option<Arc<dyn TextGenerator>> = match config.api_key.as_deref() {
            Some(api_key) => {
                let client: Arc<dyn TextGenerator> = Arc::new(LlmClient::new(api_key));
                tracing::info!("LLM client enabled");
                Some(client)
            }
            None => {
                tracing::warn!("OPENAI_API_KEY not set, running without LLM features");
                None
            }
        };

        let store = Arc::new(TestStore::open(&config.tests_dir).await?);

        Ok(Self::build(rules, generator, store, &config))
    }

    /// Build the service graph from already-initialized resources
    pub fn build(
        rules: ScoringRules,
        generator: Option<Arc<dyn TextGenerator>>,
        store: Arc<TestStore>,
        config: &Config,
    ) -> Self {
        let classifier = generator
            .clone()
            .map(|g| ModelClassifier::new(g, config.analyzer_model.clone()));
        let analyzer = Arc::new(TestResultAnalyzer::new(RuleScorer::new(rules), classifier));

        let runner = Arc::new(TestRunner::new(
            generator,
            config.chat_model.clone(),
            Arc::clone(&store),
            Arc::clone(&analyzer),
        ));

        Self {
            analyzer,
            store,
            runner,
        }
    }

    pub fn llm_enabled(&self) -> bool {
        self.analyzer.has_model()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid analyzer keyword or pattern configuration
    #[error("Invalid analyzer configuration: {0}")]
    InvalidRules(#[from] RulesError),

    /// Test directory could not be prepared
    #[error("Test store initialization failed: {0}")]
    StoreInit(#[from] TestStoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnalyzerRulesConfig;

    #[tokio::test]
    async fn test_new_without_api_key_disables_llm() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            tests_dir: dir.path().join("tests"),
            ..Config::default()
        };

        let state = AppState::new(config).await.unwrap();

        assert!(!state.llm_enabled());
        assert!(dir.path().join("tests").is_dir());
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_rules() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            tests_dir: dir.path().to_path_buf(),
            analyzer: AnalyzerRulesConfig {
                success_patterns: Some(vec!["[".to_string()]),
                ..AnalyzerRulesConfig::default()
            },
            ..Config::default()
        };

        let err = AppState::new(config).await.err().unwrap();
        assert!(matches!(err, AppError::InvalidRules(_)));
    }

    #[tokio::test]
    async fn test_new_rejects_oversized_weight() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            tests_dir: dir.path().to_path_buf(),
            analyzer: AnalyzerRulesConfig {
                strong_weight: 3_000_000_000,
                ..AnalyzerRulesConfig::default()
            },
            ..Config::default()
        };

        let err = AppState::new(config).await.err().unwrap();
        assert!(matches!(
            err,
            AppError::InvalidRules(RulesError::WeightTooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn test_new_with_api_key_enables_llm() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            tests_dir: dir.path().to_path_buf(),
            api_key: Some("sk-test".to_string()),
            ..Config::default()
        };

        let state = AppState::new(config).await.unwrap();

        assert!(state.llm_enabled());
    }
}
