//! Test result analysis
//!
//! Decides whether an LLM-generated test execution report describes a pass or
//! a fail. Rule-based scoring always runs; when a model classifier is
//! configured and requested, its verdict wins whenever it succeeds, and any
//! classifier failure falls back to the rule-based verdict.

use crate::model::{AnalysisMethod, Verdict};

pub mod classifier;
pub mod error;
pub mod keywords;
pub mod prompts;
pub mod rules;
pub mod validation;

pub use classifier::ModelClassifier;
pub use rules::{RuleScorer, RulesError, ScoringRules};

/// Two-stage analyzer for test execution reports.
///
/// Stateless between calls; safe to share behind an `Arc`.
pub struct TestResultAnalyzer {
    scorer: RuleScorer,
    classifier: Option<ModelClassifier>,
}

impl TestResultAnalyzer {
    pub fn new(scorer: RuleScorer, classifier: Option<ModelClassifier>) -> Self {
        match &classifier {
            Some(c) => tracing::info!(
                model = %c.model(),
                "Test result analyzer initialized with model classifier"
            ),
            None => tracing::info!("Test result analyzer initialized without model classifier"),
        }

        Self { scorer, classifier }
    }

    /// Whether a model classifier is configured
    pub fn has_model(&self) -> bool {
        self.classifier.is_some()
    }

    /// Analyze a report. Never fails: every problem is encoded in the verdict.
    pub async fn analyze(&self, report: &str, use_model: bool) -> Verdict {
        if report.is_empty() {
            return Verdict::invalid_input();
        }

        let rule_based = self.scorer.score(report);

        let classifier = match (&self.classifier, use_model) {
            (Some(classifier), true) => classifier,
            _ => return Verdict::rule_based(rule_based, AnalysisMethod::RuleBasedOnly),
        };

        match classifier.classify(report).await {
            Ok(model_verdict) => Verdict::ai_enhanced(model_verdict, rule_based),
            Err(e) => {
                tracing::warn!(
                    error_kind = e.kind(),
                    error = %e,
                    "Model classification failed, falling back to rule-based analysis"
                );
                Verdict::rule_based(rule_based, AnalysisMethod::RuleBasedWithAiAvailable)
            }
        }
    }
}
