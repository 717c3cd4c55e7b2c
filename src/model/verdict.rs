//! Analysis verdicts for test execution reports

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reason used when the report under analysis is missing or empty
pub const INVALID_INPUT_REASON: &str = "Invalid or empty test result";

/// How a verdict was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMethod {
    /// The report was rejected before any scoring
    Validation,
    /// No model classifier is configured, or the caller disabled it
    RuleBasedOnly,
    /// A model classifier exists but its verdict could not be used
    RuleBasedWithAiAvailable,
    /// The model classifier answered and its verdict is authoritative
    AiEnhanced,
}

impl std::fmt::Display for AnalysisMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            AnalysisMethod::Validation => "validation",
            AnalysisMethod::RuleBasedOnly => "rule-based-only",
            AnalysisMethod::RuleBasedWithAiAvailable => "rule-based-with-ai-available",
            AnalysisMethod::AiEnhanced => "ai-enhanced",
        };
        f.write_str(tag)
    }
}

/// A success/failure judgement without provenance.
///
/// Produced by both the rule-based scorer and the model classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Assessment {
    pub success: bool,
    /// Always within [0.0, 1.0]
    pub confidence: f64,
    /// Never empty
    pub reason: String,
}

impl Assessment {
    /// Build an assessment, clamping the confidence into [0.0, 1.0].
    ///
    /// NaN and negative infinity clamp to 0.0, positive infinity to 1.0.
    pub fn new(success: bool, confidence: f64, reason: impl Into<String>) -> Self {
        Self {
            success,
            confidence: clamp_confidence(confidence),
            reason: reason.into(),
        }
    }
}

/// Clamp a confidence value to [0.0, 1.0]
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// The analyzer's output for a single report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub method: AnalysisMethod,
    /// Rule-based assessment kept for comparison when the model verdict wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_result: Option<Assessment>,
}

impl Verdict {
    /// Verdict for a report that failed input validation
    pub fn invalid_input() -> Self {
        Self {
            assessment: Assessment::new(false, 1.0, INVALID_INPUT_REASON),
            method: AnalysisMethod::Validation,
            fallback_result: None,
        }
    }

    /// Verdict carrying the rule-based assessment under the given method tag
    pub fn rule_based(assessment: Assessment, method: AnalysisMethod) -> Self {
        Self {
            assessment,
            method,
            fallback_result: None,
        }
    }

    /// Verdict carrying an authoritative model assessment plus the rule-based one
    pub fn ai_enhanced(model: Assessment, rule_based: Assessment) -> Self {
        Self {
            assessment: model,
            method: AnalysisMethod::AiEnhanced,
            fallback_result: Some(rule_based),
        }
    }

    pub fn success(&self) -> bool {
        self.assessment.success
    }

    pub fn confidence(&self) -> f64 {
        self.assessment.confidence
    }

    pub fn reason(&self) -> &str {
        &self.assessment.reason
    }

    /// Status chip shown in the run history
    pub fn status(&self) -> RunStatus {
        if self.assessment.success {
            RunStatus::Passed
        } else {
            RunStatus::Failed
        }
    }
}

/// Outcome label of a test run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Passed,
    Failed,
}
