//! Rule-based scoring of test execution reports
//!
//! Weighted keyword containment plus one flat bonus per structural pattern
//! family. Pure and deterministic: the same report always yields the same
//! assessment.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::model::{AnalyzerRulesConfig, Assessment};
use crate::service::analysis::keywords::{
    FAILURE_PATTERNS, MODERATE_FAILURE_KEYWORDS, MODERATE_SUCCESS_KEYWORDS, STRONG_FAILURE_KEYWORDS,
    STRONG_SUCCESS_KEYWORDS, SUCCESS_PATTERNS,
};

/// Reason when neither side scored
pub const NO_INDICATORS_REASON: &str = "No clear success or failure indicators found";

/// Reason when both sides scored equally
pub const MIXED_INDICATORS_REASON: &str = "Mixed success and failure indicators";

const NO_INDICATORS_CONFIDENCE: f64 = 0.3;
const TIE_CONFIDENCE: f64 = 0.4;
const BASE_CONFIDENCE: f64 = 0.6;
const CONFIDENCE_SPAN: f64 = 0.35;
const MAX_RULE_CONFIDENCE: f64 = 0.95;

/// Upper bound for configured keyword weights and the pattern bonus
pub const MAX_WEIGHT: u32 = 1_000;

/// Invalid scoring configuration
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RulesError {
    #[error("invalid pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("keyword weight must be positive (table: {0})")]
    ZeroWeight(&'static str),

    #[error("{setting} is {value}, maximum is {MAX_WEIGHT}")]
    WeightTooLarge { setting: &'static str, value: u32 },

    #[error("empty keyword in table {0}")]
    EmptyKeyword(&'static str),
}

/// A phrase and the score it adds when contained in a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedKeyword {
    pub phrase: String,
    pub weight: u32,
}

/// A pre-compiled, case-insensitive pattern with its source kept for display
#[derive(Clone)]
pub struct CompiledPattern {
    pub pattern: String,
    regex: Regex,
}

impl CompiledPattern {
    pub fn compile(pattern: &str) -> Result<Self, RulesError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| RulesError::InvalidPattern {
                pattern: pattern.to_string(),
                source: e,
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("pattern", &self.pattern)
            .finish()
    }
}

/// Data tables driving the scorer
#[derive(Debug, Clone)]
pub struct ScoringRules {
    pub success_keywords: Vec<WeightedKeyword>,
    pub failure_keywords: Vec<WeightedKeyword>,
    pub success_patterns: Vec<CompiledPattern>,
    pub failure_patterns: Vec<CompiledPattern>,
    /// Added once per family when any of its patterns matches
    pub pattern_bonus: u32,
}

impl ScoringRules {
    /// Compile scoring rules, falling back to built-in tables where the config has none
    pub fn from_config(config: &AnalyzerRulesConfig) -> Result<Self, RulesError> {
        if config.strong_weight == 0 {
            return Err(RulesError::ZeroWeight("strong"));
        }
        if config.moderate_weight == 0 {
            return Err(RulesError::ZeroWeight("moderate"));
        }
        for (setting, value) in [
            ("strong_weight", config.strong_weight),
            ("moderate_weight", config.moderate_weight),
            ("pattern_bonus", config.pattern_bonus),
        ] {
            if value > MAX_WEIGHT {
                return Err(RulesError::WeightTooLarge { setting, value });
            }
        }

        let mut success_keywords = weighted(
            "strong_success",
            config.strong_success.as_deref(),
            STRONG_SUCCESS_KEYWORDS,
            config.strong_weight,
        )?;
        success_keywords.extend(weighted(
            "moderate_success",
            config.moderate_success.as_deref(),
            MODERATE_SUCCESS_KEYWORDS,
            config.moderate_weight,
        )?);

        let mut failure_keywords = weighted(
            "strong_failure",
            config.strong_failure.as_deref(),
            STRONG_FAILURE_KEYWORDS,
            config.strong_weight,
        )?;
        failure_keywords.extend(weighted(
            "moderate_failure",
            config.moderate_failure.as_deref(),
            MODERATE_FAILURE_KEYWORDS,
            config.moderate_weight,
        )?);

        Ok(Self {
            success_keywords,
            failure_keywords,
            success_patterns: compile_all(config.success_patterns.as_deref(), SUCCESS_PATTERNS)?,
            failure_patterns: compile_all(config.failure_patterns.as_deref(), FAILURE_PATTERNS)?,
            pattern_bonus: config.pattern_bonus,
        })
    }

    /// Built-in tables
    pub fn builtin() -> Result<Self, RulesError> {
        Self::from_config(&AnalyzerRulesConfig::default())
    }
}

fn weighted(
    table: &'static str,
    configured: Option<&[String]>,
    builtin: &[&str],
    weight: u32,
) -> Result<Vec<WeightedKeyword>, RulesError> {
    let phrases: Vec<String> = match configured {
        Some(list) => list.iter().map(|p| p.trim().to_lowercase()).collect(),
        None => builtin.iter().map(|p| p.to_string()).collect(),
    };

    if phrases.iter().any(|p| p.is_empty()) {
        return Err(RulesError::EmptyKeyword(table));
    }

    Ok(phrases
        .into_iter()
        .map(|phrase| WeightedKeyword { phrase, weight })
        .collect())
}

fn compile_all(
    configured: Option<&[String]>,
    builtin: &[&str],
) -> Result<Vec<CompiledPattern>, RulesError> {
    match configured {
        Some(list) => list.iter().map(|p| CompiledPattern::compile(p)).collect(),
        None => builtin
            .iter()
            .map(|p| CompiledPattern::compile(p))
            .collect(),
    }
}

/// Raw evidence totals for one report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleScores {
    pub success: u32,
    pub failure: u32,
}

/// Deterministic keyword/pattern classifier
#[derive(Debug, Clone)]
pub struct RuleScorer {
    rules: ScoringRules,
}

impl RuleScorer {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    /// Tally success and failure evidence for a report
    pub fn tally(&self, report: &str) -> RuleScores {
        let content = report.trim().to_lowercase();

        let mut success = keyword_score(&self.rules.success_keywords, &content);
        let mut failure = keyword_score(&self.rules.failure_keywords, &content);

        if self.rules.success_patterns.iter().any(|p| p.is_match(&content)) {
            success = success.saturating_add(self.rules.pattern_bonus);
        }
        if self.rules.failure_patterns.iter().any(|p| p.is_match(&content)) {
            failure = failure.saturating_add(self.rules.pattern_bonus);
        }

        RuleScores { success, failure }
    }

    /// Classify a report from its lexical evidence
    pub fn score(&self, report: &str) -> Assessment {
        let scores = self.tally(report);
        let assessment = assess(scores);

        tracing::debug!(
            success_score = scores.success,
            failure_score = scores.failure,
            success = assessment.success,
            confidence = assessment.confidence,
            "Rule-based scoring completed"
        );

        assessment
    }
}

/// Each keyword counts once, however often it occurs
fn keyword_score(keywords: &[WeightedKeyword], content: &str) -> u32 {
    keywords
        .iter()
        .filter(|k| content.contains(k.phrase.as_str()))
        .fold(0, |score: u32, k| score.saturating_add(k.weight))
}

fn assess(scores: RuleScores) -> Assessment {
    let RuleScores { success, failure } = scores;
    let total = f64::from(success) + f64::from(failure);

    if total == 0.0 {
        return Assessment::new(false, NO_INDICATORS_CONFIDENCE, NO_INDICATORS_REASON);
    }

    let leading_confidence = |lead: u32| {
        (BASE_CONFIDENCE + (f64::from(lead) / total) * CONFIDENCE_SPAN).min(MAX_RULE_CONFIDENCE)
    };

    if success > failure {
        Assessment::new(
            true,
            leading_confidence(success),
            format!("Success indicators found (score: {} vs {})", success, failure),
        )
    } else if failure > success {
        Assessment::new(
            false,
            leading_confidence(failure),
            format!("Failure indicators found (score: {} vs {})", failure, success),
        )
    } else {
        // Ties lean towards failure
        Assessment::new(false, TIE_CONFIDENCE, MIXED_INDICATORS_REASON)
    }
}
