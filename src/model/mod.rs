pub mod config;
pub mod test_document;
pub mod verdict;

pub use config::{AnalyzerRulesConfig, Config};
pub use test_document::{GeneratedTest, TestDocument, TestRun, TestSummary};
pub use verdict::{AnalysisMethod, Assessment, RunStatus, Verdict};
