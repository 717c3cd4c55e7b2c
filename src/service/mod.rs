pub mod analysis;
pub mod llm;
pub mod test_runner;
pub mod test_store;

pub use analysis::TestResultAnalyzer;
pub use llm::{LlmClient, TextGenerator};
pub use test_runner::TestRunner;
pub use test_store::TestStore;
