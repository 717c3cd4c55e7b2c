//! Markdown test documents and their run results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::verdict::{RunStatus, Verdict};

/// Summary of a stored test document for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub file_id: String,
    pub title: String,
    pub preview: String,
    pub first_line: String,
    pub updated_at: DateTime<Utc>,
}

/// Full content of a stored test document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestDocument {
    pub file_id: String,
    pub title: String,
    pub content: String,
}

/// Result of generating a new test document from a chat message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTest {
    /// Raw model reply, as saved to disk
    pub response: String,
    pub saved_test: TestSummary,
}

/// Result of executing a stored test document
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub file_id: String,
    /// Execution report produced by the model
    pub result: String,
    pub status: RunStatus,
    pub analysis: Verdict,
}
