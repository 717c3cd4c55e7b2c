//! Markdown test document storage
//!
//! Tests live as `*.md` files in a single directory. The file name is the
//! document id.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::model::{TestDocument, TestSummary};

const TEST_EXTENSION: &str = "md";
const UNTITLED: &str = "Untitled Test";
const PREVIEW_CHARS: usize = 160;

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s*(.+)$").expect("valid title regex"));

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TestStoreError {
    #[error("Test file not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Service for reading and writing test documents
pub struct TestStore {
    dir: PathBuf,
}

impl TestStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, TestStoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        tracing::info!(dir = %dir.display(), "Test store ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List stored tests, most recently updated first
    pub async fn list(&self) -> Result<Vec<TestSummary>, TestStoreError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut summaries = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TEST_EXTENSION) {
                continue;
            }
            let Some(file_id) = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
            else {
                continue;
            };

            let content = tokio::fs::read_to_string(&path).await?;
            let modified = entry.metadata().await?.modified()?;
            summaries.push(summarize(file_id, &content, modified.into()));
        }

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        tracing::debug!(count = summaries.len(), "Listed test documents");
        Ok(summaries)
    }

    /// Load a test by id. Only the base name of the id is used.
    pub async fn get(&self, file_id: &str) -> Result<TestDocument, TestStoreError> {
        let file_id = sanitize_id(file_id)?;
        let content = match tokio::fs::read_to_string(self.dir.join(&file_id)).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TestStoreError::NotFound(file_id));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(TestDocument {
            title: extract_title(&content),
            file_id,
            content,
        })
    }

    /// Persist a new test document under a timestamped name
    pub async fn save(&self, content: &str) -> Result<TestSummary, TestStoreError> {
        let now = Utc::now();
        let file_id = format!("test-{}.{}", now.format("%Y-%m-%dT%H-%M-%S-%3fZ"), TEST_EXTENSION);
        tokio::fs::write(self.dir.join(&file_id), content).await?;

        tracing::info!(file_id = %file_id, bytes = content.len(), "Test document saved");
        Ok(summarize(file_id, content, now))
    }
}

fn sanitize_id(file_id: &str) -> Result<String, TestStoreError> {
    Path::new(file_id)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| TestStoreError::NotFound(file_id.to_string()))
}

fn summarize(file_id: String, content: &str, updated_at: DateTime<Utc>) -> TestSummary {
    TestSummary {
        file_id,
        title: extract_title(content),
        preview: extract_preview(content),
        first_line: content
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("")
            .trim()
            .to_string(),
        updated_at,
    }
}

/// First `# heading` line, or a placeholder
pub fn extract_title(content: &str) -> String {
    TITLE_REGEX
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Whitespace-collapsed prefix of the content
pub fn extract_preview(content: &str) -> String {
    content
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(PREVIEW_CHARS)
        .collect()
}
