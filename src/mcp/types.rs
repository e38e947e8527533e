//! Request and response types for MCP tools.

use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{AppendResult, AppendStatus, AppendTarget, Files};

// ============================================================
// Request Types
// ============================================================

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListOrReadRequest {
    #[schemars(
        description = "Documents to read (e.g. ['activeContext.md']). Omit or pass an empty list to list available documents instead."
    )]
    #[serde(default)]
    pub file_names: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AppendRequest {
    #[schemars(description = "Document to append to, e.g. 'decisionLog.md'")]
    pub file_name: String,
    #[schemars(description = "Text of the entry. It is stored with a timestamp prefix.")]
    pub entry: String,
    #[schemars(
        description = "Optional markdown header (e.g. '## Decision'). The entry is placed at the end of that section; the header is created at the end of the document if missing."
    )]
    #[serde(default)]
    pub section_header: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AppendManyRequest {
    #[schemars(description = "Entries to append. Each one succeeds or fails on its own.")]
    pub entries: Vec<AppendTargetInput>,
}

/// A single batch target. Fields are optional so malformed targets are
/// reported per target instead of rejecting the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AppendTargetInput {
    #[schemars(description = "Document to append to")]
    #[serde(default)]
    pub file_name: Option<String>,
    #[schemars(description = "Text of the entry")]
    #[serde(default)]
    pub entry: Option<String>,
    #[schemars(description = "Optional markdown header to append under")]
    #[serde(default)]
    pub section_header: Option<String>,
}

impl From<AppendTargetInput> for AppendTarget {
    fn from(input: AppendTargetInput) -> Self {
        AppendTarget {
            file_name: input.file_name,
            entry: input.entry,
            section_header: input.section_header,
        }
    }
}

// ============================================================
// Response Types
// ============================================================

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListOrReadResponse {
    /// Document names in list mode, name -> content (or null) in read mode.
    pub files: Files,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppendResponse {
    pub status: AppendStatus,
    pub message: String,
}

impl From<AppendResult> for AppendResponse {
    fn from(result: AppendResult) -> Self {
        Self {
            status: result.status,
            message: result.message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppendManyResponse {
    pub results: Vec<AppendResult>,
}
