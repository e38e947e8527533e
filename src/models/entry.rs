use serde::{Deserialize, Serialize};

/// One target of an append operation.
///
/// Fields are optional so a batch can carry malformed targets; each one is
/// validated on its own when the batch is processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendTarget {
    pub file_name: Option<String>,
    pub entry: Option<String>,
    /// Markdown header line (e.g. `## Decision`) to append under.
    #[serde(default)]
    pub section_header: Option<String>,
}

impl AppendTarget {
    pub fn new(file_name: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            entry: Some(entry.into()),
            section_header: None,
        }
    }

    pub fn under(mut self, section_header: impl Into<String>) -> Self {
        self.section_header = Some(section_header.into());
        self
    }
}

/// Outcome tag shared by single and batch appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppendStatus {
    Success,
    Error,
}

impl AppendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppendStatus::Success => "success",
            AppendStatus::Error => "error",
        }
    }
}

/// Result of appending to one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendResult {
    /// The targeted file name, empty when the target did not name one.
    pub file: String,
    pub status: AppendStatus,
    pub message: String,
}

impl AppendResult {
    pub fn is_success(&self) -> bool {
        self.status == AppendStatus::Success
    }
}
