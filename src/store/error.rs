use std::io;

/// Errors raised by [`DocumentStore`](super::DocumentStore) operations.
///
/// A missing document is not an error: reads report it as `None`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Malformed input. Raised before any filesystem access.
    #[error("{0}")]
    Validation(String),

    /// Failure at the OS boundary while creating, reading or writing.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
