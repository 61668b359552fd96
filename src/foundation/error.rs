/// Convenience result type used across splicer.
pub type SplicerResult<T> = Result<T, SplicerError>;

/// Top-level error taxonomy used by compositor and backend APIs.
#[derive(thiserror::Error, Debug)]
pub enum SplicerError {
    /// A segment window is malformed, empty, or too short to carry a crossfade.
    #[error("invalid segment '{label}': {reason}")]
    InvalidSegment { label: String, reason: String },

    /// The timeline has no segments at all, not even a title.
    #[error("empty timeline: at least one segment is required")]
    EmptyTimeline,

    /// A pad was produced twice or consumed before it was produced.
    ///
    /// Labels are derived from positions, so this is an internal invariant violation.
    #[error("duplicate or dangling pad label: {0}")]
    DuplicateLabel(String),

    /// The external media engine exited unsuccessfully.
    #[error("backend execution failed ({status}): {stderr}")]
    BackendExecutionFailed { status: String, stderr: String },

    /// Invalid manifest or option values.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SplicerError {
    /// Build an [`SplicerError::InvalidSegment`] error.
    pub fn invalid_segment(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSegment {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`SplicerError::DuplicateLabel`] error.
    pub fn duplicate_label(pad: impl Into<String>) -> Self {
        Self::DuplicateLabel(pad.into())
    }

    /// Build an [`SplicerError::BackendExecutionFailed`] error.
    pub fn backend(status: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::BackendExecutionFailed {
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// Build an [`SplicerError::Config`] error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`SplicerError::Serde`] error.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
