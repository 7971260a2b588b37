/// Convenience result type used across edgefx.
pub type EdgeFxResult<T> = Result<T, EdgeFxError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Buffer contract violations (missing halo, mismatched formats) are not part of this
/// taxonomy: they are programming errors and panic at the call site.
#[derive(thiserror::Error, Debug)]
pub enum EdgeFxError {
    /// Invalid user-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The upstream input could not supply the requested region.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EdgeFxError {
    /// Build an [`EdgeFxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`EdgeFxError::Upstream`] value.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Build an [`EdgeFxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` when the error came from the upstream input rather than from this node.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
