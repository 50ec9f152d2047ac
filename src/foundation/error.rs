/// Convenience result type used across dlicon.
pub type DlIconResult<T> = Result<T, DlIconError>;

/// Top-level error taxonomy used by the renderer and the controller.
#[derive(thiserror::Error, Debug)]
pub enum DlIconError {
    /// Activation requested for a kind outside the closed set.
    #[error("invalid animation kind: '{0}'")]
    InvalidKind(String),

    /// Progress value outside `[0, 1]` (or not finite).
    #[error("progress out of range: {0} (expected 0..=1)")]
    ProgressOutOfRange(f64),

    /// The external bitmap-presentation adapter failed.
    #[error("presentation error: {0}")]
    Presentation(String),

    /// A rendering invariant did not hold; indicates a logic defect.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DlIconError {
    /// Build a [`DlIconError::InvalidKind`] value.
    pub fn invalid_kind(kind: impl Into<String>) -> Self {
        Self::InvalidKind(kind.into())
    }

    /// Build a [`DlIconError::Presentation`] value.
    pub fn presentation(msg: impl Into<String>) -> Self {
        Self::Presentation(msg.into())
    }

    /// Build a [`DlIconError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DlIconError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
