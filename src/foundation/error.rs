/// Convenience result type used across the crate.
pub type IntroResult<T> = Result<T, IntroError>;

/// Error taxonomy for everything that touches the outside world.
///
/// Curve evaluation and scene components never fail; errors come from configuration, audio
/// decoding, rasterization and encoding.
#[derive(thiserror::Error, Debug)]
pub enum IntroError {
    /// Invalid configuration or out-of-range request.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating or rendering a frame range.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Audio asset could not be loaded or decoded.
    #[error("audio error: {0}")]
    Audio(String),

    /// Scene graph could not be rasterized.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntroError {
    /// Build an [`IntroError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`IntroError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build an [`IntroError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build an [`IntroError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`IntroError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
