/// Convenience result type used across noisegen.
pub type NoiseResult<T> = Result<T, NoiseError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum NoiseError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Output path whose extension does not map to a known image format.
    #[error("unsupported output format: '{0}'")]
    UnsupportedFormat(String),

    /// Errors raised by the image encoder while writing a frame.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NoiseError {
    /// Build a [`NoiseError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`NoiseError::UnsupportedFormat`] value.
    pub fn unsupported_format(ext: impl Into<String>) -> Self {
        Self::UnsupportedFormat(ext.into())
    }

    /// Build a [`NoiseError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`NoiseError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error only affects the frame that produced it.
    ///
    /// The scheduler logs and skips these; everything else is a configuration problem that should
    /// have been rejected before dispatch.
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_) | Self::Encode(_) | Self::Other(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
