/// Convenience result type used across glinspect.
pub type InspectResult<T> = Result<T, InspectError>;

/// Top-level error taxonomy used by inspector APIs.
#[derive(thiserror::Error, Debug)]
pub enum InspectError {
    /// Invalid caller-provided data (image dimensions, buffer sizes, names).
    #[error("validation error: {0}")]
    Validation(String),

    /// The checker program could not be built from its description.
    #[error("shader error: {0}")]
    Shader(String),

    /// Transport failure or non-success status from the debug server.
    #[error("network error: {0}")]
    Network(String),

    /// Image bytes could not be decoded or encoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Invalid configuration values or unreadable config files.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InspectError {
    /// Build an [`InspectError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`InspectError::Shader`] value.
    pub fn shader(msg: impl Into<String>) -> Self {
        Self::Shader(msg.into())
    }

    /// Build an [`InspectError::Network`] value.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Build an [`InspectError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build an [`InspectError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build an [`InspectError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
