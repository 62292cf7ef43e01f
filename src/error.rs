use thiserror::Error;

/// Errors raised by the construction and parsing APIs.
///
/// The per-frame paths (classification, engine updates, difficulty lookup)
/// never return these; they degrade to defaults instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressifyError {
    #[error("unknown expression label: {0:?}")]
    UnknownExpression(String),
    #[error("invalid difficulty profile: {0}")]
    InvalidProfile(String),
    #[error("malformed landmarks: {0}")]
    MalformedLandmarks(String),
}
