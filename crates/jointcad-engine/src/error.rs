use thiserror::Error;

/// Internal error taxonomy for the engine. User-facing dispatch never
/// propagates these as exceptions; `dispatch` converts them into an
/// `ActionResult { success: false, .. }` instead. This type exists for
/// derivation code that wants a typed `Result` internally.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("no node with id {0}")]
    NotFound(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid action payload: {0}")]
    InvalidPayload(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
