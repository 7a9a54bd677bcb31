// acta_core/src/error.rs
use anyhow::Error as AnyhowError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActaError {
  #[error("No activity registered for kind '{kind}'")]
  UnknownActivity { kind: String },

  #[error("Activity '{kind}' timed out after {timeout:?}")]
  Timeout { kind: String, timeout: Duration },

  #[error("Execution canceled at phase '{phase}'")]
  Canceled { phase: String },

  #[error("Argument '{name}' is missing or not a {expected_type}")]
  ArgumentTypeMismatch { name: String, expected_type: String },

  #[error("Invalid transition to '{to}': {reason}")]
  InvalidTransition { to: String, reason: String },

  #[error("Ambiguous transition to '{to}': matching transitions [{candidates}]")]
  AmbiguousTransition { to: String, candidates: String },

  #[error("Error in user-provided body, behavior or transition. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Configuration error: {message}")]
  ConfigurationError { message: String },

  #[error("Internal acta error: {0}")]
  Internal(String),
}

// This is the key conversion acta provides for external errors.
impl From<AnyhowError> for ActaError {
  fn from(err: AnyhowError) -> Self {
    // An anyhow::Error that already wraps an ActaError is re-wrapped as
    // HandlerError rather than unwrapped; ActaError is not Clone, and
    // HandlerError keeps the full chain intact for display.
    ActaError::HandlerError { source: err }
  }
}

pub type ActaResult<T, E = ActaError> = std::result::Result<T, E>;
