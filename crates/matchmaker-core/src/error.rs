//! Error types for `matchmaker-core`.
//!
//! Every variant except the decode errors is produced right next to the
//! violation it describes and is meant to reach the caller verbatim.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed or out-of-range input.
  #[error("invalid {field}: {message}")]
  Validation {
    field:   &'static str,
    message: String,
  },

  #[error("authentication required")]
  Unauthenticated,

  /// Authenticated, but not permitted for this resource or transition.
  #[error("forbidden: {0}")]
  Forbidden(String),

  /// A state-machine or uniqueness precondition was not met.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("{entity} not found: {id}")]
  NotFound {
    entity: &'static str,
    id:     Uuid,
  },

  #[error("unknown booking status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
    Self::Validation { field, message: message.into() }
  }

  pub fn not_found(entity: &'static str, id: Uuid) -> Self {
    Self::NotFound { entity, id }
  }

  /// The category this error belongs to.
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation { .. } => ErrorKind::Validation,
      Self::Unauthenticated => ErrorKind::Authentication,
      Self::Forbidden(_) => ErrorKind::Authorization,
      Self::Conflict(_) => ErrorKind::Conflict,
      Self::NotFound { .. } => ErrorKind::NotFound,
      Self::UnknownStatus(_) | Self::UnknownRole(_) | Self::Serialization(_) => {
        ErrorKind::Unexpected
      }
    }
  }

  /// The offending field of a validation error.
  pub fn field(&self) -> Option<&'static str> {
    match self {
      Self::Validation { field, .. } => Some(*field),
      _ => None,
    }
  }
}

/// Errors that can say which [`ErrorKind`] they belong to.
///
/// Store backends implement this so the HTTP layer can map their errors
/// without knowing the concrete type.
pub trait Classify {
  fn kind(&self) -> ErrorKind;

  /// The offending field, for validation errors.
  fn field(&self) -> Option<&'static str> { None }
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind { Error::kind(self) }

  fn field(&self) -> Option<&'static str> { Error::field(self) }
}

/// Coarse error classes shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Validation,
  Authentication,
  Authorization,
  Conflict,
  NotFound,
  Unexpected,
}

impl ErrorKind {
  /// Stable machine-readable code.
  pub fn code(self) -> &'static str {
    match self {
      Self::Validation => "validation_error",
      Self::Authentication => "authentication_error",
      Self::Authorization => "authorization_error",
      Self::Conflict => "conflict_error",
      Self::NotFound => "not_found",
      Self::Unexpected => "unexpected_error",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
