//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error leaves as `{"error", "code", "field"?}` with the HTTP status
//! picked from its [`ErrorKind`].

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use matchmaker_core::{Classify, ErrorKind};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Raised by the handler or domain code directly.
  #[error(transparent)]
  Domain(#[from] matchmaker_core::Error),

  /// Raised by the store; classified when it was converted.
  #[error("{source}")]
  Store {
    kind:   ErrorKind,
    field:  Option<&'static str>,
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Wrap a store error, keeping its classification.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Classify + Send + Sync + 'static,
  {
    Self::Store { kind: err.kind(), field: err.field(), source: Box::new(err) }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Domain(e) => e.kind(),
      Self::Store { kind, .. } => *kind,
    }
  }

  pub fn field(&self) -> Option<&'static str> {
    match self {
      Self::Domain(e) => e.field(),
      Self::Store { field, .. } => *field,
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    matchmaker_core::Error::validation("body", rejection.body_text()).into()
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    matchmaker_core::Error::validation("id", rejection.body_text()).into()
  }
}

fn status_for(kind: ErrorKind) -> StatusCode {
  match kind {
    ErrorKind::Validation => StatusCode::BAD_REQUEST,
    ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
    ErrorKind::Authorization => StatusCode::FORBIDDEN,
    ErrorKind::NotFound => StatusCode::NOT_FOUND,
    ErrorKind::Conflict => StatusCode::CONFLICT,
    ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let kind = self.kind();
    let message = match kind {
      ErrorKind::Unexpected => {
        tracing::error!(error = %self, "unexpected error while handling request");
        "internal server error".to_owned()
      }
      _ => self.to_string(),
    };

    let mut body = json!({ "error": message, "code": kind.code() });
    if let Some(field) = self.field() {
      body["field"] = json!(field);
    }
    (status_for(kind), Json(body)).into_response()
  }
}
