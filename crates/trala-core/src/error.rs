//! Error types for `trala-core`.
//!
//! Every failure the service can produce falls into one of four kinds:
//! validation, duplicate, not-found, and internal. Transport layers map each
//! kind to their own envelope.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// A single offending input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: String,
}

impl FieldError {
  pub fn new(field: &'static str, message: impl Into<String>) -> Self {
    Self { field, message: message.into() }
  }
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "\"{}\" {}", self.field, self.message)
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid input: {}", join_fields(.0))]
  Validation(Vec<FieldError>),

  #[error("email address {email:?} already exists")]
  Duplicate { email: String },

  #[error("contact not found: {0}")]
  NotFound(Uuid),

  #[error("store error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Validation failure scoped to one field.
  pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
    Self::Validation(vec![FieldError::new(field, message)])
  }

  pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Internal(Box::new(err))
  }

  /// Names of the offending fields; empty for every kind but `Validation`.
  pub fn fields(&self) -> Vec<&'static str> {
    match self {
      Self::Validation(errors) => errors.iter().map(|e| e.field).collect(),
      _ => Vec::new(),
    }
  }
}

fn join_fields(errors: &[FieldError]) -> String {
  errors
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
