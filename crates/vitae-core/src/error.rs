//! Error types for `vitae-core`.
//!
//! Every failure a client can observe is one of a handful of kinds, each
//! carrying the exact message clients match on. Backend failures are boxed
//! into [`Error::Store`].

use thiserror::Error;

pub const NOT_LOGGED_IN: &str = "Not logged in!";

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Unauthenticated(String),

  #[error("{0}")]
  InvalidArgument(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  AlreadyExists(String),

  #[error("{0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// The generic rejection for a guarded operation called anonymously.
  pub fn not_logged_in() -> Self { Self::Unauthenticated(NOT_LOGGED_IN.to_owned()) }

  /// `"Invalid <Entity> id!"`
  pub fn invalid_id(entity: &str) -> Self {
    Self::NotFound(format!("Invalid {entity} id!"))
  }

  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Unauthenticated(_) => ErrorKind::Unauthenticated,
      Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
      Self::NotFound(_) => ErrorKind::NotFound,
      Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
      Self::Conflict(_) => ErrorKind::Conflict,
      Self::Store(_) => ErrorKind::Internal,
    }
  }
}

/// The tag clients can match on instead of the message prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Unauthenticated,
  InvalidArgument,
  NotFound,
  AlreadyExists,
  Conflict,
  Internal,
}

impl ErrorKind {
  /// Stable machine-readable code, surfaced as the `code` error extension.
  pub fn code(self) -> &'static str {
    match self {
      Self::Unauthenticated => "UNAUTHENTICATED",
      Self::InvalidArgument => "INVALID_ARGUMENT",
      Self::NotFound => "NOT_FOUND",
      Self::AlreadyExists => "ALREADY_EXISTS",
      Self::Conflict => "CONFLICT",
      Self::Internal => "INTERNAL",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
