//! Conversion from domain errors to GraphQL errors.
//!
//! Every error a resolver returns carries the exact domain message plus a
//! `code` extension naming its kind. Store failures are logged here and
//! reach the client only as a generic internal error.

use async_graphql::ErrorExtensions as _;
use thiserror::Error;
use vitae_core::{Error, ErrorKind};

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Failures of the credential helpers in [`crate::auth`].
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("password hashing failed: {0}")]
  Hash(String),
}

impl From<AuthError> for Error {
  fn from(err: AuthError) -> Self { Error::store(err) }
}

/// Turn a domain error into the GraphQL error clients see.
pub fn gql_error(err: Error) -> async_graphql::Error {
  let kind = err.kind();
  let message = match kind {
    ErrorKind::Internal => {
      tracing::error!(error = %err, "request failed");
      INTERNAL_MESSAGE.to_owned()
    }
    _ => err.to_string(),
  };
  async_graphql::Error::new(message).extend_with(|_, ext| ext.set("code", kind.code()))
}

/// Shorthand for a raw store failure outside the core operations.
pub fn store_error<E>(err: E) -> async_graphql::Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  gql_error(Error::store(err))
}

#[cfg(test)]
mod tests {
  use async_graphql::Pos;

  use super::*;

  fn code(err: async_graphql::Error) -> serde_json::Value {
    let json = serde_json::to_value(err.into_server_error(Pos::default())).unwrap();
    json["extensions"]["code"].clone()
  }

  #[test]
  fn domain_messages_pass_through_with_their_code() {
    let err = gql_error(Error::invalid_id("Skill"));
    assert_eq!(err.message, "Invalid Skill id!");
    assert_eq!(code(err), "NOT_FOUND");
  }

  #[test]
  fn store_failures_are_masked() {
    let err = gql_error(AuthError::Hash("bad salt".into()).into());
    assert_eq!(err.message, INTERNAL_MESSAGE);
    assert_eq!(code(err), "INTERNAL");
  }
}
