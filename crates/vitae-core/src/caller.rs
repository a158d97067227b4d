//! Caller identity, resolved once at the request boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Primary key of a registered user; doubles as the owner of every owned
/// record.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// Who is making a request. Missing or invalid credentials resolve to
/// [`Caller::Anonymous`]; every guarded operation rejects that variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Caller {
  #[default]
  Anonymous,
  User(UserId),
}

impl Caller {
  pub fn user_id(self) -> Option<UserId> {
    match self {
      Self::Anonymous => None,
      Self::User(id) => Some(id),
    }
  }

  /// The authenticated user, or `"Not logged in!"`.
  pub fn require(self) -> Result<UserId> {
    self.user_id().ok_or_else(Error::not_logged_in)
  }
}

impl From<UserId> for Caller {
  fn from(id: UserId) -> Self { Self::User(id) }
}
