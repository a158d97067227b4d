//! Registered users and their bearer-token sessions.
//!
//! Hashing and token minting live with the API layer; this module only
//! carries the persisted shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:       UserId,
  pub username: String,
  pub email:    String,
}

/// Input to [`crate::store::AccountStore::create_user`]. The password is
/// already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username:      String,
  pub email:         String,
  /// PHC string, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// A user together with the stored hash, for login only.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
  pub user:          User,
  pub password_hash: String,
}

/// An issued bearer token. Only the digest of the token is ever stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  /// SHA-256 hex digest of the bearer token.
  pub token_digest: String,
  pub user:         UserId,
  pub issued_at:    DateTime<Utc>,
  pub expires_at:   DateTime<Utc>,
}

impl Session {
  pub fn is_live_at(&self, now: DateTime<Utc>) -> bool { now < self.expires_at }
}
