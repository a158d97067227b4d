//! Password hashing, bearer tokens, and caller resolution.
//!
//! Passwords are stored as argon2 PHC strings. Bearer tokens are 32 random
//! bytes, base64url-encoded; the store only ever sees their SHA-256 digest.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use rand_core::{OsRng, RngCore as _};
use sha2::{Digest as _, Sha256};
use vitae_core::{Caller, UserId, account::Session, store::AccountStore};

use crate::error::AuthError;

const TOKEN_BYTES: usize = 32;

/// Knobs for account handling, supplied once when the schema is built.
#[derive(Debug, Clone)]
pub struct AuthSettings {
  /// Lifetime of a freshly issued bearer token.
  pub token_ttl:          Duration,
  /// When false, `createUser` is rejected.
  pub allow_registration: bool,
}

impl Default for AuthSettings {
  fn default() -> Self {
    Self {
      token_ttl:          Duration::seconds(300),
      allow_registration: true,
    }
  }
}

// ─── Passwords ───────────────────────────────────────────────────────────────

pub fn hash_password(password: &str) -> Result<String, AuthError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| AuthError::Hash(e.to_string()))
}

/// False for a wrong password and for a hash that cannot be parsed.
pub fn verify_password(password: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// SHA-256 hex digest of a bearer token, as stored.
pub fn token_digest(token: &str) -> String { hex::encode(Sha256::digest(token.as_bytes())) }

/// A fresh session for `user` and the plaintext token that unlocks it.
pub fn mint_session(user: UserId, ttl: Duration) -> (String, Session) {
  let mut bytes = [0u8; TOKEN_BYTES];
  OsRng.fill_bytes(&mut bytes);
  let token = URL_SAFE_NO_PAD.encode(bytes);

  let issued_at = Utc::now();
  let session = Session {
    token_digest: token_digest(&token),
    user,
    issued_at,
    expires_at: issued_at + ttl,
  };
  (token, session)
}

/// Extract the token from an `Authorization` header value. Both
/// `Bearer <token>` and the older `JWT <token>` forms are accepted.
pub fn parse_authorization(value: &str) -> Option<&str> {
  let token = value
    .strip_prefix("Bearer ")
    .or_else(|| value.strip_prefix("JWT "))?
    .trim();
  (!token.is_empty()).then_some(token)
}

/// Resolve who is calling from an optional `Authorization` header.
///
/// Anything short of a live session is anonymous; store failures are logged
/// and also treated as anonymous so a guarded operation reports
/// `"Not logged in!"` rather than failing the whole request.
pub async fn resolve_caller<S: AccountStore>(store: &S, authorization: Option<&str>) -> Caller {
  let Some(token) = authorization.and_then(parse_authorization) else {
    return Caller::Anonymous;
  };

  match store.get_session(token_digest(token)).await {
    Ok(Some(session)) if session.is_live_at(Utc::now()) => Caller::User(session.user),
    Ok(Some(session)) => {
      tracing::debug!(user = %session.user, "expired bearer token");
      Caller::Anonymous
    }
    Ok(None) => {
      tracing::warn!("unknown bearer token");
      Caller::Anonymous
    }
    Err(e) => {
      tracing::error!(error = %e, "session lookup failed");
      Caller::Anonymous
    }
  }
}
