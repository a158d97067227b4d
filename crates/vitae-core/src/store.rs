//! Store traits.
//!
//! The traits are implemented by storage backends (e.g. `vitae-store-sqlite`).
//! The resolvers in this crate depend on these abstractions, not on any
//! concrete backend. Method names are distinct across traits so a backend
//! implementing all of them can be called without disambiguation.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use crate::{
  Entity, ListFilter, UserId,
  account::{NewUser, Session, StoredCredentials, User},
  header::{Header, HeaderFields, HeaderPatch},
  link::{Link, NewLink, Vote},
};

// ─── Owned entities ──────────────────────────────────────────────────────────

/// Persistence for one owned entity type.
pub trait EntityStore<E: Entity>: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Records owned by `owner`, narrowed by `filter`, ascending by id.
  fn list_owned(
    &self,
    owner: UserId,
    filter: ListFilter,
  ) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;

  /// The record with `id`, only if `owner` owns it.
  fn get_owned(
    &self,
    owner: UserId,
    id: i64,
  ) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send + '_;

  /// Overwrite the record with `id` if it exists (whoever owns it) and
  /// re-own it to `owner`; otherwise insert a new record under a fresh id.
  /// One transaction.
  fn upsert_owned(
    &self,
    owner: UserId,
    id: Option<i64>,
    fields: E::Fields,
  ) -> impl Future<Output = Result<E, Self::Error>> + Send + '_;

  /// Remove the record with `id` owned by `owner`. Returns `false` when no
  /// such record exists.
  fn delete_owned(
    &self,
    owner: UserId,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Header ──────────────────────────────────────────────────────────────────

/// Persistence for the single portfolio header.
pub trait HeaderStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get_header(
    &self,
  ) -> impl Future<Output = Result<Option<Header>, Self::Error>> + Send + '_;

  /// Returns `None` without writing when a header already exists.
  fn create_header(
    &self,
    owner: UserId,
    fields: HeaderFields,
  ) -> impl Future<Output = Result<Option<Header>, Self::Error>> + Send + '_;

  /// Returns `None` when there is no header to update.
  fn update_header(
    &self,
    patch: HeaderPatch,
  ) -> impl Future<Output = Result<Option<Header>, Self::Error>> + Send + '_;

  /// Returns `false` when there was no header.
  fn delete_header(
    &self,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Links & votes ───────────────────────────────────────────────────────────

pub trait LinkStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn list_links(
    &self,
  ) -> impl Future<Output = Result<Vec<Link>, Self::Error>> + Send + '_;

  fn get_link(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Link>, Self::Error>> + Send + '_;

  fn create_link(
    &self,
    input: NewLink,
  ) -> impl Future<Output = Result<Link, Self::Error>> + Send + '_;

  fn list_votes(
    &self,
  ) -> impl Future<Output = Result<Vec<Vote>, Self::Error>> + Send + '_;

  /// Returns `None` when `voter` has already voted for `link_id`.
  fn create_vote(
    &self,
    voter: UserId,
    link_id: i64,
  ) -> impl Future<Output = Result<Option<Vote>, Self::Error>> + Send + '_;
}

// ─── Accounts ────────────────────────────────────────────────────────────────

pub trait AccountStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Returns `None` when the username is taken.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn find_credentials(
    &self,
    username: String,
  ) -> impl Future<Output = Result<Option<StoredCredentials>, Self::Error>> + Send + '_;

  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  fn create_session(
    &self,
    session: Session,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Look up a session by token digest, expired or not.
  fn get_session(
    &self,
    token_digest: String,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + '_;

  fn delete_session(
    &self,
    token_digest: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
