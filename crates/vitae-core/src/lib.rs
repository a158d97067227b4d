//! Core types and trait definitions for the Vitae portfolio backend.
//!
//! No HTTP, GraphQL or database dependencies live here. This crate owns the
//! entity types, the caller identity, the tagged error kinds, the store
//! traits, and the generic owned-entity resolver that every résumé section
//! is served through.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod caller;
pub mod entity;
pub mod error;
pub mod header;
pub mod link;
pub mod profile;
pub mod resolver;
pub mod store;

pub use caller::{Caller, UserId};
pub use entity::{Entity, ListFilter};
pub use error::{Error, ErrorKind, Result};
