//! GraphQL API for Vitae.
//!
//! Builds an [`async_graphql`] schema over a [`SqliteStore`]. Transport is the
//! caller's responsibility: resolve the request's [`Caller`] (see
//! [`auth::resolve_caller`]) and attach it to each request's data.
//!
//! # Executing
//!
//! ```rust,ignore
//! let schema = vitae_api::build_schema(store.clone(), AuthSettings::default());
//! let caller = vitae_api::auth::resolve_caller(&store, authorization).await;
//! let response = schema.execute(request.data(caller)).await;
//! ```
//!
//! [`Caller`]: vitae_core::Caller

pub mod accounts;
pub mod archivement;
pub mod auth;
pub mod context;
pub mod education;
pub mod error;
pub mod header;
pub mod interest;
pub mod language;
pub mod links;
pub mod skill;
pub mod work_experience;

use async_graphql::{EmptySubscription, MergedObject, Schema};
use vitae_store_sqlite::SqliteStore;

pub use auth::AuthSettings;
pub use error::AuthError;

#[derive(MergedObject, Default)]
pub struct Query(
  header::HeaderQuery,
  work_experience::WorkExperienceQuery,
  skill::SkillQuery,
  language::LanguageQuery,
  interest::InterestQuery,
  archivement::ArchivementQuery,
  education::EducationQuery,
  accounts::AccountQuery,
  links::LinkQuery,
);

#[derive(MergedObject, Default)]
pub struct Mutation(
  header::HeaderMutation,
  work_experience::WorkExperienceMutation,
  skill::SkillMutation,
  language::LanguageMutation,
  interest::InterestMutation,
  archivement::ArchivementMutation,
  education::EducationMutation,
  accounts::AccountMutation,
  links::LinkMutation,
);

pub type PortfolioSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema with `store` and `settings` available to every resolver.
pub fn build_schema(store: SqliteStore, settings: AuthSettings) -> PortfolioSchema {
  Schema::build(Query::default(), Mutation::default(), EmptySubscription)
    .data(store)
    .data(settings)
    .finish()
}

/// The schema in SDL form, without any data attached.
pub fn export_sdl() -> String {
  Schema::build(Query::default(), Mutation::default(), EmptySubscription)
    .finish()
    .sdl()
}

#[cfg(test)]
mod tests;
