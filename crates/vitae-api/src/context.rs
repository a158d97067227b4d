//! Accessors for the data every resolver pulls out of the GraphQL context.

use async_graphql::{Context, Result};
use vitae_core::{Caller, UserId, store::AccountStore};
use vitae_store_sqlite::SqliteStore;

use crate::{accounts::UserNode, auth::AuthSettings, error::store_error};

type Storage = SqliteStore;

pub fn store<'a>(ctx: &Context<'a>) -> Result<&'a Storage> { ctx.data::<Storage>() }

pub fn settings<'a>(ctx: &Context<'a>) -> Result<&'a AuthSettings> { ctx.data::<AuthSettings>() }

/// The caller attached to this request; anonymous when none was attached.
pub fn caller(ctx: &Context<'_>) -> Caller { ctx.data_opt::<Caller>().copied().unwrap_or_default() }

/// Resolve an owner id to the `postedBy` user.
pub async fn posted_by(ctx: &Context<'_>, owner: UserId) -> Result<Option<UserNode>> {
  let user = store(ctx)?.get_user(owner).await.map_err(store_error)?;
  Ok(user.map(UserNode::from))
}
