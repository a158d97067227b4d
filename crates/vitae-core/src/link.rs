//! Global links and the per-user votes cast on them.

use serde::{Deserialize, Serialize};

use crate::{Caller, Error, Result, UserId, store::LinkStore};

/// A shared link. Links have no owner; anyone may read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
  pub id:          i64,
  pub url:         String,
  pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewLink {
  pub url:         String,
  pub description: String,
}

/// One user's vote for one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
  pub id:    i64,
  pub voter: UserId,
  pub link:  Link,
}

pub async fn links<S: LinkStore>(store: &S) -> Result<Vec<Link>> {
  store.list_links().await.map_err(Error::store)
}

pub async fn votes<S: LinkStore>(store: &S) -> Result<Vec<Vote>> {
  store.list_votes().await.map_err(Error::store)
}

pub async fn create_link<S: LinkStore>(
  store: &S,
  caller: Caller,
  input: NewLink,
) -> Result<Link> {
  let poster = caller.require()?;
  let link = store.create_link(input).await.map_err(Error::store)?;
  tracing::info!(%poster, link = link.id, "link created");
  Ok(link)
}

pub async fn create_vote<S: LinkStore>(
  store: &S,
  caller: Caller,
  link_id: i64,
) -> Result<Vote> {
  let voter = caller
    .user_id()
    .ok_or_else(|| Error::Unauthenticated("You must be logged to vote!".to_owned()))?;

  if store.get_link(link_id).await.map_err(Error::store)?.is_none() {
    return Err(Error::NotFound("Invalid Link!".to_owned()));
  }

  let vote = store
    .create_vote(voter, link_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::Conflict("You have already voted for this link!".to_owned()))?;
  tracing::info!(%voter, link = link_id, "vote recorded");
  Ok(vote)
}
