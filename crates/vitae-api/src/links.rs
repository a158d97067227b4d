//! Shared links and the votes users cast on them.

use async_graphql::{ComplexObject, Context, Object, Result, SimpleObject};
use vitae_core::{
  UserId,
  link::{self, Link, NewLink, Vote},
};

use crate::{
  accounts::UserNode,
  context::{caller, posted_by, store},
  error::gql_error,
};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Link")]
pub struct LinkNode {
  pub id:          i64,
  pub url:         String,
  pub description: String,
}

impl From<Link> for LinkNode {
  fn from(l: Link) -> Self {
    Self {
      id:          l.id,
      url:         l.url,
      description: l.description,
    }
  }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Vote", complex)]
pub struct VoteNode {
  pub id:    i64,
  pub link:  LinkNode,
  #[graphql(skip)]
  pub voter: UserId,
}

#[ComplexObject]
impl VoteNode {
  async fn user(&self, ctx: &Context<'_>) -> Result<Option<UserNode>> {
    posted_by(ctx, self.voter).await
  }
}

impl From<Vote> for VoteNode {
  fn from(v: Vote) -> Self {
    Self {
      id:    v.id,
      link:  v.link.into(),
      voter: v.voter,
    }
  }
}

#[derive(Default)]
pub struct LinkQuery;

#[Object]
impl LinkQuery {
  async fn links(&self, ctx: &Context<'_>) -> Result<Vec<LinkNode>> {
    let links = link::links(store(ctx)?).await.map_err(gql_error)?;
    Ok(links.into_iter().map(LinkNode::from).collect())
  }

  async fn votes(&self, ctx: &Context<'_>) -> Result<Vec<VoteNode>> {
    let votes = link::votes(store(ctx)?).await.map_err(gql_error)?;
    Ok(votes.into_iter().map(VoteNode::from).collect())
  }
}

#[derive(Default)]
pub struct LinkMutation;

#[Object]
impl LinkMutation {
  async fn create_link(
    &self,
    ctx: &Context<'_>,
    url: String,
    description: String,
  ) -> Result<LinkNode> {
    let link = link::create_link(store(ctx)?, caller(ctx), NewLink { url, description })
      .await
      .map_err(gql_error)?;
    Ok(link.into())
  }

  /// Vote for a link; each user may vote for a given link once.
  async fn create_vote(&self, ctx: &Context<'_>, link_id: i64) -> Result<VoteNode> {
    let vote = link::create_vote(store(ctx)?, caller(ctx), link_id)
      .await
      .map_err(gql_error)?;
    Ok(vote.into())
  }
}
