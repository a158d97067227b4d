use async_graphql::{ComplexObject, Context, Object, Result, SimpleObject};
use vitae_core::{
  UserId,
  profile::{Interest, InterestFields},
  resolver,
};

use crate::{
  accounts::UserNode,
  context::{caller, posted_by, store},
  error::gql_error,
};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Interest", complex)]
pub struct InterestNode {
  pub id:    i64,
  pub name:  String,
  #[graphql(skip)]
  pub owner: UserId,
}

#[ComplexObject]
impl InterestNode {
  async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<UserNode>> {
    posted_by(ctx, self.owner).await
  }
}

impl From<Interest> for InterestNode {
  fn from(i: Interest) -> Self {
    Self { id: i.id, name: i.name, owner: i.owner }
  }
}

#[derive(Default)]
pub struct InterestQuery;

#[Object]
impl InterestQuery {
  async fn interest(
    &self,
    ctx: &Context<'_>,
    search: Option<String>,
  ) -> Result<Vec<InterestNode>> {
    let interests = resolver::list::<Interest, _>(store(ctx)?, caller(ctx), search.as_deref())
      .await
      .map_err(gql_error)?;
    Ok(interests.into_iter().map(InterestNode::from).collect())
  }

  async fn interest_by_id(
    &self,
    ctx: &Context<'_>,
    id_interest: i64,
  ) -> Result<Option<InterestNode>> {
    let interest = resolver::get_by_id::<Interest, _>(store(ctx)?, caller(ctx), id_interest)
      .await
      .map_err(gql_error)?;
    Ok(interest.map(InterestNode::from))
  }
}

#[derive(Default)]
pub struct InterestMutation;

#[Object]
impl InterestMutation {
  async fn create_interest(
    &self,
    ctx: &Context<'_>,
    id_interest: Option<i64>,
    name: String,
  ) -> Result<InterestNode> {
    let fields = InterestFields { name };
    let interest = resolver::upsert::<Interest, _>(store(ctx)?, caller(ctx), id_interest, fields)
      .await
      .map_err(gql_error)?;
    Ok(interest.into())
  }

  async fn delete_interest(&self, ctx: &Context<'_>, id_interest: i64) -> Result<i64> {
    resolver::delete::<Interest, _>(store(ctx)?, caller(ctx), id_interest)
      .await
      .map_err(gql_error)
  }
}
