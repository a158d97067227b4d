//! Degrees: where and when something was studied.

use async_graphql::{ComplexObject, Context, Object, Result, SimpleObject};
use chrono::NaiveDate;
use vitae_core::{
  UserId,
  profile::{Education, EducationFields},
  resolver,
};

use crate::{
  accounts::UserNode,
  context::{caller, posted_by, store},
  error::gql_error,
};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Education", complex)]
pub struct EducationNode {
  pub id:         i64,
  pub degree:     String,
  pub university: String,
  pub start_date: NaiveDate,
  pub end_date:   NaiveDate,
  #[graphql(skip)]
  pub owner:      UserId,
}

#[ComplexObject]
impl EducationNode {
  async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<UserNode>> {
    posted_by(ctx, self.owner).await
  }
}

impl From<Education> for EducationNode {
  fn from(e: Education) -> Self {
    Self {
      id:         e.id,
      degree:     e.degree,
      university: e.university,
      start_date: e.start_date,
      end_date:   e.end_date,
      owner:      e.owner,
    }
  }
}

#[derive(Default)]
pub struct EducationQuery;

#[Object]
impl EducationQuery {
  /// The caller's degrees, optionally filtered by degree title.
  async fn degrees(
    &self,
    ctx: &Context<'_>,
    search: Option<String>,
  ) -> Result<Vec<EducationNode>> {
    let degrees = resolver::list::<Education, _>(store(ctx)?, caller(ctx), search.as_deref())
      .await
      .map_err(gql_error)?;
    Ok(degrees.into_iter().map(EducationNode::from).collect())
  }

  async fn degree_by_id(
    &self,
    ctx: &Context<'_>,
    id_education: i64,
  ) -> Result<Option<EducationNode>> {
    let degree = resolver::get_by_id::<Education, _>(store(ctx)?, caller(ctx), id_education)
      .await
      .map_err(gql_error)?;
    Ok(degree.map(EducationNode::from))
  }
}

#[derive(Default)]
pub struct EducationMutation;

#[Object]
impl EducationMutation {
  async fn create_education(
    &self,
    ctx: &Context<'_>,
    id_education: Option<i64>,
    degree: String,
    university: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
  ) -> Result<EducationNode> {
    let fields = EducationFields { degree, university, start_date, end_date };
    let education =
      resolver::upsert::<Education, _>(store(ctx)?, caller(ctx), id_education, fields)
        .await
        .map_err(gql_error)?;
    Ok(education.into())
  }

  async fn delete_education(&self, ctx: &Context<'_>, id_education: i64) -> Result<i64> {
    resolver::delete::<Education, _>(store(ctx)?, caller(ctx), id_education)
      .await
      .map_err(gql_error)
  }
}
