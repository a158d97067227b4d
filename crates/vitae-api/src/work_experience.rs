//! Work history, each position carrying its own list of achievements.
//!
//! The achievement list is exposed as `archivements` to keep the field name
//! clients already use.

use async_graphql::{ComplexObject, Context, Object, Result, SimpleObject};
use chrono::NaiveDate;
use vitae_core::{
  UserId,
  profile::{Achievement, WorkExperience, WorkExperienceFields},
  resolver,
};

use crate::{
  accounts::UserNode,
  context::{caller, posted_by, store},
  error::gql_error,
};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Achievement")]
pub struct AchievementNode {
  pub id:          i64,
  pub description: String,
}

impl From<Achievement> for AchievementNode {
  fn from(a: Achievement) -> Self { Self { id: a.id, description: a.description } }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "WorkExperience", complex)]
pub struct WorkExperienceNode {
  pub id:           i64,
  pub position:     String,
  pub company:      String,
  pub start_date:   NaiveDate,
  pub end_date:     NaiveDate,
  pub location:     String,
  pub archivements: Vec<AchievementNode>,
  #[graphql(skip)]
  pub owner:        UserId,
}

#[ComplexObject]
impl WorkExperienceNode {
  async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<UserNode>> {
    posted_by(ctx, self.owner).await
  }
}

impl From<WorkExperience> for WorkExperienceNode {
  fn from(w: WorkExperience) -> Self {
    Self {
      id:           w.id,
      position:     w.position,
      company:      w.company,
      start_date:   w.start_date,
      end_date:     w.end_date,
      location:     w.location,
      archivements: w.achievements.into_iter().map(AchievementNode::from).collect(),
      owner:        w.owner,
    }
  }
}

#[derive(Default)]
pub struct WorkExperienceQuery;

#[Object]
impl WorkExperienceQuery {
  /// The caller's positions, optionally filtered by position or company.
  async fn work_experiences(
    &self,
    ctx: &Context<'_>,
    search: Option<String>,
  ) -> Result<Vec<WorkExperienceNode>> {
    let found = resolver::list::<WorkExperience, _>(store(ctx)?, caller(ctx), search.as_deref())
      .await
      .map_err(gql_error)?;
    Ok(found.into_iter().map(WorkExperienceNode::from).collect())
  }

  async fn work_experience_by_id(
    &self,
    ctx: &Context<'_>,
    id_work: i64,
  ) -> Result<Option<WorkExperienceNode>> {
    let found = resolver::get_by_id::<WorkExperience, _>(store(ctx)?, caller(ctx), id_work)
      .await
      .map_err(gql_error)?;
    Ok(found.map(WorkExperienceNode::from))
  }
}

#[derive(Default)]
pub struct WorkExperienceMutation;

#[Object]
impl WorkExperienceMutation {
  /// Create or overwrite a position. When `archivements` is given, the
  /// stored achievements become exactly that set; unchanged entries keep
  /// their ids.
  #[allow(clippy::too_many_arguments)]
  async fn create_work_experience(
    &self,
    ctx: &Context<'_>,
    id_work: Option<i64>,
    position: String,
    company: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    location: String,
    archivements: Option<Vec<String>>,
  ) -> Result<WorkExperienceNode> {
    let fields = WorkExperienceFields {
      position,
      company,
      start_date,
      end_date,
      location,
      achievements: archivements,
    };
    let saved = resolver::upsert::<WorkExperience, _>(store(ctx)?, caller(ctx), id_work, fields)
      .await
      .map_err(gql_error)?;
    Ok(saved.into())
  }

  async fn delete_work_experience(&self, ctx: &Context<'_>, id_work: i64) -> Result<i64> {
    resolver::delete::<WorkExperience, _>(store(ctx)?, caller(ctx), id_work)
      .await
      .map_err(gql_error)
  }
}
