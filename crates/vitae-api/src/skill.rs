//! Skills: a name and a 0–100 proficiency.

use async_graphql::{ComplexObject, Context, Object, Result, SimpleObject};
use vitae_core::{
  UserId,
  profile::{Skill, SkillFields},
  resolver,
};

use crate::{
  accounts::UserNode,
  context::{caller, posted_by, store},
  error::gql_error,
};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Skill", complex)]
pub struct SkillNode {
  pub id:      i64,
  pub skill:   String,
  pub percent: i32,
  #[graphql(skip)]
  pub owner:   UserId,
}

#[ComplexObject]
impl SkillNode {
  async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<UserNode>> {
    posted_by(ctx, self.owner).await
  }
}

impl From<Skill> for SkillNode {
  fn from(s: Skill) -> Self {
    Self {
      id:      s.id,
      skill:   s.name,
      percent: s.percent,
      owner:   s.owner,
    }
  }
}

#[derive(Default)]
pub struct SkillQuery;

#[Object]
impl SkillQuery {
  /// The caller's skills, optionally filtered by name.
  async fn skill(&self, ctx: &Context<'_>, search: Option<String>) -> Result<Vec<SkillNode>> {
    let skills = resolver::list::<Skill, _>(store(ctx)?, caller(ctx), search.as_deref())
      .await
      .map_err(gql_error)?;
    Ok(skills.into_iter().map(SkillNode::from).collect())
  }

  async fn skill_by_id(&self, ctx: &Context<'_>, id_skill: i64) -> Result<Option<SkillNode>> {
    let skill = resolver::get_by_id::<Skill, _>(store(ctx)?, caller(ctx), id_skill)
      .await
      .map_err(gql_error)?;
    Ok(skill.map(SkillNode::from))
  }
}

#[derive(Default)]
pub struct SkillMutation;

#[Object]
impl SkillMutation {
  /// Create a skill, or overwrite the one with `idSkill`.
  async fn create_skill(
    &self,
    ctx: &Context<'_>,
    id_skill: Option<i64>,
    skill: String,
    percent: i32,
  ) -> Result<SkillNode> {
    let fields = SkillFields { name: skill, percent };
    let skill = resolver::upsert::<Skill, _>(store(ctx)?, caller(ctx), id_skill, fields)
      .await
      .map_err(gql_error)?;
    Ok(skill.into())
  }

  async fn delete_skill(&self, ctx: &Context<'_>, id_skill: i64) -> Result<i64> {
    resolver::delete::<Skill, _>(store(ctx)?, caller(ctx), id_skill)
      .await
      .map_err(gql_error)
  }
}
