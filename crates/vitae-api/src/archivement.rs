//! Standalone achievements: awards and certifications, each with a year.

use async_graphql::{ComplexObject, Context, Object, Result, SimpleObject};
use vitae_core::{
  UserId,
  profile::{Archivement, ArchivementFields},
  resolver,
};

use crate::{
  accounts::UserNode,
  context::{caller, posted_by, store},
  error::gql_error,
};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Archivement", complex)]
pub struct ArchivementNode {
  pub id:               i64,
  pub archivement_name: String,
  pub year:             i32,
  #[graphql(skip)]
  pub owner:            UserId,
}

#[ComplexObject]
impl ArchivementNode {
  async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<UserNode>> {
    posted_by(ctx, self.owner).await
  }
}

impl From<Archivement> for ArchivementNode {
  fn from(a: Archivement) -> Self {
    Self {
      id:               a.id,
      archivement_name: a.name,
      year:             a.year,
      owner:            a.owner,
    }
  }
}

#[derive(Default)]
pub struct ArchivementQuery;

#[Object]
impl ArchivementQuery {
  async fn archivements(
    &self,
    ctx: &Context<'_>,
    search: Option<String>,
  ) -> Result<Vec<ArchivementNode>> {
    let found = resolver::list::<Archivement, _>(store(ctx)?, caller(ctx), search.as_deref())
      .await
      .map_err(gql_error)?;
    Ok(found.into_iter().map(ArchivementNode::from).collect())
  }

  async fn archivements_by_id(
    &self,
    ctx: &Context<'_>,
    id_archivement: i64,
  ) -> Result<Option<ArchivementNode>> {
    let found = resolver::get_by_id::<Archivement, _>(store(ctx)?, caller(ctx), id_archivement)
      .await
      .map_err(gql_error)?;
    Ok(found.map(ArchivementNode::from))
  }
}

#[derive(Default)]
pub struct ArchivementMutation;

#[Object]
impl ArchivementMutation {
  async fn create_archivement(
    &self,
    ctx: &Context<'_>,
    id_archivement: Option<i64>,
    archivement_name: String,
    year: i32,
  ) -> Result<ArchivementNode> {
    let fields = ArchivementFields { name: archivement_name, year };
    let saved =
      resolver::upsert::<Archivement, _>(store(ctx)?, caller(ctx), id_archivement, fields)
        .await
        .map_err(gql_error)?;
    Ok(saved.into())
  }

  async fn delete_archivement(&self, ctx: &Context<'_>, id_archivement: i64) -> Result<i64> {
    resolver::delete::<Archivement, _>(store(ctx)?, caller(ctx), id_archivement)
      .await
      .map_err(gql_error)
  }
}
