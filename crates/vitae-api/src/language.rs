//! Spoken languages.

use async_graphql::{ComplexObject, Context, Object, Result, SimpleObject};
use vitae_core::{
  UserId,
  profile::{Language, LanguageFields},
  resolver,
};

use crate::{
  accounts::UserNode,
  context::{caller, posted_by, store},
  error::gql_error,
};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Language", complex)]
pub struct LanguageNode {
  pub id:       i64,
  pub language: String,
  #[graphql(skip)]
  pub owner:    UserId,
}

#[ComplexObject]
impl LanguageNode {
  async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<UserNode>> {
    posted_by(ctx, self.owner).await
  }
}

impl From<Language> for LanguageNode {
  fn from(l: Language) -> Self {
    Self {
      id:       l.id,
      language: l.name,
      owner:    l.owner,
    }
  }
}

#[derive(Default)]
pub struct LanguageQuery;

#[Object]
impl LanguageQuery {
  async fn languages(
    &self,
    ctx: &Context<'_>,
    search: Option<String>,
  ) -> Result<Vec<LanguageNode>> {
    let languages = resolver::list::<Language, _>(store(ctx)?, caller(ctx), search.as_deref())
      .await
      .map_err(gql_error)?;
    Ok(languages.into_iter().map(LanguageNode::from).collect())
  }

  async fn language_by_id(
    &self,
    ctx: &Context<'_>,
    id_language: i64,
  ) -> Result<Option<LanguageNode>> {
    let language = resolver::get_by_id::<Language, _>(store(ctx)?, caller(ctx), id_language)
      .await
      .map_err(gql_error)?;
    Ok(language.map(LanguageNode::from))
  }
}

#[derive(Default)]
pub struct LanguageMutation;

#[Object]
impl LanguageMutation {
  async fn create_language(
    &self,
    ctx: &Context<'_>,
    id_language: Option<i64>,
    language: String,
  ) -> Result<LanguageNode> {
    let fields = LanguageFields { name: language };
    let language = resolver::upsert::<Language, _>(store(ctx)?, caller(ctx), id_language, fields)
      .await
      .map_err(gql_error)?;
    Ok(language.into())
  }

  async fn delete_language(&self, ctx: &Context<'_>, id_language: i64) -> Result<i64> {
    resolver::delete::<Language, _>(store(ctx)?, caller(ctx), id_language)
      .await
      .map_err(gql_error)
  }
}
