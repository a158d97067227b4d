//! The portfolio header. Reading it is public; changing it needs a login.

use async_graphql::{ComplexObject, Context, Object, Result, SimpleObject};
use vitae_core::{
  UserId,
  header::{self, Header, HeaderFields, HeaderPatch},
};

use crate::{
  accounts::UserNode,
  context::{caller, posted_by, store},
  error::gql_error,
};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Header", complex)]
pub struct HeaderNode {
  pub name:            String,
  pub actual_position: String,
  pub description:     String,
  pub profile_picture: String,
  pub email:           String,
  pub cellphone:       String,
  pub location:        String,
  pub github:          String,
  #[graphql(skip)]
  pub owner:           UserId,
}

#[ComplexObject]
impl HeaderNode {
  async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<UserNode>> {
    posted_by(ctx, self.owner).await
  }
}

impl From<Header> for HeaderNode {
  fn from(h: Header) -> Self {
    Self {
      name:            h.name,
      actual_position: h.actual_position,
      description:     h.description,
      profile_picture: h.profile_picture,
      email:           h.email,
      cellphone:       h.cellphone,
      location:        h.location,
      github:          h.github,
      owner:           h.owner,
    }
  }
}

/// Confirmation returned by `deleteHeader`.
#[derive(Debug, Clone, SimpleObject)]
pub struct DeleteHeader {
  pub message: String,
}

#[derive(Default)]
pub struct HeaderQuery;

#[Object]
impl HeaderQuery {
  async fn get_header(&self, ctx: &Context<'_>) -> Result<HeaderNode> {
    let header = header::get(store(ctx)?).await.map_err(gql_error)?;
    Ok(header.into())
  }
}

#[derive(Default)]
pub struct HeaderMutation;

#[Object]
impl HeaderMutation {
  #[allow(clippy::too_many_arguments)]
  async fn create_header(
    &self,
    ctx: &Context<'_>,
    name: String,
    actual_position: String,
    description: String,
    profile_picture: String,
    email: String,
    cellphone: String,
    location: String,
    github: String,
  ) -> Result<HeaderNode> {
    let fields = HeaderFields {
      name,
      actual_position,
      description,
      profile_picture,
      email,
      cellphone,
      location,
      github,
    };
    let header = header::create(store(ctx)?, caller(ctx), fields)
      .await
      .map_err(gql_error)?;
    Ok(header.into())
  }

  /// Overwrite only the fields supplied (blank values are ignored).
  #[allow(clippy::too_many_arguments)]
  async fn update_header(
    &self,
    ctx: &Context<'_>,
    name: Option<String>,
    actual_position: Option<String>,
    description: Option<String>,
    profile_picture: Option<String>,
    email: Option<String>,
    cellphone: Option<String>,
    location: Option<String>,
    github: Option<String>,
  ) -> Result<HeaderNode> {
    let patch = HeaderPatch {
      name,
      actual_position,
      description,
      profile_picture,
      email,
      cellphone,
      location,
      github,
    };
    let header = header::update(store(ctx)?, caller(ctx), patch)
      .await
      .map_err(gql_error)?;
    Ok(header.into())
  }

  async fn delete_header(&self, ctx: &Context<'_>) -> Result<DeleteHeader> {
    let message = header::delete(store(ctx)?, caller(ctx))
      .await
      .map_err(gql_error)?;
    Ok(DeleteHeader { message: message.to_owned() })
  }
}
