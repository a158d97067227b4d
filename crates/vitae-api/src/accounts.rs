//! Users, login, and bearer-token lifecycle.

use async_graphql::{Context, Object, Result, SimpleObject};
use chrono::Utc;
use vitae_core::{
  Caller, Error,
  account::{NewUser, Session, User},
  store::AccountStore,
};

use crate::{
  auth::{self, AuthSettings},
  context::{caller, settings, store},
  error::gql_error,
};

const INVALID_CREDENTIALS: &str = "Please enter valid credentials";
const INVALID_TOKEN: &str = "Invalid token";

// ─── Objects ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User")]
pub struct UserNode {
  pub id:       i64,
  pub username: String,
  pub email:    String,
}

impl From<User> for UserNode {
  fn from(u: User) -> Self {
    Self {
      id:       u.id.0,
      username: u.username,
      email:    u.email,
    }
  }
}

/// What a token asserts about its holder.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "TokenPayload")]
pub struct TokenPayload {
  pub username: String,
  /// Expiry as a Unix timestamp in seconds.
  pub exp:      i64,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "AuthToken")]
pub struct AuthToken {
  pub token:   String,
  pub payload: TokenPayload,
}

// ─── Operations ──────────────────────────────────────────────────────────────

pub async fn register<S: AccountStore>(
  store: &S,
  settings: &AuthSettings,
  username: String,
  email: String,
  password: String,
) -> vitae_core::Result<User> {
  if !settings.allow_registration {
    return Err(Error::Unauthenticated("Registration is disabled".to_owned()));
  }
  if username.trim().is_empty() {
    return Err(Error::InvalidArgument("Username must not be empty".to_owned()));
  }
  if password.is_empty() {
    return Err(Error::InvalidArgument("Password must not be empty".to_owned()));
  }

  let password_hash = auth::hash_password(&password)?;
  let user = store
    .create_user(NewUser { username, email, password_hash })
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::Conflict("A user with that username already exists.".to_owned()))?;

  tracing::info!(user = %user.id, username = %user.username, "user registered");
  Ok(user)
}

async fn issue<S: AccountStore>(
  store: &S,
  settings: &AuthSettings,
  user: User,
) -> vitae_core::Result<AuthToken> {
  let (token, session) = auth::mint_session(user.id, settings.token_ttl);
  let exp = session.expires_at.timestamp();
  store.create_session(session).await.map_err(Error::store)?;
  Ok(AuthToken {
    token,
    payload: TokenPayload { username: user.username, exp },
  })
}

pub async fn login<S: AccountStore>(
  store: &S,
  settings: &AuthSettings,
  username: String,
  password: String,
) -> vitae_core::Result<AuthToken> {
  let creds = store
    .find_credentials(username.clone())
    .await
    .map_err(Error::store)?;

  let Some(creds) = creds.filter(|c| auth::verify_password(&password, &c.password_hash))
  else {
    tracing::warn!(%username, "rejected login");
    return Err(Error::Unauthenticated(INVALID_CREDENTIALS.to_owned()));
  };

  let token = issue(store, settings, creds.user).await?;
  tracing::info!(%username, "token issued");
  Ok(token)
}

/// The live session behind `token` and its user.
async fn live_session<S: AccountStore>(
  store: &S,
  token: &str,
) -> vitae_core::Result<(Session, User)> {
  let invalid = || Error::Unauthenticated(INVALID_TOKEN.to_owned());

  let session = store
    .get_session(auth::token_digest(token))
    .await
    .map_err(Error::store)?
    .filter(|s| s.is_live_at(Utc::now()))
    .ok_or_else(invalid)?;
  let user = store
    .get_user(session.user)
    .await
    .map_err(Error::store)?
    .ok_or_else(invalid)?;
  Ok((session, user))
}

pub async fn verify<S: AccountStore>(store: &S, token: &str) -> vitae_core::Result<TokenPayload> {
  let (session, user) = live_session(store, token).await?;
  Ok(TokenPayload {
    username: user.username,
    exp:      session.expires_at.timestamp(),
  })
}

/// Swap a live token for a fresh one; the old token stops working.
pub async fn refresh<S: AccountStore>(
  store: &S,
  settings: &AuthSettings,
  token: &str,
) -> vitae_core::Result<AuthToken> {
  let (session, user) = live_session(store, token).await?;
  store
    .delete_session(session.token_digest)
    .await
    .map_err(Error::store)?;
  let fresh = issue(store, settings, user).await?;
  tracing::info!(username = %fresh.payload.username, "token refreshed");
  Ok(fresh)
}

pub async fn current_user<S: AccountStore>(store: &S, caller: Caller) -> vitae_core::Result<User> {
  let id = caller.require()?;
  store
    .get_user(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(Error::not_logged_in)
}

// ─── GraphQL ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct AccountQuery;

#[Object]
impl AccountQuery {
  async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserNode>> {
    let users = store(ctx)?
      .list_users()
      .await
      .map_err(crate::error::store_error)?;
    Ok(users.into_iter().map(UserNode::from).collect())
  }

  /// The logged-in user.
  async fn me(&self, ctx: &Context<'_>) -> Result<UserNode> {
    let user = current_user(store(ctx)?, caller(ctx)).await.map_err(gql_error)?;
    Ok(user.into())
  }
}

#[derive(Default)]
pub struct AccountMutation;

#[Object]
impl AccountMutation {
  async fn create_user(
    &self,
    ctx: &Context<'_>,
    username: String,
    email: String,
    password: String,
  ) -> Result<UserNode> {
    let user = register(store(ctx)?, settings(ctx)?, username, email, password)
      .await
      .map_err(gql_error)?;
    Ok(user.into())
  }

  /// Exchange a username and password for a bearer token.
  async fn token_auth(
    &self,
    ctx: &Context<'_>,
    username: String,
    password: String,
  ) -> Result<AuthToken> {
    login(store(ctx)?, settings(ctx)?, username, password)
      .await
      .map_err(gql_error)
  }

  async fn verify_token(&self, ctx: &Context<'_>, token: String) -> Result<TokenPayload> {
    verify(store(ctx)?, &token).await.map_err(gql_error)
  }

  async fn refresh_token(&self, ctx: &Context<'_>, token: String) -> Result<AuthToken> {
    refresh(store(ctx)?, settings(ctx)?, &token)
      .await
      .map_err(gql_error)
  }
}
