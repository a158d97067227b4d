//! HTTP surface for Vitae.
//!
//! Serves the GraphQL schema from `vitae-api` over axum: `POST /graphql`
//! executes, `GET /graphql` serves GraphiQL, `GET /health` answers `ok`.
//! The bearer token on each request is resolved to a [`Caller`] before the
//! schema sees it.

use std::{convert::Infallible, path::PathBuf};

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
  Router,
  extract::{FromRequestParts, State},
  http::{header, request::Parts},
  response::Html,
  routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use vitae_api::{AuthSettings, PortfolioSchema, auth::resolve_caller};
use vitae_core::Caller;
use vitae_store_sqlite::SqliteStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `VITAE_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  /// Lifetime of issued bearer tokens.
  #[serde(default = "default_token_ttl_secs")]
  pub token_ttl_secs:     u32,
  #[serde(default = "default_allow_registration")]
  pub allow_registration: bool,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8000 }

fn default_store_path() -> PathBuf { PathBuf::from("vitae.db") }

fn default_token_ttl_secs() -> u32 { 300 }

fn default_allow_registration() -> bool { true }

impl ServerConfig {
  pub fn auth_settings(&self) -> AuthSettings {
    AuthSettings {
      token_ttl:          chrono::Duration::seconds(self.token_ttl_secs.into()),
      allow_registration: self.allow_registration,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
  pub schema: PortfolioSchema,
  pub store:  SqliteStore,
}

impl AppState {
  pub fn new(store: SqliteStore, config: &ServerConfig) -> Self {
    let schema = vitae_api::build_schema(store.clone(), config.auth_settings());
    Self { schema, store }
  }
}

// ─── Caller extraction ───────────────────────────────────────────────────────

/// The request's caller, resolved from its `Authorization` header. Never
/// rejects: anything short of a live token is [`Caller::Anonymous`].
pub struct CurrentCaller(pub Caller);

impl FromRequestParts<AppState> for CurrentCaller {
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState,
  ) -> Result<Self, Self::Rejection> {
    let authorization = parts
      .headers
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok());
    Ok(Self(resolve_caller(&state.store, authorization).await))
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the server.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/graphql", get(graphiql).post(graphql_handler))
    .route("/health", get(health))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn graphql_handler(
  State(state): State<AppState>,
  CurrentCaller(caller): CurrentCaller,
  req: GraphQLRequest,
) -> GraphQLResponse {
  state
    .schema
    .execute(req.into_inner().data(caller))
    .await
    .into()
}

async fn graphiql() -> Html<String> {
  Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn health() -> &'static str { "ok" }

// ─── Integration tests ────────────────────────────────────────────────────────
