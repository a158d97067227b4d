//! The portfolio header: a single row describing the portfolio owner.
//!
//! At most one header exists. The store enforces that; the operations here
//! translate "already there" / "not there" into the documented errors.

use serde::{Deserialize, Serialize};

use crate::{Caller, Error, Result, UserId, store::HeaderStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
  pub name:            String,
  pub actual_position: String,
  pub description:     String,
  pub profile_picture: String,
  pub email:           String,
  pub cellphone:       String,
  pub location:        String,
  pub github:          String,
  pub owner:           UserId,
}

/// Every field, as required by `create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
  pub name:            String,
  pub actual_position: String,
  pub description:     String,
  pub profile_picture: String,
  pub email:           String,
  pub cellphone:       String,
  pub location:        String,
  pub github:          String,
}

/// A partial update; `None` or an empty string leaves the stored value as
/// is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderPatch {
  pub name:            Option<String>,
  pub actual_position: Option<String>,
  pub description:     Option<String>,
  pub profile_picture: Option<String>,
  pub email:           Option<String>,
  pub cellphone:       Option<String>,
  pub location:        Option<String>,
  pub github:          Option<String>,
}

impl HeaderPatch {
  pub fn apply(self, header: &mut Header) {
    let Self {
      name,
      actual_position,
      description,
      profile_picture,
      email,
      cellphone,
      location,
      github,
    } = self;
    let pairs = [
      (name, &mut header.name),
      (actual_position, &mut header.actual_position),
      (description, &mut header.description),
      (profile_picture, &mut header.profile_picture),
      (email, &mut header.email),
      (cellphone, &mut header.cellphone),
      (location, &mut header.location),
      (github, &mut header.github),
    ];
    for (value, slot) in pairs {
      if let Some(value) = value.filter(|v| !v.is_empty()) {
        *slot = value;
      }
    }
  }
}

pub const HEADER_DELETED: &str = "Header deleted successfully.";

// ─── Operations ──────────────────────────────────────────────────────────────

/// Public: the portfolio page renders the header without logging in.
pub async fn get<S: HeaderStore>(store: &S) -> Result<Header> {
  store
    .get_header()
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("No Header exists.".to_owned()))
}

pub async fn create<S: HeaderStore>(
  store: &S,
  caller: Caller,
  fields: HeaderFields,
) -> Result<Header> {
  let owner = caller.require()?;
  let header = store
    .create_header(owner, fields)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| {
      Error::AlreadyExists(
        "A Header already exists. Delete the existing one before creating a new one."
          .to_owned(),
      )
    })?;
  tracing::info!(%owner, "header created");
  Ok(header)
}

pub async fn update<S: HeaderStore>(
  store: &S,
  caller: Caller,
  patch: HeaderPatch,
) -> Result<Header> {
  let owner = caller.require()?;
  let header = store
    .update_header(patch)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("No Header exists to update.".to_owned()))?;
  tracing::info!(%owner, "header updated");
  Ok(header)
}

pub async fn delete<S: HeaderStore>(store: &S, caller: Caller) -> Result<&'static str> {
  let owner = caller.require()?;
  if !store.delete_header().await.map_err(Error::store)? {
    return Err(Error::NotFound("No Header exists to delete.".to_owned()));
  }
  tracing::info!(%owner, "header deleted");
  Ok(HEADER_DELETED)
}
