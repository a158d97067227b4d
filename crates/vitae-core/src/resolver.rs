//! The generic owned-entity resolver.
//!
//! Every owned résumé section is served by these four operations. Each one
//! checks, in order: authentication, then field constraints, then
//! existence, and only then touches the store for the write.

use crate::{Caller, Entity, Error, ListFilter, Result, store::EntityStore};

/// The caller's records. `search` omitted, empty or `"*"` yields the first
/// page; anything else is an unbounded case-insensitive substring match.
pub async fn list<E, S>(store: &S, caller: Caller, search: Option<&str>) -> Result<Vec<E>>
where
  E: Entity,
  S: EntityStore<E>,
{
  let owner = caller.require()?;
  let filter = ListFilter::from_search(search);
  tracing::debug!(entity = E::NAME, %owner, ?filter, "list");
  store.list_owned(owner, filter).await.map_err(Error::store)
}

/// The record with `id` if the caller owns it. Absence is not an error.
pub async fn get_by_id<E, S>(store: &S, caller: Caller, id: i64) -> Result<Option<E>>
where
  E: Entity,
  S: EntityStore<E>,
{
  let owner = caller.require()?;
  store.get_owned(owner, id).await.map_err(Error::store)
}

/// Create (no id, `0`, or an unknown id) or overwrite-and-re-own (existing
/// id) a record.
pub async fn upsert<E, S>(
  store: &S,
  caller: Caller,
  id: Option<i64>,
  fields: E::Fields,
) -> Result<E>
where
  E: Entity,
  S: EntityStore<E>,
{
  let owner = caller.require()?;
  E::validate(&fields)?;

  let id = id.filter(|id| *id > 0);
  let record = store
    .upsert_owned(owner, id, fields)
    .await
    .map_err(Error::store)?;

  tracing::info!(
    entity = E::NAME,
    %owner,
    id = record.id(),
    updated = id == Some(record.id()),
    "upsert"
  );
  Ok(record)
}

/// Delete one of the caller's records, returning its id.
pub async fn delete<E, S>(store: &S, caller: Caller, id: i64) -> Result<i64>
where
  E: Entity,
  S: EntityStore<E>,
{
  let owner = caller.require()?;
  if !store.delete_owned(owner, id).await.map_err(Error::store)? {
    return Err(Error::invalid_id(E::NAME));
  }
  tracing::info!(entity = E::NAME, %owner, id, "delete");
  Ok(id)
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;
  use crate::{
    ErrorKind, UserId,
    profile::{Skill, SkillFields},
  };

  // A store that must never be reached.
  struct NoopStore;

  impl EntityStore<Skill> for NoopStore {
    type Error = std::convert::Infallible;
    async fn list_owned(&self, _: UserId, _: ListFilter) -> Result<Vec<Skill>, Self::Error> { unimplemented!() }
    async fn get_owned(&self, _: UserId, _: i64) -> Result<Option<Skill>, Self::Error> { unimplemented!() }
    async fn upsert_owned(&self, _: UserId, _: Option<i64>, _: SkillFields) -> Result<Skill, Self::Error> { unimplemented!() }
    async fn delete_owned(&self, _: UserId, _: i64) -> Result<bool, Self::Error> { unimplemented!() }
  }

  // Just enough of a store to observe what the resolver asks for.
  #[derive(Default)]
  struct VecStore {
    rows:    Mutex<Vec<Skill>>,
    upserts: Mutex<Vec<Option<i64>>>,
  }

  impl EntityStore<Skill> for VecStore {
    type Error = std::convert::Infallible;

    async fn list_owned(&self, owner: UserId, filter: ListFilter) -> Result<Vec<Skill>, Self::Error> {
      let rows = self.rows.lock().unwrap();
      let mine = rows.iter().filter(|s| s.owner == owner).cloned();
      Ok(match filter {
        ListFilter::Page => mine.take(10).collect(),
        ListFilter::Contains(n) => mine
          .filter(|s| s.name.to_lowercase().contains(&n.to_lowercase()))
          .collect(),
      })
    }

    async fn get_owned(&self, owner: UserId, id: i64) -> Result<Option<Skill>, Self::Error> {
      let rows = self.rows.lock().unwrap();
      Ok(rows.iter().find(|s| s.id == id && s.owner == owner).cloned())
    }

    async fn upsert_owned(&self, owner: UserId, id: Option<i64>, f: SkillFields) -> Result<Skill, Self::Error> {
      self.upserts.lock().unwrap().push(id);
      let mut rows = self.rows.lock().unwrap();
      let next = rows.len() as i64 + 1;
      let skill = Skill { id: id.unwrap_or(next), name: f.name, percent: f.percent, owner };
      rows.retain(|s| s.id != skill.id);
      rows.push(skill.clone());
      Ok(skill)
    }

    async fn delete_owned(&self, owner: UserId, id: i64) -> Result<bool, Self::Error> {
      let mut rows = self.rows.lock().unwrap();
      let before = rows.len();
      rows.retain(|s| !(s.id == id && s.owner == owner));
      Ok(rows.len() != before)
    }
  }

  const ALICE: Caller = Caller::User(UserId(1));
  const BOB: Caller = Caller::User(UserId(2));

  fn rust(percent: i32) -> SkillFields { SkillFields { name: "Rust".into(), percent } }

  fn assert_not_logged_in(err: Error) {
    assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    assert_eq!(err.to_string(), "Not logged in!");
  }

  #[tokio::test]
  async fn anonymous_callers_never_reach_the_store() {
    let s = NoopStore;
    let anon = Caller::Anonymous;

    assert_not_logged_in(list::<Skill, _>(&s, anon, None).await.unwrap_err());
    assert_not_logged_in(get_by_id::<Skill, _>(&s, anon, 1).await.unwrap_err());
    assert_not_logged_in(upsert::<Skill, _>(&s, anon, None, rust(50)).await.unwrap_err());
    assert_not_logged_in(delete::<Skill, _>(&s, anon, 1).await.unwrap_err());
  }

  #[tokio::test]
  async fn authentication_is_checked_before_validation() {
    let err = upsert::<Skill, _>(&NoopStore, Caller::Anonymous, None, rust(110))
      .await
      .unwrap_err();
    assert_not_logged_in(err);
  }

  #[tokio::test]
  async fn invalid_fields_are_rejected_before_any_write() {
    let err = upsert::<Skill, _>(&NoopStore, ALICE, None, rust(-1)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.to_string(), "Invalid range for percent");
  }

  #[tokio::test]
  async fn zero_id_is_treated_as_absent() {
    let s = VecStore::default();
    upsert::<Skill, _>(&s, ALICE, Some(0), rust(10)).await.unwrap();
    upsert::<Skill, _>(&s, ALICE, Some(-3), rust(10)).await.unwrap();
    upsert::<Skill, _>(&s, ALICE, Some(7), rust(10)).await.unwrap();
    assert_eq!(*s.upserts.lock().unwrap(), vec![None, None, Some(7)]);
  }

  #[tokio::test]
  async fn get_by_id_hides_other_owners_records() {
    let s = VecStore::default();
    let skill = upsert::<Skill, _>(&s, ALICE, None, rust(80)).await.unwrap();

    let mine = get_by_id::<Skill, _>(&s, ALICE, skill.id).await.unwrap();
    assert_eq!(mine, Some(skill.clone()));

    let theirs = get_by_id::<Skill, _>(&s, BOB, skill.id).await.unwrap();
    assert_eq!(theirs, None);
  }

  #[tokio::test]
  async fn delete_missing_id_names_the_entity() {
    let s = VecStore::default();
    let err = delete::<Skill, _>(&s, ALICE, 42).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Invalid Skill id!");
  }

  #[tokio::test]
  async fn delete_returns_the_removed_id() {
    let s = VecStore::default();
    let skill = upsert::<Skill, _>(&s, ALICE, None, rust(80)).await.unwrap();

    let err = delete::<Skill, _>(&s, BOB, skill.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(delete::<Skill, _>(&s, ALICE, skill.id).await.unwrap(), skill.id);
    assert!(s.rows.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn list_wildcard_and_omitted_agree() {
    let s = VecStore::default();
    for _ in 0..12 {
      upsert::<Skill, _>(&s, ALICE, None, rust(1)).await.unwrap();
    }
    let omitted = list::<Skill, _>(&s, ALICE, None).await.unwrap();
    let star = list::<Skill, _>(&s, ALICE, Some("*")).await.unwrap();
    assert_eq!(omitted.len(), 10);
    assert_eq!(omitted, star);

    let all = list::<Skill, _>(&s, ALICE, Some("rUsT")).await.unwrap();
    assert_eq!(all.len(), 12);
  }
}
