//! Schema-level tests: GraphQL documents executed against an in-memory store.

use async_graphql::{Request, Response};
use chrono::{Duration, Utc};
use serde_json::json;
use vitae_core::{Caller, account::NewUser, store::AccountStore};
use vitae_store_sqlite::SqliteStore;

use crate::{AuthSettings, PortfolioSchema, auth, build_schema, export_sdl};

async fn setup() -> (PortfolioSchema, SqliteStore) {
  let store = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  let schema = build_schema(store.clone(), AuthSettings::default());
  (schema, store)
}

async fn user(store: &SqliteStore, name: &str) -> Caller {
  let user = store
    .create_user(NewUser {
      username:      name.into(),
      email:         format!("{name}@example.com"),
      password_hash: "unused".into(),
    })
    .await
    .unwrap()
    .unwrap();
  Caller::User(user.id)
}

async fn run(schema: &PortfolioSchema, caller: Caller, query: &str) -> Response {
  schema.execute(Request::new(query).data(caller)).await
}

fn data(resp: Response) -> serde_json::Value {
  assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);
  resp.data.into_json().unwrap()
}

/// The first error's message and `code` extension.
fn error(resp: &Response) -> (String, String) {
  let err = resp.errors.first().expect("an error");
  let json = serde_json::to_value(err).unwrap();
  let code = json["extensions"]["code"].as_str().unwrap_or_default();
  (err.message.clone(), code.to_owned())
}

// ─── Owned entities ──────────────────────────────────────────────────────────

#[tokio::test]
async fn anonymous_reads_and_writes_are_rejected() {
  let (schema, _) = setup().await;

  for doc in [
    "{ skill { id } }",
    "{ degreeById(idEducation: 1) { id } }",
    "mutation { createLanguage(language: \"Basque\") { id } }",
    "mutation { deleteInterest(idInterest: 1) }",
  ] {
    let resp = run(&schema, Caller::Anonymous, doc).await;
    assert_eq!(
      error(&resp),
      ("Not logged in!".to_owned(), "UNAUTHENTICATED".to_owned()),
      "{doc}"
    );
  }
}

#[tokio::test]
async fn skill_upsert_then_lookup() {
  let (schema, store) = setup().await;
  let alice = user(&store, "alice").await;

  let created = data(
    run(
      &schema,
      alice,
      r#"mutation { createSkill(skill: "Rust", percent: 90) { id skill percent postedBy { username } } }"#,
    )
    .await,
  );
  let id = created["createSkill"]["id"].as_i64().unwrap();
  assert_eq!(created["createSkill"]["postedBy"]["username"], "alice");

  let updated = data(
    run(
      &schema,
      alice,
      &format!(r#"mutation {{ createSkill(idSkill: {id}, skill: "Rust", percent: 95) {{ id percent }} }}"#),
    )
    .await,
  );
  assert_eq!(updated["createSkill"], json!({ "id": id, "percent": 95 }));

  let listed = data(run(&schema, alice, "{ skill(search: \"*\") { id percent } }").await);
  assert_eq!(listed["skill"], json!([{ "id": id, "percent": 95 }]));

  let found = data(run(&schema, alice, &format!("{{ skillById(idSkill: {id}) {{ skill }} }}")).await);
  assert_eq!(found["skillById"]["skill"], "Rust");
}

#[tokio::test]
async fn out_of_range_percent_writes_nothing() {
  let (schema, store) = setup().await;
  let alice = user(&store, "alice").await;

  let resp = run(
    &schema,
    alice,
    r#"mutation { createSkill(skill: "Rust", percent: 110) { id } }"#,
  )
  .await;
  assert_eq!(
    error(&resp),
    ("Invalid range for percent".to_owned(), "INVALID_ARGUMENT".to_owned())
  );

  let listed = data(run(&schema, alice, "{ skill { id } }").await);
  assert_eq!(listed["skill"], json!([]));
}

#[tokio::test]
async fn deleting_a_missing_record_names_the_entity() {
  let (schema, store) = setup().await;
  let alice = user(&store, "alice").await;

  let resp = run(&schema, alice, "mutation { deleteArchivement(idArchivement: 7) }").await;
  assert_eq!(
    error(&resp),
    ("Invalid Archivement id!".to_owned(), "NOT_FOUND".to_owned())
  );
}

#[tokio::test]
async fn delete_returns_the_id_and_only_for_the_owner() {
  let (schema, store) = setup().await;
  let alice = user(&store, "alice").await;
  let bob = user(&store, "bob").await;

  let created = data(run(&schema, alice, r#"mutation { createInterest(name: "Chess") { id } }"#).await);
  let id = created["createInterest"]["id"].as_i64().unwrap();

  let resp = run(&schema, bob, &format!("mutation {{ deleteInterest(idInterest: {id}) }}")).await;
  assert_eq!(error(&resp).0, "Invalid Interest id!");

  let deleted = data(run(&schema, alice, &format!("mutation {{ deleteInterest(idInterest: {id}) }}")).await);
  assert_eq!(deleted["deleteInterest"], id);
}

#[tokio::test]
async fn education_dates_and_search() {
  let (schema, store) = setup().await;
  let alice = user(&store, "alice").await;

  data(
    run(
      &schema,
      alice,
      r#"mutation {
        createEducation(
          degree: "MSc Distributed Systems",
          university: "TU Delft",
          startDate: "2017-09-01",
          endDate: "2019-08-31"
        ) { id }
      }"#,
    )
    .await,
  );

  let found = data(run(&schema, alice, r#"{ degrees(search: "distributed") { degree startDate endDate } }"#).await);
  assert_eq!(
    found["degrees"],
    json!([{ "degree": "MSc Distributed Systems", "startDate": "2017-09-01", "endDate": "2019-08-31" }])
  );

  let none = data(run(&schema, alice, r#"{ degrees(search: "physics") { id } }"#).await);
  assert_eq!(none["degrees"], json!([]));
}

#[tokio::test]
async fn work_experience_achievements_follow_the_latest_list() {
  let (schema, store) = setup().await;
  let alice = user(&store, "alice").await;

  let upsert = |id: Option<i64>, list: &str| {
    let id = id.map(|id| format!("idWork: {id},")).unwrap_or_default();
    format!(
      r#"mutation {{
        createWorkExperience({id}
          position: "SRE", company: "Globex",
          startDate: "2020-01-01", endDate: "2021-01-01",
          location: "Remote", archivements: {list}
        ) {{ id archivements {{ id description }} }}
      }}"#
    )
  };

  let first = data(run(&schema, alice, &upsert(None, r#"["A", "B"]"#)).await);
  let work = &first["createWorkExperience"];
  let id = work["id"].as_i64().unwrap();
  let b_id = work["archivements"][1]["id"].clone();

  let second = data(run(&schema, alice, &upsert(Some(id), r#"["B", "C"]"#)).await);
  let achievements = &second["createWorkExperience"]["archivements"];
  assert_eq!(achievements[0], json!({ "id": b_id, "description": "B" }));
  assert_eq!(achievements[1]["description"], "C");
  assert_eq!(achievements.as_array().unwrap().len(), 2);
}

// ─── Header ──────────────────────────────────────────────────────────────────

const CREATE_HEADER: &str = r#"mutation {
  createHeader(
    name: "Grace Hopper", actualPosition: "Rear Admiral", description: "Compilers",
    profilePicture: "https://example.com/grace.png", email: "grace@example.com",
    cellphone: "555-0199", location: "Arlington", github: "grace"
  ) { name postedBy { username } }
}"#;

#[tokio::test]
async fn header_lifecycle() {
  let (schema, store) = setup().await;
  let alice = user(&store, "alice").await;

  let resp = run(&schema, Caller::Anonymous, "{ getHeader { name } }").await;
  assert_eq!(error(&resp), ("No Header exists.".to_owned(), "NOT_FOUND".to_owned()));

  let created = data(run(&schema, alice, CREATE_HEADER).await);
  assert_eq!(created["createHeader"]["postedBy"]["username"], "alice");

  let again = run(&schema, alice, CREATE_HEADER).await;
  assert_eq!(
    error(&again),
    (
      "A Header already exists. Delete the existing one before creating a new one.".to_owned(),
      "ALREADY_EXISTS".to_owned()
    )
  );

  let updated = data(
    run(&schema, alice, r#"mutation { updateHeader(location: "New York", name: "") { name location } }"#).await,
  );
  assert_eq!(
    updated["updateHeader"],
    json!({ "name": "Grace Hopper", "location": "New York" })
  );

  // Reading stays public.
  let read = data(run(&schema, Caller::Anonymous, "{ getHeader { location } }").await);
  assert_eq!(read["getHeader"]["location"], "New York");

  let deleted = data(run(&schema, alice, "mutation { deleteHeader { message } }").await);
  assert_eq!(deleted["deleteHeader"]["message"], "Header deleted successfully.");

  let gone = run(&schema, alice, "mutation { deleteHeader { message } }").await;
  assert_eq!(error(&gone).0, "No Header exists to delete.");
}

#[tokio::test]
async fn header_changes_need_a_login() {
  let (schema, _) = setup().await;
  let resp = run(&schema, Caller::Anonymous, CREATE_HEADER).await;
  assert_eq!(error(&resp).1, "UNAUTHENTICATED");
}

// ─── Links & votes ───────────────────────────────────────────────────────────

#[tokio::test]
async fn voting() {
  let (schema, store) = setup().await;
  let alice = user(&store, "alice").await;

  let resp = run(&schema, Caller::Anonymous, "mutation { createVote(linkId: 1) { id } }").await;
  assert_eq!(
    error(&resp),
    ("You must be logged to vote!".to_owned(), "UNAUTHENTICATED".to_owned())
  );

  let resp = run(&schema, alice, "mutation { createVote(linkId: 1) { id } }").await;
  assert_eq!(error(&resp), ("Invalid Link!".to_owned(), "NOT_FOUND".to_owned()));

  let link = data(
    run(&schema, alice, r#"mutation { createLink(url: "https://docs.rs", description: "Docs") { id } }"#).await,
  );
  let link_id = link["createLink"]["id"].as_i64().unwrap();

  let vote_doc = format!("mutation {{ createVote(linkId: {link_id}) {{ user {{ username }} link {{ url }} }} }}");
  let vote = data(run(&schema, alice, &vote_doc).await);
  assert_eq!(
    vote["createVote"],
    json!({ "user": { "username": "alice" }, "link": { "url": "https://docs.rs" } })
  );

  let dup = run(&schema, alice, &vote_doc).await;
  assert_eq!(error(&dup).1, "CONFLICT");

  let votes = data(run(&schema, Caller::Anonymous, "{ votes { id } links { id } }").await);
  assert_eq!(votes["votes"].as_array().unwrap().len(), 1);
  assert_eq!(votes["links"].as_array().unwrap().len(), 1);
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_login_verify_refresh() {
  let (schema, store) = setup().await;

  data(
    run(
      &schema,
      Caller::Anonymous,
      r#"mutation { createUser(username: "carol", email: "carol@example.com", password: "s3cret") { id } }"#,
    )
    .await,
  );

  let bad = run(
    &schema,
    Caller::Anonymous,
    r#"mutation { tokenAuth(username: "carol", password: "wrong") { token } }"#,
  )
  .await;
  assert_eq!(
    error(&bad),
    ("Please enter valid credentials".to_owned(), "UNAUTHENTICATED".to_owned())
  );

  let login = data(
    run(
      &schema,
      Caller::Anonymous,
      r#"mutation { tokenAuth(username: "carol", password: "s3cret") { token payload { username exp } } }"#,
    )
    .await,
  );
  let token = login["tokenAuth"]["token"].as_str().unwrap().to_owned();
  assert_eq!(login["tokenAuth"]["payload"]["username"], "carol");

  let caller = auth::resolve_caller(&store, Some(&format!("Bearer {token}"))).await;
  let me = data(run(&schema, caller, "{ me { username } }").await);
  assert_eq!(me["me"]["username"], "carol");

  let verified = data(
    run(&schema, Caller::Anonymous, &format!(r#"mutation {{ verifyToken(token: "{token}") {{ username }} }}"#)).await,
  );
  assert_eq!(verified["verifyToken"]["username"], "carol");

  let refreshed = data(
    run(&schema, Caller::Anonymous, &format!(r#"mutation {{ refreshToken(token: "{token}") {{ token }} }}"#)).await,
  );
  let fresh = refreshed["refreshToken"]["token"].as_str().unwrap();
  assert_ne!(fresh, token);

  // The old token was revoked.
  let stale = run(&schema, Caller::Anonymous, &format!(r#"mutation {{ verifyToken(token: "{token}") {{ username }} }}"#)).await;
  assert_eq!(error(&stale), ("Invalid token".to_owned(), "UNAUTHENTICATED".to_owned()));
  assert_eq!(
    auth::resolve_caller(&store, Some(&format!("JWT {token}"))).await,
    Caller::Anonymous
  );
  assert!(matches!(
    auth::resolve_caller(&store, Some(&format!("JWT {fresh}"))).await,
    Caller::User(_)
  ));
}

#[tokio::test]
async fn duplicate_and_blank_registrations() {
  let (schema, store) = setup().await;
  user(&store, "dave").await;

  let dup = run(
    &schema,
    Caller::Anonymous,
    r#"mutation { createUser(username: "dave", email: "d@example.com", password: "pw") { id } }"#,
  )
  .await;
  assert_eq!(
    error(&dup),
    ("A user with that username already exists.".to_owned(), "CONFLICT".to_owned())
  );

  let blank = run(
    &schema,
    Caller::Anonymous,
    r#"mutation { createUser(username: "  ", email: "x@example.com", password: "pw") { id } }"#,
  )
  .await;
  assert_eq!(error(&blank).0, "Username must not be empty");
}

#[tokio::test]
async fn registration_can_be_disabled() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let schema = build_schema(
    store,
    AuthSettings { allow_registration: false, ..Default::default() },
  );

  let resp = run(
    &schema,
    Caller::Anonymous,
    r#"mutation { createUser(username: "erin", email: "e@example.com", password: "pw") { id } }"#,
  )
  .await;
  assert_eq!(error(&resp).0, "Registration is disabled");
}

#[tokio::test]
async fn expired_tokens_are_anonymous() {
  let (_, store) = setup().await;
  let Caller::User(id) = user(&store, "frank").await else {
    unreachable!()
  };

  let (token, mut session) = auth::mint_session(id, Duration::seconds(60));
  session.expires_at = Utc::now() - Duration::seconds(1);
  store.create_session(session).await.unwrap();

  let caller = auth::resolve_caller(&store, Some(&format!("Bearer {token}"))).await;
  assert_eq!(caller, Caller::Anonymous);
}

#[tokio::test]
async fn unknown_tokens_are_anonymous() {
  let (_, store) = setup().await;
  user(&store, "grace").await;

  assert_eq!(auth::resolve_caller(&store, Some("Bearer nope")).await, Caller::Anonymous);
  assert_eq!(auth::resolve_caller(&store, None).await, Caller::Anonymous);
}

// ─── SDL ─────────────────────────────────────────────────────────────────────

#[test]
fn sdl_lists_the_public_surface() {
  let sdl = export_sdl();
  for name in [
    "getHeader",
    "degreeById",
    "skillById",
    "languageById",
    "interestById",
    "workExperienceById",
    "archivementsById",
    "createWorkExperience",
    "createVote",
    "tokenAuth",
    "refreshToken",
    "postedBy",
  ] {
    assert!(sdl.contains(name), "missing {name}");
  }
}
