//! [`SqliteStore`] — the SQLite implementation of the `vitae-core` store
//! traits.

use std::path::Path;

use chrono::Utc;
use rusqlite::{
  OptionalExtension as _, functions::FunctionFlags, params_from_iter, types::Value,
};
use vitae_core::{
  ListFilter, UserId,
  account::{NewUser, Session, StoredCredentials, User},
  entity::DEFAULT_PAGE_SIZE,
  header::{Header, HeaderFields, HeaderPatch},
  link::{Link, NewLink, Vote},
  store::{AccountStore, EntityStore, HeaderStore, LinkStore},
};

use crate::{
  Result,
  encode::{RawSession, encode_dt},
  schema::SCHEMA,
  table::{Table, select_sql},
};

const HEADER_COLUMNS: &str = "owner_id, name, actual_position, description, \
   profile_picture, email, cellphone, location, github";

const VOTE_SELECT: &str = "SELECT v.id, v.user_id, l.id, l.url, l.description
   FROM votes v
   JOIN links l ON l.id = v.link_id";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Vitae store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// SQLite's built-in `lower()` only folds ASCII; searches go through
/// `unicode_lower()` instead.
fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    "unicode_lower",
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
  )
}

fn read_header(row: &rusqlite::Row<'_>) -> rusqlite::Result<Header> {
  Ok(Header {
    owner:           UserId(row.get(0)?),
    name:            row.get(1)?,
    actual_position: row.get(2)?,
    description:     row.get(3)?,
    profile_picture: row.get(4)?,
    email:           row.get(5)?,
    cellphone:       row.get(6)?,
    location:        row.get(7)?,
    github:          row.get(8)?,
  })
}

fn read_link(row: &rusqlite::Row<'_>) -> rusqlite::Result<Link> {
  Ok(Link {
    id:          row.get(0)?,
    url:         row.get(1)?,
    description: row.get(2)?,
  })
}

fn read_vote(row: &rusqlite::Row<'_>) -> rusqlite::Result<Vote> {
  Ok(Vote {
    id:    row.get(0)?,
    voter: UserId(row.get(1)?),
    link:  Link {
      id:          row.get(2)?,
      url:         row.get(3)?,
      description: row.get(4)?,
    },
  })
}

fn read_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:       UserId(row.get(0)?),
    username: row.get(1)?,
    email:    row.get(2)?,
  })
}

// ─── Owned entities ──────────────────────────────────────────────────────────

impl<E: Table> EntityStore<E> for SqliteStore {
  type Error = crate::Error;

  async fn list_owned(&self, owner: UserId, filter: ListFilter) -> Result<Vec<E>> {
    let select = select_sql::<E>();
    let (sql, params) = match filter {
      ListFilter::Page => (
        format!("{select} WHERE owner_id = ?1 ORDER BY id LIMIT ?2"),
        vec![Value::Integer(owner.0), Value::Integer(DEFAULT_PAGE_SIZE as i64)],
      ),
      ListFilter::Contains(needle) => {
        let matches = E::SEARCH
          .iter()
          .map(|col| format!("instr(unicode_lower({col}), unicode_lower(?2)) > 0"))
          .collect::<Vec<_>>()
          .join(" OR ");
        (
          format!("{select} WHERE owner_id = ?1 AND ({matches}) ORDER BY id"),
          vec![Value::Integer(owner.0), Value::Text(needle)],
        )
      }
    };

    let raws = self
      .conn
      .call(move |conn| {
        let mut raws = {
          let mut stmt = conn.prepare(&sql)?;
          stmt
            .query_map(params_from_iter(params.iter()), E::read)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        E::load_children(conn, &mut raws)?;
        Ok(raws)
      })
      .await?;

    raws.into_iter().map(E::decode).collect()
  }

  async fn get_owned(&self, owner: UserId, id: i64) -> Result<Option<E>> {
    let sql = format!("{} WHERE id = ?1 AND owner_id = ?2", select_sql::<E>());

    let raw = self
      .conn
      .call(move |conn| {
        let mut raw = conn
          .query_row(&sql, rusqlite::params![id, owner.0], E::read)
          .optional()?;
        if let Some(raw) = raw.as_mut() {
          E::load_children(conn, std::slice::from_mut(raw))?;
        }
        Ok(raw)
      })
      .await?;

    raw.map(E::decode).transpose()
  }

  async fn upsert_owned(
    &self,
    owner:  UserId,
    id:     Option<i64>,
    fields: E::Fields,
  ) -> Result<E> {
    let values = E::bind(&fields);
    let assignments = E::COLUMNS
      .iter()
      .enumerate()
      .map(|(i, col)| format!("{col} = ?{}", i + 2))
      .collect::<Vec<_>>()
      .join(", ");
    let placeholders = (1..=E::COLUMNS.len() + 1)
      .map(|i| format!("?{i}"))
      .collect::<Vec<_>>()
      .join(", ");
    let update_sql = format!(
      "UPDATE {} SET owner_id = ?1, {assignments} WHERE id = ?{}",
      E::TABLE,
      E::COLUMNS.len() + 2,
    );
    let insert_sql = format!(
      "INSERT INTO {} (owner_id, {}) VALUES ({placeholders})",
      E::TABLE,
      E::COLUMNS.join(", "),
    );
    let select_one = format!("{} WHERE id = ?1", select_sql::<E>());

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let mut params = Vec::with_capacity(values.len() + 2);
        params.push(Value::Integer(owner.0));
        params.extend(values);

        let updated = match id {
          Some(id) => {
            let mut update_params = params.clone();
            update_params.push(Value::Integer(id));
            tx.execute(&update_sql, params_from_iter(update_params.iter()))?
          }
          None => 0,
        };

        let row_id = match id {
          Some(id) if updated > 0 => id,
          _ => {
            tx.execute(&insert_sql, params_from_iter(params.iter()))?;
            tx.last_insert_rowid()
          }
        };

        E::write_children(&tx, row_id, &fields)?;

        let mut raw = tx.query_row(&select_one, [row_id], E::read)?;
        E::load_children(&tx, std::slice::from_mut(&mut raw))?;

        tx.commit()?;
        Ok(raw)
      })
      .await?;

    E::decode(raw)
  }

  async fn delete_owned(&self, owner: UserId, id: i64) -> Result<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?1 AND owner_id = ?2", E::TABLE);
    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![id, owner.0])?))
      .await?;
    Ok(removed > 0)
  }
}

// ─── Header ──────────────────────────────────────────────────────────────────

impl HeaderStore for SqliteStore {
  type Error = crate::Error;

  async fn get_header(&self) -> Result<Option<Header>> {
    let header = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {HEADER_COLUMNS} FROM header WHERE id = 1"),
            [],
            read_header,
          )
          .optional()?)
      })
      .await?;
    Ok(header)
  }

  async fn create_header(&self, owner: UserId, f: HeaderFields) -> Result<Option<Header>> {
    let header = Header {
      name:            f.name,
      actual_position: f.actual_position,
      description:     f.description,
      profile_picture: f.profile_picture,
      email:           f.email,
      cellphone:       f.cellphone,
      location:        f.location,
      github:          f.github,
      owner,
    };
    let row = header.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!(
            "INSERT INTO header (id, {HEADER_COLUMNS})
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT (id) DO NOTHING"
          ),
          rusqlite::params![
            row.owner.0,
            row.name,
            row.actual_position,
            row.description,
            row.profile_picture,
            row.email,
            row.cellphone,
            row.location,
            row.github,
          ],
        )?)
      })
      .await?;

    Ok((inserted > 0).then_some(header))
  }

  async fn update_header(&self, patch: HeaderPatch) -> Result<Option<Header>> {
    let header = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(mut header) = tx
          .query_row(
            &format!("SELECT {HEADER_COLUMNS} FROM header WHERE id = 1"),
            [],
            read_header,
          )
          .optional()?
        else {
          return Ok(None);
        };

        patch.apply(&mut header);

        tx.execute(
          "UPDATE header SET
             name = ?1, actual_position = ?2, description = ?3,
             profile_picture = ?4, email = ?5, cellphone = ?6,
             location = ?7, github = ?8
           WHERE id = 1",
          rusqlite::params![
            header.name,
            header.actual_position,
            header.description,
            header.profile_picture,
            header.email,
            header.cellphone,
            header.location,
            header.github,
          ],
        )?;
        tx.commit()?;
        Ok(Some(header))
      })
      .await?;
    Ok(header)
  }

  async fn delete_header(&self) -> Result<bool> {
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM header WHERE id = 1", [])?))
      .await?;
    Ok(removed > 0)
  }
}

// ─── Links & votes ───────────────────────────────────────────────────────────

impl LinkStore for SqliteStore {
  type Error = crate::Error;

  async fn list_links(&self) -> Result<Vec<Link>> {
    let links = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, url, description FROM links ORDER BY id")?;
        let rows = stmt
          .query_map([], read_link)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(links)
  }

  async fn get_link(&self, id: i64) -> Result<Option<Link>> {
    let link = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, url, description FROM links WHERE id = ?1",
            [id],
            read_link,
          )
          .optional()?)
      })
      .await?;
    Ok(link)
  }

  async fn create_link(&self, input: NewLink) -> Result<Link> {
    let link = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO links (url, description) VALUES (?1, ?2)",
          rusqlite::params![input.url, input.description],
        )?;
        Ok(Link {
          id:          conn.last_insert_rowid(),
          url:         input.url,
          description: input.description,
        })
      })
      .await?;
    Ok(link)
  }

  async fn list_votes(&self) -> Result<Vec<Vote>> {
    let votes = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{VOTE_SELECT} ORDER BY v.id"))?;
        let rows = stmt
          .query_map([], read_vote)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(votes)
  }

  async fn create_vote(&self, voter: UserId, link_id: i64) -> Result<Option<Vote>> {
    let vote = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO votes (user_id, link_id) VALUES (?1, ?2)
           ON CONFLICT (user_id, link_id) DO NOTHING",
          rusqlite::params![voter.0, link_id],
        )?;
        if inserted == 0 {
          return Ok(None);
        }
        let id = conn.last_insert_rowid();
        Ok(Some(conn.query_row(
          &format!("{VOTE_SELECT} WHERE v.id = ?1"),
          [id],
          read_vote,
        )?))
      })
      .await?;
    Ok(vote)
  }
}

// ─── Accounts ────────────────────────────────────────────────────────────────

impl AccountStore for SqliteStore {
  type Error = crate::Error;

  async fn create_user(&self, input: NewUser) -> Result<Option<User>> {
    let created_at = encode_dt(Utc::now());

    let user = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO users (username, email, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (username) DO NOTHING",
          rusqlite::params![input.username, input.email, input.password_hash, created_at],
        )?;
        if inserted == 0 {
          return Ok(None);
        }
        Ok(Some(User {
          id:       UserId(conn.last_insert_rowid()),
          username: input.username,
          email:    input.email,
        }))
      })
      .await?;
    Ok(user)
  }

  async fn get_user(&self, id: UserId) -> Result<Option<User>> {
    let user = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, username, email FROM users WHERE id = ?1",
            [id.0],
            read_user,
          )
          .optional()?)
      })
      .await?;
    Ok(user)
  }

  async fn find_credentials(&self, username: String) -> Result<Option<StoredCredentials>> {
    let creds = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, username, email, password_hash FROM users WHERE username = ?1",
            [username],
            |row| {
              Ok(StoredCredentials {
                user:          read_user(row)?,
                password_hash: row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;
    Ok(creds)
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let users = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, username, email FROM users ORDER BY id")?;
        let rows = stmt
          .query_map([], read_user)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(users)
  }

  async fn create_session(&self, session: Session) -> Result<()> {
    let issued_at  = encode_dt(session.issued_at);
    let expires_at = encode_dt(session.expires_at);
    let now        = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let purged = conn.execute("DELETE FROM sessions WHERE expires_at < ?1", [now])?;
        if purged > 0 {
          tracing::debug!(purged, "removed expired sessions");
        }
        conn.execute(
          "INSERT INTO sessions (token_digest, user_id, issued_at, expires_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![session.token_digest, session.user.0, issued_at, expires_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_session(&self, token_digest: String) -> Result<Option<Session>> {
    let raw: Option<RawSession> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT token_digest, user_id, issued_at, expires_at
             FROM sessions WHERE token_digest = ?1",
            [token_digest],
            |row| {
              Ok(RawSession {
                token_digest: row.get(0)?,
                user_id:      row.get(1)?,
                issued_at:    row.get(2)?,
                expires_at:   row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSession::into_session).transpose()
  }

  async fn delete_session(&self, token_digest: String) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM sessions WHERE token_digest = ?1", [token_digest])?)
      })
      .await?;
    Ok(removed > 0)
  }
}
