//! Table descriptors for the owned résumé sections.
//!
//! Each [`Table`] tells the generic [`EntityStore`](vitae_core::store::EntityStore)
//! impl in `store.rs` where an entity lives, which columns it writes, which
//! columns a search matches against, and how to read a row back. Every owned
//! table has `id` and `owner_id` as its first two columns.

use std::collections::HashSet;

use rusqlite::{Connection, Row, types::Value};
use vitae_core::{
  Entity, UserId,
  profile::{
    Achievement, Archivement, Education, Interest, Language, Skill, WorkExperience,
  },
};

use crate::{
  Result,
  encode::{RawEducation, RawWorkExperience, encode_date},
};

pub trait Table: Entity {
  const TABLE: &'static str;
  /// Data columns in bind order, after `id` and `owner_id`.
  const COLUMNS: &'static [&'static str];
  /// Columns a search needle is matched against (any of them).
  const SEARCH: &'static [&'static str];

  /// A row as read on the connection thread.
  type Raw: Send + 'static;

  fn read(row: &Row<'_>) -> rusqlite::Result<Self::Raw>;

  fn decode(raw: Self::Raw) -> Result<Self>;

  /// Values for [`Self::COLUMNS`], in the same order.
  fn bind(fields: &Self::Fields) -> Vec<Value>;

  /// Fill in child rows for freshly read parents.
  fn load_children(_conn: &Connection, _raws: &mut [Self::Raw]) -> rusqlite::Result<()> {
    Ok(())
  }

  /// Bring child rows in line with `fields`, inside the upsert transaction.
  fn write_children(
    _conn: &Connection,
    _id: i64,
    _fields: &Self::Fields,
  ) -> rusqlite::Result<()> {
    Ok(())
  }
}

/// `SELECT id, owner_id, <columns> FROM <table>`
pub fn select_sql<E: Table>() -> String {
  format!("SELECT id, owner_id, {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
}

fn text(s: &str) -> Value { Value::Text(s.to_owned()) }

// ─── Education ───────────────────────────────────────────────────────────────

impl Table for Education {
  const TABLE: &'static str = "education";
  const COLUMNS: &'static [&'static str] = &["degree", "university", "start_date", "end_date"];
  const SEARCH: &'static [&'static str] = &["degree"];

  type Raw = RawEducation;

  fn read(row: &Row<'_>) -> rusqlite::Result<RawEducation> {
    Ok(RawEducation {
      id:         row.get(0)?,
      owner_id:   row.get(1)?,
      degree:     row.get(2)?,
      university: row.get(3)?,
      start_date: row.get(4)?,
      end_date:   row.get(5)?,
    })
  }

  fn decode(raw: RawEducation) -> Result<Self> { raw.into_education() }

  fn bind(f: &Self::Fields) -> Vec<Value> {
    vec![
      text(&f.degree),
      text(&f.university),
      Value::Text(encode_date(f.start_date)),
      Value::Text(encode_date(f.end_date)),
    ]
  }
}

// ─── Skill ───────────────────────────────────────────────────────────────────

impl Table for Skill {
  const TABLE: &'static str = "skills";
  const COLUMNS: &'static [&'static str] = &["name", "percent"];
  const SEARCH: &'static [&'static str] = &["name"];

  type Raw = Skill;

  fn read(row: &Row<'_>) -> rusqlite::Result<Skill> {
    Ok(Skill {
      id:      row.get(0)?,
      owner:   UserId(row.get(1)?),
      name:    row.get(2)?,
      percent: row.get(3)?,
    })
  }

  fn decode(raw: Skill) -> Result<Self> { Ok(raw) }

  fn bind(f: &Self::Fields) -> Vec<Value> {
    vec![text(&f.name), Value::Integer(f.percent.into())]
  }
}

// ─── Language ────────────────────────────────────────────────────────────────

impl Table for Language {
  const TABLE: &'static str = "languages";
  const COLUMNS: &'static [&'static str] = &["name"];
  const SEARCH: &'static [&'static str] = &["name"];

  type Raw = Language;

  fn read(row: &Row<'_>) -> rusqlite::Result<Language> {
    Ok(Language {
      id:    row.get(0)?,
      owner: UserId(row.get(1)?),
      name:  row.get(2)?,
    })
  }

  fn decode(raw: Language) -> Result<Self> { Ok(raw) }

  fn bind(f: &Self::Fields) -> Vec<Value> { vec![text(&f.name)] }
}

// ─── Interest ────────────────────────────────────────────────────────────────

impl Table for Interest {
  const TABLE: &'static str = "interests";
  const COLUMNS: &'static [&'static str] = &["name"];
  const SEARCH: &'static [&'static str] = &["name"];

  type Raw = Interest;

  fn read(row: &Row<'_>) -> rusqlite::Result<Interest> {
    Ok(Interest {
      id:    row.get(0)?,
      owner: UserId(row.get(1)?),
      name:  row.get(2)?,
    })
  }

  fn decode(raw: Interest) -> Result<Self> { Ok(raw) }

  fn bind(f: &Self::Fields) -> Vec<Value> { vec![text(&f.name)] }
}

// ─── Archivement ─────────────────────────────────────────────────────────────

impl Table for Archivement {
  const TABLE: &'static str = "archivements";
  const COLUMNS: &'static [&'static str] = &["name", "year"];
  const SEARCH: &'static [&'static str] = &["name"];

  type Raw = Archivement;

  fn read(row: &Row<'_>) -> rusqlite::Result<Archivement> {
    Ok(Archivement {
      id:    row.get(0)?,
      owner: UserId(row.get(1)?),
      name:  row.get(2)?,
      year:  row.get(3)?,
    })
  }

  fn decode(raw: Archivement) -> Result<Self> { Ok(raw) }

  fn bind(f: &Self::Fields) -> Vec<Value> {
    vec![text(&f.name), Value::Integer(f.year.into())]
  }
}

// ─── Work experience ─────────────────────────────────────────────────────────

impl Table for WorkExperience {
  const TABLE: &'static str = "work_experiences";
  const COLUMNS: &'static [&'static str] =
    &["position", "company", "start_date", "end_date", "location"];
  const SEARCH: &'static [&'static str] = &["position", "company"];

  type Raw = RawWorkExperience;

  fn read(row: &Row<'_>) -> rusqlite::Result<RawWorkExperience> {
    Ok(RawWorkExperience {
      id:           row.get(0)?,
      owner_id:     row.get(1)?,
      position:     row.get(2)?,
      company:      row.get(3)?,
      start_date:   row.get(4)?,
      end_date:     row.get(5)?,
      location:     row.get(6)?,
      achievements: Vec::new(),
    })
  }

  fn decode(raw: RawWorkExperience) -> Result<Self> { raw.into_work_experience() }

  fn bind(f: &Self::Fields) -> Vec<Value> {
    vec![
      text(&f.position),
      text(&f.company),
      Value::Text(encode_date(f.start_date)),
      Value::Text(encode_date(f.end_date)),
      text(&f.location),
    ]
  }

  fn load_children(conn: &Connection, raws: &mut [RawWorkExperience]) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(
      "SELECT id, description FROM achievements
       WHERE work_experience_id = ?1
       ORDER BY id",
    )?;
    for raw in raws.iter_mut() {
      raw.achievements = stmt
        .query_map([raw.id], |row| {
          Ok(Achievement {
            id:          row.get(0)?,
            description: row.get(1)?,
          })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    }
    Ok(())
  }

  /// Delete descriptions no longer listed, insert new ones, and leave the
  /// rest (and their ids) alone.
  fn write_children(
    conn: &Connection,
    id: i64,
    fields: &Self::Fields,
  ) -> rusqlite::Result<()> {
    let Some(wanted) = &fields.achievements else {
      return Ok(());
    };

    let existing: Vec<String> = {
      let mut stmt = conn
        .prepare("SELECT description FROM achievements WHERE work_experience_id = ?1")?;
      stmt
        .query_map([id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?
    };

    let wanted_set: HashSet<&str> = wanted.iter().map(String::as_str).collect();
    let mut kept: HashSet<&str> = HashSet::new();

    {
      let mut delete = conn.prepare(
        "DELETE FROM achievements WHERE work_experience_id = ?1 AND description = ?2",
      )?;
      for description in &existing {
        if wanted_set.contains(description.as_str()) {
          kept.insert(description.as_str());
        } else {
          delete.execute(rusqlite::params![id, description])?;
        }
      }
    }

    let mut insert = conn.prepare(
      "INSERT INTO achievements (work_experience_id, description) VALUES (?1, ?2)",
    )?;
    for description in wanted {
      // `insert` returns false for descriptions already present or repeated.
      if kept.insert(description.as_str()) {
        insert.execute(rusqlite::params![id, description])?;
      }
    }
    Ok(())
  }
}
