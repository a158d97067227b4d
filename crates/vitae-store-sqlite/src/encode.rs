//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings (nanoseconds,
//! `Z` suffix) so they order correctly as text; calendar dates as
//! `YYYY-MM-DD`.
//! Rows that need decoding are first read into `Raw*` structs of plain
//! strings on the connection thread, then converted here.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use vitae_core::{
  UserId,
  account::Session,
  profile::{Achievement, Education, WorkExperience},
};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `education` row.
pub struct RawEducation {
  pub id:         i64,
  pub owner_id:   i64,
  pub degree:     String,
  pub university: String,
  pub start_date: String,
  pub end_date:   String,
}

impl RawEducation {
  pub fn into_education(self) -> Result<Education> {
    Ok(Education {
      id:         self.id,
      degree:     self.degree,
      university: self.university,
      start_date: decode_date(&self.start_date)?,
      end_date:   decode_date(&self.end_date)?,
      owner:      UserId(self.owner_id),
    })
  }
}

/// Raw values read directly from a `work_experiences` row, plus its
/// achievements.
pub struct RawWorkExperience {
  pub id:           i64,
  pub owner_id:     i64,
  pub position:     String,
  pub company:      String,
  pub start_date:   String,
  pub end_date:     String,
  pub location:     String,
  pub achievements: Vec<Achievement>,
}

impl RawWorkExperience {
  pub fn into_work_experience(self) -> Result<WorkExperience> {
    Ok(WorkExperience {
      id:           self.id,
      position:     self.position,
      company:      self.company,
      start_date:   decode_date(&self.start_date)?,
      end_date:     decode_date(&self.end_date)?,
      location:     self.location,
      owner:        UserId(self.owner_id),
      achievements: self.achievements,
    })
  }
}

/// Raw strings read directly from a `sessions` row.
pub struct RawSession {
  pub token_digest: String,
  pub user_id:      i64,
  pub issued_at:    String,
  pub expires_at:   String,
}

impl RawSession {
  pub fn into_session(self) -> Result<Session> {
    Ok(Session {
      token_digest: self.token_digest,
      user:         UserId(self.user_id),
      issued_at:    decode_dt(&self.issued_at)?,
      expires_at:   decode_dt(&self.expires_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dates_are_iso_calendar_strings() {
    let d = NaiveDate::from_ymd_opt(2021, 3, 9).unwrap();
    assert_eq!(encode_date(d), "2021-03-09");
    assert_eq!(decode_date("2021-03-09").unwrap(), d);
  }

  #[test]
  fn garbage_dates_are_reported() {
    assert!(matches!(decode_date("09/03/2021"), Err(Error::DateParse(_))));
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }

  #[test]
  fn timestamps_are_fixed_width_and_sort_as_text() {
    let whole = DateTime::parse_from_rfc3339("2024-05-01T10:00:05Z")
      .unwrap()
      .with_timezone(&Utc);
    let later = whole + chrono::Duration::milliseconds(250);

    let (a, b) = (encode_dt(whole), encode_dt(later));
    assert_eq!(a, "2024-05-01T10:00:05.000000000Z");
    assert_eq!(a.len(), b.len());
    assert!(a < b);
    assert_eq!(decode_dt(&b).unwrap(), later);
  }
}
