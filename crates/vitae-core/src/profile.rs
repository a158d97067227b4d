//! Owned résumé sections.
//!
//! Each section is a plain record plus the field set its upsert accepts. All
//! of them go through the same [`Entity`] contract; only skills and
//! standalone achievements carry extra validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Entity, Error, Result, UserId};

// ─── Education ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
  pub id:         i64,
  pub degree:     String,
  pub university: String,
  pub start_date: NaiveDate,
  pub end_date:   NaiveDate,
  pub owner:      UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationFields {
  pub degree:     String,
  pub university: String,
  pub start_date: NaiveDate,
  pub end_date:   NaiveDate,
}

impl Entity for Education {
  const NAME: &'static str = "Education";
  type Fields = EducationFields;

  fn id(&self) -> i64 { self.id }

  fn owner(&self) -> UserId { self.owner }
}

// ─── Skill ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
  pub id:      i64,
  pub name:    String,
  /// Self-assessed proficiency, 0–100 inclusive.
  pub percent: i32,
  pub owner:   UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillFields {
  pub name:    String,
  pub percent: i32,
}

impl Entity for Skill {
  const NAME: &'static str = "Skill";
  type Fields = SkillFields;

  fn id(&self) -> i64 { self.id }

  fn owner(&self) -> UserId { self.owner }

  fn validate(fields: &SkillFields) -> Result<()> {
    if !(0..=100).contains(&fields.percent) {
      return Err(Error::InvalidArgument("Invalid range for percent".to_owned()));
    }
    Ok(())
  }
}

// ─── Language ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
  pub id:    i64,
  pub name:  String,
  pub owner: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFields {
  pub name: String,
}

impl Entity for Language {
  const NAME: &'static str = "Language";
  type Fields = LanguageFields;

  fn id(&self) -> i64 { self.id }

  fn owner(&self) -> UserId { self.owner }
}

// ─── Interest ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
  pub id:    i64,
  pub name:  String,
  pub owner: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestFields {
  pub name: String,
}

impl Entity for Interest {
  const NAME: &'static str = "Interest";
  type Fields = InterestFields;

  fn id(&self) -> i64 { self.id }

  fn owner(&self) -> UserId { self.owner }
}

// ─── Work experience ─────────────────────────────────────────────────────────

/// A bullet point under a work experience. Owned through its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
  pub id:          i64,
  pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
  pub id:           i64,
  pub position:     String,
  pub company:      String,
  pub start_date:   NaiveDate,
  pub end_date:     NaiveDate,
  pub location:     String,
  pub owner:        UserId,
  /// In insertion order.
  pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkExperienceFields {
  pub position:     String,
  pub company:      String,
  pub start_date:   NaiveDate,
  pub end_date:     NaiveDate,
  pub location:     String,
  /// `Some` replaces the achievement set with exactly these descriptions;
  /// `None` leaves the stored set untouched.
  pub achievements: Option<Vec<String>>,
}

impl Entity for WorkExperience {
  const NAME: &'static str = "WorkExperience";
  type Fields = WorkExperienceFields;

  fn id(&self) -> i64 { self.id }

  fn owner(&self) -> UserId { self.owner }
}

// ─── Archivement ─────────────────────────────────────────────────────────────

/// A standalone achievement (award, certification) tied to a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archivement {
  pub id:    i64,
  pub name:  String,
  pub year:  i32,
  pub owner: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivementFields {
  pub name: String,
  pub year: i32,
}

impl Entity for Archivement {
  const NAME: &'static str = "Archivement";
  type Fields = ArchivementFields;

  fn id(&self) -> i64 { self.id }

  fn owner(&self) -> UserId { self.owner }

  fn validate(fields: &ArchivementFields) -> Result<()> {
    if fields.year <= 0 {
      return Err(Error::InvalidArgument("The year must be positive".to_owned()));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ErrorKind;

  fn skill(percent: i32) -> SkillFields {
    SkillFields { name: "Rust".into(), percent }
  }

  #[test]
  fn skill_percent_bounds_are_inclusive() {
    assert!(Skill::validate(&skill(0)).is_ok());
    assert!(Skill::validate(&skill(100)).is_ok());

    for bad in [-1, 101, 110] {
      let err = Skill::validate(&skill(bad)).unwrap_err();
      assert_eq!(err.kind(), ErrorKind::InvalidArgument);
      assert_eq!(err.to_string(), "Invalid range for percent");
    }
  }

  #[test]
  fn archivement_year_must_be_positive() {
    let ok = ArchivementFields { name: "Hackathon".into(), year: 2024 };
    assert!(Archivement::validate(&ok).is_ok());

    for bad in [0, -5] {
      let fields = ArchivementFields { name: "Hackathon".into(), year: bad };
      let err = Archivement::validate(&fields).unwrap_err();
      assert_eq!(err.to_string(), "The year must be positive");
    }
  }
}
