//! The descriptor every owned résumé section implements, and the list filter
//! shared by all of them.

use crate::{Result, UserId};

/// Page size for unfiltered listings.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Search token meaning "no filter, return the default page".
pub const WILDCARD: &str = "*";

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A record owned by a single user and served through the generic resolver
/// in [`crate::resolver`].
pub trait Entity: Clone + Send + Sync + 'static {
  /// Name used in user-facing messages, e.g. `"Skill"` in
  /// `"Invalid Skill id!"`.
  const NAME: &'static str;

  /// The writable field set accepted by an upsert.
  type Fields: Clone + Send + Sync + 'static;

  fn id(&self) -> i64;

  fn owner(&self) -> UserId;

  /// Field-level constraints, checked after authentication and before any
  /// write.
  fn validate(_fields: &Self::Fields) -> Result<()> { Ok(()) }
}

// ─── ListFilter ──────────────────────────────────────────────────────────────

/// How a listing narrows the caller's records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListFilter {
  /// The first [`DEFAULT_PAGE_SIZE`] records in store order.
  Page,
  /// Every record whose search text contains the needle, ignoring case.
  Contains(String),
}

impl ListFilter {
  /// Omitted, empty and `"*"` all mean [`ListFilter::Page`].
  pub fn from_search(search: Option<&str>) -> Self {
    match search {
      None | Some("") | Some(WILDCARD) => Self::Page,
      Some(needle) => Self::Contains(needle.to_owned()),
    }
  }

  pub fn limit(&self) -> Option<usize> {
    match self {
      Self::Page => Some(DEFAULT_PAGE_SIZE),
      Self::Contains(_) => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn omitted_empty_and_wildcard_are_the_default_page() {
    assert_eq!(ListFilter::from_search(None), ListFilter::Page);
    assert_eq!(ListFilter::from_search(Some("")), ListFilter::Page);
    assert_eq!(ListFilter::from_search(Some("*")), ListFilter::Page);
    assert_eq!(ListFilter::Page.limit(), Some(DEFAULT_PAGE_SIZE));
  }

  #[test]
  fn any_other_text_is_an_unbounded_substring_filter() {
    let filter = ListFilter::from_search(Some("Rust"));
    assert_eq!(filter, ListFilter::Contains("Rust".to_owned()));
    assert_eq!(filter.limit(), None);

    // Only the bare token is special.
    assert_eq!(
      ListFilter::from_search(Some("**")),
      ListFilter::Contains("**".to_owned())
    );
  }
}
