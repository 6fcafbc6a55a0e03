//! List query shapes.

use crate::envelope::ListEnvelope;

use super::record::ContentRecord;

/// The three list-style queries consumers can issue.
///
/// All of them are answered from the canonical full listing; `Featured` and
/// `Category` are derived by filtering it, preserving source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
  All,
  Featured,
  Category(String),
}

impl ListQuery {
  pub fn matches<T: ContentRecord>(&self, record: &T) -> bool {
    match self {
      ListQuery::All => true,
      ListQuery::Featured => record.is_featured(),
      ListQuery::Category(slug) => record
        .category()
        .is_some_and(|c| c.eq_ignore_ascii_case(slug)),
    }
  }

  /// Apply this query's filter to a full listing, recomputing pagination.
  pub fn derive<T: ContentRecord>(&self, full: ListEnvelope<T>) -> ListEnvelope<T> {
    match self {
      ListQuery::All => full,
      _ => full.filter_derived(|r| self.matches(r)),
    }
  }

  /// Human-readable form for logs.
  pub fn describe(&self) -> String {
    match self {
      ListQuery::All => "all".to_string(),
      ListQuery::Featured => "featured".to_string(),
      ListQuery::Category(slug) => format!("category {}", slug),
    }
  }
}
