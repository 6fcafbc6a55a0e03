//! Paginated list envelope returned by every list query.

use serde::{Deserialize, Serialize};

/// Paginated wrapper around a list of records.
///
/// Every list-style query resolves to one of these, regardless of whether the
/// data came from the network, the cache or bundled fixtures. Field names
/// follow the wire format of the content API (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvelope<T> {
  pub data: Vec<T>,
  pub page: u32,
  pub limit: u32,
  pub total: u32,
  pub total_pages: u32,
  pub has_next: bool,
  pub has_prev: bool,
}

impl<T> ListEnvelope<T> {
  /// Wrap a complete result set as a single unpaginated page.
  ///
  /// Used for fixture-sourced results: the whole set is one page, with
  /// `total` and `limit` both equal to the number of records.
  pub fn single_page(data: Vec<T>) -> Self {
    let n = data.len() as u32;
    Self {
      page: 1,
      limit: n,
      total: n,
      total_pages: if n > 0 { 1 } else { 0 },
      has_next: false,
      has_prev: false,
      data,
    }
  }

  /// Keep only records matching `keep`, recomputing `total`, `total_pages`
  /// and the pagination flags against the filtered subset.
  ///
  /// Relative order of the surviving records is preserved.
  pub fn filter_derived<F>(self, keep: F) -> Self
  where
    F: Fn(&T) -> bool,
  {
    let limit = self.limit;
    let data: Vec<T> = self.data.into_iter().filter(|r| keep(r)).collect();
    let total = data.len() as u32;
    let total_pages = if total == 0 {
      0
    } else if limit > 0 {
      total.div_ceil(limit)
    } else {
      1
    };
    let page = if total_pages == 0 {
      1
    } else {
      self.page.min(total_pages)
    };
    Self {
      has_next: page < total_pages,
      has_prev: page > 1,
      data,
      page,
      limit,
      total,
      total_pages,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }
}

/// Pagination metadata without the records themselves.
///
/// This is what the state store keeps between fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
  pub page: u32,
  pub limit: u32,
  pub total: u32,
  pub total_pages: u32,
  pub has_next: bool,
  pub has_prev: bool,
}

impl PageInfo {
  pub fn from_envelope<T>(envelope: &ListEnvelope<T>) -> Self {
    Self {
      page: envelope.page,
      limit: envelope.limit,
      total: envelope.total,
      total_pages: envelope.total_pages,
      has_next: envelope.has_next,
      has_prev: envelope.has_prev,
    }
  }
}
