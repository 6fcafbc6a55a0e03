//! Per-entity fetch state and its mutation actions.
//!
//! The state is a plain value mutated through named actions, the way the
//! dashboard's views expect: loading and error flags around fetches, the
//! last materialized list, a current-item pointer for detail views, and
//! local optimistic edits that never touch the network.
//!
//! Every action is infallible; inputs are treated as already validated by
//! the fetch chain.

use crate::envelope::{ListEnvelope, PageInfo};
use crate::fetch::ContentRecord;

/// Last-known fetch state for one entity type.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
  items: Vec<T>,
  current: Option<T>,
  loading: bool,
  error: Option<String>,
  pagination: PageInfo,
  last_fetched_ms: Option<i64>,
}

impl<T> Default for FetchState<T> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      current: None,
      loading: false,
      error: None,
      pagination: PageInfo::default(),
      last_fetched_ms: None,
    }
  }
}

impl<T: ContentRecord> FetchState<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn items(&self) -> &[T] {
    &self.items
  }

  /// The current detail record. May reference an item not present in
  /// `items` (e.g. fetched by key directly).
  pub fn current(&self) -> Option<&T> {
    self.current.as_ref()
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  pub fn pagination(&self) -> PageInfo {
    self.pagination
  }

  pub fn last_fetched_ms(&self) -> Option<i64> {
    self.last_fetched_ms
  }

  /// A fetch is starting.
  pub fn begin_fetch(&mut self) {
    self.loading = true;
    self.error = None;
  }

  /// A list fetch resolved.
  pub fn fetch_succeeded(&mut self, envelope: &ListEnvelope<T>, now_ms: i64) {
    self.items = envelope.data.clone();
    self.pagination = PageInfo::from_envelope(envelope);
    self.last_fetched_ms = Some(now_ms);
    self.loading = false;
    self.error = None;
  }

  /// A detail fetch resolved.
  pub fn detail_succeeded(&mut self, record: T) {
    self.current = Some(record);
    self.loading = false;
    self.error = None;
  }

  /// A fetch failed. The last-known-good list is preserved.
  pub fn fetch_failed(&mut self, message: impl Into<String>) {
    self.loading = false;
    self.error = Some(message.into());
  }

  /// Replace the current detail record unconditionally.
  pub fn set_current(&mut self, record: Option<T>) {
    self.current = record;
  }

  /// Merge a patch into the record with `id`, wherever it appears:
  /// the current pointer, the list entry, or both.
  pub fn update_local(&mut self, id: &str, patch: &T::Patch) {
    if let Some(current) = &mut self.current {
      if current.id() == id {
        current.apply_patch(patch);
      }
    }
    if let Some(item) = self.items.iter_mut().find(|i| i.id() == id) {
      item.apply_patch(patch);
    }
  }

  /// Drop the record with `id` from the list; clear the current pointer if
  /// it refers to the same record. Removing an absent id is a no-op.
  pub fn remove_local(&mut self, id: &str) {
    self.items.retain(|i| i.id() != id);
    if self.current.as_ref().is_some_and(|c| c.id() == id) {
      self.current = None;
    }
  }

  /// Forget the materialized list and its pagination.
  pub fn reset(&mut self) {
    self.items.clear();
    self.pagination = PageInfo::default();
    self.last_fetched_ms = None;
  }

  /// Populate list state straight from a cached envelope, before any
  /// network round-trip.
  pub fn hydrate(&mut self, envelope: &ListEnvelope<T>, stored_at_ms: i64) {
    self.items = envelope.data.clone();
    self.pagination = PageInfo::from_envelope(envelope);
    self.last_fetched_ms = Some(stored_at_ms);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::types::{BlogPost, BlogPostPatch};

  fn post(id: &str, slug: &str) -> BlogPost {
    BlogPost {
      id: id.to_string(),
      slug: slug.to_string(),
      title: format!("Post {}", id),
      excerpt: String::new(),
      content: String::new(),
      author: "tester".to_string(),
      category: None,
      tags: vec![],
      is_featured: false,
      is_published: true,
      published_at: None,
      updated_at: None,
      metadata: Default::default(),
    }
  }

  fn populated() -> FetchState<BlogPost> {
    let mut state = FetchState::new();
    let envelope = ListEnvelope::single_page(vec![post("1", "one"), post("2", "two")]);
    state.fetch_succeeded(&envelope, 1_000);
    state
  }

  #[test]
  fn test_begin_fetch_sets_loading_and_clears_error() {
    let mut state: FetchState<BlogPost> = FetchState::new();
    state.fetch_failed("boom");
    assert_eq!(state.error(), Some("boom"));

    state.begin_fetch();
    assert!(state.is_loading());
    assert_eq!(state.error(), None);
  }

  #[test]
  fn test_fetch_succeeded_materializes_list() {
    let state = populated();
    assert_eq!(state.items().len(), 2);
    assert_eq!(state.pagination().total, 2);
    assert_eq!(state.last_fetched_ms(), Some(1_000));
    assert!(!state.is_loading());
  }

  #[test]
  fn test_fetch_failed_preserves_last_known_good() {
    let mut state = populated();
    state.begin_fetch();
    state.fetch_failed("connection refused");

    assert_eq!(state.error(), Some("connection refused"));
    assert_eq!(state.items().len(), 2, "items survive a failed refresh");
    assert_eq!(state.pagination().total, 2);
    assert!(!state.is_loading());
  }

  #[test]
  fn test_set_current_is_unconditional() {
    let mut state = populated();
    // Not part of the list - still accepted.
    state.set_current(Some(post("99", "elsewhere")));
    assert_eq!(state.current().unwrap().id, "99");

    state.set_current(None);
    assert!(state.current().is_none());
  }

  #[test]
  fn test_update_local_touches_current_and_list_entry() {
    let mut state = populated();
    state.set_current(Some(post("1", "one")));

    let patch = BlogPostPatch {
      title: Some("Edited".to_string()),
      ..Default::default()
    };
    state.update_local("1", &patch);

    assert_eq!(state.current().unwrap().title, "Edited");
    assert_eq!(state.items()[0].title, "Edited");
    assert_eq!(state.items()[1].title, "Post 2");
  }

  #[test]
  fn test_update_local_with_unknown_id_changes_nothing() {
    let mut state = populated();
    state.update_local(
      "nope",
      &BlogPostPatch {
        title: Some("X".to_string()),
        ..Default::default()
      },
    );
    assert_eq!(state.items()[0].title, "Post 1");
  }

  #[test]
  fn test_remove_local_is_idempotent() {
    let mut state = populated();
    state.set_current(Some(post("1", "one")));

    state.remove_local("1");
    assert_eq!(state.items().len(), 1);
    assert!(state.current().is_none());

    // Second removal of the same id: nothing happens, nothing breaks.
    state.remove_local("1");
    assert_eq!(state.items().len(), 1);
  }

  #[test]
  fn test_remove_local_keeps_unrelated_current() {
    let mut state = populated();
    state.set_current(Some(post("2", "two")));
    state.remove_local("1");
    assert_eq!(state.current().unwrap().id, "2");
  }

  #[test]
  fn test_reset_clears_list_state_only() {
    let mut state = populated();
    state.set_current(Some(post("1", "one")));
    state.reset();

    assert!(state.items().is_empty());
    assert_eq!(state.pagination(), PageInfo::default());
    assert_eq!(state.last_fetched_ms(), None);
    // Detail state is owned by set_current.
    assert!(state.current().is_some());
  }

  #[test]
  fn test_hydrate_populates_without_flags() {
    let mut state: FetchState<BlogPost> = FetchState::new();
    let envelope = ListEnvelope::single_page(vec![post("1", "one")]);
    state.hydrate(&envelope, 42);

    assert_eq!(state.items().len(), 1);
    assert_eq!(state.last_fetched_ms(), Some(42));
    assert!(!state.is_loading());
    assert_eq!(state.error(), None);
  }
}
