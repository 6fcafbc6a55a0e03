//! Content record schemas.
//!
//! Records are closed: every field is named, and the only open-ended part
//! is an explicit string-to-string `metadata` map. Wire format is the
//! API's camelCase JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fetch::ContentRecord;

/// A blog post as served by the content API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
  pub id: String,
  pub slug: String,
  pub title: String,
  pub excerpt: String,
  pub content: String,
  pub author: String,
  pub category: Option<String>,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub is_featured: bool,
  #[serde(default)]
  pub is_published: bool,
  pub published_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub metadata: BTreeMap<String, String>,
}

/// Partial update for a blog post. `None` fields are left untouched;
/// `metadata` keys are merged over the existing map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostPatch {
  pub title: Option<String>,
  pub excerpt: Option<String>,
  pub content: Option<String>,
  pub author: Option<String>,
  pub category: Option<String>,
  pub tags: Option<Vec<String>>,
  pub is_featured: Option<bool>,
  pub is_published: Option<bool>,
  pub metadata: Option<BTreeMap<String, String>>,
}

impl ContentRecord for BlogPost {
  type Patch = BlogPostPatch;

  fn id(&self) -> &str {
    &self.id
  }

  fn key(&self) -> &str {
    &self.slug
  }

  fn entity_type() -> &'static str {
    "blogs"
  }

  fn is_published(&self) -> bool {
    self.is_published
  }

  fn is_featured(&self) -> bool {
    self.is_featured
  }

  fn category(&self) -> Option<&str> {
    self.category.as_deref()
  }

  fn apply_patch(&mut self, patch: &BlogPostPatch) {
    if let Some(title) = &patch.title {
      self.title = title.clone();
    }
    if let Some(excerpt) = &patch.excerpt {
      self.excerpt = excerpt.clone();
    }
    if let Some(content) = &patch.content {
      self.content = content.clone();
    }
    if let Some(author) = &patch.author {
      self.author = author.clone();
    }
    if let Some(category) = &patch.category {
      self.category = Some(category.clone());
    }
    if let Some(tags) = &patch.tags {
      self.tags = tags.clone();
    }
    if let Some(featured) = patch.is_featured {
      self.is_featured = featured;
    }
    if let Some(published) = patch.is_published {
      self.is_published = published;
    }
    if let Some(metadata) = &patch.metadata {
      self
        .metadata
        .extend(metadata.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
  }
}

/// A portfolio project as served by the content API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub id: String,
  pub slug: String,
  pub title: String,
  pub summary: String,
  pub description: String,
  pub category: Option<String>,
  #[serde(default)]
  pub tech_stack: Vec<String>,
  #[serde(default)]
  pub featured: bool,
  #[serde(default)]
  pub published: bool,
  pub repo_url: Option<String>,
  pub live_url: Option<String>,
  pub completed_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub metadata: BTreeMap<String, String>,
}

/// Partial update for a project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
  pub title: Option<String>,
  pub summary: Option<String>,
  pub description: Option<String>,
  pub category: Option<String>,
  pub tech_stack: Option<Vec<String>>,
  pub featured: Option<bool>,
  pub published: Option<bool>,
  pub repo_url: Option<String>,
  pub live_url: Option<String>,
  pub metadata: Option<BTreeMap<String, String>>,
}

impl ContentRecord for Project {
  type Patch = ProjectPatch;

  fn id(&self) -> &str {
    &self.id
  }

  fn key(&self) -> &str {
    &self.slug
  }

  fn entity_type() -> &'static str {
    "projects"
  }

  fn is_published(&self) -> bool {
    self.published
  }

  fn is_featured(&self) -> bool {
    self.featured
  }

  fn category(&self) -> Option<&str> {
    self.category.as_deref()
  }

  fn apply_patch(&mut self, patch: &ProjectPatch) {
    if let Some(title) = &patch.title {
      self.title = title.clone();
    }
    if let Some(summary) = &patch.summary {
      self.summary = summary.clone();
    }
    if let Some(description) = &patch.description {
      self.description = description.clone();
    }
    if let Some(category) = &patch.category {
      self.category = Some(category.clone());
    }
    if let Some(tech_stack) = &patch.tech_stack {
      self.tech_stack = tech_stack.clone();
    }
    if let Some(featured) = patch.featured {
      self.featured = featured;
    }
    if let Some(published) = patch.published {
      self.published = published;
    }
    if let Some(repo_url) = &patch.repo_url {
      self.repo_url = Some(repo_url.clone());
    }
    if let Some(live_url) = &patch.live_url {
      self.live_url = Some(live_url.clone());
    }
    if let Some(metadata) = &patch.metadata {
      self
        .metadata
        .extend(metadata.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_post() -> BlogPost {
    BlogPost {
      id: "b-1".to_string(),
      slug: "hello".to_string(),
      title: "Hello".to_string(),
      excerpt: "ex".to_string(),
      content: "body".to_string(),
      author: "a".to_string(),
      category: Some("engineering".to_string()),
      tags: vec!["t".to_string()],
      is_featured: false,
      is_published: true,
      published_at: None,
      updated_at: None,
      metadata: BTreeMap::from([("readingMinutes".to_string(), "4".to_string())]),
    }
  }

  #[test]
  fn test_matches_key_by_slug_and_id() {
    let post = sample_post();
    assert!(post.matches_key("hello"));
    assert!(post.matches_key("b-1"));
    assert!(!post.matches_key("other"));
  }

  #[test]
  fn test_patch_merges_only_populated_fields() {
    let mut post = sample_post();
    post.apply_patch(&BlogPostPatch {
      title: Some("Updated".to_string()),
      is_featured: Some(true),
      ..Default::default()
    });

    assert_eq!(post.title, "Updated");
    assert!(post.is_featured);
    // Untouched fields survive.
    assert_eq!(post.excerpt, "ex");
    assert_eq!(post.category.as_deref(), Some("engineering"));
  }

  #[test]
  fn test_patch_metadata_merges_keys() {
    let mut post = sample_post();
    post.apply_patch(&BlogPostPatch {
      metadata: Some(BTreeMap::from([("hero".to_string(), "true".to_string())])),
      ..Default::default()
    });

    assert_eq!(post.metadata.len(), 2);
    assert_eq!(post.metadata.get("readingMinutes").map(String::as_str), Some("4"));
    assert_eq!(post.metadata.get("hero").map(String::as_str), Some("true"));
  }

  #[test]
  fn test_wire_format_round_trip() {
    let json = r#"{
      "id": "b-9",
      "slug": "wire",
      "title": "Wire",
      "excerpt": "e",
      "content": "c",
      "author": "a",
      "category": null,
      "isFeatured": true,
      "isPublished": true,
      "publishedAt": "2025-05-01T10:00:00Z",
      "updatedAt": null
    }"#;
    let post: BlogPost = serde_json::from_str(json).unwrap();
    assert!(post.is_featured);
    assert!(post.tags.is_empty());
    assert!(post.metadata.is_empty());

    let back = serde_json::to_value(&post).unwrap();
    assert_eq!(back.get("isPublished").unwrap(), &serde_json::Value::Bool(true));
  }

  #[test]
  fn test_project_patch() {
    let mut project = Project {
      id: "p-1".to_string(),
      slug: "proj".to_string(),
      title: "Proj".to_string(),
      summary: "s".to_string(),
      description: "d".to_string(),
      category: None,
      tech_stack: vec![],
      featured: false,
      published: true,
      repo_url: None,
      live_url: None,
      completed_at: None,
      metadata: BTreeMap::new(),
    };

    project.apply_patch(&ProjectPatch {
      featured: Some(true),
      live_url: Some("https://example.com".to_string()),
      ..Default::default()
    });

    assert!(project.featured);
    assert_eq!(project.live_url.as_deref(), Some("https://example.com"));
    assert_eq!(project.title, "Proj");
  }
}
