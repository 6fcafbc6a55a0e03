//! Bundled fixture data, the last tier of the fallback chain.
//!
//! The JSON files are embedded at compile time and parsed once on first
//! access. They mirror what the content API serves so fixture-sourced pages
//! render exactly like live ones.

use std::sync::OnceLock;

use crate::fetch::FixtureSet;

use super::types::{BlogPost, Project};

const BLOG_FIXTURES: &str = include_str!("../../fixtures/blogs.json");
const PROJECT_FIXTURES: &str = include_str!("../../fixtures/projects.json");

static BLOGS: OnceLock<Vec<BlogPost>> = OnceLock::new();
static PROJECTS: OnceLock<Vec<Project>> = OnceLock::new();

/// Fixture set for blog posts.
pub fn blogs() -> FixtureSet<BlogPost> {
  let records = BLOGS.get_or_init(|| {
    serde_json::from_str(BLOG_FIXTURES).expect("bundled blog fixtures are valid JSON")
  });
  FixtureSet::new(records.clone())
}

/// Fixture set for projects.
pub fn projects() -> FixtureSet<Project> {
  let records = PROJECTS.get_or_init(|| {
    serde_json::from_str(PROJECT_FIXTURES).expect("bundled project fixtures are valid JSON")
  });
  FixtureSet::new(records.clone())
}
