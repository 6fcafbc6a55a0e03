//! Domain types and their data sources: records, bundled fixtures and the
//! HTTP client for the content API.

pub mod client;
pub mod fixtures;
pub mod types;

pub use client::{ApiClient, HealthStatus};
pub use types::{BlogPost, BlogPostPatch, Project, ProjectPatch};
