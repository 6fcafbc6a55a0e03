use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args as ClapArgs, Parser, Subcommand};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use pressroom::cache::{CacheStorage, NoopStorage, PersistentCache, SqliteStorage};
use pressroom::config::Config;
use pressroom::content::{fixtures, ApiClient, BlogPost, Project};
use pressroom::envelope::ListEnvelope;
use pressroom::fetch::{ContentRecord, DataSource, FixtureSet, RemoteSource};
use pressroom::store::ContentStore;

#[derive(Parser, Debug)]
#[command(name = "pressroom")]
#[command(about = "Content client for the Pressroom site")]
#[command(version)]
struct Cli {
  /// Path to config file (default: $XDG_CONFIG_HOME/pressroom/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Skip the durable cache for this run
  #[arg(long)]
  no_cache: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(ClapArgs, Debug)]
struct ListOpts {
  /// Bypass the cached listing and go to the network first
  #[arg(long)]
  refresh: bool,

  /// Only featured entries
  #[arg(long)]
  featured: bool,

  /// Only entries in this category
  #[arg(long)]
  category: Option<String>,

  /// Call the dedicated remote endpoint directly, without cache or fixtures
  #[arg(long)]
  direct: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List blog posts
  Blogs(ListOpts),
  /// Show one blog post by slug or id
  Blog { key: String },
  /// List projects
  Projects(ListOpts),
  /// Show one project by slug or id
  Project { key: String },
  /// Show what the durable cache currently holds
  Cache,
  /// Drop all cached listings
  ClearCache,
  /// Probe the content API health endpoint
  Health,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pressroom=warn")),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = Config::load(cli.config.as_deref())?;

  match &cli.command {
    Command::Blogs(opts) => {
      run_list(&config, cli.no_cache, fixtures::blogs(), opts, blog_row).await?;
    }
    Command::Blog { key } => {
      let mut store = open_store(&config, cli.no_cache, fixtures::blogs())?;
      let post = store.fetch_by_key(key).await?;
      print_blog(&post);
    }
    Command::Projects(opts) => {
      run_list(&config, cli.no_cache, fixtures::projects(), opts, project_row).await?;
    }
    Command::Project { key } => {
      let mut store = open_store(&config, cli.no_cache, fixtures::projects())?;
      let project = store.fetch_by_key(key).await?;
      print_project(&project);
    }
    Command::Cache => {
      show_cache(&config, cli.no_cache)?;
    }
    Command::ClearCache => {
      open_store(&config, cli.no_cache, fixtures::blogs())?.invalidate();
      open_store(&config, cli.no_cache, fixtures::projects())?.invalidate();
      println!("cache cleared");
    }
    Command::Health => {
      let client = ApiClient::new(&config.api)?;
      let health = client.health().await?;
      println!(
        "status: {} (database: {})",
        health.status,
        health.database.as_deref().unwrap_or("unknown")
      );
      if !health.is_healthy() {
        std::process::exit(1);
      }
    }
  }

  Ok(())
}

fn open_storage(config: &Config, no_cache: bool) -> Result<Arc<dyn CacheStorage>> {
  if no_cache || config.cache.disabled {
    return Ok(Arc::new(NoopStorage));
  }
  let storage = match &config.cache.path {
    Some(path) => SqliteStorage::open_at(path)?,
    None => SqliteStorage::open()?,
  };
  Ok(Arc::new(storage))
}

fn open_store<T: ContentRecord>(
  config: &Config,
  no_cache: bool,
  fixtures: FixtureSet<T>,
) -> Result<ContentStore<T, ApiClient>> {
  let client = ApiClient::new(&config.api)?;
  let cache = PersistentCache::new(open_storage(config, no_cache)?, config.cache.validity());
  Ok(ContentStore::new(client, cache, fixtures))
}

async fn run_list<T: ContentRecord>(
  config: &Config,
  no_cache: bool,
  fixtures: FixtureSet<T>,
  opts: &ListOpts,
  row: fn(&T) -> String,
) -> Result<()> {
  if opts.direct {
    let client = ApiClient::new(&config.api)?;
    let envelope: ListEnvelope<T> = if opts.featured {
      client.list_featured().await?
    } else if let Some(slug) = &opts.category {
      client.list_by_category(slug).await?
    } else {
      client.list_all().await?
    };
    print_listing(&envelope, None, row);
    return Ok(());
  }

  let mut store = open_store(config, no_cache, fixtures)?;
  let outcome = if opts.featured {
    store.fetch_featured(opts.refresh).await
  } else if let Some(slug) = &opts.category {
    store.fetch_by_category(slug).await
  } else {
    store.fetch_list(opts.refresh).await
  };
  print_listing(&outcome.envelope, Some(outcome.source), row);
  Ok(())
}

fn print_listing<T>(envelope: &ListEnvelope<T>, source: Option<DataSource>, row: fn(&T) -> String) {
  for record in &envelope.data {
    println!("{}", row(record));
  }
  let source = source
    .map(|s| s.to_string())
    .unwrap_or_else(|| "network (direct)".to_string());
  println!(
    "-- page {}/{}, showing {} of {}, source: {}",
    envelope.page,
    envelope.total_pages.max(1),
    envelope.len(),
    envelope.total,
    source
  );
}

fn blog_row(post: &BlogPost) -> String {
  format!(
    "{:<28} {:<42} {:<12} {}",
    post.slug,
    post.title,
    post.category.as_deref().unwrap_or("-"),
    if post.is_featured { "featured" } else { "" }
  )
}

fn project_row(project: &Project) -> String {
  format!(
    "{:<24} {:<36} {:<16} {}",
    project.slug,
    project.title,
    project.category.as_deref().unwrap_or("-"),
    if project.featured { "featured" } else { "" }
  )
}

fn print_blog(post: &BlogPost) {
  println!("{}", post.title);
  println!("by {}", post.author);
  if let Some(published) = post.published_at {
    println!("published {}", published.format("%Y-%m-%d"));
  }
  if let Some(category) = &post.category {
    println!("category: {}", category);
  }
  if !post.tags.is_empty() {
    println!("tags: {}", post.tags.join(", "));
  }
  println!();
  println!("{}", post.content);
}

fn print_project(project: &Project) {
  println!("{}", project.title);
  println!("{}", project.summary);
  if !project.tech_stack.is_empty() {
    println!("stack: {}", project.tech_stack.join(", "));
  }
  if let Some(repo) = &project.repo_url {
    println!("repo: {}", repo);
  }
  if let Some(live) = &project.live_url {
    println!("live: {}", live);
  }
  println!();
  println!("{}", project.description);
}

fn show_cache(config: &Config, no_cache: bool) -> Result<()> {
  let mut blogs = open_store(config, no_cache, fixtures::blogs())?;
  if blogs.hydrate_from_cache() {
    println!(
      "blogs: {} cached ({})",
      blogs.state().items().len(),
      fetched_at(blogs.state().last_fetched_ms())
    );
  } else {
    println!("blogs: no fresh cache");
  }

  let mut projects = open_store(config, no_cache, fixtures::projects())?;
  if projects.hydrate_from_cache() {
    println!(
      "projects: {} cached ({})",
      projects.state().items().len(),
      fetched_at(projects.state().last_fetched_ms())
    );
  } else {
    println!("projects: no fresh cache");
  }

  Ok(())
}

fn fetched_at(ms: Option<i64>) -> String {
  ms.and_then(chrono::DateTime::from_timestamp_millis)
    .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    .unwrap_or_else(|| "unknown".to_string())
}
