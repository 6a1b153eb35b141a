use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use crate::config::RootConfig;
use crate::feed::{FeedFetcher, FeedStats, Post, load_posts};
use crate::render::{RenderGate, ViewState};
use crate::server::{FeedService, ServerConfig};

#[derive(Parser)]
#[clap(version, about)]
pub struct Cli {
  #[clap(subcommand)]
  subcmd: SubCommand,

  #[clap(long, short, env = "FOLIO_FEED_CONFIG")]
  config: PathBuf,
}

#[derive(Parser)]
enum SubCommand {
  /// Serve the blog section over HTTP
  Serve(ServerConfig),
  /// Fetch the feed once and print the normalized posts as JSON
  Fetch(FetchConfig),
}

#[derive(Parser)]
struct FetchConfig {
  /// Limit the number of posts printed
  #[clap(long, short('n'))]
  limit_posts: Option<usize>,
  /// Whether to compact the JSON output (opposite of pretty-print)
  #[clap(long)]
  compact_output: bool,
}

#[derive(Serialize)]
struct Snapshot<'a> {
  state: &'static str,
  stats: FeedStats,
  posts: Vec<PostSummary<'a>>,
}

#[derive(Serialize)]
struct PostSummary<'a> {
  #[serde(flatten)]
  post: &'a Post,
  display_date: String,
  reading_time: String,
  preview: String,
}

impl<'a> From<&'a Post> for PostSummary<'a> {
  fn from(post: &'a Post) -> Self {
    Self {
      post,
      display_date: post.display_date(),
      reading_time: post.reading_time().to_string(),
      preview: post.preview_text(),
    }
  }
}

impl Cli {
  pub async fn run(self) -> anyhow::Result<()> {
    let config = RootConfig::load_from_file(&self.config).with_context(|| {
      format!("failed to load config from {}", self.config.display())
    })?;

    match self.subcmd {
      SubCommand::Serve(server_config) => {
        let service = FeedService::from_config(&config)?;
        server_config.serve(service).await?;
        Ok(())
      }
      SubCommand::Fetch(fetch_config) => fetch(&config, &fetch_config).await,
    }
  }
}

async fn fetch(
  config: &RootConfig,
  fetch_config: &FetchConfig,
) -> anyhow::Result<()> {
  let client = config.client.build()?;
  let fetcher = FeedFetcher::new(&config.feed, client);

  // unlike the page, surface the cause here
  let posts = load_posts(&fetcher)
    .await
    .with_context(|| format!("failed to load {}", config.feed.feed_url()))?;

  let mut gate = RenderGate::new();
  gate.settle(Ok(posts));
  let state = gate.state();

  let mut posts = state.posts().iter().collect::<Vec<_>>();
  if let Some(limit) = fetch_config.limit_posts {
    posts.truncate(limit);
  }

  let snapshot = Snapshot {
    state: state.name(),
    stats: FeedStats::from_posts(state.posts()),
    posts: posts.into_iter().map(PostSummary::from).collect(),
  };

  let output = if fetch_config.compact_output {
    serde_json::to_string(&snapshot)?
  } else {
    serde_json::to_string_pretty(&snapshot)?
  };
  println!("{output}");

  if matches!(state, ViewState::Empty) {
    eprintln!("feed loaded but has no posts");
  }

  Ok(())
}
