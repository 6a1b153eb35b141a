use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::ClientConfig;
use crate::error::{ConfigError, Result};

const DEFAULT_FEED_BASE: &str = "https://medium.com/feed/";
const DEFAULT_PROXY: &str = "https://api.rss2json.com/v1/api.json";

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct RootConfig {
  pub feed: FeedConfig,
  #[serde(default)]
  pub client: ClientConfig,
  #[serde(default)]
  pub page: PageConfig,
}

impl RootConfig {
  pub fn load_from_file(path: &Path) -> Result<Self> {
    let f = std::fs::File::open(path)?;
    let root_config: RootConfig =
      serde_yaml::from_reader(f).map_err(ConfigError::from)?;
    root_config.feed.validate()?;
    Ok(root_config)
  }
}

/// Where the blog posts come from.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
  /// The feed owner handle, e.g. `@someone` on Medium.
  pub owner: String,
  /// Prefix the owner handle is appended to.
  #[serde(default = "default_feed_base")]
  pub feed_base: String,
  /// The RSS-to-JSON conversion endpoint.
  #[serde(default = "default_proxy")]
  pub proxy: Url,
  /// Optional proxy API key for better rate limits.
  #[serde(default)]
  pub api_key: Option<String>,
  /// Optional number of items to ask the proxy for.
  #[serde(default)]
  pub count: Option<usize>,
}

impl FeedConfig {
  pub fn new(owner: impl Into<String>) -> Self {
    Self {
      owner: owner.into(),
      feed_base: default_feed_base(),
      proxy: default_proxy(),
      api_key: None,
      count: None,
    }
  }

  pub fn feed_url(&self) -> String {
    format!("{}{}", self.feed_base, self.owner)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.owner.trim().is_empty() {
      return Err(ConfigError::Message("feed.owner must not be empty".into()));
    }

    Url::parse(&self.feed_url())?;
    Ok(())
  }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
  pub badge: String,
  pub heading: String,
  pub tagline: String,
  pub link_label: String,
}

impl Default for PageConfig {
  fn default() -> Self {
    Self {
      badge: "BLOG & ARTICLES".into(),
      heading: "Latest Posts".into(),
      tagline: "Security research, CTF writeups, and technical articles \
                about cybersecurity"
        .into(),
      link_label: "Read on Medium".into(),
    }
  }
}

fn default_feed_base() -> String {
  DEFAULT_FEED_BASE.to_owned()
}

fn default_proxy() -> Url {
  Url::parse(DEFAULT_PROXY).expect("default proxy url is valid")
}
