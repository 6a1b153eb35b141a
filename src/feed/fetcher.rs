use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::client::Client;
use crate::config::FeedConfig;
use crate::error::{FetchError, Result};

use super::FeedSource;

const SUCCESS_STATUS: &str = "ok";

/// A payload from the conversion proxy that reported success. Items are
/// kept untyped until normalization.
#[derive(Debug, Clone, Default)]
pub struct FeedPayload {
  pub feed: FeedMeta,
  pub items: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedMeta {
  pub title: Option<String>,
  pub link: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
  status: Option<Value>,
  message: Option<Value>,
  #[serde(default)]
  feed: Value,
  #[serde(default)]
  items: Value,
}

impl FeedPayload {
  pub fn from_json(body: &str) -> Result<Self, FetchError> {
    let envelope: Envelope = serde_json::from_str(body)
      .map_err(|e| FetchError::Format(format!("bad JSON payload: {e}")))?;

    let status = envelope.status.as_ref().and_then(Value::as_str);
    if status != Some(SUCCESS_STATUS) {
      let message = envelope
        .message
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or("no message");
      return Err(FetchError::Format(format!(
        "unexpected status {status:?} ({message})"
      )));
    }

    let items = match envelope.items {
      Value::Null => Vec::new(),
      Value::Array(items) => items,
      other => {
        return Err(FetchError::Format(format!(
          "items is not an array: {other}"
        )));
      }
    };

    let feed = FeedMeta {
      title: envelope.feed.get("title").and_then(text_field),
      link: envelope.feed.get("link").and_then(text_field),
    };

    Ok(Self { feed, items })
  }
}

fn text_field(value: &Value) -> Option<String> {
  value
    .as_str()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
}

/// Fetches the owner's feed through the conversion proxy.
pub struct FeedFetcher {
  feed_url: String,
  request_url: Url,
  client: Client,
}

impl FeedFetcher {
  pub fn new(config: &FeedConfig, client: Client) -> Self {
    Self {
      feed_url: config.feed_url(),
      request_url: request_url(config),
      client,
    }
  }

  #[cfg(test)]
  pub fn request_url(&self) -> &Url {
    &self.request_url
  }
}

#[async_trait::async_trait]
impl FeedSource for FeedFetcher {
  async fn fetch(&self) -> Result<FeedPayload, FetchError> {
    debug!("fetching feed {} via proxy", self.feed_url);
    let response = self.client.get(&self.request_url).await?;
    debug!("proxy responded with {}", response.status());
    let response = response.error_for_status()?;
    FeedPayload::from_json(response.text())
  }
}

fn request_url(config: &FeedConfig) -> Url {
  let mut url = config.proxy.clone();
  let mut query = url.query().map(|q| format!("{q}&")).unwrap_or_default();

  query.push_str("rss_url=");
  query.push_str(&urlencoding::encode(&config.feed_url()));

  if let Some(api_key) = &config.api_key {
    query.push_str("&api_key=");
    query.push_str(&urlencoding::encode(api_key));
  }

  if let Some(count) = config.count {
    query.push_str(&format!("&count={count}"));
  }

  url.set_query(Some(&query));
  url
}
