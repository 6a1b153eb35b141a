use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::error::FetchError;
use crate::feed::{FeedMeta, FeedPayload, FeedSource, Post, RawItem};

/// A feed source that answers from memory and counts how often it
/// was asked. Clones share the call counter.
#[derive(Clone)]
pub struct StubSource {
  outcome: Result<Vec<Value>, FetchError>,
  calls: Arc<AtomicUsize>,
}

impl StubSource {
  pub fn ok(items: Value) -> Self {
    let items = match items {
      Value::Array(items) => items,
      other => panic!("stub items must be an array, got {other}"),
    };

    Self {
      outcome: Ok(items),
      calls: Arc::default(),
    }
  }

  pub fn failing(error: FetchError) -> Self {
    Self {
      outcome: Err(error),
      calls: Arc::default(),
    }
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait::async_trait]
impl FeedSource for StubSource {
  async fn fetch(&self) -> Result<FeedPayload, FetchError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let items = self.outcome.clone()?;
    Ok(FeedPayload {
      feed: FeedMeta {
        title: Some("Stub feed".into()),
        link: None,
      },
      items,
    })
  }
}

pub fn post(guid: &str) -> Post {
  Post::from_raw(RawItem {
    title: Some(format!("Post {guid}")),
    link: Some(format!("https://example.com/{guid}")),
    guid: Some(guid.into()),
    ..Default::default()
  })
}
