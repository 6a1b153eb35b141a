use std::sync::Arc;

use crate::config::{PageConfig, RootConfig};
use crate::error::{FetchError, Result};
use crate::feed::{FeedFetcher, FeedPayload, FeedSource};

/// Shared state behind every request.
#[derive(Clone)]
pub struct FeedService {
  inner: Arc<Inner>,
}

struct Inner {
  source: Box<dyn FeedSource + Send + Sync>,
  page: PageConfig,
}

impl FeedService {
  pub fn from_config(config: &RootConfig) -> Result<Self> {
    let client = config.client.build()?;
    let fetcher = FeedFetcher::new(&config.feed, client);
    Ok(Self::new(fetcher, config.page.clone()))
  }

  pub fn new(
    source: impl FeedSource + Send + Sync + 'static,
    page: PageConfig,
  ) -> Self {
    Self {
      inner: Arc::new(Inner {
        source: Box::new(source),
        page,
      }),
    }
  }

  pub fn page_config(&self) -> &PageConfig {
    &self.inner.page
  }
}

#[async_trait::async_trait]
impl FeedSource for FeedService {
  async fn fetch(&self) -> Result<FeedPayload, FetchError> {
    self.inner.source.fetch().await
  }
}
