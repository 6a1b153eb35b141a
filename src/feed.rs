mod fetcher;
mod post;
mod raw;
mod stats;

use tracing::{debug, error, info};

use crate::error::FetchError;

#[cfg(test)]
pub use fetcher::FeedMeta;
pub use fetcher::{FeedFetcher, FeedPayload};
pub use post::{Post, normalize_items};
#[cfg(test)]
pub use raw::RawItem;
pub use stats::FeedStats;

/// Anything that can produce a converted feed payload.
#[async_trait::async_trait]
pub trait FeedSource {
  async fn fetch(&self) -> Result<FeedPayload, FetchError>;
}

/// Fetch once and normalize. Item-level problems never surface here;
/// only transport and format failures do.
pub async fn load_posts<S>(source: &S) -> Result<Vec<Post>, FetchError>
where
  S: FeedSource + Sync + ?Sized,
{
  let payload = match source.fetch().await {
    Ok(payload) => payload,
    Err(e) => {
      error!("error fetching blog posts: {e}");
      return Err(e);
    }
  };

  let posts = normalize_items(&payload.items);
  debug!("feed link: {:?}", payload.feed.link);
  info!(
    "loaded {} of {} posts from {}",
    posts.len(),
    payload.items.len(),
    payload.feed.title.as_deref().unwrap_or("(untitled feed)")
  );
  Ok(posts)
}
