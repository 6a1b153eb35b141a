use chrono::{DateTime, FixedOffset};
use itertools::Itertools;
use serde::Serialize;

use crate::util::format_short_date;

use super::Post;

/// Aggregate figures shown under the post grid. Cheap enough to be
/// recomputed on every render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedStats {
  pub total_posts: usize,
  pub distinct_categories: usize,
  pub latest: Option<DateTime<FixedOffset>>,
}

impl FeedStats {
  pub fn from_posts(posts: &[Post]) -> Self {
    Self {
      total_posts: posts.len(),
      distinct_categories: posts
        .iter()
        .flat_map(|p| p.categories.iter())
        .unique()
        .count(),
      // newest date rather than the first post, so feed order doesn't matter
      latest: posts.iter().filter_map(|p| p.published_at).max(),
    }
  }

  pub fn latest_display(&self) -> String {
    match &self.latest {
      Some(date) => format_short_date(Some(date)),
      None => "N/A".to_owned(),
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::feed::RawItem;

  use super::*;

  fn post(guid: &str, date: Option<&str>, categories: &[&str]) -> Post {
    Post::from_raw(RawItem {
      guid: Some(guid.into()),
      pub_date: date.map(Into::into),
      categories: Some(categories.iter().map(|c| c.to_string()).collect()),
      ..Default::default()
    })
  }

  #[test]
  fn counts_distinct_categories_and_latest_date() {
    let posts = [
      post("1", Some("2024-01-05"), &["ctf", "web"]),
      post("2", Some("2024-03-02 09:00:00"), &["web", "pwn"]),
      post("3", Some("garbage"), &[]),
    ];

    let stats = FeedStats::from_posts(&posts);
    assert_eq!(stats.total_posts, 3);
    assert_eq!(stats.distinct_categories, 3);
    assert_eq!(stats.latest_display(), "Mar 2");
  }

  #[test]
  fn no_dates_shows_not_available() {
    let stats = FeedStats::from_posts(&[post("1", None, &[])]);
    assert_eq!(stats.latest_display(), "N/A");
    assert_eq!(stats.distinct_categories, 0);
  }
}
