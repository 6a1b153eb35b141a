use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::html::{first_image_src, plain_text};
use crate::util::{format_card_date, parse_date};

use super::raw::RawItem;

const WORDS_PER_MINUTE: usize = 200;
const PREVIEW_CHARS: usize = 150;
const CARD_CATEGORIES: usize = 3;

/// A normalized blog post. Built once per page load and never mutated.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Post {
  pub title: String,
  pub link: String,
  pub published_at: Option<DateTime<FixedOffset>>,
  pub author: Option<String>,
  pub thumbnail_url: Option<String>,
  pub description_html: String,
  pub categories: Vec<String>,
  /// Never empty.
  pub guid: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ReadingTime(pub usize);

impl fmt::Display for ReadingTime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} min read", self.0)
  }
}

impl ReadingTime {
  pub fn estimate(html: &str) -> Self {
    let words = plain_text(html).split_whitespace().count();
    Self(words.div_ceil(WORDS_PER_MINUTE).max(1))
  }
}

/// Normalize every usable item. Broken items are logged and skipped;
/// the rest are unaffected.
pub fn normalize_items(items: &[Value]) -> Vec<Post> {
  items
    .iter()
    .enumerate()
    .filter_map(|(index, value)| match RawItem::from_value(index, value) {
      Ok(raw) => Some(Post::from_raw(raw)),
      Err(e) => {
        warn!("skipping feed item: {e}");
        None
      }
    })
    .collect()
}

impl Post {
  pub fn from_raw(raw: RawItem) -> Self {
    let guid = derive_guid(&raw);
    let thumbnail_url = derive_thumbnail(&raw);
    let published_at = raw.pub_date.as_deref().and_then(parse_date);

    let RawItem {
      title,
      link,
      author,
      description,
      content,
      categories,
      ..
    } = raw;

    Self {
      title: title.unwrap_or_default(),
      link: link.and_then(web_link).unwrap_or_default(),
      published_at,
      author,
      thumbnail_url,
      description_html: description.or(content).unwrap_or_default(),
      categories: categories.unwrap_or_default(),
      guid,
    }
  }

  pub fn reading_time(&self) -> ReadingTime {
    ReadingTime::estimate(&self.description_html)
  }

  /// The first characters of the description text. The ellipsis is
  /// appended even when nothing was cut.
  pub fn preview_text(&self) -> String {
    let text: String = plain_text(&self.description_html)
      .chars()
      .take(PREVIEW_CHARS)
      .collect();
    format!("{text}...")
  }

  pub fn display_date(&self) -> String {
    format_card_date(self.published_at.as_ref())
  }

  pub fn card_categories(&self) -> &[String] {
    let n = self.categories.len().min(CARD_CATEGORIES);
    &self.categories[..n]
  }

  pub fn has_link(&self) -> bool {
    !self.link.is_empty()
  }
}

fn derive_thumbnail(raw: &RawItem) -> Option<String> {
  if let Some(thumbnail) = &raw.thumbnail {
    return Some(thumbnail.clone());
  }

  [raw.description.as_deref(), raw.content.as_deref()]
    .into_iter()
    .flatten()
    .find_map(first_image_src)
    .map(str::to_owned)
}

// Only absolute http(s) links make a card actionable.
fn web_link(link: String) -> Option<String> {
  match Url::parse(&link) {
    Ok(url) if matches!(url.scheme(), "http" | "https") => Some(link),
    _ => {
      debug!("dropping non-web post link {link:?}");
      None
    }
  }
}

fn derive_guid(raw: &RawItem) -> String {
  if let Some(guid) = raw.guid.as_ref().or(raw.link.as_ref()) {
    return guid.clone();
  }

  let mut hasher = blake3::Hasher::new();
  for part in [&raw.title, &raw.pub_date, &raw.description, &raw.content] {
    hasher.update(part.as_deref().unwrap_or_default().as_bytes());
    hasher.update(b"\0");
  }
  hasher.finalize().to_hex().to_string()
}
