use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ItemError;

/// A feed item as served by the conversion proxy. Nothing about its
/// shape is guaranteed, so every field is optional and extracted
/// leniently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
  pub title: Option<String>,
  pub pub_date: Option<String>,
  pub link: Option<String>,
  pub guid: Option<String>,
  pub author: Option<String>,
  pub thumbnail: Option<String>,
  pub description: Option<String>,
  pub content: Option<String>,
  pub categories: Option<Vec<String>>,
}

impl RawItem {
  pub fn from_value(index: usize, value: &Value) -> Result<Self, ItemError> {
    let Value::Object(obj) = value else {
      return Err(ItemError::NotAnObject(index));
    };

    let item = RawItem {
      title: scalar_field(obj, "title"),
      pub_date: scalar_field(obj, "pubDate"),
      link: scalar_field(obj, "link"),
      guid: scalar_field(obj, "guid"),
      author: scalar_field(obj, "author"),
      thumbnail: scalar_field(obj, "thumbnail"),
      description: scalar_field(obj, "description"),
      content: scalar_field(obj, "content"),
      categories: categories_field(obj),
    };

    if item.is_blank() {
      return Err(ItemError::Unusable(index));
    }

    Ok(item)
  }

  fn is_blank(&self) -> bool {
    [
      &self.title,
      &self.pub_date,
      &self.link,
      &self.guid,
      &self.author,
      &self.thumbnail,
      &self.description,
      &self.content,
    ]
    .iter()
    .all(|f| f.is_none())
      && self.categories.as_ref().is_none_or(|c| c.is_empty())
  }
}

fn scalar_field(obj: &Map<String, Value>, name: &str) -> Option<String> {
  let value = obj.get(name)?;
  let text = match value {
    Value::String(s) => s.trim().to_owned(),
    Value::Number(n) => n.to_string(),
    Value::Bool(b) => b.to_string(),
    Value::Null => return None,
    other => {
      debug!("ignoring non-scalar field {name}: {other}");
      return None;
    }
  };

  (!text.is_empty()).then_some(text)
}

fn categories_field(obj: &Map<String, Value>) -> Option<Vec<String>> {
  match obj.get("categories")? {
    Value::Array(values) => Some(
      values
        .iter()
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect(),
    ),
    Value::String(s) if !s.trim().is_empty() => Some(vec![s.trim().to_owned()]),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn extracts_known_fields() {
    let raw = RawItem::from_value(
      0,
      &json!({
        "title": "  Hello  ",
        "pubDate": "2024-01-01 10:00:00",
        "link": "https://medium.com/p/1",
        "guid": "https://medium.com/p/1",
        "author": "rbn0x00",
        "thumbnail": "",
        "description": "<p>body</p>",
        "content": "<p>body</p>",
        "categories": ["ctf", "web"],
        "enclosure": {}
      }),
    )
    .unwrap();

    assert_eq!(raw.title.as_deref(), Some("Hello"));
    assert_eq!(raw.thumbnail, None);
    assert_eq!(raw.categories, Some(vec!["ctf".into(), "web".into()]));
  }

  #[test]
  fn wrong_types_degrade_per_field() {
    let raw = RawItem::from_value(
      3,
      &json!({
        "title": 1337,
        "link": ["not", "a", "string"],
        "guid": null,
        "categories": "single"
      }),
    )
    .unwrap();

    assert_eq!(raw.title.as_deref(), Some("1337"));
    assert_eq!(raw.link, None);
    assert_eq!(raw.guid, None);
    assert_eq!(raw.categories, Some(vec!["single".into()]));
  }

  #[test]
  fn unusable_items_are_errors() {
    assert!(matches!(
      RawItem::from_value(1, &json!("string item")),
      Err(ItemError::NotAnObject(1))
    ));
    assert!(matches!(
      RawItem::from_value(2, &json!({"title": "", "categories": []})),
      Err(ItemError::Unusable(2))
    ));
  }
}
