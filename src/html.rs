use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
  static ref TAG: Regex = Regex::new(r"<[^>]*>").expect("bad tag regex");
  static ref IMG_SRC: Regex =
    Regex::new(r#"<img[^>]+src\s*=\s*(?:"([^">]+)"|'([^'>]+)')"#)
      .expect("bad img regex");
}

/// Remove anything that looks like a tag. This is for display
/// truncation only and is not a sanitizer.
pub fn strip_tags(html: &str) -> String {
  TAG.replace_all(html, "").into_owned()
}

/// Tag-stripped text with HTML entities decoded.
pub fn plain_text(html: &str) -> String {
  let stripped = strip_tags(html);
  htmlescape::decode_html(&stripped).unwrap_or(stripped)
}

/// The `src` of the first `<img>` tag, quoted either way.
pub fn first_image_src(html: &str) -> Option<&str> {
  let caps = IMG_SRC.captures(html)?;
  caps
    .get(1)
    .or_else(|| caps.get(2))
    .map(|m| m.as_str().trim())
    .filter(|s| !s.is_empty())
}
