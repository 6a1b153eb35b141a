use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

const COMMON_DATE_FORMATS: &[&str] = &[
  "%Y-%m-%d %H:%M:%S",    // rss2json's pubDate format
  "%Y-%m-%d %H:%M:%S %z", // Common format with timezone
];

pub const INVALID_DATE: &str = "Invalid Date";

pub fn parse_date(date_str: impl AsRef<str>) -> Option<DateTime<FixedOffset>> {
  let date_str = date_str.as_ref().trim();
  if date_str.is_empty() {
    return None;
  }

  if let Ok(parsed) = DateTime::parse_from_rfc3339(date_str) {
    return Some(parsed);
  }

  if let Ok(parsed) = DateTime::parse_from_rfc2822(date_str) {
    return Some(parsed);
  }

  for fmt in COMMON_DATE_FORMATS {
    if let Ok(parsed) = DateTime::parse_from_str(date_str, fmt) {
      return Some(parsed);
    }

    // naive timestamps are taken as UTC
    if let Ok(parsed) = NaiveDateTime::parse_from_str(date_str, fmt) {
      return Some(parsed.and_utc().fixed_offset());
    }
  }

  NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|dt| dt.and_utc().fixed_offset())
}

/// `Jan 1, 2024`
pub fn format_card_date(date: Option<&DateTime<FixedOffset>>) -> String {
  date
    .map(|d| d.format("%b %-d, %Y").to_string())
    .unwrap_or_else(|| INVALID_DATE.to_owned())
}

/// `Jan 1`
pub fn format_short_date(date: Option<&DateTime<FixedOffset>>) -> String {
  date
    .map(|d| d.format("%b %-d").to_string())
    .unwrap_or_else(|| INVALID_DATE.to_owned())
}
