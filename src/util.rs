mod date;

pub use date::{format_card_date, format_short_date, parse_date};

pub const USER_AGENT: &str =
  concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
