pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("YAML parse error")]
  Yaml(#[from] serde_yaml::Error),

  #[error("Invalid URL {0}")]
  InvalidUrl(#[from] url::ParseError),

  #[error("Invalid header value for {0}")]
  BadHeader(&'static str),

  #[error("{0}")]
  Message(String),
}

/// Why a feed load failed. Both variants collapse into the same
/// user-facing error state; the detail is for logs only.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
  #[error("transport failure: {0}")]
  Transport(String),

  #[error("format failure: {0}")]
  Format(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
  #[error("item #{0} is not a JSON object")]
  NotAnObject(usize),

  #[error("item #{0} has no usable field")]
  Unusable(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("IO error")]
  Io(#[from] std::io::Error),

  #[error("Invalid URL {0}")]
  InvalidUrl(#[from] url::ParseError),

  #[error("Reqwest client error {0:?}")]
  Reqwest(#[from] reqwest::Error),

  #[error("HTTP status error {0} (url: {1})")]
  HttpStatus(reqwest::StatusCode, url::Url),

  #[error("JSON error {0}")]
  Json(#[from] serde_json::Error),

  #[error("Config error {0:?}")]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Fetch(#[from] FetchError),
}

impl From<Error> for FetchError {
  fn from(e: Error) -> Self {
    match e {
      Error::Fetch(e) => e,
      Error::Json(e) => FetchError::Format(e.to_string()),
      other => FetchError::Transport(other.to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn json_errors_become_format_failures() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let fetch_err = FetchError::from(Error::from(json_err));
    assert!(matches!(fetch_err, FetchError::Format(_)));
  }

  #[test]
  fn status_errors_become_transport_failures() {
    let url = url::Url::parse("https://example.com/feed").unwrap();
    let err = Error::HttpStatus(reqwest::StatusCode::BAD_GATEWAY, url);
    assert!(matches!(FetchError::from(err), FetchError::Transport(_)));
  }
}
