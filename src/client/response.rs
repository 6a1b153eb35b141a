use encoding_rs::{Encoding, UTF_8};
use mime::Mime;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use url::Url;

use crate::error::{Error, Result};

/// A proxy response with its body already decoded.
#[derive(Debug)]
pub struct Response {
  url: Url,
  status: StatusCode,
  text: String,
}

impl Response {
  pub async fn from_reqwest_resp(resp: reqwest::Response) -> Result<Self> {
    let status = resp.status();
    let url = resp.url().clone();
    let encoding = body_encoding(resp.headers());
    let body = resp.bytes().await?;
    let (text, _, _) = encoding.decode(&body);

    Ok(Self {
      url,
      status,
      text: text.into_owned(),
    })
  }

  /// Serves `fixture:///<path>` from the crate's `fixtures/` directory.
  /// A `status` query parameter overrides the 200 status.
  #[cfg(test)]
  pub(super) fn from_fixture(url: &Url) -> Self {
    let path =
      format!("{}/fixtures/{}", env!("CARGO_MANIFEST_DIR"), url.path());
    let status = url
      .query_pairs()
      .find(|(k, _)| k == "status")
      .and_then(|(_, v)| v.parse::<u16>().ok())
      .and_then(|code| StatusCode::from_u16(code).ok())
      .unwrap_or(StatusCode::OK);
    let text = std::fs::read_to_string(&path)
      .unwrap_or_else(|e| panic!("cannot read fixture {path}: {e}"));

    Self {
      url: url.clone(),
      status,
      text,
    }
  }

  pub fn error_for_status(self) -> Result<Self> {
    if !self.status.is_success() {
      return Err(Error::HttpStatus(self.status, self.url));
    }

    Ok(self)
  }

  pub fn status(&self) -> StatusCode {
    self.status
  }

  pub fn text(&self) -> &str {
    &self.text
  }
}

// The proxy should always send UTF-8, but honor a declared charset.
fn body_encoding(headers: &HeaderMap) -> &'static Encoding {
  headers
    .get(CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.parse::<Mime>().ok())
    .and_then(|mime| {
      mime
        .get_param(mime::CHARSET)
        .and_then(|charset| Encoding::for_label(charset.as_str().as_bytes()))
    })
    .unwrap_or(UTF_8)
}
