mod response;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, Result};

pub use self::response::Response;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
  user_agent: Option<String>,
  accept: Option<String>,
  referer: Option<String>,
  /// No timeout is applied unless one is configured.
  #[serde(default)]
  #[serde(deserialize_with = "duration_str::deserialize_option_duration")]
  timeout: Option<Duration>,
}

impl ClientConfig {
  fn to_builder(&self) -> Result<reqwest::ClientBuilder, ConfigError> {
    let mut builder = reqwest::Client::builder();

    if let Some(user_agent) = &self.user_agent {
      builder = builder.user_agent(user_agent);
    } else {
      builder = builder.user_agent(crate::util::USER_AGENT);
    }

    let mut header_map = HeaderMap::new();
    if let Some(accept) = &self.accept {
      let value = HeaderValue::from_str(accept)
        .map_err(|_| ConfigError::BadHeader("Accept"))?;
      header_map.append("Accept", value);
    }

    if let Some(referer) = &self.referer {
      let value = HeaderValue::from_str(referer)
        .map_err(|_| ConfigError::BadHeader("Referer"))?;
      header_map.append("Referer", value);
    }

    if !header_map.is_empty() {
      builder = builder.default_headers(header_map);
    }

    if let Some(timeout) = self.timeout {
      builder = builder.timeout(timeout);
    }

    Ok(builder)
  }

  pub fn build(&self) -> Result<Client> {
    let reqwest_client = self.to_builder()?.build()?;
    Ok(Client::new(reqwest_client))
  }
}

pub struct Client {
  client: reqwest::Client,
}

impl Client {
  fn new(client: reqwest::Client) -> Self {
    Self { client }
  }

  pub async fn get(&self, url: &Url) -> Result<Response> {
    #[cfg(test)]
    if url.scheme() == "fixture" {
      return Ok(Response::from_fixture(url));
    }

    // the query may carry an API key
    debug!("GET {}{}", url.origin().ascii_serialization(), url.path());
    let resp = self
      .client
      .get(url.clone())
      .header("Accept", "application/json")
      .send()
      .await?;
    Response::from_reqwest_resp(resp).await
  }
}
