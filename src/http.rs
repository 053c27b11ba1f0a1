//! Outbound HTTP
//!
//! Every normalizer reaches upstream through [`HttpFetch`] so the transport
//! can be swapped for a recording mock in tests.

use crate::error::{CyberError, CyberResult};
use async_trait::async_trait;
use reqwest::{redirect, Client};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Raw bytes plus the content type the server reported
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// GET a JSON document, optionally bounded by a timeout
    async fn get_json(&self, url: &str, timeout: Option<Duration>) -> CyberResult<Value>;

    /// GET a binary body
    async fn get_bytes(&self, url: &str) -> CyberResult<Fetched>;

    /// POST a JSON body and decode a JSON response
    async fn post_json(&self, url: &str, body: &Value) -> CyberResult<Value>;

    /// Issue one request without following redirects and return the
    /// `Location` header, if any
    async fn redirect_location(&self, url: &str) -> CyberResult<Option<String>>;
}

/// Append `key=value` pairs to a base URL, percent-encoding the values
pub fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    let mut url = base.to_string();
    let mut sep = if base.contains('?') { '&' } else { '?' };
    for (key, value) in params {
        url.push(sep);
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
        sep = '&';
    }
    url
}

/// Join a base URL and one percent-encoded path segment
pub fn with_segment(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(segment)
    )
}

/// `reqwest`-backed implementation used by the real application
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    no_redirect: Client,
}

impl ReqwestFetcher {
    pub fn new() -> CyberResult<Self> {
        let user_agent = concat!("cyberstream/", env!("CARGO_PKG_VERSION"));
        let client = Client::builder().user_agent(user_agent).build()?;
        let no_redirect = Client::builder()
            .user_agent(user_agent)
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            no_redirect,
        })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get_json(&self, url: &str, timeout: Option<Duration>) -> CyberResult<Value> {
        debug!("GET {}", url);
        let mut request = self.client.get(url);
        if let Some(limit) = timeout {
            request = request.timeout(limit);
        }
        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| CyberError::shape(format!("Upstream did not return JSON: {e}")))
    }

    async fn get_bytes(&self, url: &str) -> CyberResult<Fetched> {
        debug!("GET (binary) {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        Ok(Fetched {
            bytes,
            content_type,
        })
    }

    async fn post_json(&self, url: &str, body: &Value) -> CyberResult<Value> {
        debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(CyberError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        serde_json::from_str(&text)
            .map_err(|e| CyberError::shape(format!("Upstream did not return JSON: {e}")))
    }

    async fn redirect_location(&self, url: &str) -> CyberResult<Option<String>> {
        debug!("Resolving redirect for {}", url);
        let response = self.no_redirect.get(url).send().await?;
        if !response.status().is_redirection() {
            return Ok(None);
        }
        Ok(response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_encodes_values() {
        let url = with_query("https://api.test/search", &[("q", "lofi beats & chill")]);
        assert_eq!(url, "https://api.test/search?q=lofi%20beats%20%26%20chill");
    }

    #[test]
    fn test_with_query_extends_existing_query() {
        let url = with_query("https://api.test/yt?type=search", &[("q", "a"), ("n", "2")]);
        assert_eq!(url, "https://api.test/yt?type=search&q=a&n=2");
    }

    #[test]
    fn test_with_segment_trims_slash() {
        assert_eq!(
            with_segment("https://img.test/prompt/", "neon city"),
            "https://img.test/prompt/neon%20city"
        );
    }
}
