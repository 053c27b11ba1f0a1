//! Per-capability normalizers
//!
//! Each capability wraps one (or a primary-plus-fallback pair of) upstream
//! calls and reshapes the JSON into a [`Payload`](crate::response::Payload).

use crate::config::Endpoints;
use crate::core::gemini::TextGenerator;
use crate::error::{CyberError, CyberResult};
use crate::http::HttpFetch;
use serde_json::Value;
use std::sync::Arc;

pub mod anime;
pub mod downloader;
pub mod images;
pub mod text;
pub mod tiktok;
pub mod youtube;

/// Shared handles every normalizer needs
#[derive(Clone)]
pub struct Services {
    pub fetch: Arc<dyn HttpFetch>,
    pub endpoints: Endpoints,
    pub generator: Arc<dyn TextGenerator>,
}

impl Services {
    pub fn new(
        fetch: Arc<dyn HttpFetch>,
        endpoints: Endpoints,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            fetch,
            endpoints,
            generator,
        }
    }
}

/// Return the endpoint or a not-configured error
pub(crate) fn require<'a>(endpoint: &'a str, capability: &'static str) -> CyberResult<&'a str> {
    if endpoint.trim().is_empty() {
        Err(CyberError::NotConfigured(capability))
    } else {
        Ok(endpoint)
    }
}

/// Non-empty string at a JSON pointer
pub(crate) fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Integer at a JSON pointer, accepting numeric strings
pub(crate) fn u64_at(value: &Value, pointer: &str) -> u64 {
    match value.pointer(pointer) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require() {
        assert!(require("", "Anime").is_err());
        assert_eq!(require("http://a", "Anime").unwrap(), "http://a");
    }

    #[test]
    fn test_str_at_skips_blank() {
        let v = json!({ "a": { "b": "  ", "c": " x " } });
        assert_eq!(str_at(&v, "/a/b"), None);
        assert_eq!(str_at(&v, "/a/c"), Some("x"));
        assert_eq!(str_at(&v, "/missing"), None);
    }

    #[test]
    fn test_u64_at_accepts_strings() {
        let v = json!({ "n": 12, "s": "34", "bad": "x" });
        assert_eq!(u64_at(&v, "/n"), 12);
        assert_eq!(u64_at(&v, "/s"), 34);
        assert_eq!(u64_at(&v, "/bad"), 0);
    }
}
