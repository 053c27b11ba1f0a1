//! Mock HTTP transport for testing
//!
//! Answers by URL prefix and records every request.

use async_trait::async_trait;
use cyberstream::error::{CyberError, CyberResult};
use cyberstream::http::{Fetched, HttpFetch};
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

/// Canned answer for one route
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Bytes(Vec<u8>, Option<String>),
    Redirect(Option<String>),
    Fail(String),
}

/// One recorded request
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct MockHttp {
    routes: Mutex<Vec<(String, Reply)>>,
    pub calls: Mutex<Vec<Call>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reply for every URL starting with `prefix`
    pub fn route(self, prefix: &str, reply: Reply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .push((prefix.to_string(), reply));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests whose URL starts with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.url.starts_with(prefix))
            .count()
    }

    fn answer(
        &self,
        method: &'static str,
        url: &str,
        timeout: Option<Duration>,
    ) -> CyberResult<Reply> {
        self.calls.lock().unwrap().push(Call {
            method,
            url: url.to_string(),
            timeout,
        });
        let routes = self.routes.lock().unwrap();
        // Longest prefix wins so specific routes can shadow general ones
        routes
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, reply)| reply.clone())
            .ok_or_else(|| CyberError::Transport(format!("no mock route for {url}")))
    }
}

#[async_trait]
impl HttpFetch for MockHttp {
    async fn get_json(&self, url: &str, timeout: Option<Duration>) -> CyberResult<Value> {
        match self.answer("GET", url, timeout)? {
            Reply::Json(v) => Ok(v),
            Reply::Fail(msg) => Err(CyberError::Transport(msg)),
            other => Err(CyberError::shape(format!("unexpected reply {other:?}"))),
        }
    }

    async fn get_bytes(&self, url: &str) -> CyberResult<Fetched> {
        match self.answer("GET", url, None)? {
            Reply::Bytes(bytes, content_type) => Ok(Fetched {
                bytes,
                content_type,
            }),
            Reply::Fail(msg) => Err(CyberError::Transport(msg)),
            other => Err(CyberError::shape(format!("unexpected reply {other:?}"))),
        }
    }

    async fn post_json(&self, url: &str, _body: &Value) -> CyberResult<Value> {
        match self.answer("POST", url, None)? {
            Reply::Json(v) => Ok(v),
            Reply::Fail(msg) => Err(CyberError::Transport(msg)),
            other => Err(CyberError::shape(format!("unexpected reply {other:?}"))),
        }
    }

    async fn redirect_location(&self, url: &str) -> CyberResult<Option<String>> {
        match self.answer("HEAD", url, None)? {
            Reply::Redirect(location) => Ok(location),
            Reply::Fail(msg) => Err(CyberError::Transport(msg)),
            other => Err(CyberError::shape(format!("unexpected reply {other:?}"))),
        }
    }
}
