//! Gemini text generation
//!
//! Backs the `ask` command and the suggestions for unrecognized commands.

use crate::config::Endpoints;
use crate::error::{CyberError, CyberResult};
use crate::http::{with_query, HttpFetch};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Anything that turns a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> CyberResult<String>;
}

/// Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiClient {
    fetch: Arc<dyn HttpFetch>,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(fetch: Arc<dyn HttpFetch>, endpoints: &Endpoints) -> Self {
        Self {
            fetch,
            base_url: endpoints.gemini_url.clone(),
            model: endpoints.gemini_model.clone(),
            api_key: endpoints.gemini_api_key.clone(),
        }
    }

    fn endpoint(&self) -> String {
        with_query(
            &format!(
                "{}/models/{}:generateContent",
                self.base_url.trim_end_matches('/'),
                self.model
            ),
            &[("key", self.api_key.as_str())],
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> CyberResult<String> {
        if self.base_url.is_empty() || self.api_key.is_empty() {
            return Err(CyberError::NotConfigured("Gemini"));
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        let response = self.fetch.post_json(&self.endpoint(), &body).await?;
        let text = extract_text(&response)?;
        debug!("🧠 Gemini answered with {} chars", text.len());
        Ok(text)
    }
}

/// Join the text parts of the first candidate
fn extract_text(response: &Value) -> CyberResult<String> {
    let parts = response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| CyberError::shape("Gemini response had no candidates"))?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim();

    if text.is_empty() {
        return Err(CyberError::empty("Gemini returned an empty answer"));
    }
    Ok(text.to_string())
}

/// Prompt used by the `ask` command
pub fn ask_prompt(question: &str) -> String {
    format!("You are a helpful AI assistant. Answer the user's question.\n\nQuestion: {question}")
}

/// Prompt used for unrecognized commands
pub fn suggestion_prompt(command: &str) -> String {
    format!(
        "The user entered an unrecognized command: \"{command}\". Provide a helpful suggestion or tip to the user. Be brief and to the point."
    )
}
