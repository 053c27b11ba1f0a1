//! Text capabilities: questions, roasts and quotes

use super::{require, str_at, Services};
use crate::core::gemini::ask_prompt;
use crate::error::{CyberError, CyberResult};
use crate::http::with_query;
use crate::response::QuoteResult;
use tracing::{info, warn};

impl Services {
    /// Ask the generative backend a question
    pub async fn ask(&self, question: &str) -> CyberResult<String> {
        self.generator.generate(&ask_prompt(question)).await
    }

    /// Roast `name`, falling back to a generic insult service once
    pub async fn roast(&self, name: &str) -> CyberResult<String> {
        match self.roast_primary(name).await {
            Ok(text) => return Ok(text),
            Err(e) => warn!("Primary roast API failed ({}): {}", e.kind(), e),
        }

        info!("Falling back to insult generator for '{}'", name);
        match self.roast_fallback(name).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("Fallback insult API failed ({}): {}", e.kind(), e);
                Err(CyberError::Unavailable(format!(
                    "Could not generate a roast for {name}."
                )))
            }
        }
    }

    async fn roast_primary(&self, name: &str) -> CyberResult<String> {
        let base = require(&self.endpoints.roast_url, "Roast")?;
        let data = self
            .fetch
            .get_json(&with_query(base, &[("name", name)]), None)
            .await?;
        str_at(&data, "/result")
            .map(str::to_string)
            .ok_or_else(|| CyberError::empty("Roast API returned no text"))
    }

    async fn roast_fallback(&self, name: &str) -> CyberResult<String> {
        let url = require(&self.endpoints.insult_fallback_url, "Insult")?;
        let data = self.fetch.get_json(url, None).await?;
        let insult = str_at(&data, "/insult")
            .ok_or_else(|| CyberError::empty("Insult API returned no text"))?;
        Ok(splice_name(name, insult))
    }

    /// Random quote
    pub async fn quote(&self) -> CyberResult<QuoteResult> {
        let url = require(&self.endpoints.quote_url, "Quote")?;
        let data = self.fetch.get_json(url, None).await?;
        let text = str_at(&data, "/0/q")
            .ok_or_else(|| CyberError::shape("Quote API returned no quote"))?;
        Ok(QuoteResult {
            text: text.to_string(),
            author: str_at(&data, "/0/a").unwrap_or("Unknown").to_string(),
        })
    }
}

/// Address a generic insult to `name`
fn splice_name(name: &str, insult: &str) -> String {
    let mut chars = insult.chars();
    let lowered = match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("{name}, {lowered}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_name() {
        assert_eq!(
            splice_name("Bob", "You are as useful as a screen door."),
            "Bob, you are as useful as a screen door."
        );
    }
}
