//! Image capabilities: waifu/neko pictures, Pinterest search and
//! prompt-based generation

use super::{require, str_at, Services};
use crate::error::{CyberError, CyberResult};
use crate::http::{with_query, with_segment};
use crate::response::ImageResult;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use tracing::{debug, info};

pub const DEFAULT_PIN_AMOUNT: usize = 5;
pub const MAX_PIN_AMOUNT: usize = 70;

/// Waifu API category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCategory {
    Waifu,
    Neko,
}

impl ImageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageCategory::Waifu => "waifu",
            ImageCategory::Neko => "neko",
        }
    }

    pub fn parse(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "waifu" => Some(ImageCategory::Waifu),
            "neko" => Some(ImageCategory::Neko),
            _ => None,
        }
    }

    /// Either category with equal odds
    pub fn random() -> Self {
        if rand::random::<bool>() {
            ImageCategory::Waifu
        } else {
            ImageCategory::Neko
        }
    }
}

/// Effective Pinterest result count: default 5, clamped to [1, 70]
pub fn pin_amount(requested: Option<i64>) -> usize {
    match requested {
        Some(n) if n > 0 => (n as usize).min(MAX_PIN_AMOUNT),
        _ => DEFAULT_PIN_AMOUNT,
    }
}

/// Wrap raw image bytes in a `data:` URL
pub fn to_data_url(bytes: &[u8], content_type: Option<&str>) -> String {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|m| m.starts_with("image/"))
        .unwrap_or("image/jpeg");
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

impl Services {
    /// Fetch a waifu or neko image; `None` picks a category at random
    pub async fn get_waifu_image(
        &self,
        category: Option<ImageCategory>,
    ) -> CyberResult<ImageResult> {
        let category = category.unwrap_or_else(ImageCategory::random);
        let base = require(&self.endpoints.waifu_url, "Waifu")?;
        let data = self
            .fetch
            .get_json(&with_segment(base, category.as_str()), None)
            .await
            .map_err(|e| {
                debug!("Waifu API error: {}", e);
                CyberError::Unavailable("Failed to fetch waifu/neko image.".to_string())
            })?;

        let url = str_at(&data, "/image")
            .ok_or_else(|| CyberError::shape("Failed to fetch waifu/neko image."))?;
        Ok(ImageResult {
            url: url.to_string(),
            category: Some(
                str_at(&data, "/category")
                    .unwrap_or(category.as_str())
                    .to_string(),
            ),
        })
    }

    /// Search Pinterest and keep the first `amount` image URLs
    pub async fn get_pinterest_images(
        &self,
        query: &str,
        amount: usize,
    ) -> CyberResult<Vec<String>> {
        let base = require(&self.endpoints.pinterest_url, "Pinterest")?;
        let data = self
            .fetch
            .get_json(&with_query(base, &[("query", query)]), None)
            .await
            .map_err(|e| {
                debug!("Pinterest API error: {}", e);
                CyberError::Unavailable("Failed to fetch Pinterest images.".to_string())
            })?;

        let urls: Vec<String> = data
            .get("data")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .take(amount)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            return Err(CyberError::empty(format!("No results found for: {query}")));
        }
        info!("📌 {} Pinterest images for '{}'", urls.len(), query);
        Ok(urls)
    }

    /// Generate an image and return it inline as a data URL
    pub async fn generate_image(&self, prompt: &str) -> CyberResult<ImageResult> {
        let base = require(&self.endpoints.imagine_url, "Image generation")?;
        let fetched = self.fetch.get_bytes(&with_segment(base, prompt)).await?;
        if fetched.bytes.is_empty() {
            return Err(CyberError::empty("Image generator returned no data."));
        }
        debug!("🖼️ Generated {} bytes", fetched.bytes.len());
        Ok(ImageResult {
            url: to_data_url(&fetched.bytes, fetched.content_type.as_deref()),
            category: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_amount() {
        assert_eq!(pin_amount(None), 5);
        assert_eq!(pin_amount(Some(0)), 5);
        assert_eq!(pin_amount(Some(-3)), 5);
        assert_eq!(pin_amount(Some(200)), 70);
        assert_eq!(pin_amount(Some(12)), 12);
        assert_eq!(pin_amount(Some(1)), 1);
        assert_eq!(pin_amount(Some(70)), 70);
    }

    #[test]
    fn test_to_data_url() {
        assert_eq!(
            to_data_url(b"abc", Some("image/png; charset=binary")),
            "data:image/png;base64,YWJj"
        );
        assert_eq!(to_data_url(b"abc", None), "data:image/jpeg;base64,YWJj");
        assert_eq!(
            to_data_url(b"abc", Some("application/octet-stream")),
            "data:image/jpeg;base64,YWJj"
        );
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(ImageCategory::parse("NEKO"), Some(ImageCategory::Neko));
        assert_eq!(ImageCategory::parse("cat"), None);
    }
}
