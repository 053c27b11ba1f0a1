//! Anime episode lookup

use super::{require, str_at, Services};
use crate::error::{CyberError, CyberResult};
use crate::http::with_query;
use crate::response::{AnimeResult, VideoStream};
use serde_json::Value;
use std::collections::HashSet;
use tracing::info;

/// Episode number from an optional argument; anything below 1 means 1
pub fn episode_number(requested: Option<i64>) -> u32 {
    match requested {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

impl Services {
    pub async fn get_anime(&self, title: &str, episode: u32) -> CyberResult<AnimeResult> {
        let base = require(&self.endpoints.anime_url, "Anime")?.trim_end_matches('/');

        let search = self
            .fetch
            .get_json(&with_query(&format!("{base}/search"), &[("q", title)]), None)
            .await?;
        let hit = search
            .pointer("/results/0")
            .ok_or_else(|| CyberError::empty(format!("No anime found for: {title}")))?;
        let id = match hit.get("id") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(CyberError::shape("Anime search result had no id")),
        };
        let found_title = str_at(hit, "/title").unwrap_or(title).to_string();

        let ep = episode.to_string();
        let url = with_query(
            &format!("{base}/episode"),
            &[("id", id.as_str()), ("ep", ep.as_str())],
        );
        let data = self.fetch.get_json(&url, None).await?;

        let streams = parse_sources(&data);
        if streams.is_empty() {
            return Err(CyberError::empty(format!(
                "No streams found for {found_title} episode {episode}."
            )));
        }

        info!("📺 {} episode {}: {} streams", found_title, episode, streams.len());
        Ok(AnimeResult {
            title: found_title,
            episode,
            streams,
        })
    }
}

/// `{sources:[{quality,url}]}` into streams with unique keys
fn parse_sources(data: &Value) -> Vec<VideoStream> {
    let Some(sources) = data.get("sources").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut streams = Vec::new();
    for (i, source) in sources.iter().enumerate() {
        let Some(url) = str_at(source, "/url") else {
            continue;
        };
        let quality = str_at(source, "/quality").unwrap_or("default").to_string();
        let mut key = quality.clone();
        if !seen.insert(key.clone()) {
            key = format!("{quality}-{i}");
            seen.insert(key.clone());
        }
        streams.push(VideoStream {
            key,
            quality,
            download_url: url.to_string(),
            size: "N/A".to_string(),
        });
    }
    streams
}
