//! YouTube video and song lookup

use super::{require, str_at, Services};
use crate::error::{CyberError, CyberResult};
use crate::http::with_query;
use crate::response::{SongResult, VideoResult, VideoStream};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, warn};

lazy_static! {
    static ref YOUTUBE_URL: Regex = Regex::new(
        r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})|youtu\.be/([a-zA-Z0-9_-]{11})"
    )
    .expect("valid youtube pattern");
    static ref SIZE_SUFFIX: Regex =
        Regex::new(r"\s*\([^)]+\)\.mp4$").expect("valid size suffix pattern");
}

const UNTITLED: &str = "Untitled Video";

/// First hit of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
}

/// Whether the query is a direct YouTube link
pub fn is_video_url(query: &str) -> bool {
    YOUTUBE_URL.is_match(query)
}

/// Pick the stream to play inline: 720p, then 360p, then whatever came first
pub fn select_playback_stream(streams: &[VideoStream]) -> Option<&VideoStream> {
    streams
        .iter()
        .find(|s| s.quality.contains("720p"))
        .or_else(|| streams.iter().find(|s| s.quality.contains("360p")))
        .or_else(|| streams.first())
}

/// Title from a stream label like `My Clip (12.3 MB).mp4`
pub fn derive_title(stream_title: Option<&str>) -> String {
    match stream_title {
        Some(t) => {
            let stripped = SIZE_SUFFIX.replace(t, "");
            let stripped = stripped.trim();
            if stripped.is_empty() {
                UNTITLED.to_string()
            } else {
                stripped.to_string()
            }
        }
        None => UNTITLED.to_string(),
    }
}

impl Services {
    /// Search and return the first item, or `None` when nothing matched
    pub async fn search_first(&self, query: &str) -> CyberResult<Option<SearchHit>> {
        let base = require(&self.endpoints.search_url, "Search")?;
        let url = with_query(base, &[("type", "search"), ("q", query)]);
        let data = self.fetch.get_json(&url, None).await?;

        let first = match data.pointer("/data/items").and_then(Value::as_array) {
            Some(items) => items.first(),
            None => None,
        };
        let Some(first) = first else {
            return Ok(None);
        };

        let url = str_at(first, "/url")
            .ok_or_else(|| CyberError::shape("Search result had no URL"))?;
        Ok(Some(SearchHit {
            url: url.to_string(),
            title: str_at(first, "/title").unwrap_or_default().to_string(),
        }))
    }

    /// Resolve a query or link to a titled list of download streams
    pub async fn search_video(&self, query: &str) -> CyberResult<VideoResult> {
        let (video_url, mut title) = if is_video_url(query) {
            debug!("Direct video link, skipping search");
            (query.trim().to_string(), String::new())
        } else {
            match self.search_first(query).await? {
                Some(hit) => (hit.url, hit.title),
                None => return Err(CyberError::empty("No video found.")),
            }
        };

        let base = require(&self.endpoints.video_download_url, "Video download")?;
        let data = self
            .fetch
            .get_json(&with_query(base, &[("url", video_url.as_str())]), None)
            .await?;

        let entries = data
            .get("response")
            .and_then(Value::as_object)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| CyberError::empty("No downloadable video found."))?;

        if title.is_empty() {
            let first_title = entries.values().next().and_then(|s| str_at(s, "/title"));
            title = derive_title(first_title);
        }

        let streams: Vec<VideoStream> = entries
            .iter()
            .filter_map(|(key, entry)| {
                let Some(raw) = str_at(entry, "/download_url") else {
                    warn!("Stream '{}' has no download_url, skipping", key);
                    return None;
                };
                let Some(download_url) = absolutize(base, raw) else {
                    warn!("Stream '{}' has an unusable download_url: {}", key, raw);
                    return None;
                };
                Some(VideoStream {
                    key: key.clone(),
                    quality: key.clone(),
                    download_url,
                    size: str_at(entry, "/size").unwrap_or("N/A").to_string(),
                })
            })
            .collect();

        if streams.is_empty() {
            return Err(CyberError::empty("No downloadable video found."));
        }

        info!("🎬 Found '{}' with {} streams", title, streams.len());
        Ok(VideoResult { title, streams })
    }

    /// Search for a song and fetch an MP3 link for the first hit
    pub async fn get_song(&self, query: &str) -> CyberResult<SongResult> {
        let hit = self
            .search_first(query)
            .await?
            .ok_or_else(|| CyberError::empty("No songs found for this query."))?;

        let base = require(&self.endpoints.mp3_url, "MP3")?;
        let url = with_query(
            base,
            &[("url", hit.url.as_str()), ("apikey", self.endpoints.mp3_api_key.as_str())],
        );
        let data = self.fetch.get_json(&url, None).await?;

        let ok = data.get("status").and_then(Value::as_bool) == Some(true);
        let download_url = str_at(&data, "/result/url");
        let download_url = match (ok, download_url) {
            (true, Some(u)) => u.to_string(),
            _ => {
                warn!("Audio API response error: {}", data);
                return Err(CyberError::shape("Could not fetch MP3 URL from API."));
            }
        };

        let title = str_at(&data, "/result/title")
            .map(str::to_string)
            .unwrap_or(hit.title);
        Ok(SongResult {
            title,
            download_url,
        })
    }
}

/// Resolve a possibly relative link against the API base
fn absolutize(base: &str, link: &str) -> Option<String> {
    match url::Url::parse(link) {
        Ok(u) => Some(u.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => url::Url::parse(base)
            .ok()?
            .join(link)
            .ok()
            .map(|u| u.to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(quality: &str) -> VideoStream {
        VideoStream {
            key: quality.to_string(),
            quality: quality.to_string(),
            download_url: format!("https://cdn.test/{quality}.mp4"),
            size: "N/A".to_string(),
        }
    }

    #[test]
    fn test_quality_preference() {
        let orders = [
            ["144p", "360p", "720p"],
            ["720p", "144p", "360p"],
            ["360p", "720p", "144p"],
        ];
        for order in orders {
            let streams: Vec<_> = order.iter().map(|q| stream(q)).collect();
            assert_eq!(select_playback_stream(&streams).unwrap().quality, "720p");
        }

        let streams = vec![stream("144p"), stream("360p")];
        assert_eq!(select_playback_stream(&streams).unwrap().quality, "360p");

        let streams = vec![stream("144p")];
        assert_eq!(select_playback_stream(&streams).unwrap().quality, "144p");

        assert!(select_playback_stream(&[]).is_none());
    }

    #[test]
    fn test_quality_preference_is_substring_match() {
        let streams = vec![stream("1080p"), stream("mp4 720p60")];
        assert_eq!(
            select_playback_stream(&streams).unwrap().quality,
            "mp4 720p60"
        );
    }

    #[test]
    fn test_is_video_url() {
        assert!(is_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_video_url("youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_video_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(!is_video_url("rick astley never gonna give you up"));
        assert!(!is_video_url("https://youtu.be/short"));
    }

    #[test]
    fn test_derive_title() {
        assert_eq!(derive_title(Some("Lofi Mix (24.1 MB).mp4")), "Lofi Mix");
        assert_eq!(derive_title(Some("Plain title")), "Plain title");
        assert_eq!(derive_title(Some("(3 MB).mp4")), UNTITLED);
        assert_eq!(derive_title(None), UNTITLED);
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize("https://dl.test/api/download", "/files/a.mp4").as_deref(),
            Some("https://dl.test/files/a.mp4")
        );
        assert_eq!(
            absolutize("https://dl.test/api", "https://cdn.test/x.mp4").as_deref(),
            Some("https://cdn.test/x.mp4")
        );
    }
}
