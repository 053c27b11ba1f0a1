//! Universal social-media downloader
//!
//! The input link is classified by hostname, short TikTok links are expanded
//! by one redirect hop, and each platform's response is read by its own
//! adapter because every upstream route answers in a different shape.

use super::{require, str_at, Services};
use crate::error::{CyberError, CyberResult};
use crate::http::with_query;
use crate::response::DownloadResult;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Upper bound for one downloader request
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosts that only redirect to a full TikTok link
const TIKTOK_SHORT_HOSTS: &[&str] = &["vt.tiktok.com", "vm.tiktok.com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Instagram,
    Facebook,
    Tiktok,
    Youtube,
    Reddit,
    Pinterest,
    Threads,
    Linkedin,
    Twitter,
}

/// Hostname suffixes per platform
const PLATFORM_HOSTS: &[(Platform, &[&str])] = &[
    (Platform::Instagram, &["instagram.com"]),
    (Platform::Facebook, &["facebook.com", "fb.watch"]),
    (Platform::Tiktok, &["tiktok.com"]),
    (Platform::Youtube, &["youtube.com", "youtu.be"]),
    (Platform::Reddit, &["reddit.com", "redd.it"]),
    (Platform::Pinterest, &["pinterest.com", "pin.it"]),
    (Platform::Threads, &["threads.net"]),
    (Platform::Linkedin, &["linkedin.com"]),
    (Platform::Twitter, &["twitter.com", "x.com"]),
];

impl Platform {
    /// Route name on the downloader API
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
            Platform::Reddit => "reddit",
            Platform::Pinterest => "pinterest",
            Platform::Threads => "threads",
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Tiktok => "TikTok",
            Platform::Youtube => "YouTube",
            Platform::Reddit => "Reddit",
            Platform::Pinterest => "Pinterest",
            Platform::Threads => "Threads",
            Platform::Linkedin => "LinkedIn",
            Platform::Twitter => "Twitter",
        }
    }

    /// Match a hostname (exactly or as a subdomain) against the table
    pub fn from_host(host: &str) -> Option<Platform> {
        let host = host.trim_end_matches('.').to_lowercase();
        PLATFORM_HOSTS.iter().find_map(|(platform, domains)| {
            domains
                .iter()
                .any(|d| host == *d || host.ends_with(&format!(".{d}")))
                .then_some(*platform)
        })
    }

    /// Read title and media links out of this platform's response
    pub fn extract(&self, data: &Value) -> CyberResult<(Option<String>, Vec<String>)> {
        let (title, urls) = match self {
            Platform::Instagram => (None, urls_in(data, "/data", "url")),
            Platform::Facebook => (
                text(data, "/data/title"),
                first_of(data, &["/data/hd", "/data/sd"]),
            ),
            Platform::Tiktok => (
                text(data, "/data/title"),
                first_of(data, &["/data/hdplay", "/data/play"]),
            ),
            Platform::Youtube => (text(data, "/data/title"), first_of(data, &["/data/video"])),
            Platform::Reddit => (
                text(data, "/data/title"),
                first_of(data, &["/data/video_url"]),
            ),
            Platform::Pinterest => (text(data, "/data/title"), first_of(data, &["/data/url"])),
            Platform::Threads => (None, urls_in(data, "/data/media", "url")),
            Platform::Linkedin => (None, urls_in(data, "/data/videos", "url")),
            Platform::Twitter => (text(data, "/data/desc"), urls_in(data, "/data/media", "url")),
        };

        if urls.is_empty() {
            return Err(CyberError::shape(format!(
                "{} response did not contain a media link",
                self.label()
            )));
        }
        Ok((title, urls))
    }

    /// Title used when the platform gives none
    pub fn default_title(&self) -> String {
        match self {
            Platform::Instagram => "Instagram media".to_string(),
            Platform::Threads => "Threads post".to_string(),
            Platform::Linkedin => "LinkedIn video".to_string(),
            other => format!("{} media", other.label()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn text(data: &Value, pointer: &str) -> Option<String> {
    str_at(data, pointer).map(str::to_string)
}

/// First non-empty string among several pointers
fn first_of(data: &Value, pointers: &[&str]) -> Vec<String> {
    pointers
        .iter()
        .find_map(|p| str_at(data, p))
        .map(|u| vec![u.to_string()])
        .unwrap_or_default()
}

/// `field` of every object in the array at `pointer`
fn urls_in(data: &Value, pointer: &str, field: &str) -> Vec<String> {
    data.pointer(pointer)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get(field).and_then(Value::as_str))
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a user-supplied link, adding a scheme when missing
pub fn parse_link(input: &str) -> CyberResult<Url> {
    let input = input.trim();
    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };
    Url::parse(&candidate).map_err(|_| CyberError::shape(format!("Invalid URL: {input}")))
}

fn host_of(link: &Url) -> CyberResult<String> {
    link.host_str()
        .map(|h| h.to_lowercase())
        .ok_or_else(|| CyberError::shape(format!("URL has no host: {link}")))
}

impl Services {
    /// Download media from any supported platform link
    pub async fn universal_download(&self, input: &str) -> CyberResult<DownloadResult> {
        let mut link = parse_link(input)?;
        let mut host = host_of(&link)?;

        if TIKTOK_SHORT_HOSTS.contains(&host.as_str()) {
            link = self.expand_short_link(&link).await?;
            host = host_of(&link)?;
        }

        let platform = Platform::from_host(&host)
            .ok_or_else(|| CyberError::shape(format!("Unsupported platform: {host}")))?;
        debug!("Classified {} as {}", host, platform);

        let base = require(&self.endpoints.downloader_url, "Downloader")?;
        let url = with_query(
            &format!("{}/{}", base.trim_end_matches('/'), platform.slug()),
            &[("url", link.as_str())],
        );
        let data = self.fetch.get_json(&url, Some(DOWNLOAD_TIMEOUT)).await?;

        let (title, urls) = platform.extract(&data)?;
        let title = title.unwrap_or_else(|| platform.default_title());
        info!("📥 {} media ready: {} link(s)", platform, urls.len());
        Ok(DownloadResult {
            platform: platform.slug().to_string(),
            title,
            urls,
        })
    }

    /// Follow exactly one redirect hop
    async fn expand_short_link(&self, link: &Url) -> CyberResult<Url> {
        let location = self
            .fetch
            .redirect_location(link.as_str())
            .await?
            .ok_or_else(|| {
                CyberError::shape(format!("Short link did not redirect: {link}"))
            })?;
        let expanded = link
            .join(&location)
            .map_err(|_| CyberError::shape(format!("Invalid redirect target: {location}")))?;
        debug!("Expanded {} -> {}", link, expanded);
        Ok(expanded)
    }
}
