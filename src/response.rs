//! Normalized handler results
//!
//! Whatever an upstream API returns, a handler hands back exactly one of
//! [`HandlerResult::Success`] or [`HandlerResult::Failure`].

use crate::error::CyberResult;
use crate::state::Theme;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One downloadable/playable variant of a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStream {
    pub key: String,
    pub quality: String,
    pub download_url: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    pub title: String,
    pub streams: Vec<VideoStream>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongResult {
    pub title: String,
    pub download_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Remote URL or `data:` URL
    pub url: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub text: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResult {
    pub platform: String,
    pub title: String,
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeResult {
    pub title: String,
    pub episode: u32,
    pub streams: Vec<VideoStream>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResult {
    pub username: String,
    pub nickname: String,
    pub bio: String,
    pub avatar: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub likes: u64,
    pub videos: u64,
}

/// Capability-specific success payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    Video(VideoResult),
    Song(SongResult),
    Image(ImageResult),
    Images { query: String, urls: Vec<String> },
    Answer { text: String },
    Roast { text: String },
    Quote(QuoteResult),
    Download(DownloadResult),
    Anime(AnimeResult),
    Profile(ProfileResult),
    Suggestion { command: String, suggestion: String },
    Help,
    Welcome,
    Clear,
    Theme { theme: Theme },
    Clock { visible: bool },
    Identity { username: String },
    LoggedIn { username: String },
    LoggedOut,
}

/// Outcome of dispatching one command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HandlerResult {
    Success { payload: Payload },
    Failure { message: String },
}

impl HandlerResult {
    pub fn success(payload: Payload) -> Self {
        HandlerResult::Success { payload }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        HandlerResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, HandlerResult::Success { .. })
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            HandlerResult::Success { payload } => Some(payload),
            HandlerResult::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            HandlerResult::Success { .. } => None,
            HandlerResult::Failure { message } => Some(message),
        }
    }

    /// Collapse a normalizer outcome, logging the failure kind
    pub fn from_outcome(capability: &str, outcome: CyberResult<Payload>) -> Self {
        match outcome {
            Ok(payload) => HandlerResult::success(payload),
            Err(e) => {
                warn!("❌ {} failed ({}): {}", capability, e.kind(), e);
                HandlerResult::failure(e.to_string())
            }
        }
    }
}
