//! Configuration loading and upstream endpoints

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upstream base URLs and keys, one entry per capability
///
/// An empty string means the capability is not configured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Endpoints {
    // Video / audio
    pub search_url: String,
    pub video_download_url: String,
    pub mp3_url: String,
    pub mp3_api_key: String,

    // Images
    pub waifu_url: String,
    pub pinterest_url: String,
    pub imagine_url: String,

    // Text
    pub gemini_url: String,
    pub gemini_model: String,
    pub gemini_api_key: String,
    pub roast_url: String,
    pub insult_fallback_url: String,
    pub quote_url: String,

    // Social
    pub downloader_url: String,
    pub anime_url: String,
    pub tiktok_profile_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search_url: "https://ytbr-azure.vercel.app/api/yt".to_string(),
            video_download_url: "https://dens-yt-dl0-cf47.onrender.com/api/download".to_string(),
            mp3_url: "https://kaiz-apis.gleeze.com/api/ytmp3-v2".to_string(),
            mp3_api_key: String::new(),
            waifu_url: "https://dens-waifu.vercel.app/api".to_string(),
            pinterest_url: "https://www.bhandarimilan.info.np/api/pinterest".to_string(),
            imagine_url: "https://image.pollinations.ai/prompt".to_string(),
            gemini_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            gemini_api_key: String::new(),
            roast_url: String::new(),
            insult_fallback_url: "https://evilinsult.com/generate_insult.php?lang=en&type=json"
                .to_string(),
            quote_url: "https://zenquotes.io/api/random".to_string(),
            downloader_url: String::new(),
            anime_url: String::new(),
            tiktok_profile_url: "https://www.tikwm.com/api/user/info".to_string(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,

    // Meta
    pub log_level: String,
    pub show_banner: bool,
    /// Milliseconds between characters of the startup banner
    pub typing_speed_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            log_level: "INFO".to_string(),
            show_banner: true,
            typing_speed_ms: 50,
        }
    }
}

impl Config {
    /// Load config from the default location, creating it on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!(
                        "⚠️ Config file corrupted or invalid, using defaults: {}",
                        e
                    );
                    let backup_path = path.with_extension("json.corrupt");
                    let _ = std::fs::rename(path, &backup_path);
                    Ok(Self::default())
                }
            }
        } else {
            let config = Self::default();
            if let Err(e) = config.save_to(path) {
                tracing::debug!("Could not write default config to {:?}: {}", path, e);
            }
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cyberstream")
        .join("config.json")
}
