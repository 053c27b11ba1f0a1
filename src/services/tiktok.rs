//! TikTok profile lookup

use super::{require, str_at, u64_at, Services};
use crate::error::{CyberError, CyberResult};
use crate::http::with_query;
use crate::response::ProfileResult;
use serde_json::Value;

impl Services {
    /// Look up a public TikTok profile
    pub async fn tiktok_profile(&self, username: &str) -> CyberResult<ProfileResult> {
        let username = username.trim().trim_start_matches('@');
        let base = require(&self.endpoints.tiktok_profile_url, "TikTok profile")?;
        let data = self
            .fetch
            .get_json(&with_query(base, &[("unique_id", username)]), None)
            .await?;

        let code = data.get("code").and_then(Value::as_i64).unwrap_or(-1);
        if code != 0 {
            let msg = str_at(&data, "/msg").unwrap_or("profile not found");
            return Err(CyberError::empty(format!("TikTok lookup failed: {msg}")));
        }

        let handle = str_at(&data, "/data/user/uniqueId")
            .ok_or_else(|| CyberError::shape("TikTok response had no user"))?;
        Ok(ProfileResult {
            username: handle.to_string(),
            nickname: str_at(&data, "/data/user/nickname")
                .unwrap_or(handle)
                .to_string(),
            bio: str_at(&data, "/data/user/signature")
                .unwrap_or_default()
                .to_string(),
            avatar: str_at(&data, "/data/user/avatarLarger").map(str::to_string),
            followers: u64_at(&data, "/data/stats/followerCount"),
            following: u64_at(&data, "/data/stats/followingCount"),
            likes: u64_at(&data, "/data/stats/heartCount"),
            videos: u64_at(&data, "/data/stats/videoCount"),
        })
    }
}
