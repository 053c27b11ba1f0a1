#![allow(dead_code)]

pub mod mock_http;
pub mod mock_llm;

use cyberstream::config::Endpoints;
use cyberstream::processor::Processor;
use cyberstream::services::Services;
use cyberstream::session::SessionStore;
use cyberstream::terminal::Terminal;
use mock_http::MockHttp;
use mock_llm::MockLlm;
use std::sync::Arc;
use tempfile::TempDir;

pub const SEARCH: &str = "http://mock/search";
pub const VIDEO_DL: &str = "http://mock/video-dl";
pub const MP3: &str = "http://mock/mp3";
pub const WAIFU: &str = "http://mock/waifu";
pub const PINTEREST: &str = "http://mock/pinterest";
pub const IMAGINE: &str = "http://mock/imagine";
pub const ROAST: &str = "http://mock/roast";
pub const INSULT: &str = "http://mock/insult";
pub const QUOTE: &str = "http://mock/quote";
pub const DOWNLOADER: &str = "http://mock/dl";
pub const ANIME: &str = "http://mock/anime";
pub const TIKTOK: &str = "http://mock/tiktok";

/// Every endpoint pointed at the mock host
pub fn mock_endpoints() -> Endpoints {
    Endpoints {
        search_url: SEARCH.to_string(),
        video_download_url: VIDEO_DL.to_string(),
        mp3_url: MP3.to_string(),
        mp3_api_key: "test-key".to_string(),
        waifu_url: WAIFU.to_string(),
        pinterest_url: PINTEREST.to_string(),
        imagine_url: IMAGINE.to_string(),
        gemini_url: "http://mock/gemini".to_string(),
        gemini_model: "test-model".to_string(),
        gemini_api_key: "gemini-key".to_string(),
        roast_url: ROAST.to_string(),
        insult_fallback_url: INSULT.to_string(),
        quote_url: QUOTE.to_string(),
        downloader_url: DOWNLOADER.to_string(),
        anime_url: ANIME.to_string(),
        tiktok_profile_url: TIKTOK.to_string(),
    }
}

pub struct TestContext {
    pub http: Arc<MockHttp>,
    pub llm: Arc<MockLlm>,
    pub processor: Processor,
}

impl TestContext {
    pub fn new(http: MockHttp, llm: MockLlm) -> Self {
        Self::with_endpoints(http, llm, mock_endpoints())
    }

    pub fn with_endpoints(http: MockHttp, llm: MockLlm, endpoints: Endpoints) -> Self {
        let http = Arc::new(http);
        let llm = Arc::new(llm);
        let services = Services::new(http.clone(), endpoints, llm.clone());
        Self {
            http,
            llm,
            processor: Processor::new(services),
        }
    }
}

/// A terminal whose identity store lives in a temp dir
pub struct TerminalContext {
    pub temp_dir: TempDir,
    pub http: Arc<MockHttp>,
    pub terminal: Terminal,
}

impl TerminalContext {
    pub fn new(http: MockHttp) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = SessionStore::new(temp_dir.path().join("session.json"));
        let ctx = TestContext::new(http, MockLlm::answering("Try 'help'."));
        Self {
            temp_dir,
            http: ctx.http,
            terminal: Terminal::new(ctx.processor, store),
        }
    }

    pub fn store(&self) -> SessionStore {
        SessionStore::new(self.temp_dir.path().join("session.json"))
    }
}
