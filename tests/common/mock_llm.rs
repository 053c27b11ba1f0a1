//! Mock text generator for testing
//!
//! Records every prompt and either answers with fixed text or fails.

use async_trait::async_trait;
use cyberstream::core::gemini::TextGenerator;
use cyberstream::error::{CyberError, CyberResult};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub struct MockLlm {
    pub prompts: Arc<Mutex<Vec<String>>>,
    answer: Option<String>,
}

impl MockLlm {
    pub fn answering(text: &str) -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            answer: Some(text.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            answer: None,
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockLlm {
    async fn generate(&self, prompt: &str) -> CyberResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.answer {
            Some(ref text) => Ok(text.clone()),
            None => Err(CyberError::Transport("Mock LLM failure".to_string())),
        }
    }
}
