//! Suggestions for unrecognized commands
//!
//! Always produces a string: the generative backend first, then a fuzzy
//! match against the verb table, then a fixed apology.

use crate::commands::all_aliases;
use crate::core::gemini::{suggestion_prompt, TextGenerator};
use crate::utils::find_best_match;
use std::sync::Arc;
use tracing::{debug, warn};

pub const APOLOGY: &str =
    "Sorry, I couldn't come up with a suggestion. Type 'help' to see available commands.";

/// Minimum similarity for a "did you mean" hint
const FUZZY_CUTOFF: f64 = 0.6;

#[derive(Clone)]
pub struct Assistant {
    generator: Arc<dyn TextGenerator>,
}

impl Assistant {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Produce a suggestion for `command`; never fails
    pub async fn suggest(&self, command: &str) -> String {
        match self.generator.generate(&suggestion_prompt(command)).await {
            Ok(text) if !text.trim().is_empty() => return text.trim().to_string(),
            Ok(_) => warn!("Suggestion backend returned nothing for '{}'", command),
            Err(e) => warn!("Suggestion backend failed ({}): {}", e.kind(), e),
        }
        offline_suggestion(command)
    }
}

/// Suggestion built without the backend
pub fn offline_suggestion(command: &str) -> String {
    let verb = command.split_whitespace().next().unwrap_or_default();
    match find_best_match(verb, all_aliases(), FUZZY_CUTOFF) {
        Some(best) => {
            debug!("Fuzzy suggestion '{}' ({:.2})", best.value, best.score);
            format!(
                "Did you mean '{}'? Type 'help' for the command list.",
                best.value
            )
        }
        None => APOLOGY.to_string(),
    }
}
