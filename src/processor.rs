//! Command Router
//!
//! Maps a raw input line to one handler through the static verb table and
//! returns a normalized [`HandlerResult`]. Unknown verbs go to the
//! assistant, which always answers.

use crate::commands::{Command, Verb};
use crate::core::assist::Assistant;
use crate::response::{HandlerResult, Payload};
use crate::services::anime::episode_number;
use crate::services::images::{pin_amount, ImageCategory};
use crate::services::Services;
use crate::session::Identity;
use crate::state::{AppState, Theme};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// Channel for "in progress" lines emitted before the final result
pub type Progress = UnboundedSender<String>;

fn notify(progress: Option<&Progress>, message: String) {
    if let Some(tx) = progress {
        // Receiver gone means nobody is rendering; nothing to do
        let _ = tx.send(message);
    }
}

pub struct Processor {
    services: Services,
    assistant: Assistant,
}

impl Processor {
    pub fn new(services: Services) -> Self {
        let assistant = Assistant::new(services.generator.clone());
        Self {
            services,
            assistant,
        }
    }

    /// Dispatch one input line; `None` for blank input
    pub async fn dispatch(
        &self,
        raw: &str,
        state: &AppState,
        progress: Option<&Progress>,
    ) -> Option<HandlerResult> {
        let command = Command::parse(raw)?;
        debug!("Dispatching '{}' with {} args", command.verb, command.args.len());

        let result = match Verb::lookup(&command.verb) {
            Some(verb) => self.run(verb, &command, state, progress).await,
            None => {
                info!("❓ Unrecognized command: {}", command.verb);
                let raw = raw.trim();
                let suggestion = self.assistant.suggest(raw).await;
                HandlerResult::success(Payload::Suggestion {
                    command: raw.to_string(),
                    suggestion,
                })
            }
        };
        Some(result)
    }

    async fn run(
        &self,
        verb: Verb,
        command: &Command,
        state: &AppState,
        progress: Option<&Progress>,
    ) -> HandlerResult {
        let query = command.query();
        let needs_query = matches!(
            verb,
            Verb::Login
                | Verb::Theme
                | Verb::Video
                | Verb::Song
                | Verb::Pinterest
                | Verb::Ask
                | Verb::Roast
                | Verb::Imagine
                | Verb::Download
                | Verb::Anime
                | Verb::Tiktok
        );
        if needs_query && query.is_empty() {
            return HandlerResult::failure(format!("Usage: {}", verb.usage()));
        }

        let services = &self.services;
        match verb {
            Verb::Help => HandlerResult::success(Payload::Help),
            Verb::Clear => HandlerResult::success(Payload::Clear),
            Verb::Welcome => HandlerResult::success(Payload::Welcome),
            Verb::Whoami => match state.username() {
                Some(username) => HandlerResult::success(Payload::Identity {
                    username: username.to_string(),
                }),
                None => HandlerResult::failure("Not logged in."),
            },
            Verb::Login => match Identity::new(&query) {
                Ok(identity) => HandlerResult::success(Payload::LoggedIn {
                    username: identity.username,
                }),
                Err(e) => HandlerResult::failure(e.to_string()),
            },
            Verb::Logout => HandlerResult::success(Payload::LoggedOut),
            Verb::Theme => match query.parse::<Theme>() {
                Ok(theme) => HandlerResult::success(Payload::Theme { theme }),
                Err(msg) => HandlerResult::failure(msg),
            },
            Verb::Clock => HandlerResult::success(Payload::Clock {
                visible: !state.clock_visible,
            }),
            Verb::Video => {
                notify(progress, format!("Searching for video: {query}..."));
                HandlerResult::from_outcome(
                    "video",
                    services.search_video(&query).await.map(Payload::Video),
                )
            }
            Verb::Song => {
                notify(progress, format!("Searching for song: {query}..."));
                HandlerResult::from_outcome(
                    "song",
                    services.get_song(&query).await.map(Payload::Song),
                )
            }
            Verb::Waifu | Verb::Neko | Verb::Waiko => {
                let category = match verb {
                    Verb::Waifu => Some(ImageCategory::Waifu),
                    Verb::Neko => Some(ImageCategory::Neko),
                    _ => match command.args.first() {
                        Some(word) => match ImageCategory::parse(word) {
                            Some(c) => Some(c),
                            None => {
                                return HandlerResult::failure(format!(
                                    "Unknown category '{}'. Usage: {}",
                                    word,
                                    verb.usage()
                                ))
                            }
                        },
                        None => None,
                    },
                };
                notify(progress, "Fetching image...".to_string());
                HandlerResult::from_outcome(
                    "waifu",
                    services.get_waifu_image(category).await.map(Payload::Image),
                )
            }
            Verb::Pinterest => {
                let (keyword, requested) = command.text_and_trailing_number();
                let amount = pin_amount(requested);
                notify(
                    progress,
                    format!("Searching Pinterest for: {keyword} ({amount})..."),
                );
                HandlerResult::from_outcome(
                    "pinterest",
                    services
                        .get_pinterest_images(&keyword, amount)
                        .await
                        .map(|urls| Payload::Images {
                            query: keyword.clone(),
                            urls,
                        }),
                )
            }
            Verb::Ask => {
                notify(progress, "Thinking...".to_string());
                HandlerResult::from_outcome(
                    "ask",
                    services.ask(&query).await.map(|text| Payload::Answer { text }),
                )
            }
            Verb::Roast => {
                notify(progress, format!("Roasting {query}..."));
                HandlerResult::from_outcome(
                    "roast",
                    services.roast(&query).await.map(|text| Payload::Roast { text }),
                )
            }
            Verb::Quote => HandlerResult::from_outcome(
                "quote",
                services.quote().await.map(Payload::Quote),
            ),
            Verb::Imagine => {
                notify(progress, format!("Generating image: {query}..."));
                HandlerResult::from_outcome(
                    "imagine",
                    services.generate_image(&query).await.map(Payload::Image),
                )
            }
            Verb::Download => {
                notify(progress, format!("Fetching media from: {query}..."));
                HandlerResult::from_outcome(
                    "download",
                    services
                        .universal_download(&query)
                        .await
                        .map(Payload::Download),
                )
            }
            Verb::Anime => {
                let (title, requested) = command.text_and_trailing_number();
                let episode = episode_number(requested);
                notify(
                    progress,
                    format!("Searching for {title} episode {episode}..."),
                );
                HandlerResult::from_outcome(
                    "anime",
                    services.get_anime(&title, episode).await.map(Payload::Anime),
                )
            }
            Verb::Tiktok => {
                notify(progress, format!("Looking up @{}...", query.trim_start_matches('@')));
                HandlerResult::from_outcome(
                    "tiktok",
                    services.tiktok_profile(&query).await.map(Payload::Profile),
                )
            }
        }
    }
}
