//! Terminal session
//!
//! Owns the application state and the identity store, enforces the
//! one-command-at-a-time rule and the login gate, and applies the state
//! changes that handlers ask for.

use crate::commands::{Command, Verb};
use crate::processor::{Processor, Progress};
use crate::response::{HandlerResult, Payload};
use crate::session::{Identity, SessionStore};
use crate::state::{AppState, Theme};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const BUSY_MESSAGE: &str = "Busy: wait for the current command to finish.";
pub const LOGIN_REQUIRED: &str = "Access denied. Log in first with: login <username>";

/// Turn a line typed at the logged-out prompt into a command
///
/// `login` and `help` pass through as typed; anything else is taken as the
/// username to log in with.
pub fn logged_out_input(line: &str) -> String {
    let line = line.trim();
    let verb = line.split_whitespace().next().and_then(Verb::lookup);
    match verb {
        Some(Verb::Login | Verb::Help) => line.to_string(),
        _ => format!("login {line}"),
    }
}

/// Clears the busy flag when the dispatch finishes, however it finishes
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Terminal {
    processor: Processor,
    store: SessionStore,
    state: RwLock<AppState>,
    busy: AtomicBool,
}

impl Terminal {
    /// Create a session, restoring any stored identity
    pub fn new(processor: Processor, store: SessionStore) -> Self {
        debug!("Session store at {:?}", store.path());
        let identity = store.load();
        if let Some(ref id) = identity {
            info!("👤 Restored session for {}", id.username);
        }
        Self {
            processor,
            store,
            state: RwLock::new(AppState {
                identity,
                ..AppState::default()
            }),
            busy: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub async fn theme(&self) -> Theme {
        self.state.read().await.theme
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.identity.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Submit one input line
    ///
    /// Returns `None` for blank input. A submission made while another is
    /// still running is rejected rather than queued.
    pub async fn submit(&self, raw: &str, progress: Option<&Progress>) -> Option<HandlerResult> {
        let command = Command::parse(raw)?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Rejected '{}' while busy", command.verb);
            return Some(HandlerResult::failure(BUSY_MESSAGE));
        }
        let _guard = BusyGuard(&self.busy);

        let snapshot = self.state().await;
        let verb = Verb::lookup(&command.verb);
        let gate_open =
            snapshot.identity.is_some() || matches!(verb, Some(Verb::Login | Verb::Help));
        if !gate_open {
            return Some(HandlerResult::failure(LOGIN_REQUIRED));
        }
        if verb == Some(Verb::Login) && snapshot.identity.is_some() {
            return Some(HandlerResult::failure("Already logged in. Use 'logout' first."));
        }

        let result = self.processor.dispatch(raw, &snapshot, progress).await?;
        Some(self.apply(result).await)
    }

    /// Apply state-changing payloads; the result is passed through unless
    /// persisting the change failed
    async fn apply(&self, result: HandlerResult) -> HandlerResult {
        let Some(payload) = result.payload() else {
            return result;
        };

        match payload {
            Payload::Theme { theme } => {
                self.state.write().await.theme = *theme;
                info!("🎨 Theme set to {}", theme);
            }
            Payload::Clock { visible } => {
                self.state.write().await.clock_visible = *visible;
            }
            Payload::LoggedIn { username } => {
                let identity = match Identity::new(username) {
                    Ok(identity) => identity,
                    Err(e) => return HandlerResult::failure(e.to_string()),
                };
                if let Err(e) = self.store.save(&identity) {
                    // Still usable for this run, just not remembered
                    warn!("Could not persist session: {}", e);
                }
                info!("👤 Logged in as {}", identity.username);
                self.state.write().await.identity = Some(identity);
            }
            Payload::LoggedOut => {
                if let Err(e) = self.store.clear() {
                    warn!("Could not remove stored session: {}", e);
                }
                info!("👋 Logged out");
                self.state.write().await.identity = None;
            }
            _ => {}
        }
        result
    }
}
