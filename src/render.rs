//! Text rendering for the terminal front end

use crate::commands::COMMANDS;
use crate::response::{HandlerResult, Payload, VideoStream};
use crate::services::youtube::select_playback_stream;
use crate::state::Theme;
use owo_colors::{AnsiColors, OwoColorize};

pub const BANNER: &str = "Initializing CyberStream...";

/// Longest data URL printed in full
const DATA_URL_PREVIEW: usize = 64;

/// Character-by-character reveal of a line
///
/// Yields every prefix of the text, ending with the full text. The sequence
/// is lazy and can be restarted with [`Typewriter::restart`].
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    pos: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
        }
    }

    pub fn restart(&mut self) {
        self.pos = 0;
    }
}

impl Iterator for Typewriter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let next = self.text[self.pos..].chars().next()?;
        self.pos += next.len_utf8();
        Some(self.text[..self.pos].to_string())
    }
}

pub fn accent(theme: Theme) -> AnsiColors {
    match theme {
        Theme::Purple => AnsiColors::Magenta,
        Theme::Green => AnsiColors::Green,
        Theme::Blue => AnsiColors::Cyan,
        Theme::Red => AnsiColors::Red,
    }
}

/// Prompt shown before each input line
pub fn prompt(username: Option<&str>, clock: Option<&str>, theme: Theme) -> String {
    let user = username.unwrap_or("guest");
    let base = match clock {
        Some(time) => format!("[{time}] [{user}@cyberstream]~$ "),
        None => format!("[{user}@cyberstream]~$ "),
    };
    base.color(accent(theme)).to_string()
}

pub fn welcome_lines(theme: Theme) -> Vec<String> {
    vec![
        "Welcome to CyberStream".color(accent(theme)).bold().to_string(),
        "A futuristic hacker-style web bot interface.".to_string(),
        format!("Type {} to see a list of available commands.", "'help'".color(accent(theme))),
    ]
}

pub fn help_lines(theme: Theme) -> Vec<String> {
    let mut lines = vec!["CyberStream Command List".bold().to_string()];
    let width = COMMANDS.iter().map(|c| c.usage.len()).max().unwrap_or(0);
    for info in COMMANDS {
        lines.push(format!(
            "  {} - {}",
            format!("{:width$}", info.usage).color(accent(theme)),
            info.description
        ));
    }
    lines
}

fn shorten(url: &str) -> String {
    if !url.starts_with("data:") {
        return url.to_string();
    }
    match url.char_indices().nth(DATA_URL_PREVIEW) {
        Some((cut, _)) => format!("{}... ({} bytes)", &url[..cut], url.len()),
        None => url.to_string(),
    }
}

fn stream_lines(streams: &[VideoStream], theme: Theme) -> Vec<String> {
    let preferred = select_playback_stream(streams).map(|s| s.key.as_str());
    streams
        .iter()
        .map(|s| {
            let marker = if Some(s.key.as_str()) == preferred { "▶" } else { "-" };
            format!(
                "  {} {} ({}) {}",
                marker,
                s.quality.color(accent(theme)),
                s.size,
                s.download_url
            )
        })
        .collect()
}

/// Render a result as display lines
///
/// `Clear` renders as nothing; the caller clears the screen.
pub fn render(result: &HandlerResult, theme: Theme) -> Vec<String> {
    let payload = match result {
        HandlerResult::Failure { message } => {
            return vec![format!("Error: {message}").red().to_string()]
        }
        HandlerResult::Success { payload } => payload,
    };

    match payload {
        Payload::Video(v) => {
            let mut lines = vec![
                format!("Found video: {}", v.title.bold()),
                "Available downloads:".to_string(),
            ];
            lines.extend(stream_lines(&v.streams, theme));
            lines
        }
        Payload::Song(s) => vec![
            format!("Found song: {}", s.title.bold()),
            format!("  MP3: {}", s.download_url),
        ],
        Payload::Image(img) => {
            let mut lines = Vec::new();
            if let Some(ref c) = img.category {
                lines.push(format!("Category: {c}"));
            }
            lines.push(format!("Image: {}", shorten(&img.url)));
            lines
        }
        Payload::Images { query, urls } => {
            let mut lines = vec![format!("Pinterest results for {}:", query.bold())];
            lines.extend(urls.iter().enumerate().map(|(i, u)| format!("  {}. {}", i + 1, u)));
            lines
        }
        Payload::Answer { text } => vec![text.clone()],
        Payload::Roast { text } => vec![format!("🔥 {text}")],
        Payload::Quote(q) => vec![format!("\"{}\"", q.text), format!("  - {}", q.author)],
        Payload::Download(d) => {
            let mut lines = vec![format!("{} [{}]", d.title.bold(), d.platform)];
            lines.extend(d.urls.iter().map(|u| format!("  - {u}")));
            lines
        }
        Payload::Anime(a) => {
            let mut lines = vec![format!("{} - episode {}", a.title.bold(), a.episode)];
            lines.extend(stream_lines(&a.streams, theme));
            lines
        }
        Payload::Profile(p) => vec![
            format!("@{} ({})", p.username.bold(), p.nickname),
            format!("  Bio: {}", p.bio),
            format!(
                "  Followers: {}  Following: {}  Likes: {}  Videos: {}",
                p.followers, p.following, p.likes, p.videos
            ),
            format!("  Avatar: {}", p.avatar.as_deref().unwrap_or("N/A")),
        ],
        Payload::Suggestion {
            command,
            suggestion,
        } => vec![
            format!("Command not recognized: {}", command.red()),
            format!("Suggestion: {}", suggestion.color(accent(theme))),
        ],
        Payload::Help => help_lines(theme),
        Payload::Welcome => welcome_lines(theme),
        Payload::Clear => Vec::new(),
        Payload::Theme { theme } => vec![format!("Theme set to {}", theme.color(accent(*theme)))],
        Payload::Clock { visible } => vec![if *visible {
            "Clock enabled.".to_string()
        } else {
            "Clock hidden.".to_string()
        }],
        Payload::Identity { username } => vec![username.clone()],
        Payload::LoggedIn { username } => vec![format!("Access granted. Welcome, {username}.")],
        Payload::LoggedOut => vec!["Session ended.".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typewriter_frames() {
        let frames: Vec<String> = Typewriter::new("abc").collect();
        assert_eq!(frames, vec!["a", "ab", "abc"]);
    }

    #[test]
    fn test_typewriter_restart_and_unicode() {
        let mut tw = Typewriter::new("é→");
        assert_eq!(tw.next().as_deref(), Some("é"));
        assert_eq!(tw.next().as_deref(), Some("é→"));
        assert_eq!(tw.next(), None);
        tw.restart();
        assert_eq!(tw.next().as_deref(), Some("é"));
    }

    #[test]
    fn test_failure_is_one_line() {
        let lines = render(&HandlerResult::failure("No video found."), Theme::Green);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Error: No video found."));
    }

    #[test]
    fn test_help_lists_every_command() {
        let lines = help_lines(Theme::Blue);
        assert_eq!(lines.len(), COMMANDS.len() + 1);
    }

    #[test]
    fn test_shorten_data_url() {
        let url = format!("data:image/png;base64,{}", "A".repeat(200));
        assert!(shorten(&url).ends_with(&format!("({} bytes)", url.len())));
        assert_eq!(shorten("https://x"), "https://x");
    }

    #[test]
    fn test_shorten_cuts_on_char_boundary() {
        let url = format!("data:text/plain,{}", "é".repeat(100));
        let short = shorten(&url);
        assert!(short.starts_with("data:text/plain,é"));
        assert!(short.ends_with(&format!("({} bytes)", url.len())));
    }
}
