//! Command parsing and the verb table
//!
//! The table is closed: every verb and alias is known at build time.

/// Handler selected by a verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Help,
    Clear,
    Welcome,
    Whoami,
    Login,
    Logout,
    Theme,
    Clock,
    Video,
    Song,
    Waifu,
    Neko,
    Waiko,
    Pinterest,
    Ask,
    Roast,
    Quote,
    Imagine,
    Download,
    Anime,
    Tiktok,
}

/// Metadata describing one command
#[derive(Debug, Clone)]
pub struct CommandInfo {
    pub verb: Verb,
    /// All spellings that select this verb, primary first
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        verb: Verb::Help,
        aliases: &["help", "?", "commands"],
        usage: "help",
        description: "Displays this list of commands.",
    },
    CommandInfo {
        verb: Verb::Clear,
        aliases: &["clear", "cls"],
        usage: "clear",
        description: "Clears the terminal history.",
    },
    CommandInfo {
        verb: Verb::Welcome,
        aliases: &["welcome"],
        usage: "welcome",
        description: "Shows the welcome message again.",
    },
    CommandInfo {
        verb: Verb::Whoami,
        aliases: &["whoami"],
        usage: "whoami",
        description: "Shows the current username.",
    },
    CommandInfo {
        verb: Verb::Login,
        aliases: &["login"],
        usage: "login <username>",
        description: "Sets the username for this terminal.",
    },
    CommandInfo {
        verb: Verb::Logout,
        aliases: &["logout", "exit"],
        usage: "logout",
        description: "Forgets the current username.",
    },
    CommandInfo {
        verb: Verb::Theme,
        aliases: &["theme"],
        usage: "theme <purple|green|blue|red>",
        description: "Changes the terminal color.",
    },
    CommandInfo {
        verb: Verb::Clock,
        aliases: &["clock"],
        usage: "clock",
        description: "Toggles the clock in the prompt.",
    },
    CommandInfo {
        verb: Verb::Video,
        aliases: &["video", "yt"],
        usage: "video <search|url>",
        description: "Search and download a YouTube video.",
    },
    CommandInfo {
        verb: Verb::Song,
        aliases: &["song", "sing", "play", "mp3"],
        usage: "song <query>",
        description: "Finds a song and returns an MP3 link.",
    },
    CommandInfo {
        verb: Verb::Waifu,
        aliases: &["waifu"],
        usage: "waifu",
        description: "Random waifu image.",
    },
    CommandInfo {
        verb: Verb::Neko,
        aliases: &["neko"],
        usage: "neko",
        description: "Random neko image.",
    },
    CommandInfo {
        verb: Verb::Waiko,
        aliases: &["waiko"],
        usage: "waiko [waifu|neko]",
        description: "Random waifu or neko image.",
    },
    CommandInfo {
        verb: Verb::Pinterest,
        aliases: &["pinterest", "pin"],
        usage: "pinterest <keyword> [amount:1-70]",
        description: "Searches Pinterest images.",
    },
    CommandInfo {
        verb: Verb::Ask,
        aliases: &["ask", "gemini", "ai"],
        usage: "ask <question>",
        description: "Asks the AI a question.",
    },
    CommandInfo {
        verb: Verb::Roast,
        aliases: &["roast", "insult"],
        usage: "roast <name>",
        description: "Generates a roast for someone.",
    },
    CommandInfo {
        verb: Verb::Quote,
        aliases: &["quote"],
        usage: "quote",
        description: "Shows a random quote.",
    },
    CommandInfo {
        verb: Verb::Imagine,
        aliases: &["imagine", "image"],
        usage: "imagine <prompt>",
        description: "Generates an image from a prompt.",
    },
    CommandInfo {
        verb: Verb::Download,
        aliases: &["dl", "download"],
        usage: "dl <url>",
        description: "Downloads media from a social-media link.",
    },
    CommandInfo {
        verb: Verb::Anime,
        aliases: &["anime"],
        usage: "anime <title> [episode=1]",
        description: "Finds streams for an anime episode.",
    },
    CommandInfo {
        verb: Verb::Tiktok,
        aliases: &["tiktok", "stalk"],
        usage: "tiktok <username>",
        description: "Looks up a TikTok profile.",
    },
];

impl Verb {
    /// Case-insensitive lookup over every alias
    pub fn lookup(word: &str) -> Option<Verb> {
        let word = word.to_lowercase();
        COMMANDS
            .iter()
            .find(|info| info.aliases.contains(&word.as_str()))
            .map(|info| info.verb)
    }

    pub fn info(&self) -> &'static CommandInfo {
        COMMANDS
            .iter()
            .find(|info| info.verb == *self)
            .expect("every verb has a table entry")
    }

    pub fn usage(&self) -> &'static str {
        self.info().usage
    }
}

/// Every alias in the table, for fuzzy suggestions
pub fn all_aliases() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().flat_map(|info| info.aliases.iter().copied())
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// First token, case preserved
    pub verb: String,
    pub args: Vec<String>,
}

impl Command {
    /// Split on whitespace; `None` for blank input
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split_whitespace();
        let verb = parts.next()?.to_string();
        let args = parts.map(str::to_string).collect();
        Some(Self { verb, args })
    }

    /// Arguments joined back with single spaces
    pub fn query(&self) -> String {
        self.args.join(" ")
    }

    /// Split off a trailing integer argument (`pinterest cats 12`)
    ///
    /// With a single argument nothing is split off, so `anime 86` searches
    /// for "86". A trailing token that is not an integer stays in the text;
    /// integers too large for `i64` saturate.
    pub fn text_and_trailing_number(&self) -> (String, Option<i64>) {
        if self.args.len() > 1 {
            if let Some(n) = self.args.last().and_then(|last| parse_saturating(last)) {
                let text = self.args[..self.args.len() - 1].join(" ");
                return (text, Some(n));
            }
        }
        (self.query(), None)
    }
}

/// Parse an optionally signed run of digits, clamping to the `i64` range
fn parse_saturating(token: &str) -> Option<i64> {
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match token.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) if negative => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}
