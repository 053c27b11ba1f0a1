//! Application state owned by the terminal session
//!
//! Handlers only ever see `&AppState`; the session applies changes.

use crate::session::Identity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Terminal accent color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Purple,
    #[default]
    Green,
    Blue,
    Red,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Purple, Theme::Green, Theme::Blue, Theme::Red];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Purple => "purple",
            Theme::Green => "green",
            Theme::Blue => "blue",
            Theme::Red => "red",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Theme::ALL.iter().map(|t| t.name()).collect();
                format!("Unknown theme '{}'. Choose one of: {}", s, names.join(", "))
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub theme: Theme,
    pub clock_visible: bool,
    pub identity: Option<Identity>,
}

impl AppState {
    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.username.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse() {
        assert_eq!("purple".parse::<Theme>(), Ok(Theme::Purple));
        assert_eq!("RED".parse::<Theme>(), Ok(Theme::Red));
        let err = "pink".parse::<Theme>().unwrap_err();
        assert!(err.contains("pink"));
        assert!(err.contains("purple, green, blue, red"));
    }

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.theme, Theme::Green);
        assert!(!state.clock_visible);
        assert!(state.username().is_none());
    }
}
