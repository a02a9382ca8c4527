//! Colour theme names.

use std::fmt;
use std::str::FromStr;

/// Named foreground/background pairing for the prompter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Black on white.
    Light,
    /// White on black.
    #[default]
    Dark,
    /// Warm yellow on charcoal.
    Amber,
    /// Pale green on deep green.
    Mint,
}

impl Theme {
    /// All themes in cycling order.
    pub const ALL: [Theme; 4] = [Theme::Light, Theme::Dark, Theme::Amber, Theme::Mint];

    /// The theme after this one, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Lowercase name as used in config files.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Amber => "amber",
            Theme::Mint => "mint",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised theme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme '{0}' (expected light, dark, amber or mint)")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}
