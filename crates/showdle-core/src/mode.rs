//! Game modes and their fixed slot order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DailyError;

/// One of the daily guessing variants.
///
/// The discriminant is the slot index in the daily score vector and must not
/// be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Classic = 0,
    Quote = 1,
    Image = 2,
}

impl GameMode {
    pub const COUNT: usize = 3;
    pub const ALL: [GameMode; Self::COUNT] = [GameMode::Classic, GameMode::Quote, GameMode::Image];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self, DailyError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(DailyError::InvalidModeIndex {
                index,
                modes: Self::COUNT,
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Quote => "quote",
            GameMode::Image => "image",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    /// Accepts a mode name or its slot index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "quote" => Ok(GameMode::Quote),
            "image" => Ok(GameMode::Image),
            other => other
                .parse::<usize>()
                .map_err(|_| format!("unknown game mode: {s}"))
                .and_then(|i| GameMode::from_index(i).map_err(|e| e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_order_is_classic_quote_image() {
        assert_eq!(GameMode::Classic.index(), 0);
        assert_eq!(GameMode::Quote.index(), 1);
        assert_eq!(GameMode::Image.index(), 2);
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert_eq!(
            GameMode::from_index(3),
            Err(DailyError::InvalidModeIndex { index: 3, modes: 3 })
        );
    }

    #[test]
    fn parses_names_and_indices() {
        assert_eq!("Quote".parse::<GameMode>(), Ok(GameMode::Quote));
        assert_eq!("2".parse::<GameMode>(), Ok(GameMode::Image));
        assert!("7".parse::<GameMode>().is_err());
        assert!("trivia".parse::<GameMode>().is_err());
    }
}
