//! Cover colors offered when binding a new book

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leather color of a book cover
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CoverColor {
    #[default]
    Brown,
    Red,
    Blue,
    Green,
    Black,
}

impl CoverColor {
    /// Every color in the order the library picker shows them
    pub const ALL: [CoverColor; 5] = [
        CoverColor::Brown,
        CoverColor::Red,
        CoverColor::Blue,
        CoverColor::Green,
        CoverColor::Black,
    ];

    /// Identifier used in stored documents
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverColor::Brown => "brown",
            CoverColor::Red => "red",
            CoverColor::Blue => "blue",
            CoverColor::Green => "green",
            CoverColor::Black => "black",
        }
    }

    /// Human readable name shown in the color picker
    pub fn display_name(&self) -> &'static str {
        match self {
            CoverColor::Brown => "Classic",
            CoverColor::Red => "Red",
            CoverColor::Blue => "Blue",
            CoverColor::Green => "Green",
            CoverColor::Black => "Black",
        }
    }

    /// CSS hex value of the cover leather
    pub fn hex(&self) -> &'static str {
        match self {
            CoverColor::Brown => "#5c3a21",
            CoverColor::Red => "#7f1d1d",
            CoverColor::Blue => "#1e3a8a",
            CoverColor::Green => "#14532d",
            CoverColor::Black => "#171717",
        }
    }
}

impl fmt::Display for CoverColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CoverColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoverColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown cover color '{}' (expected one of: brown, red, blue, green, black)",
                    s
                )
            })
    }
}
