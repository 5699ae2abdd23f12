//! The two synchronized trees

use std::fmt;

use mdbridge_convert::Direction;
use serde::{Deserialize, Serialize};

/// One of the two trees being synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Hugo content tree (shortcode dialect)
    Hugo,
    /// Obsidian vault (callout and wikilink dialect)
    Obsidian,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Hugo, Side::Obsidian];

    pub fn opposite(self) -> Side {
        match self {
            Side::Hugo => Side::Obsidian,
            Side::Obsidian => Side::Hugo,
        }
    }

    /// Conversion direction when this side's content is copied to the other.
    pub fn outbound(self) -> Direction {
        match self {
            Side::Hugo => Direction::HugoToObsidian,
            Side::Obsidian => Direction::ObsidianToHugo,
        }
    }

    /// Lowercase key used in state files and action labels.
    pub fn key(self) -> &'static str {
        match self {
            Side::Hugo => "hugo",
            Side::Obsidian => "obsidian",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Hugo => write!(f, "Hugo"),
            Side::Obsidian => write!(f, "Obsidian"),
        }
    }
}
