//! Dialect identification and conversion direction

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Which way a document is being converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    HugoToObsidian,
    ObsidianToHugo,
}

impl Direction {
    /// The dialect the content is converted from.
    pub fn source(self) -> Dialect {
        match self {
            Direction::HugoToObsidian => Dialect::Hugo,
            Direction::ObsidianToHugo => Dialect::Obsidian,
        }
    }

    /// The dialect the content is converted to.
    pub fn target(self) -> Dialect {
        match self {
            Direction::HugoToObsidian => Dialect::Obsidian,
            Direction::ObsidianToHugo => Dialect::Hugo,
        }
    }

    /// The direction converting into `dialect`, if it is a concrete dialect.
    pub fn into_dialect(dialect: Dialect) -> Option<Self> {
        match dialect {
            Dialect::Hugo => Some(Direction::ObsidianToHugo),
            Dialect::Obsidian => Some(Direction::HugoToObsidian),
            Dialect::Unknown => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source(), self.target())
    }
}

/// A markdown dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Hugo,
    Obsidian,
    /// Neither dialect's markup dominates
    Unknown,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Hugo => write!(f, "Hugo"),
            Dialect::Obsidian => write!(f, "Obsidian"),
            Dialect::Unknown => write!(f, "unknown"),
        }
    }
}

static HUGO_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\{\{<\s*mermaid\s*>\}\}",
        r"\{\{<\s*alert\s*>\}\}",
        r#"\{\{<\s*ref\s+""#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid Hugo marker regex"))
    .collect()
});

static OBSIDIAN_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"```mermaid",
        r"(?m)^>\s*\[!\w+\]",
        r"\[\[[^\]]+\]\]",
        r"!\[\[[^\]]+\]\]",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid Obsidian marker regex"))
    .collect()
});

/// Guess which dialect `content` is written in.
///
/// Counts how many distinct dialect-specific constructs appear on each side;
/// a tie (including content with no markup at all) is [`Dialect::Unknown`].
pub fn detect_dialect(content: &str) -> Dialect {
    let hugo = HUGO_MARKERS.iter().filter(|re| re.is_match(content)).count();
    let obsidian = OBSIDIAN_MARKERS
        .iter()
        .filter(|re| re.is_match(content))
        .count();

    match hugo.cmp(&obsidian) {
        std::cmp::Ordering::Greater => Dialect::Hugo,
        std::cmp::Ordering::Less => Dialect::Obsidian,
        std::cmp::Ordering::Equal => Dialect::Unknown,
    }
}
