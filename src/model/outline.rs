//! Outline types: heading candidates, levels and the persisted outline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Title used when no title candidate is found.
pub const UNTITLED: &str = "Untitled Document";

/// Heading level assigned from the document's font-size ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// All levels, largest font first.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Level for a zero-based size rank (0 = largest distinct size).
    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    /// Numeric depth (1-3).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Tag as written to outline JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeadingLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "H1" => Ok(HeadingLevel::H1),
            "H2" => Ok(HeadingLevel::H2),
            "H3" => Ok(HeadingLevel::H3),
            other => Err(Error::UnknownHeadingLevel(other.to_string())),
        }
    }
}

/// A span provisionally identified as a heading.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Cleaned text
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Font flag bits of the originating span
    pub font_flags: u32,
    /// Page number (1-indexed)
    pub page: u32,
    /// Scan-order index of the originating span
    pub original_order: usize,
    /// Level, assigned after the document-wide size ranking
    pub level: Option<HeadingLevel>,
}

impl HeadingCandidate {
    /// Key used for deduplication: whitespace collapsed, lowercased.
    pub fn dedup_key(&self) -> String {
        let mut key = String::with_capacity(self.text.len());
        let mut in_space = false;
        for c in self.text.chars() {
            if c.is_whitespace() {
                if !in_space {
                    key.push(' ');
                }
                in_space = true;
            } else {
                key.push(c);
                in_space = false;
            }
        }
        key.to_lowercase()
    }

    /// Convert a leveled candidate into an outline entry.
    pub fn to_entry(&self) -> Option<OutlineEntry> {
        self.level.map(|level| OutlineEntry {
            level,
            text: self.text.clone(),
            page: self.page,
        })
    }
}

/// One heading as persisted in outline JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// A document's title and ordered headings.
///
/// Headings are kept in reading order: page ascending, then scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title
    pub title: String,

    /// Headings in reading order
    #[serde(rename = "outline", default)]
    pub headings: Vec<OutlineEntry>,
}

impl Outline {
    /// Create an outline.
    pub fn new(title: impl Into<String>, headings: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            headings,
        }
    }

    /// The outline returned when nothing could be extracted.
    pub fn untitled() -> Self {
        Self::new(UNTITLED, Vec::new())
    }

    /// Whether the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    /// Parse an outline from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Outline {
    fn default() -> Self {
        Self::untitled()
    }
}
