use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Word mapping that keeps the order words were first seen in.
pub type WordMap = IndexMap<String, WordEntry>;

/// A vocabulary word with the sentence it was found in.
///
/// Field order matches the CSV row layout `word,translation,sentence`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub translation: String,
    pub sentence: String,
}

impl WordEntry {
    /// Fresh entry from the extractor, no translation yet
    pub fn new(word: impl Into<String>, sentence: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: String::new(),
            sentence: sentence.into(),
        }
    }

    pub fn is_translated(&self) -> bool {
        !self.translation.is_empty()
    }
}

/// User verdict for a single presented word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Known,
    Unknown,
    Interrupt,
}

/// Inclusive range of 1-based page numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Result<Self, PageRangeError> {
        if start == 0 || end < start {
            return Err(PageRangeError(format!("{start}-{end}")));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, page: u32) -> bool {
        (self.start..=self.end).contains(&page)
    }
}

/// An empty filter selects every page.
pub fn page_selected(ranges: &[PageRange], page: u32) -> bool {
    ranges.is_empty() || ranges.iter().any(|r| r.contains(page))
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid page range: {0}")]
pub struct PageRangeError(pub String);

impl FromStr for PageRange {
    type Err = PageRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|_| PageRangeError(s.to_string()))
        };

        match s.split_once('-') {
            Some((start, end)) => Self::new(parse(start)?, parse(end)?),
            None => {
                let page = parse(s)?;
                Self::new(page, page)
            }
        }
    }
}

impl TryFrom<String> for PageRange {
    type Error = PageRangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PageRange> for String {
    fn from(range: PageRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
