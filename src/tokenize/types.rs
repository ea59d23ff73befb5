use crate::error::{DiffError, Result};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Smallest comparable slice of text.
///
/// Holds the primary content followed by any trailing delimiter text,
/// e.g. a line and its line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    text: String,
    split: usize,
    key: u64,
}

impl Chunk {
    /// Builds a chunk from `text`, where `text[split..]` is the trailing part.
    ///
    /// A `split` past the end is clamped to it; one inside a character
    /// moves forward to the next character boundary.
    pub fn new(text: &str, split: usize) -> Self {
        let mut split = split.min(text.len());
        while !text.is_char_boundary(split) {
            split += 1;
        }
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        Chunk {
            text: text.to_string(),
            split,
            key: hasher.finish(),
        }
    }

    pub fn content(&self) -> &str {
        &self.text[..self.split]
    }

    pub fn trailing(&self) -> &str {
        &self.text[self.split..]
    }

    /// Content and trailing text together.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lookup key derived from the full text.
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Compares against a counterpart that must exist.
    pub fn same_as(&self, other: Option<&Chunk>) -> Result<bool> {
        match other {
            Some(other) => Ok(self.key == other.key && self.text == other.text),
            None => Err(DiffError::InvalidArgument {
                context: format!("no counterpart to compare {:?} against", self.text),
            }),
        }
    }
}

/// How text is cut into chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split {
    /// Non-delimiter run followed by its delimiter run
    Delimiters(Vec<char>),
    /// New chunk on every character class change
    Boundaries,
    /// One chunk per character
    Chars,
}

/// Level of detail a comparison runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Granularity {
    Line,
    Word,
    Char,
}

impl Granularity {
    /// Next level down, `None` once single characters are reached.
    pub fn finer(self) -> Option<Granularity> {
        match self {
            Granularity::Line => Some(Granularity::Word),
            Granularity::Word => Some(Granularity::Char),
            Granularity::Char => None,
        }
    }

    pub fn split(self, line_delimiters: &[char]) -> Split {
        match self {
            Granularity::Line => Split::Delimiters(line_delimiters.to_vec()),
            Granularity::Word => Split::Boundaries,
            Granularity::Char => Split::Chars,
        }
    }
}
