//! Options controlling how two texts are compared.

use crate::error::{DiffError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on `max_depth`, keeps nested comparisons from recursing on adversarial input.
pub const MAX_NESTING_DEPTH: usize = 8;

/// Options for a [`Differ`](crate::Differ).
///
/// Deserializes with every field optional, missing ones fall back to
/// [`DiffOptions::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Characters ending a line at line granularity
    pub line_delimiters: Vec<char>,
    /// How many granularity levels below the starting one may be compared
    pub max_depth: usize,
    /// Character substituted for content missing from one side in the aligned views
    pub placeholder: char,
    /// Report relocated units as moves instead of a removal plus an addition
    pub detect_moves: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            line_delimiters: vec!['\n', '\r'],
            max_depth: 2,
            placeholder: ' ',
            detect_moves: true,
        }
    }
}

impl DiffOptions {
    #[must_use]
    pub fn with_line_delimiters(mut self, delimiters: impl IntoIterator<Item = char>) -> Self {
        self.line_delimiters = delimiters.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    #[must_use]
    pub fn with_moves(mut self, detect_moves: bool) -> Self {
        self.detect_moves = detect_moves;
        self
    }

    /// Checks the options, reporting the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.line_delimiters.is_empty() {
            return Err(DiffError::config(
                "line_delimiters",
                "at least one delimiter is required",
            ));
        }
        for (i, c) in self.line_delimiters.iter().enumerate() {
            if self.line_delimiters[..i].contains(c) {
                return Err(DiffError::config(
                    "line_delimiters",
                    format!("duplicate delimiter {c:?}"),
                ));
            }
        }
        if self.max_depth == 0 || self.max_depth > MAX_NESTING_DEPTH {
            return Err(DiffError::config(
                "max_depth",
                format!("must be between 1 and {MAX_NESTING_DEPTH}, got {}", self.max_depth),
            ));
        }
        Ok(())
    }
}
