//! Text diffing that tells moved lines apart from removed ones and finds
//! edits inside lines that were rewritten rather than replaced.
//!
//! ```
//! use crossdiff::{diff, ChangeType};
//!
//! let result = diff("a\nb\nc\n", "b\nc\na\n").unwrap();
//! let kinds: Vec<ChangeType> = result.segments().iter().map(|s| s.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![ChangeType::MovedFrom, ChangeType::Unchanged, ChangeType::MovedTo]
//! );
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod matching;
pub mod nested;
pub mod output;
pub mod tokenize;

mod compress;

pub use compare::{compare, Level};
pub use config::DiffOptions;
pub use error::DiffError;
pub use output::{ChangeType, DiffResult, DiffStats, Region, Segment};
pub use tokenize::{Chunk, Granularity, Split};

use error::Result;
use tokenize::tokenize;

/// Compares texts with a fixed set of validated options.
#[derive(Debug, Clone, Default)]
pub struct Differ {
    options: DiffOptions,
}

impl Differ {
    pub fn new(options: DiffOptions) -> Result<Self> {
        options.validate()?;
        Ok(Differ { options })
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Line-by-line diff of `old` against `new`.
    pub fn diff(&self, old: &str, new: &str) -> Result<DiffResult> {
        self.diff_at(old, new, Granularity::Line)
    }

    /// Diff starting at the given granularity.
    pub fn diff_at(&self, old: &str, new: &str, granularity: Granularity) -> Result<DiffResult> {
        let split = granularity.split(&self.options.line_delimiters);
        let old_chunks = tokenize(old, &split);
        let new_chunks = tokenize(new, &split);
        tracing::debug!(
            ?granularity,
            old = old_chunks.len(),
            new = new_chunks.len(),
            "comparing"
        );
        let segments = compare(
            &old_chunks,
            &new_chunks,
            Level::top(granularity),
            &self.options,
        )?;
        tracing::debug!(segments = segments.len(), "diff complete");
        Ok(DiffResult::new(segments, self.options.placeholder))
    }
}

/// Line-by-line diff with default options.
pub fn diff(old: &str, new: &str) -> Result<DiffResult> {
    Differ::default().diff(old, new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn has_repeated_kind(segments: &[Segment]) -> bool {
        segments.windows(2).any(|w| w[0].kind == w[1].kind)
    }

    proptest! {
        #[test]
        fn test_reconstructs_inputs(old in "[ab c\\n]{0,40}", new in "[ab c\\n]{0,40}") {
            let result = diff(&old, &new).unwrap();
            prop_assert_eq!(result.old_text(), old);
            prop_assert_eq!(result.new_text(), new);
        }

        #[test]
        fn test_compact(old in "[abc\\n ]{0,40}", new in "[abc\\n ]{0,40}") {
            let result = diff(&old, &new).unwrap();
            prop_assert!(!has_repeated_kind(result.segments()));
            prop_assert!(result.segments().iter().all(|s| !s.content.is_empty()));
        }

        #[test]
        fn test_idempotency(text in ".{0,60}") {
            let result = diff(&text, &text).unwrap();
            if text.is_empty() {
                prop_assert!(result.segments().is_empty());
            } else {
                prop_assert_eq!(result.segments(), &[Segment::new(ChangeType::Unchanged, text.clone())][..]);
            }
        }

        #[test]
        fn test_views_have_equal_length(old in "[ab\\n]{0,30}", new in "[ab\\n]{0,30}") {
            let result = diff(&old, &new).unwrap();
            let merged = result.merged().chars().count();
            prop_assert_eq!(result.old_view().chars().count(), merged);
            prop_assert_eq!(result.new_view().chars().count(), merged);
        }

        #[test]
        fn test_word_level_reconstructs_inputs(old in "[ab ,]{0,30}", new in "[ab ,]{0,30}") {
            let result = Differ::default().diff_at(&old, &new, Granularity::Word).unwrap();
            prop_assert_eq!(result.old_text(), old);
            prop_assert_eq!(result.new_text(), new);
        }
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        assert!(Differ::new(DiffOptions::default().with_max_depth(0)).is_err());
    }

    #[test]
    fn test_differ_keeps_options() {
        let options = DiffOptions::default().with_placeholder('~');
        let differ = Differ::new(options.clone()).unwrap();
        assert_eq!(differ.options(), &options);
        assert!(differ.diff("a\n", "a\n").unwrap().is_identical());
        assert!(!differ.diff("a\n", "b\n").unwrap().is_identical());
    }
}
