use crate::compress::compress;
use crate::config::DiffOptions;
use crate::error::Result;
use crate::matching::{anchor, Matches};
use crate::nested::pair_edited;
use crate::output::Segment;
use crate::tokenize::{Chunk, Granularity};

/// Granularity of a comparison and how many levels it sits below the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub granularity: Granularity,
    pub depth: usize,
}

impl Level {
    pub fn top(granularity: Granularity) -> Self {
        Level {
            granularity,
            depth: 0,
        }
    }

    /// The next finer level, unless it would exceed `max_depth`.
    pub fn deeper(self, max_depth: usize) -> Option<Level> {
        if self.depth >= max_depth {
            return None;
        }
        self.granularity.finer().map(|granularity| Level {
            granularity,
            depth: self.depth + 1,
        })
    }
}

/// Compares two chunk sequences and returns the coalesced segment list.
///
/// Pairs identical chunks first, then edited ones (recursing into finer
/// levels), and finally compresses both sequences into segments.
pub fn compare(
    old: &[Chunk],
    new: &[Chunk],
    level: Level,
    options: &DiffOptions,
) -> Result<Vec<Segment>> {
    let mut matches = Matches::new(old.len(), new.len());
    anchor(old, new, &mut matches)?;
    pair_edited(old, new, &mut matches, level, options)?;
    debug_assert!(matches.is_consistent());
    Ok(compress(old, new, &matches, options.detect_moves))
}
