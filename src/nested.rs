//! Decides whether two differing chunks are one chunk that was edited.
//!
//! Chunks next to an established pair (or at either end of the sequence)
//! are compared again at the next finer granularity. When the inner diff is
//! similar enough the two chunks are paired and the inner diff is kept.

use crate::compare::{compare, Level};
use crate::config::DiffOptions;
use crate::error::Result;
use crate::matching::Matches;
use crate::output::{ChangeType, Segment};
use crate::tokenize::{tokenize, Chunk};
use std::collections::BTreeSet;

/// Share of identical weight an inner diff needs to count as an edit.
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Judges an inner diff.
///
/// Unchanged text weighs double since it sits on both sides. Whitespace-only
/// segments weigh nothing. Pure additions and pure removals are always
/// accepted.
pub fn is_similar(segments: &[Segment]) -> bool {
    let (mut identical, mut different) = (0usize, 0usize);
    for s in segments.iter().filter(|s| !s.is_blank()) {
        let n = s.content.chars().count();
        if s.kind == ChangeType::Unchanged {
            identical += 2 * n;
        } else {
            different += n;
        }
    }
    let total = identical + different;
    if total == 0 {
        return true;
    }
    let has = |kind: ChangeType| segments.iter().any(|s| s.kind == kind);
    let moved = segments.iter().any(|s| s.kind.is_move());
    if !moved && (!has(ChangeType::Removed) || !has(ChangeType::Added)) {
        return true;
    }
    identical as f64 / total as f64 > SIMILARITY_THRESHOLD
}

struct Orchestrator<'a> {
    old: &'a [Chunk],
    new: &'a [Chunk],
    inner: Level,
    options: &'a DiffOptions,
    // pairs whose inner diff was already judged too different
    rejected: BTreeSet<(usize, usize)>,
}

/// Pairs edited chunks next to existing pairs, sweeping forward then backward.
///
/// Does nothing when `level` has no finer granularity or the depth limit is
/// reached.
pub fn pair_edited(
    old: &[Chunk],
    new: &[Chunk],
    matches: &mut Matches,
    level: Level,
    options: &DiffOptions,
) -> Result<()> {
    let Some(inner) = level.deeper(options.max_depth) else {
        return Ok(());
    };
    if old.is_empty() || new.is_empty() {
        return Ok(());
    }
    let mut orchestrator = Orchestrator {
        old,
        new,
        inner,
        options,
        rejected: BTreeSet::new(),
    };

    orchestrator.try_pair(0, 0, matches)?;
    for j in 0..new.len() {
        if let Some(i) = matches.mutual(j) {
            orchestrator.try_pair(i + 1, j + 1, matches)?;
        }
    }

    orchestrator.try_pair(old.len() - 1, new.len() - 1, matches)?;
    for j in (1..new.len()).rev() {
        if let Some(i) = matches.mutual(j).filter(|&i| i > 0) {
            orchestrator.try_pair(i - 1, j - 1, matches)?;
        }
    }
    Ok(())
}

impl Orchestrator<'_> {
    fn try_pair(&mut self, i: usize, j: usize, matches: &mut Matches) -> Result<()> {
        if i >= self.old.len()
            || j >= self.new.len()
            || !matches.is_free(i, j)
            || self.rejected.contains(&(i, j))
        {
            return Ok(());
        }
        if self.new[j].same_as(self.old.get(i))? {
            matches.pair(i, j);
            return Ok(());
        }
        let inner = self.inner_diff(&self.old[i], &self.new[j])?;
        let accepted = is_similar(&inner);
        tracing::trace!(
            old = i,
            new = j,
            granularity = ?self.inner.granularity,
            accepted,
            "inner match"
        );
        if accepted {
            matches.pair_edited(i, j, inner);
        } else {
            self.rejected.insert((i, j));
        }
        Ok(())
    }

    fn inner_diff(&self, old: &Chunk, new: &Chunk) -> Result<Vec<Segment>> {
        let split = self.inner.granularity.split(&self.options.line_delimiters);
        let old = tokenize(old.text(), &split);
        let new = tokenize(new.text(), &split);
        compare(&old, &new, self.inner, self.options)
    }
}
