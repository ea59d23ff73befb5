mod index;
pub use index::*;

use crate::error::Result;
use crate::output::Segment;
use crate::tokenize::Chunk;
use std::collections::BTreeMap;

/// Pairings between the old and new chunk sequences of one comparison.
///
/// Kept as two parallel index arrays; every pairing is written to both
/// sides at once so `old[i] == Some(j)` exactly when `new[j] == Some(i)`.
#[derive(Debug, Clone, Default)]
pub struct Matches {
    old: Vec<Option<usize>>,
    new: Vec<Option<usize>>,
    // inner diffs of edited pairs, keyed by old position
    edits: BTreeMap<usize, Vec<Segment>>,
}

impl Matches {
    pub fn new(old_len: usize, new_len: usize) -> Self {
        Matches {
            old: vec![None; old_len],
            new: vec![None; new_len],
            edits: BTreeMap::new(),
        }
    }

    /// Pairs `old` with `new`, releasing whatever either was paired with before.
    pub fn pair(&mut self, old: usize, new: usize) {
        if let Some(previous) = self.old[old].take() {
            self.new[previous] = None;
        }
        if let Some(previous) = self.new[new].take() {
            self.old[previous] = None;
            self.edits.remove(&previous);
        }
        self.edits.remove(&old);
        self.old[old] = Some(new);
        self.new[new] = Some(old);
    }

    /// Pairs two chunks that differ, remembering the inner diff between them.
    pub fn pair_edited(&mut self, old: usize, new: usize, inner: Vec<Segment>) {
        self.pair(old, new);
        self.edits.insert(old, inner);
    }

    pub fn old_match(&self, old: usize) -> Option<usize> {
        self.old.get(old).copied().flatten()
    }

    pub fn new_match(&self, new: usize) -> Option<usize> {
        self.new.get(new).copied().flatten()
    }

    /// Old position paired with `new`, if the pairing points back.
    pub fn mutual(&self, new: usize) -> Option<usize> {
        self.new_match(new).filter(|&old| self.old_match(old) == Some(new))
    }

    pub fn is_free(&self, old: usize, new: usize) -> bool {
        self.old_match(old).is_none() && self.new_match(new).is_none()
    }

    /// Inner diff attached to the pair starting at `old`.
    pub fn edit(&self, old: usize) -> Option<&[Segment]> {
        self.edits.get(&old).map(Vec::as_slice)
    }

    pub fn pair_count(&self) -> usize {
        self.old.iter().flatten().count()
    }

    pub fn is_consistent(&self) -> bool {
        self.old
            .iter()
            .enumerate()
            .all(|(i, m)| m.map_or(true, |j| self.new_match(j) == Some(i)))
            && self
                .new
                .iter()
                .enumerate()
                .all(|(j, m)| m.map_or(true, |i| self.old_match(i) == Some(j)))
    }
}

/// Pairs chunks that are certainly the same: unique anchors, the endpoints,
/// then neighbours of established pairs in both directions.
pub fn anchor(old: &[Chunk], new: &[Chunk], matches: &mut Matches) -> Result<()> {
    if old.is_empty() || new.is_empty() {
        return Ok(());
    }
    pair_unique(old, new, matches);
    pair_endpoints(old, new, matches)?;
    propagate_forward(old, new, matches)?;
    propagate_backward(old, new, matches)?;
    tracing::trace!(
        old = old.len(),
        new = new.len(),
        pairs = matches.pair_count(),
        "anchoring done"
    );
    Ok(())
}

fn pair_unique(old: &[Chunk], new: &[Chunk], matches: &mut Matches) {
    let old_index = UniquenessIndex::build(old);
    let new_index = UniquenessIndex::build(new);
    for chunk in new {
        if !old_index.contains_key(chunk.key()) {
            continue;
        }
        let (Some(o), Some(n)) = (old_index.sole(chunk.key()), new_index.sole(chunk.key())) else {
            continue;
        };
        if o.content == n.content && matches.is_free(o.first, n.first) {
            matches.pair(o.first, n.first);
        }
    }
}

fn pair_endpoints(old: &[Chunk], new: &[Chunk], matches: &mut Matches) -> Result<()> {
    let (last_old, last_new) = (old.len() - 1, new.len() - 1);
    for (i, j) in [(0, 0), (last_old, last_new)] {
        if matches.is_free(i, j) && new[j].same_as(old.get(i))? {
            matches.pair(i, j);
        }
    }
    Ok(())
}

fn propagate_forward(old: &[Chunk], new: &[Chunk], matches: &mut Matches) -> Result<()> {
    for j in 0..new.len() {
        let Some(i) = matches.mutual(j) else {
            continue;
        };
        let (i, j) = (i + 1, j + 1);
        if i < old.len()
            && j < new.len()
            && matches.is_free(i, j)
            && new[j].same_as(old.get(i))?
        {
            matches.pair(i, j);
        }
    }
    Ok(())
}

fn propagate_backward(old: &[Chunk], new: &[Chunk], matches: &mut Matches) -> Result<()> {
    for j in (1..new.len()).rev() {
        let Some(i) = matches.mutual(j) else {
            continue;
        };
        if i == 0 {
            continue;
        }
        let (i, j) = (i - 1, j - 1);
        if matches.is_free(i, j) && new[j].same_as(old.get(i))? {
            matches.pair(i, j);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::{tokenize, Split};
    use proptest::prelude::*;

    fn lines(text: &str) -> Vec<Chunk> {
        tokenize(text, &Split::Delimiters(vec!['\n']))
    }

    fn anchored(old: &str, new: &str) -> (Vec<Option<usize>>, Vec<Option<usize>>) {
        let (old, new) = (lines(old), lines(new));
        let mut matches = Matches::new(old.len(), new.len());
        anchor(&old, &new, &mut matches).unwrap();
        let o = (0..old.len()).map(|i| matches.old_match(i)).collect();
        let n = (0..new.len()).map(|j| matches.new_match(j)).collect();
        (o, n)
    }

    proptest! {
        #[test]
        fn test_matches_are_mutual(old in "[abc\\n]{0,30}", new in "[abc\\n]{0,30}") {
            let (old, new) = (lines(&old), lines(&new));
            let mut matches = Matches::new(old.len(), new.len());
            anchor(&old, &new, &mut matches).unwrap();
            prop_assert!(matches.is_consistent());
            for j in 0..new.len() {
                if let Some(i) = matches.new_match(j) {
                    prop_assert_eq!(old[i].text(), new[j].text());
                }
            }
        }
    }

    #[test]
    fn test_repairing_releases_old_partners() {
        let mut matches = Matches::new(2, 2);
        matches.pair_edited(0, 0, vec![]);
        matches.pair(0, 1);
        assert!(matches.is_consistent());
        assert_eq!(matches.new_match(0), None);
        assert_eq!(matches.edit(0), None);

        matches.pair(1, 1);
        assert!(matches.is_consistent());
        assert_eq!(matches.old_match(0), None);
        assert_eq!(matches.old_match(1), Some(1));
        assert_eq!(matches.pair_count(), 1);
    }

    #[test]
    fn test_unique_lines_are_anchored() {
        let (old, new) = anchored("a\nb\nc\n", "c\nb\na\n");
        assert_eq!(old, vec![Some(2), Some(1), Some(0)]);
        assert_eq!(new, vec![Some(2), Some(1), Some(0)]);
    }

    #[test]
    fn test_duplicates_are_not_anchored() {
        // "x" appears twice on the old side
        let (old, new) = anchored("a\nx\nq\nx\nb\n", "c\nx\nd\n");
        assert_eq!(old, vec![None; 5]);
        assert_eq!(new, vec![None; 3]);
    }

    #[test]
    fn test_endpoints_pair_duplicates() {
        let (old, new) = anchored("x\na\nx\n", "x\nb\nx\n");
        assert_eq!(old, vec![Some(0), None, Some(2)]);
        assert_eq!(new, vec![Some(0), None, Some(2)]);
    }

    #[test]
    fn test_propagation_from_anchor() {
        // the duplicated "x" lines pair through their unique neighbours
        let (old, new) = anchored("q\na\nx\nx\nb\nz\n", "r\na\nx\nx\nb\nw\n");
        assert_eq!(old, vec![None, Some(1), Some(2), Some(3), Some(4), None]);
        assert_eq!(new, vec![None, Some(1), Some(2), Some(3), Some(4), None]);
    }

    #[test]
    fn test_backward_propagation() {
        let (old, new) = anchored("q\nx\nx\nb\n", "r\nx\nx\nb\n");
        assert_eq!(old, vec![None, Some(1), Some(2), Some(3)]);
        assert_eq!(new, vec![None, Some(1), Some(2), Some(3)]);
    }
}
