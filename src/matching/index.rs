use crate::tokenize::Chunk;
use std::collections::BTreeMap;

/// Distinct content seen on one side, with where it first appeared and how often.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueEntry<'a> {
    pub content: &'a str,
    pub first: usize,
    pub count: usize,
}

/// Content-keyed multimap over one side of a comparison.
///
/// Chunks are grouped by [`Chunk::key`]; inside a group entries are
/// deduplicated by exact text so colliding keys never merge different content.
#[derive(Debug, Default)]
pub struct UniquenessIndex<'a> {
    groups: BTreeMap<u64, Vec<UniqueEntry<'a>>>,
}

impl<'a> UniquenessIndex<'a> {
    pub fn build(chunks: &'a [Chunk]) -> Self {
        let mut groups: BTreeMap<u64, Vec<UniqueEntry<'a>>> = BTreeMap::new();
        for (position, chunk) in chunks.iter().enumerate() {
            let group = groups.entry(chunk.key()).or_default();
            match group.iter_mut().find(|e| e.content == chunk.text()) {
                Some(entry) => entry.count += 1,
                None => group.push(UniqueEntry {
                    content: chunk.text(),
                    first: position,
                    count: 1,
                }),
            }
        }
        UniquenessIndex { groups }
    }

    pub fn contains_key(&self, key: u64) -> bool {
        self.groups.contains_key(&key)
    }

    /// The entry under `key` if the group holds exactly one entry seen exactly once.
    pub fn sole(&self, key: u64) -> Option<&UniqueEntry<'a>> {
        match self.groups.get(&key).map(Vec::as_slice) {
            Some([entry]) if entry.count == 1 => Some(entry),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> impl Iterator<Item = &UniqueEntry<'a>> {
        self.groups.values().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::{tokenize, Split};

    #[test]
    fn test_counts_duplicates() {
        let chunks = tokenize("a\nb\na\n", &Split::Delimiters(vec!['\n']));
        let index = UniquenessIndex::build(&chunks);

        let mut entries: Vec<_> = index.entries().cloned().collect();
        entries.sort_by_key(|e| e.first);
        assert_eq!(
            entries,
            vec![
                UniqueEntry { content: "a\n", first: 0, count: 2 },
                UniqueEntry { content: "b\n", first: 1, count: 1 },
            ]
        );
        assert!(index.sole(chunks[0].key()).is_none());
        assert_eq!(index.sole(chunks[1].key()).map(|e| e.first), Some(1));
    }
}
