use crate::matching::Matches;
use crate::output::{ChangeType, Segment, SegmentBuilder};
use crate::tokenize::Chunk;

/// Walks both chunk sequences in lockstep and turns the pairings into a
/// coalesced segment list.
///
/// With `detect_moves` off, chunks paired out of order are reported as
/// removed and added instead of moved.
pub fn compress(old: &[Chunk], new: &[Chunk], matches: &Matches, detect_moves: bool) -> Vec<Segment> {
    let (moved_from, moved_to) = if detect_moves {
        (ChangeType::MovedFrom, ChangeType::MovedTo)
    } else {
        (ChangeType::Removed, ChangeType::Added)
    };
    let mut builder = SegmentBuilder::new();
    let (mut o, mut n) = (0, 0);

    while o < old.len() && n < new.len() {
        let old_match = matches.old_match(o);
        let new_match = matches.new_match(n);
        match (old_match, new_match) {
            (Some(j), _) if j == n => {
                match matches.edit(o) {
                    Some(inner) => builder.extend(inner),
                    None => builder.push(ChangeType::Unchanged, old[o].text()),
                }
                o += 1;
                n += 1;
            }
            (None, _) => {
                builder.push(ChangeType::Removed, old[o].text());
                o += 1;
            }
            (_, None) => {
                builder.push(ChangeType::Added, new[n].text());
                n += 1;
            }
            (Some(j), _) if j < n => {
                builder.push(moved_from, old[o].text());
                o += 1;
            }
            (_, Some(i)) if i < o => {
                builder.push(moved_to, new[n].text());
                n += 1;
            }
            (Some(j), Some(i)) => {
                // crossing move: step the side that realigns sooner
                if i - o <= j - n {
                    builder.push(moved_from, old[o].text());
                    o += 1;
                } else {
                    builder.push(moved_to, new[n].text());
                    n += 1;
                }
            }
        }
    }

    for (i, chunk) in old.iter().enumerate().skip(o) {
        let kind = if matches.old_match(i).is_some() { moved_from } else { ChangeType::Removed };
        builder.push(kind, chunk.text());
    }
    for (j, chunk) in new.iter().enumerate().skip(n) {
        let kind = if matches.new_match(j).is_some() { moved_to } else { ChangeType::Added };
        builder.push(kind, chunk.text());
    }

    builder.finish()
}
