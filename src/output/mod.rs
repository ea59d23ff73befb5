mod types;
pub use types::*;

use std::cell::OnceCell;

/// Collects segments, merging each one into the previous when the types agree.
#[derive(Debug, Default)]
pub(crate) struct SegmentBuilder {
    segments: Vec<Segment>,
}

impl SegmentBuilder {
    pub fn new() -> Self {
        SegmentBuilder { segments: vec![] }
    }

    pub fn push(&mut self, kind: ChangeType, content: &str) {
        if content.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.kind == kind => last.content.push_str(content),
            _ => self.segments.push(Segment::new(kind, content)),
        }
    }

    pub fn extend<'a>(&mut self, segments: impl IntoIterator<Item = &'a Segment>) {
        for segment in segments {
            self.push(segment.kind, &segment.content);
        }
    }

    pub fn finish(self) -> Vec<Segment> {
        self.segments
    }
}

/// Outcome of comparing two texts.
///
/// The segment list is the primary result; regions and the reconstructed
/// views are derived from it on first request and cached.
#[derive(Debug, Clone)]
pub struct DiffResult {
    segments: Vec<Segment>,
    placeholder: char,
    regions: OnceCell<Vec<Region>>,
    old_view: OnceCell<String>,
    new_view: OnceCell<String>,
}

impl DiffResult {
    pub fn new(segments: Vec<Segment>, placeholder: char) -> Self {
        DiffResult {
            segments,
            placeholder,
            regions: OnceCell::new(),
            old_view: OnceCell::new(),
            new_view: OnceCell::new(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn is_identical(&self) -> bool {
        self.segments.iter().all(|s| s.kind == ChangeType::Unchanged)
    }

    /// Offset and length of every segment within [`DiffResult::merged`].
    pub fn regions(&self) -> &[Region] {
        self.regions.get_or_init(|| {
            let mut offset = 0;
            self.segments
                .iter()
                .map(|s| {
                    let length = s.content.chars().count();
                    let region = Region {
                        offset,
                        length,
                        kind: s.kind,
                    };
                    offset += length;
                    region
                })
                .collect()
        })
    }

    /// All segment contents concatenated, old and new material interleaved.
    pub fn merged(&self) -> String {
        self.segments.iter().map(|s| s.content.as_str()).collect()
    }

    /// The old side, with new-only material masked by the placeholder.
    ///
    /// Same length as [`DiffResult::merged`] so both views line up.
    pub fn old_view(&self) -> &str {
        self.old_view.get_or_init(|| self.view(ChangeType::in_old))
    }

    /// The new side, with old-only material masked by the placeholder.
    pub fn new_view(&self) -> &str {
        self.new_view.get_or_init(|| self.view(ChangeType::in_new))
    }

    /// Exact old input.
    pub fn old_text(&self) -> String {
        self.side(ChangeType::in_old)
    }

    /// Exact new input.
    pub fn new_text(&self) -> String {
        self.side(ChangeType::in_new)
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for s in &self.segments {
            let n = s.content.chars().count();
            match s.kind {
                ChangeType::Unchanged => stats.unchanged += n,
                ChangeType::Added => stats.added += n,
                ChangeType::Removed => stats.removed += n,
                ChangeType::MovedFrom => stats.moved_from += n,
                ChangeType::MovedTo => stats.moved_to += n,
            }
        }
        stats
    }

    fn view(&self, keep: fn(ChangeType) -> bool) -> String {
        let mut out = String::new();
        for s in &self.segments {
            if keep(s.kind) {
                out.push_str(&s.content);
            } else {
                out.extend(s.content.chars().map(|_| self.placeholder));
            }
        }
        out
    }

    fn side(&self, keep: fn(ChangeType) -> bool) -> String {
        self.segments
            .iter()
            .filter(|s| keep(s.kind))
            .map(|s| s.content.as_str())
            .collect()
    }
}
