use serde::{Deserialize, Serialize};

/// Classification of a piece of text in a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Unchanged,
    Added,
    Removed,
    /// Left its old position
    MovedFrom,
    /// Arrived at a new position
    MovedTo,
}

impl ChangeType {
    /// Present in the old text.
    pub fn in_old(self) -> bool {
        matches!(
            self,
            ChangeType::Unchanged | ChangeType::Removed | ChangeType::MovedFrom
        )
    }

    /// Present in the new text.
    pub fn in_new(self) -> bool {
        matches!(
            self,
            ChangeType::Unchanged | ChangeType::Added | ChangeType::MovedTo
        )
    }

    pub fn is_move(self) -> bool {
        matches!(self, ChangeType::MovedFrom | ChangeType::MovedTo)
    }
}

/// A maximal run of text sharing one change type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: ChangeType,
}

impl Segment {
    pub fn new(kind: ChangeType, content: impl Into<String>) -> Self {
        Segment {
            content: content.into(),
            kind,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.chars().all(char::is_whitespace)
    }
}

/// Position of a segment inside the concatenation of all segment contents,
/// counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub offset: usize,
    pub length: usize,
    #[serde(rename = "type")]
    pub kind: ChangeType,
}

/// Character counts per change type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
    pub moved_from: usize,
    pub moved_to: usize,
}
