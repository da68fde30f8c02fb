use serde::Serialize;
use std::fmt;

use crate::subtitle::record::StId;

/// Kind of edit an operation applies to the subtitle store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationType {
    Insert,
    Delete,
    Merge,
    Split,
    MoveLeft,
    MoveRight,
    ContentChange,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Merge => "merge",
            Self::Split => "split",
            Self::MoveLeft => "moveLeft",
            Self::MoveRight => "moveRight",
            Self::ContentChange => "contentChange",
        };
        write!(f, "{}", name)
    }
}

/// One typed edit, built from one group of aligned pairs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: u64,
    pub operation_type: OperationType,
    /// Identities of all subtitles in the group, in pair order
    pub affected_stids: Vec<StId>,
    /// Insert position for `insert` operations
    pub after_stid: Option<StId>,
}
