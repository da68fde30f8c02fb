/*!
 * Subtitle records and identities.
 */

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::strings::normalize;

/// Persistent identity of a subtitle flowing into an operation.
///
/// Subtitles that exist in the old version keep their stable id. Subtitles
/// that only exist in the new version get a temporary id derived from the
/// nearest preceding stable id; downstream code assigns the real id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StId {
    /// Id assigned by the persistence layer
    Stable(String),
    /// Placeholder for a newly inserted subtitle
    Temporary {
        /// Stable id of the preceding subtitle, `None` at the start of the file
        based_on: Option<String>,
        /// 1-based position among consecutive inserts after `based_on`
        offset: usize,
    },
}

impl StId {
    /// Create a stable id
    pub fn stable(id: impl Into<String>) -> Self {
        Self::Stable(id.into())
    }

    /// Whether this id still needs to be assigned downstream
    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary { .. })
    }
}

impl fmt::Display for StId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable(id) => write!(f, "{}", id),
            Self::Temporary { based_on, offset } => {
                write!(f, "tmp-{}+{}", based_on.as_deref().unwrap_or("start"), offset)
            }
        }
    }
}

impl Serialize for StId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Identity of an existing subtitle as stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleIdentity {
    /// Stable subtitle id
    pub persistent_id: String,
    /// Id of the enclosing record (take), if known
    #[serde(default)]
    pub record_id: Option<String>,
}

impl SubtitleIdentity {
    /// Create an identity without record id
    pub fn new(persistent_id: impl Into<String>) -> Self {
        Self {
            persistent_id: persistent_id.into(),
            record_id: None,
        }
    }
}

/// One subtitle of either the old ("from") or new ("to") transcript
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleRecord {
    /// Raw text of the subtitle
    pub content: String,
    /// Normalized text used for comparisons
    pub content_sim: String,
    /// Zero-based position in its sequence; for gaps the insertion point
    pub index: usize,
    /// First subtitle of a paragraph
    pub first_in_para: bool,
    /// Last subtitle of a paragraph
    pub last_in_para: bool,
    /// Stable id, from-side only
    pub persistent_id: Option<String>,
    /// Enclosing record id, from-side only
    pub record_id: Option<String>,
    /// 1 for real subtitles, 0 for alignment gaps
    pub subtitle_count: u8,
    /// Repeated phrases in `content` with their char offsets
    pub repetitions: BTreeMap<String, Vec<usize>>,
}

impl SubtitleRecord {
    /// Create a real subtitle record with its comparison form
    pub fn new(index: usize, content: impl Into<String>) -> Self {
        let content = content.into();
        let content_sim = normalize::content_sim(&content, false);
        Self {
            content,
            content_sim,
            index,
            first_in_para: false,
            last_in_para: false,
            persistent_id: None,
            record_id: None,
            subtitle_count: 1,
            repetitions: BTreeMap::new(),
        }
    }

    /// Create a gap placeholder at the given insertion point
    pub fn gap(index: usize) -> Self {
        Self {
            content: String::new(),
            content_sim: String::new(),
            index,
            first_in_para: false,
            last_in_para: false,
            persistent_id: None,
            record_id: None,
            subtitle_count: 0,
            repetitions: BTreeMap::new(),
        }
    }

    /// Attach a persistent identity
    pub fn with_identity(mut self, identity: &SubtitleIdentity) -> Self {
        self.persistent_id = Some(identity.persistent_id.clone());
        self.record_id = identity.record_id.clone();
        self
    }

    /// Mark paragraph boundaries, re-normalizing when a paragraph starts here
    pub fn with_paragraph_flags(mut self, first_in_para: bool, last_in_para: bool) -> Self {
        self.first_in_para = first_in_para;
        self.last_in_para = last_in_para;
        self.content_sim = normalize::content_sim(&self.content, first_in_para);
        self
    }

    /// Whether this record is an alignment gap
    pub fn is_gap(&self) -> bool {
        self.subtitle_count == 0
    }

    /// Length of `content` in chars
    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }
}

/// Build records for a plain list of subtitle texts.
///
/// Convenience for callers that already split their transcript. Ids are
/// attached positionally when given.
pub fn records_from_texts(texts: &[&str], ids: Option<&[&str]>) -> Vec<SubtitleRecord> {
    texts
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let record = SubtitleRecord::new(index, *text);
            match ids.and_then(|ids| ids.get(index)) {
                Some(id) => record.with_identity(&SubtitleIdentity::new(*id)),
                None => record,
            }
        })
        .collect()
}
