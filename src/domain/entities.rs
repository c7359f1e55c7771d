//! Domain entities: persisted tree shapes

use serde::{Deserialize, Serialize};

/// Nested tree representation used for persistence and interchange.
///
/// Serializes to the wire shape `{"value":10,"left":null,"right":null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRepr {
    pub value: i64,
    #[serde(default)]
    pub left: Option<Box<NodeRepr>>,
    #[serde(default)]
    pub right: Option<Box<NodeRepr>>,
}

impl NodeRepr {
    pub fn leaf(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

/// One line of a tree's chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub message: String,
    pub response: String,
}

/// Stored state of one labeled tree.
///
/// `tree` is None for a tree that exists but holds no nodes yet (freshly
/// created without a root, or reset). Chat against such a tree reports
/// "No tree selected." rather than running engine operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeRecord {
    pub tree: Option<NodeRepr>,
    pub history: Vec<ChatEntry>,
}
