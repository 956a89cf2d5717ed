//! Typed phylogeny response.

use serde::{Deserialize, Serialize};

use crate::error::PhylogenyError;

/// One node of the knowledgebase phylogeny tree.
///
/// The `down` endpoint returns the requested concept as the root with its
/// descendants nested under `children`. Fields the tool does not use are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhylogenyNode {
    pub name: String,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub children: Vec<Self>,
}

impl PhylogenyNode {
    /// Decode a node from a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`PhylogenyError::Parse`] if the body is not a JSON object
    /// with at least a `name` field.
    pub fn from_json(body: &str) -> Result<Self, PhylogenyError> {
        serde_json::from_str(body).map_err(|e| PhylogenyError::Parse(e.to_string()))
    }

    /// Whether this node sits at `rank`, compared case-insensitively.
    ///
    /// A node without a rank is never at any rank.
    #[must_use]
    pub fn is_at_rank(&self, rank: &str) -> bool {
        self.rank
            .as_deref()
            .is_some_and(|r| r.trim().eq_ignore_ascii_case(rank.trim()))
    }
}
