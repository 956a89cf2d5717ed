//! Knowledgebase (phylogeny service) settings.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    String::from("http://m3.shore.mbari.org/kb/v1/phylogeny/down")
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_rank() -> String {
    String::from("genus")
}

fn default_user_agent() -> String {
    format!("vars-summary/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KbConfig {
    /// Phylogeny endpoint; the concept name is appended as the last path segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Rank kept when concepts come from the knowledgebase.
    #[serde(default = "default_rank")]
    pub rank: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            rank: default_rank(),
            user_agent: default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = KbConfig::default();
        assert!(config.base_url.ends_with("/phylogeny/down"));
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.rank, "genus");
        assert!(config.user_agent.starts_with("vars-summary/"));
    }
}
