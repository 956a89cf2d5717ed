//! # vs-phylogeny
//!
//! HTTP client for the knowledgebase phylogeny endpoint.
//!
//! Used by the `--kb` concept source: every concept that has images is looked
//! up, and only those at the requested rank are kept. Lookups are sequential
//! and best-effort; a concept whose lookup fails is dropped with a warning.

mod error;
mod http;
mod node;

pub use error::PhylogenyError;
pub use node::PhylogenyNode;

use std::time::Duration;

use vs_config::KbConfig;
use vs_core::Concept;

use crate::http::check_response;

/// Client for `GET <base_url>/<concept>`.
pub struct PhylogenyClient {
    http: reqwest::Client,
    base_url: String,
}

impl PhylogenyClient {
    /// Build a client from the `[kb]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`PhylogenyError::Http`] if the underlying `reqwest::Client`
    /// cannot be built.
    pub fn new(config: &KbConfig) -> Result<Self, PhylogenyError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Point the client at a different endpoint (local test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for one concept. The name is percent-encoded as a single path
    /// segment, so spaces become `%20`.
    #[must_use]
    pub fn node_url(&self, concept: &Concept) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(concept.as_str())
        )
    }

    /// Fetch the phylogeny node for `concept`.
    ///
    /// # Errors
    ///
    /// Returns [`PhylogenyError`] if the request fails, the service returns a
    /// non-success status, or the body is not a phylogeny node.
    pub async fn fetch(&self, concept: &Concept) -> Result<PhylogenyNode, PhylogenyError> {
        let url = self.node_url(concept);
        tracing::debug!(%url, "fetching phylogeny");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let body = resp.text().await?;
        PhylogenyNode::from_json(&body)
    }

    /// Whether `concept` sits at `rank`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch`].
    pub async fn is_at_rank(&self, concept: &Concept, rank: &str) -> Result<bool, PhylogenyError> {
        Ok(self.fetch(concept).await?.is_at_rank(rank))
    }

    /// Keep the concepts at `rank`, preserving input order.
    ///
    /// A concept whose lookup fails for any reason is logged and removed.
    /// This never fails as a whole.
    pub async fn filter_at_rank(&self, concepts: Vec<Concept>, rank: &str) -> Vec<Concept> {
        let mut kept = Vec::with_capacity(concepts.len());
        for concept in concepts {
            match self.is_at_rank(&concept, rank).await {
                Ok(true) => kept.push(concept),
                Ok(false) => tracing::debug!(%concept, rank, "not at rank, skipping"),
                Err(error) => {
                    tracing::warn!(
                        %concept,
                        %error,
                        "could not retrieve phylogeny, removing concept from results"
                    );
                }
            }
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> PhylogenyClient {
        PhylogenyClient::new(&KbConfig::default())
            .unwrap()
            .with_base_url("http://kb.test/phylogeny/down")
    }

    #[test]
    fn node_url_encodes_spaces() {
        let url = client().node_url(&Concept::from("Aegina citrea"));
        assert_eq!(url, "http://kb.test/phylogeny/down/Aegina%20citrea");
    }

    #[test]
    fn node_url_keeps_segment_intact() {
        let c = client().with_base_url("http://kb.test/down/");
        assert_eq!(
            c.node_url(&Concept::from("sp. A/B")),
            "http://kb.test/down/sp.%20A%2FB"
        );
    }

    #[test]
    fn default_base_url_comes_from_config() {
        let c = PhylogenyClient::new(&KbConfig::default()).unwrap();
        assert_eq!(c.base_url(), KbConfig::default().base_url);
    }
}
