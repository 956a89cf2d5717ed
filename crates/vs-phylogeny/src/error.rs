//! Phylogeny client error types.

use thiserror::Error;

/// Errors that can occur when asking the knowledgebase about a concept.
#[derive(Debug, Error)]
pub enum PhylogenyError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The knowledgebase returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The response body was not a phylogeny node.
    #[error("parse error: {0}")]
    Parse(String),

    /// The knowledgebase returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}
