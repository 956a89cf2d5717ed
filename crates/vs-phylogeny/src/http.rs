//! Status-code checks shared by every knowledgebase request.

use crate::error::PhylogenyError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. A 429 becomes
/// [`PhylogenyError::RateLimited`] (the `Retry-After` header falls back to
/// 60 s); any other non-success status becomes [`PhylogenyError::Api`] with
/// the response body.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, PhylogenyError> {
    if resp.status() == 429 {
        return Err(PhylogenyError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(PhylogenyError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}
