use jobdash_core::CallOutcome;
use thiserror::Error;

/// Failure of one gateway call. The core only ever sees the
/// success / conflict / other classification, never the transport detail.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {0}")]
    Http(u16),
    #[error("malformed response body: {0}")]
    InvalidBody(String),
}

impl GatewayError {
    /// The backend signals a duplicate add-to-track with HTTP 400 and uses
    /// no other 400s on that route; this is the single place to change if
    /// it ever grows a dedicated conflict code.
    pub fn is_conflict(&self) -> bool {
        matches!(self, GatewayError::Http(400))
    }

    pub fn outcome(&self) -> CallOutcome {
        if self.is_conflict() {
            CallOutcome::Conflict
        } else {
            CallOutcome::Failed
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::InvalidBody(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}
