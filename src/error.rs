use thiserror::Error;

/// Client-level errors using thiserror for structured error handling.
///
/// These errors represent domain-specific failures in the presentation
/// layer. They provide context and can be chained with anyhow.

#[derive(Error, Debug)]
pub enum BallotError {
    #[error("Failed to parse embedded page data")]
    ParseFailed(#[source] serde_json::Error),

    #[error("Page has no ballot block")]
    MissingBallot,

    #[error("Unknown position: {0}")]
    UnknownPosition(String),
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Page has no anti-forgery token")]
    MissingCsrfToken,

    #[error("Ballot was already submitted")]
    AlreadySubmitted,

    #[error("Failed to post ballot to {url}")]
    PostFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Ballot post rejected with status {status}")]
    Rejected { status: u16 },
}

#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("Results request failed")]
    RequestFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Results endpoint returned status {status}")]
    BadStatus { status: u16 },

    #[error("Failed to parse results payload")]
    ParseFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for driver Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = BallotError::UnknownPosition("p9".to_string());
        assert_eq!(err.to_string(), "Unknown position: p9");

        let err = SubmitError::MissingCsrfToken;
        assert_eq!(err.to_string(), "Page has no anti-forgery token");

        let err = ResultsError::BadStatus { status: 502 };
        assert_eq!(err.to_string(), "Results endpoint returned status 502");
    }

    #[test]
    fn test_error_source_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = ResultsError::RequestFailed(Box::new(io_err));
        assert!(err.source().is_some());
    }
}
