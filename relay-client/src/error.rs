//! Error types for the Relay client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the scheduling API
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// API answered with an unexpected HTTP status
    #[error("http err: {status} - {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        reason: String,
    },

    /// Response body was not a valid envelope
    #[error("error parse json response from api server: {0}")]
    Decode(#[source] serde_json::Error),

    /// Envelope carried a non-zero application code
    #[error("{message}")]
    Api {
        /// Envelope code
        code: i64,
        /// `errorMessage` field of the envelope
        message: String,
    },

    /// Envelope `data` did not decode into a task
    #[error("error read task payload: {0}")]
    Payload(#[source] serde_json::Error),

    /// Envelope `data` could not be re-encoded to canonical text
    #[error("Error decode: {raw}")]
    Reencode {
        /// Raw response body, preserved for the report
        raw: String,
    },
}

impl ClientError {
    /// Whether this error counts toward the poller's backoff counter
    ///
    /// Transport failures, bad HTTP statuses and envelope decode failures are
    /// transient: the round-trip to the API itself went wrong. Application
    /// errors and payload problems mean the API answered and are handled at
    /// the normal poll cadence instead.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Decode(_)
        )
    }

    /// The outcome code reported for a task whose execution hit this error
    pub fn outcome_code(&self) -> i64 {
        match self {
            Self::Transport(_) | Self::Decode(_) | Self::Payload(_) => -1,
            Self::Status { .. } | Self::Reencode { .. } => 0,
            Self::Api { code, .. } => *code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transience_classification() {
        let err = ClientError::Status {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert!(err.is_transient());

        let err = ClientError::Api {
            code: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn test_outcome_codes() {
        let err = ClientError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.outcome_code(), 0);

        let err = ClientError::Api {
            code: 17,
            message: "bad method".to_string(),
        };
        assert_eq!(err.outcome_code(), 17);
    }

    #[test]
    fn test_status_display() {
        let err = ClientError::Status {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "http err: 503 - Service Unavailable");
    }

    #[test]
    fn test_api_display_is_bare_message() {
        let err = ClientError::Api {
            code: 17,
            message: "bad method".to_string(),
        };
        assert_eq!(err.to_string(), "bad method");
    }

    #[test]
    fn test_reencode_display_keeps_raw_body() {
        let err = ClientError::Reencode {
            raw: "{broken".to_string(),
        };
        assert_eq!(err.to_string(), "Error decode: {broken");
    }
}
