//! Error types for external lookups.

use thiserror::Error;

/// Errors that can occur while talking to an external music service.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// An HTTP request to an external source failed.
    #[error("HTTP error from {source_name}: {message}")]
    Http {
        source_name: String,
        message: String,
    },

    /// The external source returned a rate-limit response.
    #[error("rate limited by {source_name}")]
    RateLimited { source_name: String },

    /// Credentials were rejected.
    #[error("authentication with {source_name} failed: {message}")]
    Auth {
        source_name: String,
        message: String,
    },

    /// The external source refused the request outright.
    #[error("request rejected by {source_name} with status {status}")]
    Rejected { source_name: String, status: u16 },

    /// A response from an external source could not be parsed.
    #[error("parse error from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl EnrichError {
    /// Returns `true` when the error is transient and the operation may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } | Self::RateLimited { .. } => true,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Auth { .. } | Self::Rejected { .. } | Self::Parse { .. } => false,
        }
    }
}

/// Convenience alias for enrichment results.
pub type EnrichResult<T> = std::result::Result<T, EnrichError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let http = EnrichError::Http {
            source_name: "Spotify".to_string(),
            message: "503".to_string(),
        };
        let limited = EnrichError::RateLimited {
            source_name: "Spotify".to_string(),
        };
        let auth = EnrichError::Auth {
            source_name: "Spotify".to_string(),
            message: "invalid_client".to_string(),
        };
        let parse = EnrichError::Parse {
            source_name: "Spotify".to_string(),
            message: "missing field".to_string(),
        };
        assert!(http.is_transient());
        assert!(limited.is_transient());
        assert!(!auth.is_transient());
        assert!(!parse.is_transient());
        assert!(!EnrichError::Rejected {
            source_name: "Spotify".to_string(),
            status: 400,
        }
        .is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = EnrichError::RateLimited {
            source_name: "Spotify".to_string(),
        };
        assert_eq!(err.to_string(), "rate limited by Spotify");
    }
}
