//! Error types for the node adapters.
//!
//! Two layers: [`ApiError`] covers everything that goes wrong talking to
//! the provider (transport failure, non-2xx status, unparseable or
//! malformed response), while [`NodeError`] adds the local failures a node
//! can raise before any network call (missing credential, invalid
//! parameter). Both are non-exhaustive to allow future extension without
//! breaking downstream.

use thiserror::Error;

/// A failure while calling the eTelecom API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// The HTTP call itself failed (connection, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status code.
    #[error("provider returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, or the status reason when the body is empty.
        message: String,
    },

    /// The response body could not be parsed as JSON.
    ///
    /// Covers both invalid bodies and string-encoded bodies whose inner
    /// text fails a second parse.
    #[error("failed to parse API response: {0}")]
    Parse(String),

    /// The response parsed but is missing the expected structure
    /// (e.g. no `accounts` array on a ListOA call).
    #[error("invalid response from eTelecom API: {0}")]
    InvalidResponse(String),
}

/// Top-level error type for node execution.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NodeError {
    /// The host supplied no credential for this execution.
    #[error("no credentials provided")]
    MissingCredentials,

    /// A declared parameter is absent or fails local validation.
    ///
    /// Raised before any network call is attempted.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name as declared in the node definition.
        name: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// An API-layer error bubbled up.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl NodeError {
    /// Shorthand for [`NodeError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// A convenience alias used throughout the node crates.
pub type Result<T> = std::result::Result<T, NodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ApiError::Status {
            status: 401,
            message: "unauthorized".into(),
        };
        assert_eq!(err.to_string(), "provider returned 401: unauthorized");

        let err = ApiError::InvalidResponse("missing 'accounts' array".into());
        assert_eq!(
            err.to_string(),
            "invalid response from eTelecom API: missing 'accounts' array"
        );
    }

    #[test]
    fn node_error_display() {
        assert_eq!(
            NodeError::MissingCredentials.to_string(),
            "no credentials provided"
        );

        let err = NodeError::invalid_parameter("templateData", "not valid JSON");
        assert_eq!(
            err.to_string(),
            "invalid parameter 'templateData': not valid JSON"
        );
    }

    #[test]
    fn api_error_converts_transparently() {
        let err: NodeError = ApiError::Transport("connection refused".into()).into();
        assert!(matches!(err, NodeError::Api(ApiError::Transport(_))));
        assert_eq!(err.to_string(), "request failed: connection refused");
    }
}
