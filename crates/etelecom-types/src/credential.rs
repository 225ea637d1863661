//! The eTelecom API credential descriptor.
//!
//! One credential per workflow configuration, supplied by the host at
//! execution time: a bearer token plus the API base URL. The token rides
//! in a [`SecretString`] so it never reaches logs or serialized records.

use serde::{Deserialize, Serialize};

use crate::secret::SecretString;

/// Default base URL of the eTelecom API.
pub const DEFAULT_DOMAIN: &str = "https://api.etelecom.vn/v1";

/// Endpoint used to verify a credential (`POST` with an empty body).
pub const CREDENTIAL_TEST_PATH: &str = "shop.Misc/CurrentAccount";

/// API credential: bearer token + base URL.
///
/// Immutable per workflow configuration. The host stores and injects it;
/// nodes only read it to build requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCredential {
    /// Bearer token issued by eTelecom.
    #[serde(default)]
    pub token: SecretString,

    /// Base URL of the API, without a trailing slash.
    #[serde(default = "default_domain", alias = "baseUrl")]
    pub domain: String,
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_owned()
}

impl Default for ApiCredential {
    fn default() -> Self {
        Self {
            token: SecretString::default(),
            domain: default_domain(),
        }
    }
}

impl ApiCredential {
    /// Create a credential with the default domain.
    pub fn new(token: impl Into<SecretString>) -> Self {
        Self {
            token: token.into(),
            domain: default_domain(),
        }
    }

    /// Create a credential against a specific base URL.
    pub fn with_domain(token: impl Into<SecretString>, domain: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            domain: domain.into(),
        }
    }

    /// Value of the `Authorization` header for API requests.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token.expose())
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.domain.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_domain_is_production() {
        let cred = ApiCredential::new("tok");
        assert_eq!(cred.domain, "https://api.etelecom.vn/v1");
    }

    #[test]
    fn authorization_header() {
        let cred = ApiCredential::new("tok-123");
        assert_eq!(cred.authorization(), "Bearer tok-123");
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let cred = ApiCredential::with_domain("tok", "https://example.test/v1/");
        assert_eq!(cred.base_url(), "https://example.test/v1");
    }

    #[test]
    fn deserialize_with_defaults() {
        let cred: ApiCredential = serde_json::from_str(r#"{"token":"tok-123"}"#).unwrap();
        assert_eq!(cred.token.expose(), "tok-123");
        assert_eq!(cred.domain, DEFAULT_DOMAIN);
    }

    #[test]
    fn debug_does_not_leak_token() {
        let cred = ApiCredential::new("tok-123");
        let debug = format!("{cred:?}");
        assert!(!debug.contains("tok-123"));
        assert!(debug.contains("REDACTED"));
    }
}
