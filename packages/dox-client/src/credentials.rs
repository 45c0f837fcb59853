//! Client credentials and connection settings.
//!
//! Uses the `secrecy` crate so the client secret and bearer tokens are never
//! written to logs or debug output.

use secrecy::{ExposeSecret, SecretBox};
use std::env;
use std::fmt;

use crate::error::{DoxError, Result};

/// Holds the OAuth client secret and issued bearer tokens.
///
/// `Debug` and `Display` both print `[REDACTED]`; the raw value is only read
/// when an `Authorization` header is built.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value. Only call this when building a request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// OAuth2 client-credentials pair.
///
/// Note: this is the client used for authentication, not the extraction
/// client id sent with each upload.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret),
        }
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Everything needed to talk to one extraction service instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the document extraction service
    pub base_url: String,
    /// Base URL of the OAuth2 server; `/oauth/token` is appended
    pub oauth_url: String,
    pub credentials: ClientCredentials,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        oauth_url: impl Into<String>,
        credentials: ClientCredentials,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            oauth_url: oauth_url.into(),
            credentials,
        }
    }

    /// Load configuration from `DOX_*` environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Ok(Self::new(
            required_var("DOX_BASE_URL")?,
            required_var("DOX_OAUTH_URL")?,
            ClientCredentials::new(
                required_var("DOX_OAUTH_CLIENT_ID")?,
                required_var("DOX_OAUTH_CLIENT_SECRET")?,
            ),
        ))
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| DoxError::Config(format!("{} must be set", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug() {
        let secret = SecretString::new("super-secret");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("super"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_secret_not_in_display() {
        let secret = SecretString::new("super-secret");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_expose_works() {
        let secret = SecretString::from("super-secret");
        assert_eq!(secret.expose(), "super-secret");
        assert_eq!(secret.clone().expose(), "super-secret");
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("DOX_BASE_URL", "http://extraction-service");
        env::set_var("DOX_OAUTH_URL", "http://oauth-url");
        env::set_var("DOX_OAUTH_CLIENT_ID", "test");
        env::set_var("DOX_OAUTH_CLIENT_SECRET", "secret");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://extraction-service");
        assert_eq!(config.oauth_url, "http://oauth-url");
        assert_eq!(config.credentials.client_id, "test");
        assert_eq!(config.credentials.client_secret.expose(), "secret");

        env::remove_var("DOX_OAUTH_CLIENT_SECRET");
        let err = ClientConfig::from_env().unwrap_err();
        assert!(
            matches!(err, DoxError::Config(ref msg) if msg.contains("DOX_OAUTH_CLIENT_SECRET")),
            "{err:?}"
        );
    }

    #[test]
    fn test_config_debug_redacts_client_secret() {
        let config = ClientConfig::new(
            "http://extraction-service",
            "http://oauth-url",
            ClientCredentials::new("test", "secret-value"),
        );
        let debug = format!("{:?}", config);
        assert!(debug.contains("test"));
        assert!(!debug.contains("secret-value"));
    }
}
