//! OAuth2 client-credentials token acquisition.

use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::credentials::{ClientCredentials, SecretString};
use crate::error::{DoxError, Result};
use crate::types::TokenResponse;

/// Path of the token endpoint below the OAuth base URL.
pub const TOKEN_PATH: &str = "/oauth/token";

/// A bearer token together with its local expiry deadline.
#[derive(Debug, Clone)]
pub struct AccessToken {
    secret: SecretString,
    expires_at: Option<Instant>,
}

impl AccessToken {
    /// Tokens without `expires_in` never expire locally; the service still
    /// signals expiry with `401 Unauthorized`.
    pub fn new(secret: impl Into<String>, expires_in: Option<u64>) -> Self {
        Self {
            secret: SecretString::new(secret),
            expires_at: expires_in.map(|secs| Instant::now() + Duration::from_secs(secs)),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    pub fn secret(&self) -> &str {
        self.secret.expose()
    }
}

/// Request a new token with the client-credentials grant.
///
/// The client id and secret are sent as HTTP basic auth.
pub async fn fetch_token(
    http_client: &Client,
    token_url: &str,
    credentials: &ClientCredentials,
) -> Result<AccessToken> {
    debug!(token_url, client_id = %credentials.client_id, "Requesting access token");

    let response = http_client
        .post(token_url)
        .basic_auth(
            &credentials.client_id,
            Some(credentials.client_secret.expose()),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, "Token request rejected");
        return Err(DoxError::Auth {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| DoxError::Parse(format!("invalid token response: {}", e)))?;

    debug!(expires_in = ?token.expires_in, "Access token acquired");
    Ok(AccessToken::new(token.access_token, token.expires_in))
}
