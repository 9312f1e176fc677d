//! Spotify access token acquisition and caching
//!
//! The catalog authenticates to Spotify with the client-credentials flow.
//! One access token is shared by every outbound call for the lifetime of the
//! process and refreshed lazily once it has expired.
//!
//! # Concurrency
//!
//! The cached entry sits behind an `RwLock`, so readers never observe a
//! half-written token/expiry pair. Refreshes are serialized by a separate
//! gate and the entry is re-checked after the gate is acquired: callers that
//! queued behind a refresh reuse its result instead of issuing their own
//! exchange. At most one exchange is in flight at any time.

use crate::config::SpotifyConfig;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

use super::truncate_body;

/// Failures while obtaining a provider access token
#[derive(Debug, Error)]
pub enum TokenAcquisitionError {
    #[error("token request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode token response: {0}")]
    Decode(String),

    #[error("token request timed out after {0:?}")]
    Timeout(Duration),
}

/// Token endpoint response body
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// A provider access token with its absolute expiry
#[derive(Debug, Clone)]
pub struct ProviderToken {
    pub access_token: SecretString,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl ProviderToken {
    fn from_response(
        response: TokenResponse,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, TokenAcquisitionError> {
        if response.expires_in <= 0 {
            return Err(TokenAcquisitionError::Decode(format!(
                "non-positive expires_in: {}",
                response.expires_in
            )));
        }

        let expires_at = ChronoDuration::try_seconds(response.expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                TokenAcquisitionError::Decode(format!(
                    "expires_in out of range: {}",
                    response.expires_in
                ))
            })?;

        Ok(Self {
            access_token: SecretString::new(response.access_token),
            token_type: response.token_type,
            expires_at,
        })
    }

    /// Usable iff `now` is strictly before the expiry
    #[inline]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Value for the `Authorization` header: `<token_type> <access_token>`
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token.expose_secret())
    }
}

/// A way of trading client credentials for an access token
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(&self) -> Result<TokenResponse, TokenAcquisitionError>;
}

/// Client-credentials exchange against the Spotify accounts service
pub struct ClientCredentialsExchange {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: SecretString,
    timeout: Duration,
}

impl ClientCredentialsExchange {
    /// The reqwest client is expected to carry the request timeout already.
    pub fn new(client: reqwest::Client, config: &SpotifyConfig) -> Self {
        Self {
            client,
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            client_secret: SecretString::new(config.client_secret.clone()),
            timeout: config.request_timeout(),
        }
    }
}

#[async_trait]
impl TokenExchange for ClientCredentialsExchange {
    async fn exchange(&self) -> Result<TokenResponse, TokenAcquisitionError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret().as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TokenAcquisitionError::Timeout(self.timeout)
                } else {
                    TokenAcquisitionError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TokenAcquisitionError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| TokenAcquisitionError::Decode(e.to_string()))
    }
}

/// Process-wide cache of the provider access token
pub struct ProviderTokenCache {
    exchange: Arc<dyn TokenExchange>,
    entry: RwLock<Option<ProviderToken>>,
    refresh_gate: Mutex<()>,
    refresh_timeout: Duration,
}

impl ProviderTokenCache {
    pub fn new(exchange: Arc<dyn TokenExchange>, refresh_timeout: Duration) -> Self {
        Self {
            exchange,
            entry: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            refresh_timeout,
        }
    }

    /// Return a token that is valid right now, refreshing first if needed
    pub async fn get_token(&self) -> Result<ProviderToken, TokenAcquisitionError> {
        self.get_token_with(Utc::now).await
    }

    /// Same as [`get_token`](Self::get_token) with the wall clock pinned to `now`
    pub async fn get_token_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<ProviderToken, TokenAcquisitionError> {
        self.get_token_with(move || now).await
    }

    /// Snapshot of the cached entry, valid or not
    pub async fn cached(&self) -> Option<ProviderToken> {
        self.entry.read().await.clone()
    }

    async fn get_token_with<F>(&self, clock: F) -> Result<ProviderToken, TokenAcquisitionError>
    where
        F: Fn() -> DateTime<Utc> + Send + Sync,
    {
        if let Some(token) = self.valid_entry(clock()).await {
            debug!("Spotify token cache hit");
            return Ok(token);
        }

        let _gate = self.refresh_gate.lock().await;

        // Another caller may have refreshed while we waited for the gate
        if let Some(token) = self.valid_entry(clock()).await {
            debug!("Spotify token refreshed by a concurrent caller");
            return Ok(token);
        }

        self.refresh(&clock).await
    }

    async fn valid_entry(&self, now: DateTime<Utc>) -> Option<ProviderToken> {
        self.entry
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .cloned()
    }

    /// Must be called with the refresh gate held. On failure the previous
    /// entry is left in place.
    async fn refresh<F>(&self, clock: &F) -> Result<ProviderToken, TokenAcquisitionError>
    where
        F: Fn() -> DateTime<Utc> + Send + Sync,
    {
        let response = tokio::time::timeout(self.refresh_timeout, self.exchange.exchange())
            .await
            .map_err(|_| TokenAcquisitionError::Timeout(self.refresh_timeout))
            .and_then(|result| result)
            .map_err(|e| {
                error!(error = %e, "Failed to refresh Spotify access token");
                e
            })?;

        let token = ProviderToken::from_response(response, clock())?;
        *self.entry.write().await = Some(token.clone());

        info!(expires_at = %token.expires_at, "Refreshed Spotify access token");
        Ok(token)
    }
}
