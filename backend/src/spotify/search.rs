//! Outbound track search against the Spotify Web API

use crate::config::SpotifyConfig;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use super::models::SpotifySearchResponse;
use super::token::{ClientCredentialsExchange, ProviderTokenCache, TokenAcquisitionError};
use super::truncate_body;

/// Search failures
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error(transparent)]
    Token(#[from] TokenAcquisitionError),

    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("spotify returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode search response: {0}")]
    Decode(String),
}

/// Track search capability
#[async_trait]
pub trait TrackSearch: Send + Sync {
    async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SpotifySearchResponse, SpotifyError>;
}

/// Spotify Web API client
///
/// Clone is cheap: the reqwest client and the token cache are shared.
#[derive(Clone)]
pub struct SpotifyClient {
    client: reqwest::Client,
    search_url: String,
    tokens: Arc<ProviderTokenCache>,
}

impl SpotifyClient {
    /// Build a client whose token cache uses the client-credentials flow
    pub fn new(config: &SpotifyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let exchange = ClientCredentialsExchange::new(client.clone(), config);
        let tokens = Arc::new(ProviderTokenCache::new(
            Arc::new(exchange),
            config.request_timeout(),
        ));

        Ok(Self::with_token_cache(client, config.search_url(), tokens))
    }

    pub fn with_token_cache(
        client: reqwest::Client,
        search_url: String,
        tokens: Arc<ProviderTokenCache>,
    ) -> Self {
        Self {
            client,
            search_url,
            tokens,
        }
    }

    pub fn token_cache(&self) -> &ProviderTokenCache {
        &self.tokens
    }
}

#[async_trait]
impl TrackSearch for SpotifyClient {
    async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SpotifySearchResponse, SpotifyError> {
        let token = self.tokens.get_token().await?;

        let limit = limit.to_string();
        let offset = offset.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .header(AUTHORIZATION, token.authorization_header())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach Spotify search endpoint");
                SpotifyError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Spotify search returned an error");
            return Err(SpotifyError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        response
            .json::<SpotifySearchResponse>()
            .await
            .map_err(|e| SpotifyError::Decode(e.to_string()))
    }
}
