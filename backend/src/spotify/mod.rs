//! Spotify Web API integration
//!
//! - `token`: client-credentials access token, cached and refreshed lazily
//! - `search`: outbound track search authorized with the cached token
//! - `models`: provider response shapes

pub mod models;
pub mod search;
pub mod token;

pub use models::SpotifySearchResponse;
pub use search::{SpotifyClient, SpotifyError, TrackSearch};
pub use token::{
    ClientCredentialsExchange, ProviderToken, ProviderTokenCache, TokenAcquisitionError,
    TokenExchange, TokenResponse,
};

/// Maximum length for provider response bodies kept in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Truncate a response body to avoid logging excessive data
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}
