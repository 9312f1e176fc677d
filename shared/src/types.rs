//! API request and response types

use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Membership Types
// ============================================================================

/// Signup request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Signup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub message: String,
}

/// Login request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response carrying the session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

// ============================================================================
// Track Search Types
// ============================================================================

/// Track search query parameters
///
/// Values are kept as strings so that garbage input falls back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub page_size: Option<String>,
    #[serde(default)]
    pub page_index: Option<String>,
}

impl SearchQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const DEFAULT_PAGE_INDEX: u32 = 1;

    /// Page size, falling back to the default when absent or unparsable
    pub fn page_size(&self) -> u32 {
        parse_or(self.page_size.as_deref(), Self::DEFAULT_PAGE_SIZE)
    }

    /// Page index (1-based), falling back to the default when absent or unparsable
    pub fn page_index(&self) -> u32 {
        parse_or(self.page_index.as_deref(), Self::DEFAULT_PAGE_INDEX)
    }
}

fn parse_or(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

/// Paginated track search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub limit: u32,
    pub offset: u32,
    pub items: Vec<TrackObject>,
    pub total: u32,
}

/// A track, flattened for clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackObject {
    // Album
    pub album_type: String,
    pub total_tracks: u32,
    #[serde(rename = "AlbumImagesURL")]
    pub album_images_url: Vec<String>,
    pub album_name: String,

    // Artists
    pub artists_name: Vec<String>,

    // Track
    pub explicit: bool,
    pub id: String,
    pub name: String,
}
