//! Spotify search response shapes (only the fields the catalog uses)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifySearchResponse {
    pub tracks: SpotifyTracks,
}

/// One page of track results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyTracks {
    pub href: String,
    pub limit: u32,
    pub next: Option<String>,
    pub offset: u32,
    pub previous: Option<String>,
    pub total: u32,
    pub items: Vec<SpotifyTrackObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyTrackObject {
    pub album: SpotifyAlbumObject,
    pub artists: Vec<SpotifyArtistObject>,
    pub explicit: bool,
    pub href: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyAlbumObject {
    pub album_type: String,
    pub total_tracks: u32,
    #[serde(default)]
    pub images: Vec<SpotifyAlbumImage>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyAlbumImage {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyArtistObject {
    pub href: String,
    pub name: String,
}
