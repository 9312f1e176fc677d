//! Track search service
//!
//! Turns page-based client queries into Spotify limit/offset queries and
//! flattens the provider's nested track objects for clients.

use crate::spotify::{models::SpotifySearchResponse, SpotifyError, TrackSearch};
use music_catalog_shared::types::{SearchResponse, TrackObject};
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub struct TrackService {
    search: Arc<dyn TrackSearch>,
}

impl TrackService {
    pub fn new(search: Arc<dyn TrackSearch>) -> Self {
        Self { search }
    }

    /// Search tracks; `page_index` is 1-based and values below 1 mean the first page
    pub async fn search(
        &self,
        query: &str,
        page_size: u32,
        page_index: u32,
    ) -> Result<SearchResponse, SpotifyError> {
        let limit = page_size;
        let offset = page_index.max(1).saturating_sub(1).saturating_mul(page_size);

        let response = self
            .search
            .search(query, limit, offset)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to search tracks on Spotify");
                e
            })?;

        Ok(to_search_response(response))
    }
}

fn to_search_response(data: SpotifySearchResponse) -> SearchResponse {
    let tracks = data.tracks;

    let items = tracks
        .items
        .into_iter()
        .map(|item| TrackObject {
            album_type: item.album.album_type,
            total_tracks: item.album.total_tracks,
            album_images_url: item.album.images.into_iter().map(|i| i.url).collect(),
            album_name: item.album.name,
            artists_name: item.artists.into_iter().map(|a| a.name).collect(),
            explicit: item.explicit,
            id: item.id,
            name: item.name,
        })
        .collect();

    SearchResponse {
        limit: tracks.limit,
        offset: tracks.offset,
        items,
        total: tracks.total,
    }
}
