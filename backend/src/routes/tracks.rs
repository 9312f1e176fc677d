//! Track routes
//!
//! Mounted behind the session guard, so every handler can take [`AuthUser`].

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use music_catalog_shared::types::{SearchQuery, SearchResponse};
use tracing::info;

pub fn track_routes() -> Router<AppState> {
    Router::new().route("/search", get(search))
}

/// GET /tracks/search?query=&pageSize=&pageIndex=
async fn search(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let page_size = params.page_size();
    let page_index = params.page_index();

    info!(
        account_id = auth_user.account_id,
        page_size, page_index, "Searching tracks"
    );

    let response = state
        .tracks
        .search(&params.query, page_size, page_index)
        .await?;
    Ok(Json(response))
}
