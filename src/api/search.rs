use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::ApiResponse;
use crate::error::AppError;
use crate::search::{SearchResults, Suggestion};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/search?q= - 搜索频道与视频
pub async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ApiResponse<SearchResults>>, AppError> {
    let Query(params) = params?;
    let query = params.q.unwrap_or_default();

    let results = state.search.search(&query).await?;
    Ok(Json(ApiResponse::success(results)))
}

/// GET /api/search/suggestions?q= - 搜索联想
pub async fn suggestions(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Suggestion>>>, AppError> {
    let Query(params) = params?;
    let query = params.q.unwrap_or_default();

    let suggestions = state.search.suggestions(&query).await?;
    Ok(Json(ApiResponse::success(suggestions)))
}
