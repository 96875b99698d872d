use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{Genre, GenreId, VisitorState},
    routes::{AppState, GameResponse},
    services::RecommendationPage,
};

/// Visitor state in its client-held wire form
///
/// `genres=1,3&likes=174430,161936&rates=51|174430|9,51|224517|3`
#[derive(Debug, Default, Deserialize)]
pub struct VisitorQuery {
    pub genres: Option<String>,
    pub likes: Option<String>,
    pub rates: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub genres: Vec<Genre>,
    pub genre_ids: Vec<GenreId>,
    pub genre_games: Vec<GameResponse>,
    pub recommendations: Vec<GameResponse>,
    pub recommendations_message: String,
    pub similar_games: Vec<GameResponse>,
    pub similar_message: String,
    pub liked_games: Vec<GameResponse>,
}

impl RecommendationResponse {
    fn from_page(page: RecommendationPage<'_>, state: &AppState) -> Self {
        let taxonomy = state.catalog.taxonomy();
        Self {
            genres: page.genres,
            genre_ids: page.genre_ids,
            genre_games: GameResponse::from_games(&page.genre_games, taxonomy),
            recommendations: GameResponse::from_games(&page.recommendations, taxonomy),
            recommendations_message: page.recommendations_message.to_string(),
            similar_games: GameResponse::from_games(&page.similar_games, taxonomy),
            similar_message: page.similar_message.to_string(),
            liked_games: GameResponse::from_games(&page.liked_games, taxonomy),
        }
    }
}

/// Handler for the recommendation page, visitor state in the query string
pub async fn recommend_from_query(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<VisitorQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let visitor = VisitorState::decode(
        query.genres.as_deref(),
        query.likes.as_deref(),
        query.rates.as_deref(),
    )?;

    Ok(Json(build_response(&state, request_id, &visitor)))
}

/// Handler for the recommendation page, visitor state as typed JSON
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(visitor): Json<VisitorState>,
) -> AppResult<Json<RecommendationResponse>> {
    Ok(Json(build_response(&state, request_id, &visitor)))
}

fn build_response(
    state: &AppState,
    request_id: RequestId,
    visitor: &VisitorState,
) -> RecommendationResponse {
    tracing::info!(
        request_id = %request_id,
        genres = visitor.genre_ids.len(),
        likes = visitor.liked_game_ids.len(),
        ratings = visitor.submitted_ratings.len(),
        "Processing recommendation request"
    );

    let page = state.recommender().page(visitor);
    let response = RecommendationResponse::from_page(page, state);

    tracing::info!(
        request_id = %request_id,
        genre_games = response.genre_games.len(),
        recommendations = response.recommendations.len(),
        similar_games = response.similar_games.len(),
        "Recommendations completed"
    );

    response
}
