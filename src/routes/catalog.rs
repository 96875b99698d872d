use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{GameId, Genre},
    routes::{AppState, GameResponse},
};

/// Handler listing the genre taxonomy in id order
pub async fn list_genres(State(state): State<Arc<AppState>>) -> Json<Vec<Genre>> {
    Json(state.catalog.genres())
}

/// Handler returning a single catalog game
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> AppResult<Json<GameResponse>> {
    let game = state
        .catalog
        .get(game_id)
        .ok_or_else(|| AppError::NotFound(format!("Game {} not found", game_id)))?;

    Ok(Json(GameResponse::from_game(game, state.catalog.taxonomy())))
}
