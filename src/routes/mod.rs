use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    models::{Game, GameId, GenreTaxonomy},
    services::{NeighborSearch, PearsonKnn, Recommender},
    store::{CatalogStore, RatingStore},
};

pub mod catalog;
pub mod recommendations;

/// Shared, read-only application state
///
/// The stores are loaded once at startup; handlers only ever read them.
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub ratings: Arc<RatingStore>,
    pub search: Arc<dyn NeighborSearch>,
}

impl AppState {
    /// State using the Pearson KNN neighbor search
    pub fn new(catalog: CatalogStore, ratings: RatingStore) -> Self {
        Self::with_search(catalog, ratings, Arc::new(PearsonKnn::default()))
    }

    pub fn with_search(
        catalog: CatalogStore,
        ratings: RatingStore,
        search: Arc<dyn NeighborSearch>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            ratings: Arc::new(ratings),
            search,
        }
    }

    /// Request-scoped recommender over the shared stores
    pub fn recommender(&self) -> Recommender<'_> {
        Recommender::new(&self.catalog, &self.ratings, self.search.as_ref())
    }
}

/// Game as returned to clients, with genre names instead of flags
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameResponse {
    pub game_id: GameId,
    pub title: String,
    pub year: i32,
    pub overview: String,
    pub cover_url: String,
    pub genres: Vec<String>,
}

impl GameResponse {
    pub fn from_game(game: &Game, taxonomy: &GenreTaxonomy) -> Self {
        Self {
            game_id: game.game_id,
            title: game.title.clone(),
            year: game.year,
            overview: game.overview.clone(),
            cover_url: game.cover_url.clone(),
            genres: taxonomy.names_for(&game.genre_flags),
        }
    }

    pub fn from_games(games: &[&Game], taxonomy: &GenreTaxonomy) -> Vec<Self> {
        games.iter().map(|game| Self::from_game(game, taxonomy)).collect()
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/genres", get(catalog::list_genres))
        .route("/games/:id", get(catalog::get_game))
        .route(
            "/recommendations",
            get(recommendations::recommend_from_query).post(recommendations::recommend),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
