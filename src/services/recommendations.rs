use serde::Serialize;

use crate::{
    models::{Game, GameId, Genre, GenreId, Rating, VisitorState},
    services::{
        collaborative::recommend_by_ratings, content::recommend_by_similarity,
        genre_filter::filter_by_genres, neighbors::NeighborSearch, Recommendations,
    },
    store::{CatalogStore, RatingStore},
};

/// Everything the recommendation page shows for one visitor
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationPage<'a> {
    pub genres: Vec<Genre>,
    pub genre_ids: Vec<GenreId>,
    pub genre_games: Vec<&'a Game>,
    pub recommendations: Vec<&'a Game>,
    pub recommendations_message: &'static str,
    pub similar_games: Vec<&'a Game>,
    pub similar_message: &'static str,
    pub liked_games: Vec<&'a Game>,
}

/// Read-only view over the shared stores for a single request
///
/// Holds no state of its own; every call works from its arguments and the
/// immutable catalog and rating stores.
pub struct Recommender<'a> {
    catalog: &'a CatalogStore,
    ratings: &'a RatingStore,
    search: &'a dyn NeighborSearch,
}

impl<'a> Recommender<'a> {
    pub fn new(
        catalog: &'a CatalogStore,
        ratings: &'a RatingStore,
        search: &'a dyn NeighborSearch,
    ) -> Self {
        Self {
            catalog,
            ratings,
            search,
        }
    }

    pub fn filter_by_genres(&self, genre_ids: &[GenreId]) -> Vec<&'a Game> {
        filter_by_genres(self.catalog, genre_ids)
    }

    pub fn recommend_by_ratings(&self, submitted: &[Rating]) -> Recommendations<'a> {
        recommend_by_ratings(self.catalog, self.ratings, self.search, submitted)
    }

    pub fn recommend_by_similarity(&self, liked: &[GameId]) -> Recommendations<'a> {
        recommend_by_similarity(self.catalog, liked)
    }

    /// Liked games, most recently liked first
    ///
    /// `game_ids` is in the order the visitor liked them; the result is that
    /// order reversed. Unknown ids are dropped and a game liked more than once
    /// appears only at its latest position.
    pub fn lookup_liked_games(&self, game_ids: &[GameId]) -> Vec<&'a Game> {
        let mut seen = std::collections::HashSet::new();
        game_ids
            .iter()
            .rev()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.catalog.get(*id))
            .collect()
    }

    /// Runs every strategy for one visitor
    pub fn page(&self, visitor: &VisitorState) -> RecommendationPage<'a> {
        let rated = self.recommend_by_ratings(&visitor.submitted_ratings);
        let similar = self.recommend_by_similarity(&visitor.liked_game_ids);

        RecommendationPage {
            genres: self.catalog.genres(),
            genre_ids: visitor.genre_ids.clone(),
            genre_games: self.filter_by_genres(&visitor.genre_ids),
            recommendations: rated.games,
            recommendations_message: rated.message,
            similar_games: similar.games,
            similar_message: similar.message,
            liked_games: self.lookup_liked_games(&visitor.liked_game_ids),
        }
    }
}
