pub mod collaborative;
pub mod content;
pub mod genre_filter;
pub mod neighbors;
pub mod recommendations;
pub mod similarity;

use serde::Serialize;

use crate::models::Game;

pub use neighbors::{NeighborSearch, PearsonKnn};
pub use recommendations::{RecommendationPage, Recommender};

/// Maximum number of games returned by the genre filter
pub const GENRE_FILTER_LIMIT: usize = 30;

/// Maximum number of games returned by each recommender
pub const RECOMMENDATION_LIMIT: usize = 12;

/// Games produced by a recommender plus the status message shown with them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations<'a> {
    pub games: Vec<&'a Game>,
    pub message: &'static str,
}

impl<'a> Recommendations<'a> {
    pub fn new(games: Vec<&'a Game>, message: &'static str) -> Self {
        Self { games, message }
    }

    pub fn empty(message: &'static str) -> Self {
        Self::new(Vec::new(), message)
    }

    /// Ids of the recommended games, in result order
    pub fn game_ids(&self) -> Vec<crate::models::GameId> {
        self.games.iter().map(|g| g.game_id).collect()
    }
}
