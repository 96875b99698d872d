use std::collections::{HashMap, HashSet};

use crate::{
    error::{AppError, AppResult},
    models::{Game, GameId, Genre, GenreTaxonomy},
};

/// Immutable game catalog plus the genre taxonomy its flag rows are aligned to
///
/// Built once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    taxonomy: GenreTaxonomy,
    games: Vec<Game>,
    index: HashMap<GameId, usize>,
}

impl CatalogStore {
    /// Creates a catalog, validating that every flag row matches the taxonomy
    pub fn new(taxonomy: GenreTaxonomy, games: Vec<Game>) -> AppResult<Self> {
        let mut index = HashMap::with_capacity(games.len());

        for (position, game) in games.iter().enumerate() {
            if game.genre_flags.len() != taxonomy.len() {
                return Err(AppError::InvalidInput(format!(
                    "Game {} has {} genre flags, expected {}",
                    game.game_id,
                    game.genre_flags.len(),
                    taxonomy.len()
                )));
            }
            if index.insert(game.game_id, position).is_some() {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate game id {} in catalog",
                    game.game_id
                )));
            }
        }

        Ok(Self {
            taxonomy,
            games,
            index,
        })
    }

    /// All games in catalog order
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn taxonomy(&self) -> &GenreTaxonomy {
        &self.taxonomy
    }

    /// Genre listing in id order
    pub fn genres(&self) -> Vec<Genre> {
        self.taxonomy.genres()
    }

    pub fn get(&self, game_id: GameId) -> Option<&Game> {
        self.index.get(&game_id).map(|&position| &self.games[position])
    }

    /// Games whose id is in `ids`, in catalog order
    ///
    /// Unknown ids are silently ignored.
    pub fn select(&self, ids: &HashSet<GameId>) -> Vec<&Game> {
        self.games
            .iter()
            .filter(|game| ids.contains(&game.game_id))
            .collect()
    }

    /// Item representation matrix: one binary genre row per game, catalog order
    pub fn item_matrix(&self) -> Vec<Vec<f64>> {
        self.games.iter().map(Game::genre_vector).collect()
    }
}
