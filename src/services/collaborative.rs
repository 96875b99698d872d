use std::collections::HashSet;

use crate::{
    models::{GameId, Rating, UserId},
    services::{neighbors::NeighborSearch, Recommendations, RECOMMENDATION_LIMIT},
    store::{CatalogStore, RatingStore},
};

/// Ratings strictly above this value count as "liked" by a neighbor
pub const LIKE_THRESHOLD: f64 = 5.0;

/// Number of neighbors consulted
pub const NEIGHBOR_COUNT: usize = 1;

pub const RATINGS_MESSAGE: &str = "These games are recommended based on your ratings.";
pub const NO_RATINGS_MESSAGE: &str = "No recommendations.";

/// Recommends games the visitor's nearest neighbor rated highly
///
/// The visitor's ratings are re-keyed to a fresh user id from the rating
/// store and appended to the base ratings; the neighbor search runs on that
/// merged set. Once ratings were submitted the success message is returned
/// even when the neighbor yields no games.
pub fn recommend_by_ratings<'a>(
    catalog: &'a CatalogStore,
    ratings: &RatingStore,
    search: &dyn NeighborSearch,
    submitted: &[Rating],
) -> Recommendations<'a> {
    if submitted.is_empty() {
        return Recommendations::empty(NO_RATINGS_MESSAGE);
    }

    let visitor = ratings.next_user_id();
    let training = ratings.merged_with(&as_visitor(&visitor, submitted));

    let neighbors = search.nearest_neighbors(&training, &visitor, NEIGHBOR_COUNT);
    let liked = liked_by(&training, &neighbors);

    let mut games = catalog.select(&liked);
    games.truncate(RECOMMENDATION_LIMIT);

    tracing::debug!(
        visitor = %visitor,
        training_size = training.len(),
        neighbors = ?neighbors,
        liked = liked.len(),
        recommended = games.len(),
        "Rating-based recommendations computed"
    );

    Recommendations::new(games, RATINGS_MESSAGE)
}

/// Copies of `submitted` attributed to `visitor`
fn as_visitor(visitor: &UserId, submitted: &[Rating]) -> Vec<Rating> {
    submitted
        .iter()
        .map(|r| Rating {
            user_id: visitor.clone(),
            game_id: r.game_id,
            rating: r.rating,
        })
        .collect()
}

/// Games any of `users` rated above [`LIKE_THRESHOLD`]
fn liked_by(training: &[Rating], users: &[UserId]) -> HashSet<GameId> {
    training
        .iter()
        .filter(|r| users.contains(&r.user_id) && r.rating > LIKE_THRESHOLD)
        .map(|r| r.game_id)
        .collect()
}
