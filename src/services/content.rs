use std::collections::HashSet;

use crate::{
    models::GameId,
    services::{
        similarity::{cosine_similarity, fill_non_finite},
        Recommendations, RECOMMENDATION_LIMIT,
    },
    store::CatalogStore,
};

pub const SIMILAR_MESSAGE: &str = "The games are similar to your liked games.";
pub const NO_SIMILAR_MESSAGE: &str = "No similar games found.";

/// Recommends the catalog games whose genres best match the liked games
///
/// Every catalog game is scored by cosine similarity against the visitor's
/// genre profile; the top [`RECOMMENDATION_LIMIT`] are returned with ties kept
/// in catalog order. Liked games themselves are not excluded.
pub fn recommend_by_similarity<'a>(
    catalog: &'a CatalogStore,
    liked: &[GameId],
) -> Recommendations<'a> {
    if liked.is_empty() {
        return Recommendations::empty(NO_SIMILAR_MESSAGE);
    }

    let mut items = catalog.item_matrix();
    for row in items.iter_mut() {
        fill_non_finite(row);
    }

    let mut profile = build_user_profile(catalog, liked);
    fill_non_finite(&mut profile);

    let mut scored: Vec<(usize, f64)> = items
        .iter()
        .map(|row| cosine_similarity(&profile, row))
        .enumerate()
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let games: Vec<_> = scored
        .into_iter()
        .take(RECOMMENDATION_LIMIT)
        .map(|(position, _)| &catalog.games()[position])
        .collect();

    tracing::debug!(
        liked = liked.len(),
        recommended = games.len(),
        "Similarity-based recommendations computed"
    );

    Recommendations::new(games, SIMILAR_MESSAGE)
}

/// Genre profile of the liked games
///
/// The mean genre row of the liked games found in the catalog, scaled so its
/// components sum to one. No matching games, or no genres among them, gives
/// the zero vector.
pub fn build_user_profile(catalog: &CatalogStore, liked: &[GameId]) -> Vec<f64> {
    let liked: HashSet<GameId> = liked.iter().copied().collect();
    let mut profile = vec![0.0; catalog.taxonomy().len()];

    let mut count = 0usize;
    for game in catalog.select(&liked) {
        for (total, value) in profile.iter_mut().zip(game.genre_vector()) {
            *total += value;
        }
        count += 1;
    }
    if count == 0 {
        return profile;
    }

    for value in profile.iter_mut() {
        *value /= count as f64;
    }

    let sum: f64 = profile.iter().sum();
    if sum == 0.0 {
        return profile;
    }
    profile.iter().map(|value| value / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::catalog::test_support::catalog;

    #[test]
    fn test_empty_likes() {
        let catalog = catalog(&["Strategy"], &[(1, "A", &["Strategy"])]);
        let result = recommend_by_similarity(&catalog, &[]);
        assert!(result.games.is_empty());
        assert_eq!(result.message, "No similar games found.");
    }

    #[test]
    fn test_two_game_scenario() {
        let catalog = catalog(&["Strategy", "War"], &[(1, "A", &["Strategy"]), (2, "B", &["War"])]);

        assert_eq!(build_user_profile(&catalog, &[1]), vec![1.0, 0.0]);

        let result = recommend_by_similarity(&catalog, &[1]);
        assert_eq!(result.game_ids(), vec![1, 2]);
        assert_eq!(result.message, SIMILAR_MESSAGE);
    }

    #[test]
    fn test_profile_is_normalized_mean() {
        let catalog = catalog(
            &["Strategy", "War", "Party"],
            &[(1, "A", &["Strategy", "War"]), (2, "B", &["Strategy"]), (3, "C", &["Party"])],
        );

        // mean = [1.0, 0.5, 0.0], sum = 1.5
        let profile = build_user_profile(&catalog, &[1, 2, 2]);
        let expected = [2.0 / 3.0, 1.0 / 3.0, 0.0];
        for (actual, expected) in profile.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ranks_by_similarity() {
        let catalog = catalog(
            &["Strategy", "War", "Party"],
            &[
                (1, "Party only", &["Party"]),
                (2, "War only", &["War"]),
                (3, "Strategy war", &["Strategy", "War"]),
                (4, "Strategy", &["Strategy"]),
            ],
        );

        let result = recommend_by_similarity(&catalog, &[3]);
        // game 3 scores 1.0, games 2 and 4 tie and keep catalog order
        assert_eq!(result.game_ids(), vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_zero_profile_falls_back_to_catalog_order() {
        let catalog = catalog(
            &["Strategy", "War"],
            &[(1, "No genres", &[]), (2, "B", &["War"]), (3, "C", &["Strategy"])],
        );

        assert_eq!(build_user_profile(&catalog, &[1]), vec![0.0, 0.0]);
        assert_eq!(recommend_by_similarity(&catalog, &[1]).game_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_liked_ids_give_zero_profile() {
        let catalog = catalog(&["Strategy", "War"], &[(1, "A", &["War"]), (2, "B", &["Strategy"])]);

        assert_eq!(build_user_profile(&catalog, &[404]), vec![0.0, 0.0]);

        let result = recommend_by_similarity(&catalog, &[404]);
        assert_eq!(result.game_ids(), vec![1, 2]);
        assert_eq!(result.message, SIMILAR_MESSAGE);
    }

    #[test]
    fn test_result_is_capped_and_idempotent() {
        let titles: Vec<String> = (1..=20).map(|id| format!("Game {}", id)).collect();
        let rows: Vec<(GameId, &str, &[&str])> = titles
            .iter()
            .zip(1..)
            .map(|(title, id)| {
                let genres: &[&str] = if id % 2 == 0 { &["War"] } else { &["Strategy"] };
                (id, title.as_str(), genres)
            })
            .collect();
        let catalog = catalog(&["Strategy", "War"], &rows);

        let first = recommend_by_similarity(&catalog, &[2]);
        assert_eq!(first.games.len(), RECOMMENDATION_LIMIT);
        assert_eq!(first.game_ids(), vec![2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 1, 3]);
        assert_eq!(first, recommend_by_similarity(&catalog, &[2]));
    }
}
