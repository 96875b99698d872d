use std::collections::{BTreeMap, HashMap};

use crate::{
    models::{GameId, Rating, UserId},
    services::similarity::pearson_correlation,
};

/// Finds the users most similar to a given user in a training set
///
/// The collaborative recommender only shapes the training set and interprets
/// the neighbors; the similarity model behind this trait is swappable.
#[cfg_attr(test, mockall::automock)]
pub trait NeighborSearch: Send + Sync {
    /// Up to `k` nearest neighbors of `user`, most similar first
    ///
    /// `user` is never its own neighbor. A user absent from `training` has none.
    fn nearest_neighbors(&self, training: &[Rating], user: &UserId, k: usize) -> Vec<UserId>;
}

/// User-based k-nearest-neighbors with Pearson correlation as the similarity
#[derive(Debug, Clone)]
pub struct PearsonKnn {
    /// Minimum number of co-rated games for a non-zero similarity
    min_support: usize,
}

impl Default for PearsonKnn {
    fn default() -> Self {
        Self { min_support: 1 }
    }
}

impl PearsonKnn {
    pub fn new(min_support: usize) -> Self {
        Self { min_support }
    }

    /// Similarity of every other user to `user`, in training-set order
    pub fn similarities(&self, training: &[Rating], user: &UserId) -> Vec<(UserId, f64)> {
        let profiles = UserProfiles::build(training);
        let Some(target) = profiles.get(user) else {
            return Vec::new();
        };

        profiles
            .iter()
            .filter(|(other, _)| *other != user)
            .map(|(other, ratings)| {
                let pairs: Vec<(f64, f64)> = target
                    .iter()
                    .filter_map(|(game, &mine)| ratings.get(game).map(|&theirs| (mine, theirs)))
                    .collect();
                (other.clone(), pearson_correlation(&pairs, self.min_support))
            })
            .collect()
    }
}

impl NeighborSearch for PearsonKnn {
    fn nearest_neighbors(&self, training: &[Rating], user: &UserId, k: usize) -> Vec<UserId> {
        let mut scored = self.similarities(training, user);

        // Stable: equal similarities keep training-set order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored.into_iter().take(k).map(|(id, _)| id).collect()
    }
}

/// Per-user ratings keyed by game, users kept in order of first appearance
struct UserProfiles<'a> {
    order: Vec<&'a UserId>,
    ratings: HashMap<&'a UserId, BTreeMap<GameId, f64>>,
}

impl<'a> UserProfiles<'a> {
    fn build(training: &'a [Rating]) -> Self {
        let mut order = Vec::new();
        let mut ratings: HashMap<&UserId, BTreeMap<GameId, f64>> = HashMap::new();

        for rating in training {
            let games = ratings.entry(&rating.user_id).or_insert_with(|| {
                order.push(&rating.user_id);
                BTreeMap::new()
            });
            // Repeated (user, game) pairs: last rating wins
            games.insert(rating.game_id, rating.rating);
        }

        Self { order, ratings }
    }

    fn get(&self, user: &UserId) -> Option<&BTreeMap<GameId, f64>> {
        self.ratings.get(user)
    }

    fn iter(&self) -> impl Iterator<Item = (&'a UserId, &BTreeMap<GameId, f64>)> + '_ {
        self.order
            .iter()
            .filter_map(|&user| self.ratings.get(user).map(|games| (user, games)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training() -> Vec<Rating> {
        vec![
            // user 1 agrees with the visitor
            Rating::new("1", 10, 9.0),
            Rating::new("1", 20, 2.0),
            Rating::new("1", 30, 8.0),
            // user 2 disagrees
            Rating::new("2", 10, 1.0),
            Rating::new("2", 20, 9.0),
            Rating::new("2", 40, 7.0),
            // user 3 shares nothing with the visitor
            Rating::new("3", 50, 6.0),
            // visitor
            Rating::new("51", 10, 10.0),
            Rating::new("51", 20, 1.0),
        ]
    }

    #[test]
    fn test_nearest_neighbor_is_most_correlated() {
        let knn = PearsonKnn::default();
        let neighbors = knn.nearest_neighbors(&training(), &UserId::from("51"), 1);
        assert_eq!(neighbors, vec![UserId::from("1")]);
    }

    #[test]
    fn test_neighbors_ordered_by_similarity_then_training_order() {
        let knn = PearsonKnn::default();
        let neighbors = knn.nearest_neighbors(&training(), &UserId::from("51"), 3);
        assert_eq!(
            neighbors,
            vec![UserId::from("1"), UserId::from("3"), UserId::from("2")]
        );
    }

    #[test]
    fn test_user_is_never_its_own_neighbor() {
        let knn = PearsonKnn::default();
        let neighbors = knn.nearest_neighbors(&training(), &UserId::from("51"), 10);
        assert!(!neighbors.contains(&UserId::from("51")));
        assert_eq!(neighbors.len(), 3);
    }

    #[test]
    fn test_unknown_user_has_no_neighbors() {
        let knn = PearsonKnn::default();
        assert!(knn
            .nearest_neighbors(&training(), &UserId::from("99"), 1)
            .is_empty());
    }

    #[test]
    fn test_repeated_rating_last_wins() {
        let mut training = training();
        // flip user 2 to agree on game 10 and 20
        training.push(Rating::new("2", 10, 10.0));
        training.push(Rating::new("2", 20, 1.0));

        let knn = PearsonKnn::default();
        let similarities = knn.similarities(&training, &UserId::from("51"));
        let user_2 = similarities
            .iter()
            .find(|(id, _)| id == &UserId::from("2"))
            .map(|(_, sim)| *sim)
            .unwrap();
        assert!((user_2 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_support_zeroes_sparse_overlap() {
        let knn = PearsonKnn::new(3);
        let similarities = knn.similarities(&training(), &UserId::from("51"));
        assert!(similarities.iter().all(|(_, sim)| *sim == 0.0));
    }
}
