use std::collections::HashSet;

use crate::models::{Rating, UserId};

/// Immutable base set of ratings used as background training data
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    ratings: Vec<Rating>,
}

impl RatingStore {
    pub fn new(ratings: Vec<Rating>) -> Self {
        Self { ratings }
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Number of distinct users in the store
    pub fn user_count(&self) -> usize {
        self.ratings
            .iter()
            .map(|r| &r.user_id)
            .collect::<HashSet<_>>()
            .len()
    }

    /// A user id guaranteed not to appear in the store
    ///
    /// One past the highest numeric id; non-numeric ids are ignored.
    pub fn next_user_id(&self) -> UserId {
        let highest = self
            .ratings
            .iter()
            .filter_map(|r| r.user_id.numeric())
            .max()
            .unwrap_or(0);
        UserId::from(highest + 1)
    }

    /// Base ratings followed by `extra`, as one training set
    pub fn merged_with(&self, extra: &[Rating]) -> Vec<Rating> {
        let mut merged = Vec::with_capacity(self.ratings.len() + extra.len());
        merged.extend_from_slice(&self.ratings);
        merged.extend_from_slice(extra);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_user_id_follows_highest() {
        let store = RatingStore::new(vec![
            Rating::new("2", 1, 7.0),
            Rating::new("50", 1, 7.0),
            Rating::new("9", 2, 4.0),
        ]);
        assert_eq!(store.next_user_id(), UserId::from("51"));
        assert_eq!(store.user_count(), 3);
    }

    #[test]
    fn test_next_user_id_for_empty_store() {
        assert_eq!(RatingStore::default().next_user_id(), UserId::from("1"));
    }

    #[test]
    fn test_next_user_id_ignores_non_numeric() {
        let store = RatingStore::new(vec![
            Rating::new("visitor", 1, 7.0),
            Rating::new("3", 1, 7.0),
        ]);
        assert_eq!(store.next_user_id(), UserId::from("4"));
    }

    #[test]
    fn test_merge_keeps_base_immutable() {
        let store = RatingStore::new(vec![Rating::new("1", 1, 7.0)]);
        let merged = store.merged_with(&[Rating::new("2", 5, 9.0)]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1], Rating::new("2", 5, 9.0));
        assert_eq!(store.len(), 1);
    }
}
