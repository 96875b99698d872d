use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::GameId;

/// Identifier of a rating user
///
/// Loaded users carry compact numeric ids ("1", "2", ...); the type stays a
/// string so synthetic visitor ids never need a separate representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Numeric value of the id, if it has one
    pub fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// A single (user, game, rating) triple on a 1-10 scale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub game_id: GameId,
    pub rating: f64,
}

impl Rating {
    pub fn new(user_id: impl Into<UserId>, game_id: GameId, rating: f64) -> Self {
        Self {
            user_id: user_id.into(),
            game_id,
            rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_user_id() {
        assert_eq!(UserId::from("42").numeric(), Some(42));
        assert_eq!(UserId::from("alice").numeric(), None);
    }

    #[test]
    fn test_user_id_serializes_as_plain_string() {
        let rating = Rating::new("7", 13, 8.5);
        let json = serde_json::to_value(&rating).unwrap();
        assert_eq!(json["user_id"], "7");
        assert_eq!(json["game_id"], 13);
        assert_eq!(json["rating"], 8.5);
    }
}
