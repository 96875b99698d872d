use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{GameId, GenreId, Rating, UserId};
use crate::error::{AppError, AppResult};

/// Separator between list entries in the wire encoding
const LIST_SEPARATOR: char = ',';
/// Separator inside a "userId|gameId|rating" triple
const TRIPLE_SEPARATOR: char = '|';

/// Visitor state for one request, already decoded into typed values
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VisitorState {
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    #[serde(default)]
    pub liked_game_ids: Vec<GameId>,
    #[serde(default)]
    pub submitted_ratings: Vec<Rating>,
}

impl VisitorState {
    /// Decodes the client-held wire form
    ///
    /// `genres` and `likes` are comma-separated ids, `rates` is a comma-separated
    /// list of `userId|gameId|rating` triples. Missing or blank fields decode to
    /// empty lists.
    pub fn decode(
        genres: Option<&str>,
        likes: Option<&str>,
        rates: Option<&str>,
    ) -> AppResult<Self> {
        Ok(Self {
            genre_ids: parse_list(genres.unwrap_or_default(), "genre id")?,
            liked_game_ids: parse_list(likes.unwrap_or_default(), "game id")?,
            submitted_ratings: split_list(rates.unwrap_or_default())
                .map(parse_triple)
                .collect::<AppResult<_>>()?,
        })
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

fn parse_list<T: FromStr>(raw: &str, what: &str) -> AppResult<Vec<T>> {
    split_list(raw).map(|entry| parse_value(entry, what)).collect()
}

fn parse_value<T: FromStr>(entry: &str, what: &str) -> AppResult<T> {
    entry
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid {}: '{}'", what, entry)))
}

fn parse_triple(entry: &str) -> AppResult<Rating> {
    let parts: Vec<&str> = entry.split(TRIPLE_SEPARATOR).collect();
    let [user, game, rating] = parts.as_slice() else {
        return Err(AppError::InvalidInput(format!(
            "Invalid rating triple: '{}' (expected userId|gameId|rating)",
            entry
        )));
    };

    let user = user.trim();
    if user.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Invalid rating triple: '{}' (empty user id)",
            entry
        )));
    }

    Ok(Rating {
        user_id: UserId::from(user),
        game_id: parse_value(game, "game id")?,
        rating: parse_value(rating, "rating")?,
    })
}
