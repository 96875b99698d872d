use serde::{Deserialize, Serialize};

pub mod rating;
pub mod visitor;

pub use rating::{Rating, UserId};
pub use visitor::VisitorState;

/// Board game identifier (the BoardGameGeek id in the source catalog)
pub type GameId = i64;

/// Genre identifier, 1-based position in the [`GenreTaxonomy`]
pub type GenreId = u32;

/// A board game in the catalog
///
/// `genre_flags` is positional: index `i` belongs to the genre at position `i`
/// of the catalog's [`GenreTaxonomy`]. The catalog store enforces the lengths match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub game_id: GameId,
    pub title: String,
    pub year: i32,
    pub overview: String,
    pub cover_url: String,
    pub genre_flags: Vec<bool>,
}

impl Game {
    /// Genre-flag row as a binary vector
    pub fn genre_vector(&self) -> Vec<f64> {
        self.genre_flags
            .iter()
            .map(|&flag| if flag { 1.0 } else { 0.0 })
            .collect()
    }
}

/// A genre with its 1-based id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Ordered list of genre names shared by the catalog and the genre listing
///
/// The order defines both genre ids (position + 1) and vector positions in
/// every game's genre flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreTaxonomy {
    names: Vec<String>,
}

impl GenreTaxonomy {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// All genres with their ids, in taxonomy order
    pub fn genres(&self) -> Vec<Genre> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| Genre {
                id: (i + 1) as GenreId,
                name: name.clone(),
            })
            .collect()
    }

    /// Vector position for a genre id, `None` when the id is unknown
    pub fn position(&self, id: GenreId) -> Option<usize> {
        let index = (id as usize).checked_sub(1)?;
        (index < self.names.len()).then_some(index)
    }

    /// Genre id for a name (case-sensitive)
    pub fn id_of(&self, name: &str) -> Option<GenreId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| (i + 1) as GenreId)
    }

    /// Builds a flag row with the named genres set
    pub fn flags_for(&self, genre_names: &[&str]) -> Vec<bool> {
        self.names
            .iter()
            .map(|name| genre_names.contains(&name.as_str()))
            .collect()
    }

    /// Names of the genres set in a flag row
    pub fn names_for(&self, flags: &[bool]) -> Vec<String> {
        self.names
            .iter()
            .zip(flags)
            .filter(|(_, &flag)| flag)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
