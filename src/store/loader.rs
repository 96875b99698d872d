//! CSV loaders for the catalog and the base rating set.
//!
//! Both loaders run once at startup and hand the stores clean, typed rows:
//! raw column names are mapped to game fields here, and usernames in the
//! rating file are replaced with compact numeric ids.

use std::{collections::HashMap, fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord};

use super::{CatalogStore, RatingStore};
use crate::{
    error::{AppError, AppResult},
    models::{Game, GameId, GenreTaxonomy, Rating, UserId},
};

/// Prefix marking genre (category) columns in the catalog file
const GENRE_COLUMN_PREFIX: &str = "Cat:";

const ID_COLUMN: &str = "BGGId";
const TITLE_COLUMN: &str = "Name";
const YEAR_COLUMN: &str = "YearPublished";
const OVERVIEW_COLUMN: &str = "Description";
const COVER_COLUMN: &str = "ImagePath";

/// Loads the game catalog from a CSV file
pub fn load_catalog(path: impl AsRef<Path>) -> AppResult<CatalogStore> {
    let path = path.as_ref();
    let catalog = read_catalog(File::open(path)?)?;

    tracing::info!(
        path = %path.display(),
        games = catalog.len(),
        genres = catalog.taxonomy().len(),
        "Loaded game catalog"
    );

    Ok(catalog)
}

/// Loads the base rating set from a CSV file, keeping the first `max_users` users
pub fn load_ratings(path: impl AsRef<Path>, max_users: usize) -> AppResult<RatingStore> {
    let path = path.as_ref();
    let store = read_ratings(File::open(path)?, max_users)?;

    tracing::info!(
        path = %path.display(),
        ratings = store.len(),
        users = store.user_count(),
        "Loaded base ratings"
    );

    Ok(store)
}

/// Column positions resolved from the catalog header row
struct CatalogColumns {
    id: usize,
    title: usize,
    year: usize,
    overview: usize,
    cover: usize,
    genres: Vec<usize>,
}

impl CatalogColumns {
    fn resolve(headers: &StringRecord) -> AppResult<(Self, GenreTaxonomy)> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| AppError::DataLoad(format!("Catalog is missing column '{}'", name)))
        };

        let (genres, names): (Vec<usize>, Vec<String>) = headers
            .iter()
            .enumerate()
            .filter_map(|(i, h)| {
                h.trim()
                    .strip_prefix(GENRE_COLUMN_PREFIX)
                    .map(|name| (i, name.to_string()))
            })
            .unzip();

        let columns = Self {
            id: find(ID_COLUMN)?,
            title: find(TITLE_COLUMN)?,
            year: find(YEAR_COLUMN)?,
            overview: find(OVERVIEW_COLUMN)?,
            cover: find(COVER_COLUMN)?,
            genres,
        };

        Ok((columns, GenreTaxonomy::new(names)))
    }
}

/// Parses a catalog from any CSV source
pub fn read_catalog<R: Read>(source: R) -> AppResult<CatalogStore> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);
    let headers = reader.headers()?.clone();
    let (columns, taxonomy) = CatalogColumns::resolve(&headers)?;

    let mut games = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or_default().trim();

        let Ok(game_id) = field(columns.id).parse::<GameId>() else {
            tracing::warn!(
                line = line + 2,
                value = field(columns.id),
                "Skipping game with invalid id"
            );
            continue;
        };

        games.push(Game {
            game_id,
            title: field(columns.title).to_string(),
            year: parse_year(field(columns.year)),
            overview: field(columns.overview).to_string(),
            cover_url: field(columns.cover).to_string(),
            genre_flags: columns.genres.iter().map(|&i| parse_flag(field(i))).collect(),
        });
    }

    CatalogStore::new(taxonomy, games)
}

/// Parses a rating set from any CSV source with `BGGId,Rating,Username` rows
///
/// Usernames are mapped to "1", "2", ... in order of first appearance, counting
/// rows that are later skipped as malformed, and only users whose mapped id is
/// at most `max_users` are kept. Rows come back grouped by ascending user id,
/// file order within a user.
pub fn read_ratings<R: Read>(source: R, max_users: usize) -> AppResult<RatingStore> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);
    let mut user_mapping: HashMap<String, u64> = HashMap::new();
    let mut rows: Vec<(u64, Rating)> = Vec::new();

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or_default().trim();

        let next_id = user_mapping.len() as u64 + 1;
        let user = *user_mapping.entry(field(2).to_string()).or_insert(next_id);

        let (Ok(game_id), Ok(rating)) = (field(0).parse::<GameId>(), field(1).parse::<f64>()) else {
            tracing::warn!(line = line + 2, user, "Skipping malformed rating row");
            continue;
        };

        if user as usize <= max_users {
            rows.push((
                user,
                Rating {
                    user_id: UserId::from(user),
                    game_id,
                    rating,
                },
            ));
        }
    }

    rows.sort_by_key(|(user, _)| *user);
    Ok(RatingStore::new(rows.into_iter().map(|(_, rating)| rating).collect()))
}

fn parse_flag(raw: &str) -> bool {
    match raw.to_ascii_lowercase().as_str() {
        "" | "false" => false,
        "true" => true,
        other => other.parse::<f64>().map(|v| v != 0.0).unwrap_or(false),
    }
}

fn parse_year(raw: &str) -> i32 {
    raw.parse::<i32>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().map(|v| v as i32))
        .unwrap_or(0)
}
