use crate::{
    models::{Game, GenreId},
    services::{similarity::dot, GENRE_FILTER_LIMIT},
    store::CatalogStore,
};

/// Games having at least one of the requested genres
///
/// Builds a selection vector over the taxonomy (1 for each requested genre)
/// and keeps the games whose genre row has a positive dot product with it.
/// Results are in catalog order, capped at [`GENRE_FILTER_LIMIT`]. An empty
/// request selects nothing; unknown genre ids are ignored.
pub fn filter_by_genres<'a>(catalog: &'a CatalogStore, genre_ids: &[GenreId]) -> Vec<&'a Game> {
    if genre_ids.is_empty() {
        return Vec::new();
    }

    let taxonomy = catalog.taxonomy();
    let mut selection = vec![0.0; taxonomy.len()];
    for &id in genre_ids {
        match taxonomy.position(id) {
            Some(position) => selection[position] = 1.0,
            None => tracing::debug!(genre_id = id, "Ignoring unknown genre id"),
        }
    }

    catalog
        .games()
        .iter()
        .filter(|game| dot(&game.genre_vector(), &selection) > 0.0)
        .take(GENRE_FILTER_LIMIT)
        .collect()
}
