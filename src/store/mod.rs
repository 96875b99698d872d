pub mod catalog;
pub mod loader;
pub mod ratings;

pub use catalog::CatalogStore;
pub use loader::{load_catalog, load_ratings};
pub use ratings::RatingStore;
