//! Board game recommendations: genre filtering, rating-based collaborative
//! filtering and genre-similarity recommendations over a static catalog.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
