pub mod tmdb;

pub use tmdb::{MovieQuery, TmdbClient, TmdbError};
