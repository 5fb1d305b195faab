//! The singer and song catalog.
//!
//! Loaded once from JSON at startup and treated as immutable afterwards.
//! Singers carry a voice embedding centroid; songs carry note-range and
//! genre metadata keyed by singer id.

pub mod catalog;
pub mod error;

pub use catalog::{Catalog, Gender, SingerProfile, SongEntry};
pub use error::CatalogError;
