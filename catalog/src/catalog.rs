use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use singfit_pitch::note::parse_note;

use crate::error::CatalogError;

/// Singer gender as recorded in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// One singer: identity plus a voice embedding centroid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingerProfile {
    pub id: String,
    pub name: String,
    /// Mean voice embedding over the singer's reference recordings.
    pub embedding: Vec<f32>,
    /// Missing for groups and unlabeled entries.
    #[serde(default)]
    pub gender: Option<Gender>,
}

/// One song in a singer's repertoire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongEntry {
    pub title: String,
    /// Lowest melody note as a name, e.g. "C3".
    pub lowest_note: String,
    /// Highest melody note as a name, e.g. "A4".
    pub highest_note: String,
    /// Editorial genre labels, e.g. "발라드".
    #[serde(default)]
    pub genre_tags: Vec<String>,
    /// Model-predicted style tags, lowercase English, e.g. "k-ballad".
    #[serde(default)]
    pub predicted_tags: Vec<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
}

impl SongEntry {
    /// Semitone of `lowest_note`, if it parses.
    pub fn lowest_semitone(&self) -> Option<i32> {
        parse_note(&self.lowest_note)
    }

    /// Semitone of `highest_note`, if it parses.
    pub fn highest_semitone(&self) -> Option<i32> {
        parse_note(&self.highest_note)
    }
}

/// The full singer and song catalog. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    singers: Vec<SingerProfile>,
    /// Songs keyed by singer id.
    songs: HashMap<String, Vec<SongEntry>>,
}

impl Catalog {
    /// Assembles and validates a catalog from in-memory parts.
    pub fn new(
        singers: Vec<SingerProfile>,
        songs: HashMap<String, Vec<SongEntry>>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self { singers, songs };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses a catalog from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashMap::new();
        let dim = self.singers.first().map_or(0, |s| s.embedding.len());
        for singer in &self.singers {
            if seen.insert(singer.id.as_str(), ()).is_some() {
                return Err(CatalogError::DuplicateSinger(singer.id.clone()));
            }
            if singer.embedding.len() != dim {
                return Err(CatalogError::EmbeddingDimension {
                    id: singer.id.clone(),
                    expected: dim,
                    got: singer.embedding.len(),
                });
            }
        }
        for id in self.songs.keys() {
            if !seen.contains_key(id.as_str()) {
                return Err(CatalogError::UnknownSinger(id.clone()));
            }
        }
        Ok(())
    }

    pub fn singers(&self) -> &[SingerProfile] {
        &self.singers
    }

    pub fn singer(&self, id: &str) -> Option<&SingerProfile> {
        self.singers.iter().find(|s| s.id == id)
    }

    /// The singer's songs, empty if none are recorded.
    pub fn songs_for(&self, singer_id: &str) -> &[SongEntry] {
        self.songs.get(singer_id).map_or(&[], Vec::as_slice)
    }

    /// Embedding dimensionality, 0 for an empty catalog.
    pub fn embedding_dim(&self) -> usize {
        self.singers.first().map_or(0, |s| s.embedding.len())
    }

    pub fn len(&self) -> usize {
        self.singers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.singers.is_empty()
    }
}
