use serde::{Deserialize, Serialize};

use crate::model::ids::ArtistId;

/// A reference to an artist as listed on a track or in a related-artists
/// response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: ArtistId,
    pub name: String,
}

impl ArtistRef {
    #[must_use]
    pub fn new(id: impl Into<ArtistId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Free-text genre labels reported by the catalog for one artist.
///
/// Read once per seed artist and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistGenres {
    pub artist_id: ArtistId,
    pub genres: Vec<String>,
}

impl ArtistGenres {
    #[must_use]
    pub fn new(artist_id: impl Into<ArtistId>) -> Self {
        Self {
            artist_id: artist_id.into(),
            genres: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genres.push(genre.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}
