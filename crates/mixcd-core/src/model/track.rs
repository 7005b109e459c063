use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::artist::ArtistRef;
use crate::model::ids::TrackId;

/// A track as received from the streaming catalog.
///
/// Tracks are read-only snapshots; the composer normalizes them into
/// [`OutputTrack`](crate::model::OutputTrack) records once selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,

    /// Credited artists in catalog order. The first entry is the primary
    /// artist.
    pub artists: Vec<ArtistRef>,

    /// Catalog popularity (0-100), if reported.
    pub popularity: Option<u32>,

    pub preview_url: Option<String>,

    /// Canonical web page for the track.
    pub external_url: Option<String>,

    /// First (largest) album image.
    pub album_art_url: Option<String>,

    /// Album release date as reported (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
    pub release_date: Option<String>,
}

impl Track {
    #[must_use]
    pub fn new(id: impl Into<TrackId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artists: Vec::new(),
            popularity: None,
            preview_url: None,
            external_url: None,
            album_art_url: None,
            release_date: None,
        }
    }

    #[must_use]
    pub fn with_artist(mut self, artist: ArtistRef) -> Self {
        self.artists.push(artist);
        self
    }

    #[must_use]
    pub fn with_popularity(mut self, popularity: u32) -> Self {
        self.popularity = Some(popularity);
        self
    }

    #[must_use]
    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_preview_url(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_external_url(mut self, url: impl Into<String>) -> Self {
        self.external_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_album_art_url(mut self, url: impl Into<String>) -> Self {
        self.album_art_url = Some(url.into());
        self
    }

    /// The first credited artist, if any.
    #[must_use]
    pub fn primary_artist(&self) -> Option<&ArtistRef> {
        self.artists.first()
    }

    /// Popularity used for ranking; absent popularity ranks as 0.
    #[must_use]
    pub fn rank(&self) -> u32 {
        self.popularity.unwrap_or(0)
    }

    /// All artist names joined for display, e.g. `"Daft Punk, Pharrell Williams"`.
    #[must_use]
    pub fn artist_display(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Year component of the album release date.
    ///
    /// # Errors
    /// Returns [`Error::InvalidReleaseDate`] when the date is missing or its
    /// leading component is not an integer.
    pub fn release_year(&self) -> Result<i32> {
        let date = self
            .release_date
            .as_deref()
            .ok_or_else(|| Error::InvalidReleaseDate(String::new()))?;
        parse_release_year(date)
    }
}

/// Parse the year out of a catalog release date.
///
/// # Errors
/// Returns [`Error::InvalidReleaseDate`] if the year component is not an
/// integer.
pub fn parse_release_year(date: &str) -> Result<i32> {
    let year = date.trim().split('-').next().unwrap_or_default();
    year.parse::<i32>()
        .map_err(|_| Error::InvalidReleaseDate(date.to_string()))
}
