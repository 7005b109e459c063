//! Read access to the streaming catalog.
//!
//! [`TrackCatalog`] is the capability set the composer consumes. Every
//! method degrades to `None` or an empty list on failure: implementations
//! log what went wrong and never return an error.

pub mod resilience;
pub mod spotify;

use async_trait::async_trait;

use mixcd_core::model::{ArtistGenres, ArtistId, ArtistRef, Track, TrackId};
use mixcd_core::taxonomy::{PrimaryGenre, YearRange};

use crate::auth::Credential;

pub use spotify::SpotifyClient;

/// A genre search, optionally bounded to a release-year window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery {
    pub genre: PrimaryGenre,
    pub years: Option<YearRange>,
}

impl SearchQuery {
    #[must_use]
    pub const fn genre(genre: PrimaryGenre) -> Self {
        Self { genre, years: None }
    }

    #[must_use]
    pub const fn with_years(mut self, years: YearRange) -> Self {
        self.years = Some(years);
        self
    }

    /// Render in catalog search syntax, e.g. `genre:"rock" year:2003-2007`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        match self.years {
            Some(years) => format!("genre:\"{}\" year:{}", self.genre, years),
            None => format!("genre:\"{}\"", self.genre),
        }
    }
}

/// Catalog operations used by the composer.
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// Fetch a single track.
    async fn get_track(&self, id: &TrackId, credential: &Credential) -> Option<Track>;

    /// Fetch an artist's genre labels.
    async fn get_artist_genres(&self, id: &ArtistId, credential: &Credential)
        -> Option<ArtistGenres>;

    /// Search tracks by genre (and optional year window).
    async fn search_tracks(
        &self,
        query: &SearchQuery,
        limit: usize,
        credential: &Credential,
    ) -> Vec<Track>;

    /// Artists the catalog considers similar to `artist_id`.
    async fn get_related_artists(
        &self,
        artist_id: &ArtistId,
        credential: &Credential,
    ) -> Vec<ArtistRef>;

    /// An artist's most popular tracks.
    async fn get_top_tracks(&self, artist_id: &ArtistId, credential: &Credential) -> Vec<Track>;
}

#[async_trait]
impl<T: TrackCatalog + ?Sized> TrackCatalog for &T {
    async fn get_track(&self, id: &TrackId, credential: &Credential) -> Option<Track> {
        (**self).get_track(id, credential).await
    }

    async fn get_artist_genres(
        &self,
        id: &ArtistId,
        credential: &Credential,
    ) -> Option<ArtistGenres> {
        (**self).get_artist_genres(id, credential).await
    }

    async fn search_tracks(
        &self,
        query: &SearchQuery,
        limit: usize,
        credential: &Credential,
    ) -> Vec<Track> {
        (**self).search_tracks(query, limit, credential).await
    }

    async fn get_related_artists(
        &self,
        artist_id: &ArtistId,
        credential: &Credential,
    ) -> Vec<ArtistRef> {
        (**self).get_related_artists(artist_id, credential).await
    }

    async fn get_top_tracks(&self, artist_id: &ArtistId, credential: &Credential) -> Vec<Track> {
        (**self).get_top_tracks(artist_id, credential).await
    }
}
