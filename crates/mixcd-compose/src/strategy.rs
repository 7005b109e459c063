//! Candidate sources, tried in order until the pool is full.
//!
//! Each [`SourceStrategy`] is one fallback stage. The composer asks a
//! strategy whether it applies to the seed, then merges whatever it
//! fetches into the pool. A strategy never fails: catalog errors have
//! already been turned into empty results.

use async_trait::async_trait;

use mixcd_core::model::{ArtistRef, Track};
use mixcd_core::taxonomy::{PrimaryGenre, YearRange};

use crate::auth::Credential;
use crate::catalog::{SearchQuery, TrackCatalog};

/// Tracks requested per genre search.
pub const SEARCH_LIMIT: usize = 30;

/// Related artists consulted by the related-artists stage.
pub const RELATED_ARTIST_LIMIT: usize = 5;

/// Top tracks taken from each related artist.
pub const TRACKS_PER_RELATED_ARTIST: usize = 3;

/// What the composer learned about the seed before any stage runs.
#[derive(Debug, Clone)]
pub struct SeedContext {
    pub seed: Track,
    pub primary_artist: Option<ArtistRef>,
    pub release_year: Option<i32>,
    /// Search window around the release year, when the year is searchable.
    pub years: Option<YearRange>,
    /// Present only when the primary artist reported genre labels.
    pub genre: Option<PrimaryGenre>,
}

impl SeedContext {
    #[must_use]
    pub fn new(seed: Track) -> Self {
        Self {
            primary_artist: seed.primary_artist().cloned(),
            seed,
            release_year: None,
            years: None,
            genre: None,
        }
    }

    #[must_use]
    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self.years = YearRange::for_seed_year(year);
        self
    }

    #[must_use]
    pub fn with_genre(mut self, genre: PrimaryGenre) -> Self {
        self.genre = Some(genre);
        self
    }
}

/// One stage of the fallback cascade.
#[async_trait]
pub trait SourceStrategy: Send + Sync + std::fmt::Debug {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Whether the seed carries what this stage needs.
    fn applies_to(&self, seed: &SeedContext) -> bool;

    /// Fetch candidate tracks. Order is preserved into the pool.
    async fn fetch(
        &self,
        catalog: &dyn TrackCatalog,
        seed: &SeedContext,
        credential: &Credential,
    ) -> Vec<Track>;
}

/// Stage A: genre search bounded to the seed's release window.
#[derive(Debug, Clone, Copy)]
pub struct GenreYearSearch {
    pub limit: usize,
}

impl Default for GenreYearSearch {
    fn default() -> Self {
        Self {
            limit: SEARCH_LIMIT,
        }
    }
}

#[async_trait]
impl SourceStrategy for GenreYearSearch {
    fn name(&self) -> &'static str {
        "genre+year search"
    }

    fn applies_to(&self, seed: &SeedContext) -> bool {
        seed.genre.is_some() && seed.years.is_some()
    }

    async fn fetch(
        &self,
        catalog: &dyn TrackCatalog,
        seed: &SeedContext,
        credential: &Credential,
    ) -> Vec<Track> {
        let (Some(genre), Some(years)) = (seed.genre, seed.years) else {
            return Vec::new();
        };
        let query = SearchQuery::genre(genre).with_years(years);
        catalog.search_tracks(&query, self.limit, credential).await
    }
}

/// Stage B: genre search with no date bound.
#[derive(Debug, Clone, Copy)]
pub struct GenreOnlySearch {
    pub limit: usize,
}

impl Default for GenreOnlySearch {
    fn default() -> Self {
        Self {
            limit: SEARCH_LIMIT,
        }
    }
}

#[async_trait]
impl SourceStrategy for GenreOnlySearch {
    fn name(&self) -> &'static str {
        "genre search"
    }

    fn applies_to(&self, seed: &SeedContext) -> bool {
        seed.genre.is_some()
    }

    async fn fetch(
        &self,
        catalog: &dyn TrackCatalog,
        seed: &SeedContext,
        credential: &Credential,
    ) -> Vec<Track> {
        let Some(genre) = seed.genre else {
            return Vec::new();
        };
        catalog
            .search_tracks(&SearchQuery::genre(genre), self.limit, credential)
            .await
    }
}

/// Stage C: top tracks of artists related to the seed's primary artist.
#[derive(Debug, Clone, Copy)]
pub struct RelatedArtistsTopTracks {
    pub max_artists: usize,
    pub tracks_per_artist: usize,
}

impl Default for RelatedArtistsTopTracks {
    fn default() -> Self {
        Self {
            max_artists: RELATED_ARTIST_LIMIT,
            tracks_per_artist: TRACKS_PER_RELATED_ARTIST,
        }
    }
}

#[async_trait]
impl SourceStrategy for RelatedArtistsTopTracks {
    fn name(&self) -> &'static str {
        "related artists"
    }

    fn applies_to(&self, seed: &SeedContext) -> bool {
        seed.primary_artist.is_some()
    }

    async fn fetch(
        &self,
        catalog: &dyn TrackCatalog,
        seed: &SeedContext,
        credential: &Credential,
    ) -> Vec<Track> {
        let Some(artist) = &seed.primary_artist else {
            return Vec::new();
        };

        let related = catalog.get_related_artists(&artist.id, credential).await;
        log::debug!(
            "{} related artists for {}; using up to {}",
            related.len(),
            artist.name,
            self.max_artists
        );

        // Sequential on purpose: results are appended in related-artist order.
        let mut tracks = Vec::new();
        for other in related.iter().take(self.max_artists) {
            let top = catalog.get_top_tracks(&other.id, credential).await;
            tracks.extend(top.into_iter().take(self.tracks_per_artist));
        }
        tracks
    }
}

/// Stage D: the seed artist's own top tracks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedArtistTopTracks;

#[async_trait]
impl SourceStrategy for SeedArtistTopTracks {
    fn name(&self) -> &'static str {
        "seed artist top tracks"
    }

    fn applies_to(&self, seed: &SeedContext) -> bool {
        seed.primary_artist.is_some()
    }

    async fn fetch(
        &self,
        catalog: &dyn TrackCatalog,
        seed: &SeedContext,
        credential: &Credential,
    ) -> Vec<Track> {
        match &seed.primary_artist {
            Some(artist) => catalog.get_top_tracks(&artist.id, credential).await,
            None => Vec::new(),
        }
    }
}

/// The four stages in cascade order.
#[must_use]
pub fn default_strategies() -> Vec<Box<dyn SourceStrategy>> {
    vec![
        Box::new(GenreYearSearch::default()),
        Box::new(GenreOnlySearch::default()),
        Box::new(RelatedArtistsTopTracks::default()),
        Box::new(SeedArtistTopTracks),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_with_artist() -> Track {
        Track::new("seed", "Seed Song").with_artist(ArtistRef::new("art", "Seed Artist"))
    }

    #[test]
    fn test_context_year_window() {
        let ctx = SeedContext::new(seed_with_artist()).with_release_year(2005);
        assert_eq!(ctx.release_year, Some(2005));
        assert_eq!(ctx.years, Some(YearRange::new(2003, 2007)));
    }

    #[test]
    fn test_context_old_year_has_no_window() {
        let ctx = SeedContext::new(seed_with_artist()).with_release_year(1950);
        assert_eq!(ctx.release_year, Some(1950));
        assert!(ctx.years.is_none());
    }

    #[test]
    fn test_applicability() {
        let bare = SeedContext::new(Track::new("seed", "No Artist"));
        let full = SeedContext::new(seed_with_artist())
            .with_release_year(1999)
            .with_genre(PrimaryGenre::Rock);
        let genre_only = SeedContext::new(seed_with_artist()).with_genre(PrimaryGenre::Jazz);

        let strategies = default_strategies();
        let applies = |ctx: &SeedContext| -> Vec<bool> {
            strategies.iter().map(|s| s.applies_to(ctx)).collect()
        };

        assert_eq!(applies(&full), vec![true, true, true, true]);
        assert_eq!(applies(&genre_only), vec![false, true, true, true]);
        assert_eq!(applies(&bare), vec![false, false, false, false]);
    }

    #[test]
    fn test_default_strategy_order() {
        let names: Vec<&str> = default_strategies().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "genre+year search",
                "genre search",
                "related artists",
                "seed artist top tracks"
            ]
        );
    }
}
