//! Mix composition: seed lookup, fallback cascade, final selection.

use mixcd_core::model::{OutputList, TrackId, TRACKS_PER_MIX};
use mixcd_core::taxonomy::{classify, PrimaryGenre, YearRange};
use serde::Serialize;

use crate::auth::Credential;
use crate::catalog::TrackCatalog;
use crate::error::ComposeError;
use crate::pool::{assemble, TrackPool};
use crate::strategy::{default_strategies, SeedContext, SourceStrategy};

/// Outcome of one stage of the cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: &'static str,
    /// Raw tracks this stage added to the pool.
    pub fetched: usize,
    /// Pool size after the stage ran.
    pub pool_size: usize,
}

/// A composed mix plus what was learned on the way.
#[derive(Debug, Clone, Serialize)]
pub struct Composition {
    pub tracks: OutputList,
    pub genre: Option<PrimaryGenre>,
    pub years: Option<YearRange>,
    pub stages: Vec<StageReport>,
}

/// Builds Mix CD track lists from a seed track.
#[derive(Debug)]
pub struct Composer<C> {
    catalog: C,
    strategies: Vec<Box<dyn SourceStrategy>>,
    target_len: usize,
}

impl<C: TrackCatalog> Composer<C> {
    /// A composer using the default four-stage cascade and a 12-track target.
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            strategies: default_strategies(),
            target_len: TRACKS_PER_MIX,
        }
    }

    /// Override the output length. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_target_len(mut self, target_len: usize) -> Self {
        self.target_len = target_len.max(1);
        self
    }

    #[must_use]
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn SourceStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// Compose a mix and return only the track list.
    ///
    /// # Errors
    /// Returns [`ComposeError::SeedUnavailable`] when the seed track cannot
    /// be fetched. No other failure aborts composition.
    pub async fn compose_from_seed(
        &self,
        seed_id: &TrackId,
        credential: &Credential,
    ) -> Result<OutputList, ComposeError> {
        self.compose(seed_id, credential).await.map(|c| c.tracks)
    }

    /// Compose a mix, reporting the seed's classification and each stage.
    ///
    /// # Errors
    /// Returns [`ComposeError::SeedUnavailable`] when the seed track cannot
    /// be fetched.
    pub async fn compose(
        &self,
        seed_id: &TrackId,
        credential: &Credential,
    ) -> Result<Composition, ComposeError> {
        let context = self.prepare_seed(seed_id, credential).await?;

        let mut pool = TrackPool::new();
        let mut stages = Vec::new();

        for strategy in &self.strategies {
            if pool.len() >= self.target_len {
                log::debug!(
                    "Pool has {} candidates; skipping remaining stages",
                    pool.len()
                );
                break;
            }
            if !strategy.applies_to(&context) {
                log::debug!("Stage '{}' does not apply to seed", strategy.name());
                continue;
            }

            let fetched = strategy.fetch(&self.catalog, &context, credential).await;
            let count = fetched.len();
            pool.extend(fetched);
            log::info!(
                "Stage '{}' added {} tracks (pool: {})",
                strategy.name(),
                count,
                pool.len()
            );
            stages.push(StageReport {
                stage: strategy.name(),
                fetched: count,
                pool_size: pool.len(),
            });
        }

        let tracks = assemble(&context.seed, pool, self.target_len);
        log::info!("Composed {} tracks from seed {}", tracks.len(), seed_id);

        Ok(Composition {
            tracks,
            genre: context.genre,
            years: context.years,
            stages,
        })
    }

    async fn prepare_seed(
        &self,
        seed_id: &TrackId,
        credential: &Credential,
    ) -> Result<SeedContext, ComposeError> {
        let seed = self
            .catalog
            .get_track(seed_id, credential)
            .await
            .ok_or_else(|| ComposeError::SeedUnavailable {
                track_id: seed_id.clone(),
            })?;
        log::info!("Seed: {} by {}", seed.name, seed.artist_display());

        let mut context = SeedContext::new(seed);

        match context.seed.release_year() {
            Ok(year) => {
                context = context.with_release_year(year);
                match context.years {
                    Some(years) => log::debug!("Seed year {year}; era window {years}"),
                    None => log::debug!("Seed year {year} is too early for an era search"),
                }
            }
            Err(e) => log::info!("No usable release year for seed: {e}"),
        }

        let Some(artist) = context.primary_artist.clone() else {
            log::warn!("Seed {} has no credited artist", seed_id);
            return Ok(context);
        };

        match self
            .catalog
            .get_artist_genres(&artist.id, credential)
            .await
        {
            Some(genres) if !genres.is_empty() => {
                let genre = classify(&genres.genres);
                log::info!("{} classified as {} from {:?}", artist.name, genre, genres.genres);
                context = context.with_genre(genre);
            }
            _ => log::info!("No genre labels for {}; skipping genre searches", artist.name),
        }

        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mixcd_core::model::{ArtistGenres, ArtistId, ArtistRef, Track};

    use crate::catalog::SearchQuery;

    /// A catalog that knows only the seed and its artist.
    #[derive(Debug)]
    struct SeedOnlyCatalog;

    #[async_trait]
    impl TrackCatalog for SeedOnlyCatalog {
        async fn get_track(&self, id: &TrackId, _: &Credential) -> Option<Track> {
            (id.as_str() == "seed").then(|| {
                Track::new("seed", "Seed")
                    .with_artist(ArtistRef::new("artist", "Artist"))
                    .with_release_date("2001-05-01")
            })
        }

        async fn get_artist_genres(&self, id: &ArtistId, _: &Credential) -> Option<ArtistGenres> {
            Some(ArtistGenres::new(id.clone()).with_genre("indie rock"))
        }

        async fn search_tracks(&self, _: &SearchQuery, _: usize, _: &Credential) -> Vec<Track> {
            Vec::new()
        }

        async fn get_related_artists(&self, _: &ArtistId, _: &Credential) -> Vec<ArtistRef> {
            Vec::new()
        }

        async fn get_top_tracks(&self, _: &ArtistId, _: &Credential) -> Vec<Track> {
            Vec::new()
        }
    }

    #[tokio::test]
    async fn test_compose_with_empty_sources_returns_seed() {
        let composer = Composer::new(SeedOnlyCatalog);
        let credential = Credential::bearer("token");

        let composition = composer
            .compose(&TrackId::new("seed"), &credential)
            .await
            .unwrap();

        assert_eq!(composition.tracks.len(), 1);
        assert_eq!(composition.tracks[0].id.as_str(), "seed");
        assert_eq!(composition.genre, Some(PrimaryGenre::Rock));
        assert_eq!(composition.years, Some(YearRange::new(1999, 2003)));
        assert_eq!(composition.stages.len(), 4);
        assert!(composition.stages.iter().all(|s| s.fetched == 0));
    }

    #[tokio::test]
    async fn test_missing_seed_is_an_error() {
        let composer = Composer::new(SeedOnlyCatalog);
        let result = composer
            .compose_from_seed(&TrackId::new("nope"), &Credential::bearer("token"))
            .await;

        match result {
            Err(ComposeError::SeedUnavailable { track_id }) => {
                assert_eq!(track_id.as_str(), "nope");
            }
            other => panic!("expected SeedUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_target_len_floor() {
        let composer = Composer::new(SeedOnlyCatalog).with_target_len(0);
        assert_eq!(composer.target_len(), 1);
    }
}
