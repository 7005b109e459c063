//! Candidate pool and final track selection.

use std::cmp::Reverse;
use std::collections::HashSet;

use mixcd_core::model::{OutputList, OutputTrack, Track, TrackId};

/// Raw candidates accumulated across stages, in arrival order.
///
/// The pool is not deduplicated; its length is the raw candidate count
/// that stage short-circuiting is based on.
#[derive(Debug, Clone, Default)]
pub struct TrackPool {
    tracks: Vec<Track>,
}

impl TrackPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Drop the seed, then order by descending popularity.
    ///
    /// The sort is stable: equally popular tracks keep pool order.
    #[must_use]
    pub fn into_ranked(self, seed_id: &TrackId) -> Vec<Track> {
        let mut ranked: Vec<Track> = self
            .tracks
            .into_iter()
            .filter(|t| &t.id != seed_id)
            .collect();
        ranked.sort_by_key(|t| Reverse(t.rank()));
        ranked
    }
}

impl FromIterator<Track> for TrackPool {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self {
            tracks: iter.into_iter().collect(),
        }
    }
}

/// Build the final list: the seed first, then ranked pool tracks with
/// unseen ids, up to `target_len` entries.
#[must_use]
pub fn assemble(seed: &Track, pool: TrackPool, target_len: usize) -> OutputList {
    let ranked = pool.into_ranked(&seed.id);

    let mut seen: HashSet<TrackId> = HashSet::with_capacity(target_len);
    let mut output = Vec::with_capacity(target_len);

    seen.insert(seed.id.clone());
    output.push(OutputTrack::from(seed));

    for track in &ranked {
        if output.len() >= target_len {
            break;
        }
        if seen.insert(track.id.clone()) {
            output.push(OutputTrack::from(track));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixcd_core::model::TRACKS_PER_MIX;

    fn track(id: &str, popularity: Option<u32>) -> Track {
        let t = Track::new(id, format!("Song {id}"));
        match popularity {
            Some(p) => t.with_popularity(p),
            None => t,
        }
    }

    fn ids(output: &OutputList) -> Vec<&str> {
        output.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_pool_counts_duplicates() {
        let mut pool = TrackPool::new();
        pool.extend([track("a", Some(1)), track("a", Some(1))]);
        assert_eq!(pool.len(), 2);
        assert!(!pool.is_empty());
    }

    #[test]
    fn test_ranked_is_stable_and_drops_seed() {
        let pool: TrackPool = [
            track("x", Some(50)),
            track("seed", Some(99)),
            track("y", None),
            track("z", Some(50)),
            track("w", Some(0)),
        ]
        .into_iter()
        .collect();

        let ranked = pool.into_ranked(&TrackId::new("seed"));
        let order: Vec<&str> = ranked.iter().map(|t| t.id.as_str()).collect();
        // y (absent) and w (0) tie and keep pool order
        assert_eq!(order, vec!["x", "z", "y", "w"]);
    }

    #[test]
    fn test_assemble_seed_first_and_unique() {
        let seed = track("seed", Some(10));
        let pool: TrackPool = [
            track("a", Some(40)),
            track("b", Some(90)),
            track("a", Some(40)),
            track("seed", Some(100)),
            track("c", Some(40)),
        ]
        .into_iter()
        .collect();

        let output = assemble(&seed, pool, TRACKS_PER_MIX);
        assert_eq!(ids(&output), vec!["seed", "b", "a", "c"]);
    }

    #[test]
    fn test_assemble_keeps_first_of_duplicate_ids() {
        let seed = track("seed", None);
        // Same id with different popularity: the more popular copy ranks
        // first and wins.
        let pool: TrackPool = [track("a", Some(10)), track("b", Some(20)), track("a", Some(30))]
            .into_iter()
            .collect();

        let output = assemble(&seed, pool, TRACKS_PER_MIX);
        assert_eq!(ids(&output), vec!["seed", "a", "b"]);
    }

    #[test]
    fn test_assemble_truncates_to_target() {
        let seed = track("seed", None);
        let pool: TrackPool = (0..30)
            .map(|i| track(&format!("t{i}"), Some(100 - i)))
            .collect();

        let output = assemble(&seed, pool, TRACKS_PER_MIX);
        assert_eq!(output.len(), TRACKS_PER_MIX);
        assert_eq!(output[0].id.as_str(), "seed");
        assert_eq!(output[1].id.as_str(), "t0");
        assert_eq!(output[11].id.as_str(), "t10");
    }

    #[test]
    fn test_assemble_empty_pool_yields_seed_only() {
        let seed = track("seed", Some(5));
        let output = assemble(&seed, TrackPool::new(), TRACKS_PER_MIX);
        assert_eq!(ids(&output), vec!["seed"]);
    }
}
