use serde::{Deserialize, Serialize};

use crate::model::ids::TrackId;
use crate::model::track::Track;

/// Number of tracks on a Mix CD, seed included.
pub const TRACKS_PER_MIX: usize = 12;

/// A track as it appears on a finished Mix CD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputTrack {
    pub id: TrackId,
    pub name: String,
    /// All credited artists, comma separated.
    pub artist: String,
    pub preview_url: Option<String>,
    pub external_url: Option<String>,
    pub album_art_url: Option<String>,
}

impl From<&Track> for OutputTrack {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.clone(),
            name: track.name.clone(),
            artist: track.artist_display(),
            preview_url: track.preview_url.clone(),
            external_url: track.external_url.clone(),
            album_art_url: track.album_art_url.clone(),
        }
    }
}

/// The ordered track list of a Mix CD.
///
/// The first entry is always the seed track and ids are unique.
pub type OutputList = Vec<OutputTrack>;
