pub mod artist;
pub mod ids;
pub mod output;
pub mod track;

pub use artist::{ArtistGenres, ArtistRef};
pub use ids::{ArtistId, TrackId};
pub use output::{OutputList, OutputTrack, TRACKS_PER_MIX};
pub use track::{parse_release_year, Track};
