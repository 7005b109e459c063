pub mod auth;
pub mod compose;
pub mod config;
pub mod now_playing;
pub mod search;

use anyhow::Result;
use mixcd_compose::{Config, Credential};
use mixcd_core::model::Track;

/// The configured bearer credential, or a hint on how to get one.
pub fn credential(config: &Config) -> Result<Credential> {
    config
        .access_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(Credential::bearer)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No access token configured.\n\n\
                 Pass --token, set MIXCD_ACCESS_TOKEN, or run 'mixcd auth url' to obtain one."
            )
        })
}

/// One-line listing used by search and now-playing output.
pub fn describe_track(track: &Track) -> String {
    let artist = track.artist_display();
    let year = track
        .release_year()
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    format!("{} - {}{}  [{}]", track.name, artist, year, track.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixcd_core::model::ArtistRef;

    #[test]
    fn test_credential_requires_token() {
        assert!(credential(&Config::default()).is_err());

        let config = Config {
            access_token: Some(String::new()),
            ..Config::default()
        };
        assert!(credential(&config).is_err());

        let config = Config {
            access_token: Some("BQD".to_string()),
            ..Config::default()
        };
        assert_eq!(credential(&config).unwrap().token(), "BQD");
    }

    #[test]
    fn test_describe_track() {
        let track = Track::new("4uLU6hMCjMI75M1A2tKUQC", "Never Gonna Give You Up")
            .with_artist(ArtistRef::new("0gxyHStUsqpMadRV0Di1Qt", "Rick Astley"))
            .with_release_date("1987-11-12");
        assert_eq!(
            describe_track(&track),
            "Never Gonna Give You Up - Rick Astley (1987)  [4uLU6hMCjMI75M1A2tKUQC]"
        );

        let undated = Track::new("x", "Untitled");
        assert_eq!(describe_track(&undated), "Untitled -   [x]");
    }
}
