//! Spotify Web API catalog client.
//!
//! Fetches tracks, artist genres, genre searches, related artists, and top
//! tracks with a caller-supplied bearer token. Raw responses are mapped
//! onto the core [`Track`] model here so the rest of the crate never sees
//! the wire format.
//!
//! The [`TrackCatalog`] implementation funnels every request through
//! [`guarded`], which logs failures and turns them into "no data".

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use mixcd_core::model::{ArtistGenres, ArtistId, ArtistRef, Track, TrackId};

use crate::auth::Credential;
use crate::catalog::resilience::RateLimiter;
use crate::catalog::{SearchQuery, TrackCatalog};
use crate::config::Config;
use crate::error::{CatalogError, CatalogResult};

/// Upper bound the search endpoint accepts for `limit`.
const MAX_SEARCH_LIMIT: usize = 50;

// ---------------------------------------------------------------------------
// API response types (private -- mapped onto mixcd_core::model)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    /// Null for local files.
    id: Option<String>,
    name: String,
    #[serde(default)]
    artists: Vec<SpotifyArtistRef>,
    popularity: Option<u32>,
    preview_url: Option<String>,
    #[serde(default)]
    external_urls: ExternalUrls,
    album: Option<SpotifyAlbum>,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtistRef {
    id: Option<String>,
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpotifyAlbum {
    #[serde(default)]
    images: Vec<SpotifyImage>,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpotifyImage {
    url: String,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtist {
    id: String,
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<Option<SpotifyTrack>>,
}

#[derive(Debug, Deserialize)]
struct RelatedArtistsResponse {
    #[serde(default)]
    artists: Vec<SpotifyArtistRef>,
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    #[serde(default)]
    tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
struct CurrentlyPlayingResponse {
    item: Option<SpotifyTrack>,
}

impl SpotifyTrack {
    fn into_track(self) -> Option<Track> {
        let id = self.id?;
        let (album_art_url, release_date) = match self.album {
            Some(album) => (
                album.images.into_iter().next().map(|i| i.url),
                album.release_date,
            ),
            None => (None, None),
        };

        Some(Track {
            id: TrackId::new(id),
            name: self.name,
            artists: self
                .artists
                .into_iter()
                .filter_map(SpotifyArtistRef::into_artist_ref)
                .collect(),
            popularity: self.popularity,
            preview_url: self.preview_url,
            external_url: self.external_urls.spotify,
            album_art_url,
            release_date,
        })
    }
}

impl SpotifyArtistRef {
    fn into_artist_ref(self) -> Option<ArtistRef> {
        Some(ArtistRef::new(self.id?, self.name))
    }
}

fn into_tracks(items: impl IntoIterator<Item = SpotifyTrack>) -> Vec<Track> {
    items.into_iter().filter_map(SpotifyTrack::into_track).collect()
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Spotify Web API client.
///
/// Wraps a [`reqwest::Client`] with a per-request timeout, the API base
/// URL, the market used for searches and top tracks, and an optional
/// [`RateLimiter`]. Cloning is cheap and clones share the limiter.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: Url,
    market: String,
    rate_limiter: Option<RateLimiter>,
}

impl SpotifyClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> CatalogResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("mixcd/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()?;

        let raw_base = config.api_base_url.trim_end_matches('/');
        let base_url = Url::parse(raw_base)
            .map_err(|e| CatalogError::InvalidUrl(format!("{raw_base}: {e}")))?;

        Ok(Self {
            http,
            base_url,
            market: config.market.clone(),
            rate_limiter: config.requests_per_second.map(RateLimiter::new),
        })
    }

    /// Append `segments` to the API base, percent-encoding each one.
    ///
    /// Ids are caller-supplied, so a `/` inside one stays inside its
    /// segment instead of changing the endpoint.
    fn endpoint(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET the endpoint at `segments` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        credential: &Credential,
    ) -> CatalogResult<T> {
        let response = self.send(segments, query, credential).await?;
        let endpoint = response.url().path().to_string();
        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse {
                endpoint,
                message: e.to_string(),
            })
    }

    async fn send(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        credential: &Credential,
    ) -> CatalogResult<reqwest::Response> {
        let url = self.endpoint(segments)?;
        let endpoint = url.path().to_string();

        if let Some(limiter) = &self.rate_limiter {
            limiter.acquire().await;
        }

        log::debug!("Fetching {} {:?}", url, query);

        let response = self
            .http
            .get(url)
            .bearer_auth(credential.token())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(match status {
            StatusCode::UNAUTHORIZED => CatalogError::Unauthorized { endpoint },
            StatusCode::NOT_FOUND => CatalogError::NotFound { entity: endpoint },
            StatusCode::TOO_MANY_REQUESTS => CatalogError::RateLimited { endpoint },
            _ => CatalogError::Http {
                endpoint,
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            },
        })
    }

    /// Fetch a track by id.
    pub async fn fetch_track(&self, id: &TrackId, credential: &Credential) -> CatalogResult<Track> {
        let raw: SpotifyTrack = self
            .get_json(&["tracks", id.as_str()], &[], credential)
            .await?;
        raw.into_track().ok_or_else(|| CatalogError::NotFound {
            entity: format!("track {id}"),
        })
    }

    /// Fetch an artist's genre labels.
    pub async fn fetch_artist_genres(
        &self,
        id: &ArtistId,
        credential: &Credential,
    ) -> CatalogResult<ArtistGenres> {
        let raw: SpotifyArtist = self
            .get_json(&["artists", id.as_str()], &[], credential)
            .await?;
        Ok(ArtistGenres {
            artist_id: ArtistId::new(raw.id),
            genres: raw.genres,
        })
    }

    /// Run a track search with a raw query string.
    ///
    /// Accepts both field filters (`genre:"rock" year:2003-2007`) and free
    /// text, so it also serves seed selection.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        credential: &Credential,
    ) -> CatalogResult<Vec<Track>> {
        let limit = limit.clamp(1, MAX_SEARCH_LIMIT).to_string();
        let raw: SearchResponse = self
            .get_json(
                &["search"],
                &[
                    ("q", query),
                    ("type", "track"),
                    ("limit", limit.as_str()),
                    ("market", self.market.as_str()),
                ],
                credential,
            )
            .await?;

        Ok(raw
            .tracks
            .map(|page| into_tracks(page.items.into_iter().flatten()))
            .unwrap_or_default())
    }

    /// Fetch artists related to `artist_id`.
    pub async fn fetch_related_artists(
        &self,
        artist_id: &ArtistId,
        credential: &Credential,
    ) -> CatalogResult<Vec<ArtistRef>> {
        let raw: RelatedArtistsResponse = self
            .get_json(
                &["artists", artist_id.as_str(), "related-artists"],
                &[],
                credential,
            )
            .await?;
        Ok(raw
            .artists
            .into_iter()
            .filter_map(SpotifyArtistRef::into_artist_ref)
            .collect())
    }

    /// Fetch an artist's top tracks in the configured market.
    pub async fn fetch_top_tracks(
        &self,
        artist_id: &ArtistId,
        credential: &Credential,
    ) -> CatalogResult<Vec<Track>> {
        let raw: TopTracksResponse = self
            .get_json(
                &["artists", artist_id.as_str(), "top-tracks"],
                &[("market", self.market.as_str())],
                credential,
            )
            .await?;
        Ok(into_tracks(raw.tracks))
    }

    /// The track currently playing for the token's user.
    ///
    /// Returns `Ok(None)` when nothing is playing (HTTP 204 or no item).
    pub async fn currently_playing(&self, credential: &Credential) -> CatalogResult<Option<Track>> {
        let response = self
            .send(&["me", "player", "currently-playing"], &[], credential)
            .await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let endpoint = response.url().path().to_string();
        let raw: CurrentlyPlayingResponse =
            response.json().await.map_err(|e| CatalogError::Parse {
                endpoint,
                message: e.to_string(),
            })?;
        Ok(raw.item.and_then(SpotifyTrack::into_track))
    }
}

/// Absorb a failed catalog request: log it and report "no data".
pub(crate) fn guarded<T, D: Debug + ?Sized>(
    operation: &str,
    subject: &D,
    result: CatalogResult<T>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Catalog {} failed for {:?}, skipping: {}", operation, subject, e);
            None
        }
    }
}

#[async_trait]
impl TrackCatalog for SpotifyClient {
    async fn get_track(&self, id: &TrackId, credential: &Credential) -> Option<Track> {
        guarded("track lookup", id, self.fetch_track(id, credential).await)
    }

    async fn get_artist_genres(
        &self,
        id: &ArtistId,
        credential: &Credential,
    ) -> Option<ArtistGenres> {
        guarded(
            "artist lookup",
            id,
            self.fetch_artist_genres(id, credential).await,
        )
    }

    async fn search_tracks(
        &self,
        query: &SearchQuery,
        limit: usize,
        credential: &Credential,
    ) -> Vec<Track> {
        let q = query.to_query_string();
        log::debug!("Searching with query: {}", q);
        guarded("search", q.as_str(), self.search(&q, limit, credential).await).unwrap_or_default()
    }

    async fn get_related_artists(
        &self,
        artist_id: &ArtistId,
        credential: &Credential,
    ) -> Vec<ArtistRef> {
        guarded(
            "related artists",
            artist_id,
            self.fetch_related_artists(artist_id, credential).await,
        )
        .unwrap_or_default()
    }

    async fn get_top_tracks(&self, artist_id: &ArtistId, credential: &Credential) -> Vec<Track> {
        guarded(
            "top tracks",
            artist_id,
            self.fetch_top_tracks(artist_id, credential).await,
        )
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK_JSON: &str = r#"{
        "id": "3n3Ppam7vgaVa1iaRUc9Lp",
        "name": "Mr. Brightside",
        "popularity": 86,
        "preview_url": null,
        "external_urls": {"spotify": "https://open.spotify.com/track/3n3Ppam7vgaVa1iaRUc9Lp"},
        "artists": [
            {"id": "0C0XlULifJtAgn6ZNCW2eu", "name": "The Killers"}
        ],
        "album": {
            "name": "Hot Fuss",
            "release_date": "2004-06-07",
            "images": [
                {"url": "https://i.scdn.co/image/640", "height": 640, "width": 640},
                {"url": "https://i.scdn.co/image/300", "height": 300, "width": 300}
            ]
        }
    }"#;

    #[test]
    fn test_spotify_client_creation() {
        let client = SpotifyClient::new(&Config::default()).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("SpotifyClient"));
        assert!(client.rate_limiter.is_none());
    }

    #[test]
    fn test_spotify_client_with_rate_limit() {
        let config = Config {
            requests_per_second: Some(5),
            api_base_url: "http://localhost:9000/v1/".to_string(),
            ..Config::default()
        };
        let client = SpotifyClient::new(&config).unwrap();
        assert!(client.rate_limiter.is_some());
        assert_eq!(client.base_url.as_str(), "http://localhost:9000/v1");
    }

    #[test]
    fn test_track_deserialize_and_map() {
        let raw: SpotifyTrack = serde_json::from_str(TRACK_JSON).unwrap();
        let track = raw.into_track().unwrap();

        assert_eq!(track.id.as_str(), "3n3Ppam7vgaVa1iaRUc9Lp");
        assert_eq!(track.name, "Mr. Brightside");
        assert_eq!(track.popularity, Some(86));
        assert_eq!(track.artist_display(), "The Killers");
        assert_eq!(track.album_art_url.as_deref(), Some("https://i.scdn.co/image/640"));
        assert_eq!(track.release_year().unwrap(), 2004);
        assert!(track.preview_url.is_none());
    }

    #[test]
    fn test_local_track_without_id_is_dropped() {
        let json = r#"{"id": null, "name": "Local file", "artists": []}"#;
        let raw: SpotifyTrack = serde_json::from_str(json).unwrap();
        assert!(raw.into_track().is_none());
    }

    #[test]
    fn test_track_without_album_images() {
        let json = r#"{
            "id": "t1", "name": "Song",
            "artists": [{"id": "a1", "name": "Band"}],
            "album": {"images": [], "release_date": "1999"}
        }"#;
        let track = serde_json::from_str::<SpotifyTrack>(json)
            .unwrap()
            .into_track()
            .unwrap();
        assert!(track.album_art_url.is_none());
        assert!(track.popularity.is_none());
        assert!(track.external_url.is_none());
        assert_eq!(track.release_year().unwrap(), 1999);
    }

    #[test]
    fn test_search_response_skips_null_items() {
        let json = format!(r#"{{"tracks": {{"items": [{TRACK_JSON}, null]}}}}"#);
        let raw: SearchResponse = serde_json::from_str(&json).unwrap();
        let tracks = into_tracks(raw.tracks.unwrap().items.into_iter().flatten());
        assert_eq!(tracks.len(), 1);
    }

    #[test]
    fn test_artist_genres_default_empty() {
        let raw: SpotifyArtist = serde_json::from_str(r#"{"id": "a1", "name": "X"}"#).unwrap();
        assert!(raw.genres.is_empty());
    }

    #[test]
    fn test_related_artists_deserialize() {
        let json = r#"{"artists": [
            {"id": "a1", "name": "Franz Ferdinand", "genres": ["indie rock"]},
            {"id": "a2", "name": "Kaiser Chiefs"}
        ]}"#;
        let raw: RelatedArtistsResponse = serde_json::from_str(json).unwrap();
        let artists: Vec<ArtistRef> = raw
            .artists
            .into_iter()
            .filter_map(SpotifyArtistRef::into_artist_ref)
            .collect();
        assert_eq!(artists.len(), 2);
        assert_eq!(artists[1].name, "Kaiser Chiefs");
    }

    #[test]
    fn test_endpoint_joins_segments_under_base_path() {
        let client = SpotifyClient::new(&Config::default()).unwrap();
        let url = client
            .endpoint(&["artists", "0C0XlULifJtAgn6ZNCW2eu", "top-tracks"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.spotify.com/v1/artists/0C0XlULifJtAgn6ZNCW2eu/top-tracks"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let client = SpotifyClient::new(&Config::default()).unwrap();
        let url = client.endpoint(&["tracks", "x/../../me"]).unwrap();
        assert_eq!(url.path(), "/v1/tracks/x%2F..%2F..%2Fme");

        let url = client.endpoint(&["tracks", "a b?c#d"]).unwrap();
        assert_eq!(url.path(), "/v1/tracks/a%20b%3Fc%23d");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = Config {
            api_base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            SpotifyClient::new(&config),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_currently_playing_without_item() {
        let raw: CurrentlyPlayingResponse =
            serde_json::from_str(r#"{"is_playing": false, "item": null}"#).unwrap();
        assert!(raw.item.is_none());
    }

    #[test]
    fn test_guarded_absorbs_errors() {
        let ok: CatalogResult<u32> = Ok(3);
        assert_eq!(guarded("op", "subject", ok), Some(3));

        let err: CatalogResult<u32> = Err(CatalogError::RateLimited {
            endpoint: "/search".to_string(),
        });
        assert_eq!(guarded("op", "subject", err), None);
    }

    #[tokio::test]
    async fn test_unreachable_catalog_degrades_to_no_data() {
        let config = Config {
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..Config::default()
        };
        let client = SpotifyClient::new(&config).unwrap();
        let credential = Credential::bearer("token");

        assert!(client
            .get_track(&TrackId::new("t1"), &credential)
            .await
            .is_none());
        assert!(client
            .get_top_tracks(&ArtistId::new("a1"), &credential)
            .await
            .is_empty());
    }
}
