//! Authorization URL construction and code-for-token exchange.

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::auth::pkce::PkceChallenge;
use crate::config::Config;
use crate::error::AuthError;

/// Scopes requested by default.
pub const DEFAULT_SCOPES: &[&str] = &[
    "playlist-modify-public",
    "playlist-modify-private",
    "user-read-currently-playing",
    "user-read-playback-state",
];

/// Raw token endpoint response. Successful and failed exchanges share
/// one shape: a failure carries `error` instead of `access_token`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    scope: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Tokens issued by a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub scope: Option<String>,
}

impl TokenGrant {
    fn from_response(response: TokenResponse, issued_at: DateTime<Utc>) -> Result<Self, AuthError> {
        let Some(access_token) = response.access_token else {
            return Err(AuthError::Rejected {
                error: response.error.unwrap_or_else(|| "unknown_error".to_string()),
                description: response.error_description,
            });
        };

        let expires_in = response.expires_in.unwrap_or(0);
        let expires_at = TimeDelta::try_seconds(expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| AuthError::Parse(format!("expires_in out of range: {expires_in}")))?;

        Ok(Self {
            access_token,
            refresh_token: response.refresh_token,
            expires_at,
            scope: response.scope,
        })
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// OAuth client for the accounts service.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    client_id: String,
    redirect_uri: String,
    accounts_base_url: String,
}

impl OAuthClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns [`AuthError::MissingClientId`] when no client id is
    /// configured, or a request error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, AuthError> {
        let client_id = config
            .client_id
            .clone()
            .ok_or(AuthError::MissingClientId)?;

        let http = Client::builder()
            .user_agent(concat!("mixcd/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            client_id,
            redirect_uri: config.redirect_uri.clone(),
            accounts_base_url: config.accounts_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the URL the user visits to grant access.
    pub fn authorize_url(&self, pkce: &PkceChallenge, scopes: &[&str]) -> Result<Url, AuthError> {
        let scope = scopes.join(" ");
        Url::parse_with_params(
            &format!("{}/authorize", self.accounts_base_url),
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("scope", scope.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("code_challenge_method", PkceChallenge::METHOD),
                ("code_challenge", pkce.challenge.as_str()),
            ],
        )
        .map_err(|e| AuthError::InvalidUrl(e.to_string()))
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str, verifier: &str) -> Result<TokenGrant, AuthError> {
        let url = format!("{}/api/token", self.accounts_base_url);
        log::debug!("Exchanging authorization code at {}", url);

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("client_id", self.client_id.as_str()),
                ("code_verifier", verifier),
            ])
            .send()
            .await?;

        let status = response.status();
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(format!("token response (HTTP {status}): {e}")))?;

        let grant = TokenGrant::from_response(body, Utc::now())?;
        log::info!("Access token received, expires at {}", grant.expires_at);
        Ok(grant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OAuthClient {
        let config = Config {
            client_id: Some("client-123".to_string()),
            redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
            ..Config::default()
        };
        OAuthClient::new(&config).unwrap()
    }

    #[test]
    fn test_missing_client_id() {
        let result = OAuthClient::new(&Config::default());
        assert!(matches!(result, Err(AuthError::MissingClientId)));
    }

    #[test]
    fn test_authorize_url_parameters() {
        let pkce = PkceChallenge::from_verifier("verifier");
        let url = test_client().authorize_url(&pkce, DEFAULT_SCOPES).unwrap();

        assert_eq!(url.host_str(), Some("accounts.spotify.com"));
        assert_eq!(url.path(), "/authorize");

        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(params["redirect_uri"], "http://127.0.0.1:8888/callback");
        assert_eq!(params["code_challenge_method"], "S256");
        assert_eq!(params["code_challenge"], pkce.challenge);
        assert_eq!(
            params["scope"],
            "playlist-modify-public playlist-modify-private user-read-currently-playing user-read-playback-state"
        );
    }

    #[test]
    fn test_grant_from_successful_response() {
        let json = r#"{
            "access_token": "BQD-token",
            "token_type": "Bearer",
            "scope": "user-read-playback-state",
            "expires_in": 3600,
            "refresh_token": "AQB-refresh"
        }"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        let issued = Utc::now();
        let grant = TokenGrant::from_response(response, issued).unwrap();

        assert_eq!(grant.access_token, "BQD-token");
        assert_eq!(grant.refresh_token.as_deref(), Some("AQB-refresh"));
        assert_eq!(grant.expires_at, issued + TimeDelta::seconds(3600));
        assert!(!grant.is_expired_at(issued));
        assert!(grant.is_expired_at(issued + TimeDelta::seconds(3600)));
    }

    #[test]
    fn test_grant_with_out_of_range_lifetime() {
        for expires_in in [i64::MAX, i64::MIN] {
            let response = TokenResponse {
                access_token: Some("BQD-token".to_string()),
                refresh_token: None,
                expires_in: Some(expires_in),
                scope: None,
                error: None,
                error_description: None,
            };
            let result = TokenGrant::from_response(response, Utc::now());
            assert!(
                matches!(result, Err(AuthError::Parse(_))),
                "expires_in {expires_in} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_grant_from_error_response() {
        let json = r#"{"error": "invalid_grant", "error_description": "Invalid authorization code"}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        let result = TokenGrant::from_response(response, Utc::now());

        match result {
            Err(AuthError::Rejected { error, description }) => {
                assert_eq!(error, "invalid_grant");
                assert_eq!(description.as_deref(), Some("Invalid authorization code"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
