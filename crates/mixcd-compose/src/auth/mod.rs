//! OAuth 2.0 authorization-code flow with PKCE.
//!
//! The composer never manages the token lifecycle; it only consumes the
//! opaque [`Credential`] produced here (or supplied by configuration).

pub mod pkce;
pub mod token;

use std::fmt;

pub use pkce::PkceChallenge;
pub use token::{OAuthClient, TokenGrant, DEFAULT_SCOPES};

/// An opaque bearer credential.
///
/// The token value is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl From<TokenGrant> for Credential {
    fn from(grant: TokenGrant) -> Self {
        Self(grant.access_token)
    }
}
