//! Catalog access and Mix CD composition for mixcd.
//!
//! A [`Composer`] expands a seed track into a short list by running a
//! cascade of [`SourceStrategy`] stages against a [`TrackCatalog`], then
//! ranking and deduplicating the pooled candidates.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod auth;
pub mod catalog;
pub mod composer;
pub mod config;
pub mod error;
pub mod pool;
pub mod strategy;
pub mod title;

pub use auth::{Credential, OAuthClient, PkceChallenge, TokenGrant};
pub use catalog::{SearchQuery, SpotifyClient, TrackCatalog};
pub use composer::{Composer, Composition, StageReport};
pub use config::Config;
pub use error::{AuthError, CatalogError, CatalogResult, ComposeError};
pub use pool::{assemble, TrackPool};
pub use strategy::{default_strategies, SeedContext, SourceStrategy};
pub use title::{generate_title, random_title};
