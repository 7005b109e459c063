//! Core domain model for mixcd.
//!
//! This crate defines the track and artist records exchanged with the
//! streaming catalog, the normalized output records of a Mix CD, and the
//! genre taxonomy used to classify free-text artist genre labels.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod taxonomy;

pub use error::{Error, Result};
