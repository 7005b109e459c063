//! Primary genre classification.
//!
//! Catalog genre labels are noisy free text ("album rock", "neo mellow",
//! "deep underground hip hop"). Searches need one coarse label, so the
//! classifier reduces a label set to a single [`PrimaryGenre`] by
//! case-insensitive substring matching against a fixed variant table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Coarse genre used as the `genre:` filter of catalog searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PrimaryGenre {
    #[default]
    Pop,
    Rock,
    HipHop,
    Electronic,
    Country,
    RnB,
    Jazz,
    Classical,
    Reggae,
    Folk,
    Latin,
}

impl PrimaryGenre {
    /// Every primary genre in classification order.
    pub const ALL: [Self; 11] = [
        Self::Pop,
        Self::Rock,
        Self::HipHop,
        Self::Electronic,
        Self::Country,
        Self::RnB,
        Self::Jazz,
        Self::Classical,
        Self::Reggae,
        Self::Folk,
        Self::Latin,
    ];

    /// Canonical label, as used in search queries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pop => "pop",
            Self::Rock => "rock",
            Self::HipHop => "hip hop",
            Self::Electronic => "electronic",
            Self::Country => "country",
            Self::RnB => "r&b",
            Self::Jazz => "jazz",
            Self::Classical => "classical",
            Self::Reggae => "reggae",
            Self::Folk => "folk",
            Self::Latin => "latin",
        }
    }

    /// Substring variants that classify a label into this genre.
    #[must_use]
    pub fn variants(self) -> &'static [&'static str] {
        GENRE_MAPPING
            .iter()
            .find(|(genre, _)| *genre == self)
            .map(|(_, variants)| *variants)
            .unwrap_or_default()
    }
}

impl fmt::Display for PrimaryGenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimaryGenre {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidData(format!("unknown primary genre: {s}")))
    }
}

impl From<PrimaryGenre> for String {
    fn from(genre: PrimaryGenre) -> Self {
        genre.as_str().to_string()
    }
}

impl TryFrom<String> for PrimaryGenre {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A primary-genre variant table, consulted in order.
pub type GenreMapping = [(PrimaryGenre, &'static [&'static str])];

/// Built-in variant table, in classification order.
pub const GENRE_MAPPING: &GenreMapping = &[
    (
        PrimaryGenre::Pop,
        &["pop", "dance pop", "electropop", "indie pop", "synth-pop"],
    ),
    (
        PrimaryGenre::Rock,
        &[
            "rock",
            "classic rock",
            "indie rock",
            "alternative rock",
            "hard rock",
        ],
    ),
    (
        PrimaryGenre::HipHop,
        &["hip hop", "rap", "trap", "conscious hip hop"],
    ),
    (
        PrimaryGenre::Electronic,
        &["electronic", "house", "techno", "edm", "dubstep"],
    ),
    (
        PrimaryGenre::Country,
        &["country", "country pop", "bluegrass"],
    ),
    (PrimaryGenre::RnB, &["r&b", "soul", "funk", "neo soul"]),
    (
        PrimaryGenre::Jazz,
        &["jazz", "smooth jazz", "bebop", "swing"],
    ),
    (
        PrimaryGenre::Classical,
        &["classical", "orchestral", "opera"],
    ),
    (PrimaryGenre::Reggae, &["reggae", "dancehall", "dub"]),
    (PrimaryGenre::Folk, &["folk", "indie folk", "americana"]),
    (
        PrimaryGenre::Latin,
        &["latin", "reggaeton", "salsa", "bachata"],
    ),
];

/// Coarse checks applied to the first label when no variant matched.
const FIRST_LABEL_FALLBACKS: &[(&str, PrimaryGenre)] = &[
    ("pop", PrimaryGenre::Pop),
    ("rock", PrimaryGenre::Rock),
    ("hip hop", PrimaryGenre::HipHop),
    ("rap", PrimaryGenre::HipHop),
    ("country", PrimaryGenre::Country),
    ("electronic", PrimaryGenre::Electronic),
];

/// Classify free-text genre labels into one [`PrimaryGenre`] using the
/// built-in [`GENRE_MAPPING`].
///
/// The first primary genre (in table order) with a variant contained in
/// any label wins. Empty input classifies as [`PrimaryGenre::Pop`].
pub fn classify<S: AsRef<str>>(labels: &[S]) -> PrimaryGenre {
    classify_with(GENRE_MAPPING, labels)
}

/// Classify against a custom variant table.
pub fn classify_with<S: AsRef<str>>(mapping: &GenreMapping, labels: &[S]) -> PrimaryGenre {
    let Some(first) = labels.first() else {
        return PrimaryGenre::default();
    };

    let lowered: Vec<String> = labels.iter().map(|l| l.as_ref().to_lowercase()).collect();

    for (genre, variants) in mapping {
        for label in &lowered {
            if variants.iter().any(|v| label.contains(v)) {
                return *genre;
            }
        }
    }

    let first = first.as_ref().to_lowercase();
    FIRST_LABEL_FALLBACKS
        .iter()
        .find(|(needle, _)| first.contains(needle))
        .map(|(_, genre)| *genre)
        .unwrap_or_default()
}
