pub mod genre;
pub mod period;

pub use genre::{classify, PrimaryGenre, GENRE_MAPPING};
pub use period::{YearRange, MIN_SEARCHABLE_YEAR, YEAR_WINDOW_RADIUS};
