use std::fmt;

use serde::{Deserialize, Serialize};

/// Release years at or below this value are too sparse to search by era.
pub const MIN_SEARCHABLE_YEAR: i32 = 1950;

/// Half-width of the era window around a seed's release year.
pub const YEAR_WINDOW_RADIUS: i32 = 2;

/// An inclusive range of release years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub start_year: i32,
    pub end_year: i32,
}

impl YearRange {
    #[must_use]
    pub const fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
        }
    }

    /// The window `[year - radius, year + radius]`, or `None` if either
    /// bound overflows.
    #[must_use]
    pub const fn around(year: i32, radius: i32) -> Option<Self> {
        match (year.checked_sub(radius), year.checked_add(radius)) {
            (Some(start), Some(end)) => Some(Self::new(start, end)),
            _ => None,
        }
    }

    /// The era window for a seed release year, or `None` when the year is
    /// not searchable.
    #[must_use]
    pub fn for_seed_year(year: i32) -> Option<Self> {
        if year > MIN_SEARCHABLE_YEAR {
            Self::around(year, YEAR_WINDOW_RADIUS)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start_year && year <= self.end_year
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year, self.end_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_around() {
        let range = YearRange::around(2005, 2).unwrap();
        assert_eq!(range, YearRange::new(2003, 2007));
        assert!(range.contains(2003));
        assert!(range.contains(2007));
        assert!(!range.contains(2008));
    }

    #[test]
    fn test_display_matches_search_syntax() {
        assert_eq!(YearRange::around(1999, 2).unwrap().to_string(), "1997-2001");
    }

    #[test]
    fn test_for_seed_year_threshold() {
        assert!(YearRange::for_seed_year(1950).is_none());
        assert!(YearRange::for_seed_year(0).is_none());
        assert_eq!(
            YearRange::for_seed_year(1951),
            Some(YearRange::new(1949, 1953))
        );
    }

    #[test]
    fn test_window_overflow_is_none() {
        assert!(YearRange::around(i32::MAX, 2).is_none());
        assert!(YearRange::around(i32::MIN, 2).is_none());
        assert!(YearRange::for_seed_year(i32::MAX).is_none());
        assert!(YearRange::for_seed_year(i32::MAX - 2).is_some());
    }
}
