use crate::error::{ProcessingError, Result};
use crate::utils::constants::MONTHS_PER_YEAR;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Zero-based calendar month (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Month(usize);

impl Month {
    pub fn new(index: usize) -> Result<Self> {
        if index < MONTHS_PER_YEAR {
            Ok(Self(index))
        } else {
            Err(ProcessingError::InvalidMonth(index))
        }
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[self.0]
    }

    pub fn all() -> impl Iterator<Item = Month> {
        (0..MONTHS_PER_YEAR).map(Month)
    }
}

impl TryFrom<usize> for Month {
    type Error = ProcessingError;

    fn try_from(index: usize) -> Result<Self> {
        Month::new(index)
    }
}

impl From<Month> for usize {
    fn from(month: Month) -> usize {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts a zero-based index (`6`), a full name (`July`) or a
/// three-letter abbreviation (`jul`), case-insensitively.
impl FromStr for Month {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Month::new(index);
        }

        let lower = trimmed.to_lowercase();
        MONTH_NAMES
            .iter()
            .position(|name| {
                let name = name.to_lowercase();
                name == lower || (lower.len() == 3 && name.starts_with(&lower))
            })
            .map(Month)
            .ok_or_else(|| ProcessingError::InvalidFormat(format!("Unknown month: '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        assert_eq!(Month::new(0).unwrap().name(), "January");
        assert_eq!(Month::new(11).unwrap().name(), "December");
        assert!(matches!(Month::new(12), Err(ProcessingError::InvalidMonth(12))));
    }

    #[test]
    fn test_month_parsing() {
        assert_eq!("6".parse::<Month>().unwrap().index(), 6);
        assert_eq!("July".parse::<Month>().unwrap().index(), 6);
        assert_eq!("dec".parse::<Month>().unwrap().index(), 11);
        assert!("12".parse::<Month>().is_err());
        assert!("Ju".parse::<Month>().is_err());
        assert!("Smarch".parse::<Month>().is_err());
    }

    #[test]
    fn test_all_months_in_order() {
        let names: Vec<&str> = Month::all().map(Month::name).collect();
        assert_eq!(names, MONTH_NAMES);
    }
}
