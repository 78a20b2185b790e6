//! The month cursor used by the dashboard's monthly views.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar month used to scope the dashboard's derived views.
///
/// The `month` index is zero-based (0 = January, 11 = December), matching the indexing the
/// dashboard frontend and its backend contract use. The textual form is one-based, e.g.
/// `2025-03` is March 2025.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a `YearMonth` from a year and a zero-based month index.
    ///
    /// Returns `None` if `month` is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if month > 11 {
            return None;
        }
        Some(Self { year, month })
    }

    /// The current local month.
    pub fn now() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// The month that `date` falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The zero-based month index (0 = January, 11 = December).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month, rolling over to January of the next year after December.
    pub fn next(self) -> Self {
        if self.month == 11 {
            Self {
                year: self.year + 1,
                month: 0,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month, rolling back to December of the prior year before January.
    pub fn previous(self) -> Self {
        if self.month == 0 {
            Self {
                year: self.year - 1,
                month: 11,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Returns true if `date` falls within this month, i.e. between the first and last day of
    /// the month inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    /// A human-readable label, e.g. `January 2025`.
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month + 1, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month + 1)
    }
}

impl FromStr for YearMonth {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("Expected YYYY-MM, got '{s}'"))?;
        let year: i32 = year
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid year in '{s}'"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid month in '{s}'"))?;
        if !(1..=12).contains(&month) {
            anyhow::bail!("Month out of range in '{s}'");
        }
        Ok(Self {
            year,
            month: month - 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_next_rolls_over_december() {
        let december = YearMonth::new(2024, 11).unwrap();
        let next = december.next();
        assert_eq!(next.year(), 2025);
        assert_eq!(next.month(), 0);
    }

    #[test]
    fn test_previous_rolls_back_january() {
        let january = YearMonth::new(2025, 0).unwrap();
        let previous = january.previous();
        assert_eq!(previous.year(), 2024);
        assert_eq!(previous.month(), 11);
    }

    #[test]
    fn test_next_within_year() {
        let march = YearMonth::new(2025, 2).unwrap();
        assert_eq!(march.next(), YearMonth::new(2025, 3).unwrap());
    }

    #[test]
    fn test_previous_within_year() {
        let march = YearMonth::new(2025, 2).unwrap();
        assert_eq!(march.previous(), YearMonth::new(2025, 1).unwrap());
    }

    #[test]
    fn test_contains_bounds() {
        let january = YearMonth::new(2025, 0).unwrap();
        assert!(january.contains(date("2025-01-01")));
        assert!(january.contains(date("2025-01-31")));
        assert!(!january.contains(date("2025-02-01")));
        assert!(!january.contains(date("2024-12-31")));
        assert!(!january.contains(date("2024-01-15")));
    }

    #[test]
    fn test_label() {
        let january = YearMonth::new(2025, 0).unwrap();
        assert_eq!(january.label(), "January 2025");
    }

    #[test]
    fn test_parse_and_display() {
        let parsed: YearMonth = "2025-03".parse().unwrap();
        assert_eq!(parsed, YearMonth::new(2025, 2).unwrap());
        assert_eq!(parsed.to_string(), "2025-03");
    }

    #[test]
    fn test_parse_rejects_bad_month() {
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("2025-00".parse::<YearMonth>().is_err());
        assert!("2025".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_ordering() {
        let a = YearMonth::new(2024, 11).unwrap();
        let b = YearMonth::new(2025, 0).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(YearMonth::new(2025, 12).is_none());
    }
}
