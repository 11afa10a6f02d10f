use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::ErstattungError;

static PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Q(?<q1>[1-4])/(?<y1>[0-9]{4})|(?<y2>[0-9]{4})-Q(?<q2>[1-4]))$").unwrap()
});

/// Periods more than this many years in the past are refused.
pub const MAX_YEARS_BACK: i32 = 5;

/// Periods more than this many years ahead are refused.
pub const MAX_YEARS_AHEAD: i32 = 1;

/// A calendar quarter, the unit refunds are claimed for.
///
/// Parses from `Q4/2025` or `2025-Q4` and always displays as `Q4/2025`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionPeriod {
    pub year: i32,
    pub quarter: u8,
}

impl SubmissionPeriod {
    pub fn new(year: i32, quarter: u8) -> Result<Self, ErstattungError> {
        if !(1..=4).contains(&quarter) {
            return Err(ErstattungError::InvalidPeriod(format!(
                "quarter {quarter} out of range 1-4"
            )));
        }
        Ok(Self { year, quarter })
    }

    /// Quarter (1-4) a date falls in.
    pub fn quarter_of(date: NaiveDate) -> u8 {
        // ceil(month / 3)
        date.month().div_ceil(3) as u8
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: Self::quarter_of(date),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && Self::quarter_of(date) == self.quarter
    }
}

impl fmt::Display for SubmissionPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}/{}", self.quarter, self.year)
    }
}

impl FromStr for SubmissionPeriod {
    type Err = ErstattungError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            ErstattungError::InvalidPeriod(format!(
                "'{s}': expected Q[1-4]/YYYY or YYYY-Q[1-4]"
            ))
        };
        let caps = PERIOD.captures(s.trim()).ok_or_else(invalid)?;
        let year = caps.name("y1").or_else(|| caps.name("y2")).ok_or_else(invalid)?;
        let quarter = caps.name("q1").or_else(|| caps.name("q2")).ok_or_else(invalid)?;
        Ok(Self {
            year: year.as_str().parse().map_err(|_| invalid())?,
            quarter: quarter.as_str().parse().map_err(|_| invalid())?,
        })
    }
}

impl Serialize for SubmissionPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SubmissionPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Reject periods too far ahead of or behind `today`'s year.
pub fn validate_submission_period(
    period: &SubmissionPeriod,
    today: NaiveDate,
) -> Result<(), ErstattungError> {
    let current = today.year();
    if period.year > current + MAX_YEARS_AHEAD {
        return Err(ErstattungError::InvalidPeriod(format!(
            "Period {period} is too far in the future"
        )));
    }
    if period.year < current - MAX_YEARS_BACK {
        return Err(ErstattungError::InvalidPeriod(format!(
            "Period {period} is too old (max {MAX_YEARS_BACK} years back)"
        )));
    }
    Ok(())
}
