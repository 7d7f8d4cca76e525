//! Decoding of the 16-digit identity number (NIK).
//!
//! Layout, by digit position:
//!
//! | Digits | Segment |
//! |---|---|
//! | 1-2 | province code |
//! | 3-4 | regency/city code |
//! | 5-6 | district code |
//! | 7-8 | day of birth, plus 40 for a female bearer |
//! | 9-10 | month of birth |
//! | 11-12 | two-digit year of birth |
//! | 13-16 | registration sequence |
//!
//! Decoding only checks shape. Whether the segments make sense (non-zero
//! regions, a real past date) is the validator's job, so that every problem
//! can be reported as a defect.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use crate::reference::Sex;

pub const NIK_LEN: usize = 16;

/// Offset added to the day of birth for female bearers.
pub const FEMALE_DAY_OFFSET: u8 = 40;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityNumberError {
    #[error("identity number is empty")]
    Empty,
    #[error("identity number must be 16 digits, got {0}")]
    Length(usize),
    #[error("identity number has non-digit {found:?} at position {position}")]
    NonDigit { position: usize, found: char },
}

/// Administrative level of a region segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionLevel {
    Province,
    Regency,
    District,
}

impl RegionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::Regency => "regency/city",
            Self::District => "district",
        }
    }
}

/// Birth date segment exactly as encoded, before any range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedBirthDate {
    /// Day as written, including the female offset.
    pub raw_day: u8,
    pub month: u8,
    /// Two-digit year.
    pub year: u8,
}

impl EmbeddedBirthDate {
    pub fn is_female(&self) -> bool {
        self.raw_day > FEMALE_DAY_OFFSET
    }

    pub fn sex(&self) -> Sex {
        if self.is_female() { Sex::Female } else { Sex::Male }
    }

    /// Calendar day with the female offset removed. Not range-checked.
    pub fn day(&self) -> u8 {
        if self.is_female() {
            self.raw_day - FEMALE_DAY_OFFSET
        } else {
            self.raw_day
        }
    }

    /// Four-digit year under the pivot rule relative to `current_year`.
    pub fn full_year(&self, current_year: i32) -> i32 {
        expand_two_digit_year(self.year, current_year)
    }

    /// The encoded calendar date, if day and month form a real date.
    pub fn to_date(&self, current_year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            self.full_year(current_year),
            u32::from(self.month),
            u32::from(self.day()),
        )
    }
}

/// Expand a two-digit year: years up to `(current_year - 1900) % 100` are
/// taken as 20xx, later ones as 19xx.
///
/// The window is a fixed century, so a bearer older than 100 decodes as a
/// child. That ambiguity is inherent to the number format.
pub fn expand_two_digit_year(year: u8, current_year: i32) -> i32 {
    let year = i32::from(year);
    if year <= (current_year - 1900).rem_euclid(100) {
        2000 + year
    } else {
        1900 + year
    }
}

/// A shape-checked identity number split into its segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityNumber {
    pub province: u8,
    pub regency: u8,
    pub district: u8,
    pub birth: EmbeddedBirthDate,
    pub sequence: u16,
}

impl IdentityNumber {
    /// Split a 16-digit string. No surrounding whitespace is tolerated.
    pub fn parse(s: &str) -> Result<Self, IdentityNumberError> {
        if s.is_empty() {
            return Err(IdentityNumberError::Empty);
        }
        if let Some((position, found)) = s.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(IdentityNumberError::NonDigit { position, found });
        }
        if s.len() != NIK_LEN {
            return Err(IdentityNumberError::Length(s.len()));
        }

        let d: Vec<u8> = s.bytes().map(|b| b - b'0').collect();
        let pair = |i: usize| d[i] * 10 + d[i + 1];

        Ok(Self {
            province: pair(0),
            regency: pair(2),
            district: pair(4),
            birth: EmbeddedBirthDate {
                raw_day: pair(6),
                month: pair(8),
                year: pair(10),
            },
            sequence: u16::from(d[12]) * 1000
                + u16::from(d[13]) * 100
                + u16::from(d[14]) * 10
                + u16::from(d[15]),
        })
    }

    /// Region segments in card order.
    pub fn regions(&self) -> [(RegionLevel, u8); 3] {
        [
            (RegionLevel::Province, self.province),
            (RegionLevel::Regency, self.regency),
            (RegionLevel::District, self.district),
        ]
    }

    /// First six digits as a string, e.g. `"320112"`.
    pub fn region_code(&self) -> String {
        format!("{:02}{:02}{:02}", self.province, self.regency, self.district)
    }

    pub fn embedded_sex(&self) -> Sex {
        self.birth.sex()
    }
}

impl FromStr for IdentityNumber {
    type Err = IdentityNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Re-encodes the 16 digits.
impl fmt::Display for IdentityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:02}{:02}{:02}{:04}",
            self.region_code(),
            self.birth.raw_day,
            self.birth.month,
            self.birth.year,
            self.sequence
        )
    }
}
