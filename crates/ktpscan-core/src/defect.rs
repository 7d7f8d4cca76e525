//! Defects: one reported rule violation each.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of the rule that produced a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectCode {
    IdentityNumberShape,
    RegionSegmentZero,
    EmbeddedBirthDate,
    SequenceZero,
    NameTooShort,
    BirthDateFormat,
    BirthDayOutOfRange,
    BirthMonthOutOfRange,
    BirthYearOutOfRange,
    BirthDateImpossible,
    BirthDateInFuture,
    SexUnrecognized,
    ProvinceUnrecognized,
    ReligionUnrecognized,
    MaritalStatusUnrecognized,
    RtRwFormat,
    SexMismatch,
    BirthDateMismatch,
}

impl DefectCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdentityNumberShape => "identity_number_shape",
            Self::RegionSegmentZero => "region_segment_zero",
            Self::EmbeddedBirthDate => "embedded_birth_date",
            Self::SequenceZero => "sequence_zero",
            Self::NameTooShort => "name_too_short",
            Self::BirthDateFormat => "birth_date_format",
            Self::BirthDayOutOfRange => "birth_day_out_of_range",
            Self::BirthMonthOutOfRange => "birth_month_out_of_range",
            Self::BirthYearOutOfRange => "birth_year_out_of_range",
            Self::BirthDateImpossible => "birth_date_impossible",
            Self::BirthDateInFuture => "birth_date_in_future",
            Self::SexUnrecognized => "sex_unrecognized",
            Self::ProvinceUnrecognized => "province_unrecognized",
            Self::ReligionUnrecognized => "religion_unrecognized",
            Self::MaritalStatusUnrecognized => "marital_status_unrecognized",
            Self::RtRwFormat => "rt_rw_format",
            Self::SexMismatch => "sex_mismatch",
            Self::BirthDateMismatch => "birth_date_mismatch",
        }
    }
}

impl fmt::Display for DefectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defect {
    pub code: DefectCode,
    pub message: String,
}

impl Defect {
    pub fn new(code: DefectCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// How bad a set of defects looks to a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Up to 2 defects is low, up to 5 medium, anything more high.
    pub fn from_count(count: usize) -> Self {
        match count {
            0..=2 => Self::Low,
            3..=5 => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Presentation-ready digest of a validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub error_count: usize,
    pub errors: Vec<String>,
    pub severity: Severity,
}

impl ValidationSummary {
    pub fn new(defects: &[Defect]) -> Self {
        Self {
            is_valid: defects.is_empty(),
            error_count: defects.len(),
            errors: defects.iter().map(|d| d.message.clone()).collect(),
            severity: Severity::from_count(defects.len()),
        }
    }
}
