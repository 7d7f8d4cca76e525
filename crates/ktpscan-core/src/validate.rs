//! Field validation: per-field rules, identity number decoding and cross-checks.
//!
//! Every rule runs on every record and returns its own defects; nothing
//! short-circuits except the identity-number sub-rules, which need a
//! well-shaped number. Defects come out in rule order:
//!
//! 1. identity number shape
//! 2. region segments
//! 3. embedded birth date
//! 4. sequence segment
//! 5. name
//! 6. declared birth date
//! 7. sex
//! 8. province
//! 9. religion
//! 10. marital status
//! 11. RT/RW format
//! 12. declared sex vs identity number
//! 13. declared birth date vs identity number

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::defect::{Defect, DefectCode, ValidationSummary};
use crate::nik::{IdentityNumber, IdentityNumberError};
use crate::record::ExtractedRecord;
use crate::reference::{MaritalStatus, Province, Religion, Sex};

const MIN_NAME_LEN: usize = 2;
const MIN_BIRTH_YEAR: i64 = 1900;

/// Result of validating one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    /// The record as received.
    pub record: ExtractedRecord,
    /// Defects in rule order.
    pub defects: Vec<Defect>,
    /// True iff `defects` is empty.
    pub acceptable: bool,
}

impl ValidationOutcome {
    pub fn defect_count(&self) -> usize {
        self.defects.len()
    }

    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary::new(&self.defects)
    }
}

/// Validates extracted records against the card's format and domain rules.
///
/// Dates are judged against the injected [`Clock`]; nothing else depends on
/// the environment.
#[derive(Debug, Clone, Default)]
pub struct FieldValidator<C = SystemClock> {
    clock: C,
}

impl<C: Clock> FieldValidator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Validate a record, taking ownership of it for the outcome.
    pub fn validate(&self, record: ExtractedRecord) -> ValidationOutcome {
        let defects = self.check(&record);
        debug!(
            defects = defects.len(),
            identity_number = %record.identity_number,
            "record validated"
        );
        ValidationOutcome {
            acceptable: defects.is_empty(),
            record,
            defects,
        }
    }

    /// Run every rule and return the defects in rule order.
    pub fn check(&self, record: &ExtractedRecord) -> Vec<Defect> {
        let today = self.clock.today();
        let current_year = self.clock.current_year();
        let nik = IdentityNumber::parse(&record.identity_number);
        let declared_date = non_blank(&record.birth_date);

        let mut defects = Vec::new();

        // 1-4
        match &nik {
            Ok(nik) => {
                defects.extend(check_regions(nik));
                defects.extend(check_embedded_birth_date(nik, today, current_year));
                defects.extend(check_sequence(nik));
            }
            Err(e) => defects.push(shape_defect(&record.identity_number, e)),
        }

        // 5-11
        defects.extend(check_name(&record.name));
        if let Some(text) = declared_date {
            defects.extend(check_birth_date(text, today, current_year));
        }
        defects.extend(record.sex.as_ref().and_then(check_sex));
        defects.extend(record.province.as_ref().and_then(check_province));
        defects.extend(record.religion.as_ref().and_then(check_religion));
        defects.extend(record.marital_status.as_ref().and_then(check_marital_status));
        defects.extend(non_blank(&record.rt_rw).and_then(check_rt_rw));

        // 12-13
        if let Ok(nik) = &nik {
            defects.extend(record.sex.as_ref().and_then(|sex| cross_check_sex(nik, sex)));
            defects.extend(
                declared_date.and_then(|text| cross_check_birth_date(nik, text, current_year)),
            );
        }

        defects
    }
}

// ── Identity number ──

fn shape_defect(raw: &str, err: &IdentityNumberError) -> Defect {
    let message = match err {
        IdentityNumberError::Empty => "identity number is missing".to_string(),
        _ => format!("identity number must be exactly 16 digits: {raw:?}"),
    };
    Defect::new(DefectCode::IdentityNumberShape, message)
}

fn check_regions(nik: &IdentityNumber) -> Vec<Defect> {
    nik.regions()
        .into_iter()
        .filter(|(_, code)| *code == 0)
        .map(|(level, _)| {
            Defect::new(
                DefectCode::RegionSegmentZero,
                format!(
                    "identity number {} code must not be 00 (region {})",
                    level.as_str(),
                    nik.region_code()
                ),
            )
        })
        .collect()
}

/// At most one defect, listing every failing component.
fn check_embedded_birth_date(
    nik: &IdentityNumber,
    today: NaiveDate,
    current_year: i32,
) -> Option<Defect> {
    let birth = nik.birth;
    let mut problems = Vec::new();

    if !(1..=31).contains(&birth.day()) {
        problems.push(format!("day {} out of range 1-31", birth.day()));
    }
    if !(1..=12).contains(&birth.month) {
        problems.push(format!("month {} out of range 1-12", birth.month));
    }
    if problems.is_empty() {
        match birth.to_date(current_year) {
            None => problems.push("not a calendar date".to_string()),
            Some(date) if date > today => problems.push(format!(
                "{} is in the future",
                date.format("%d-%m-%Y")
            )),
            Some(_) => {}
        }
    }

    (!problems.is_empty()).then(|| {
        Defect::new(
            DefectCode::EmbeddedBirthDate,
            format!(
                "identity number birth date {:02}{:02}{:02} is invalid: {}",
                birth.raw_day,
                birth.month,
                birth.year,
                problems.join("; ")
            ),
        )
    })
}

fn check_sequence(nik: &IdentityNumber) -> Option<Defect> {
    (nik.sequence == 0).then(|| {
        Defect::new(
            DefectCode::SequenceZero,
            "identity number sequence must not be 0000",
        )
    })
}

// ── Per-field rules ──

fn check_name(name: &str) -> Option<Defect> {
    (name.trim().chars().count() < MIN_NAME_LEN).then(|| {
        Defect::new(
            DefectCode::NameTooShort,
            format!("name is missing or shorter than {MIN_NAME_LEN} characters"),
        )
    })
}

/// Split `DD-MM-YYYY` into integers. Ranges are not checked.
fn parse_declared_date(text: &str) -> Option<(i64, i64, i64)> {
    let mut parts = text.split('-').map(|p| p.trim().parse::<i64>());
    let (Some(Ok(day)), Some(Ok(month)), Some(Ok(year)), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    Some((day, month, year))
}

/// Each failed check is its own defect. The composed date is checked even
/// when a component is out of range, so `01-01-2090` is both an out-of-range
/// year and a future date.
fn check_birth_date(text: &str, today: NaiveDate, current_year: i32) -> Vec<Defect> {
    let Some((day, month, year)) = parse_declared_date(text) else {
        return vec![Defect::new(
            DefectCode::BirthDateFormat,
            format!("birth date must be DD-MM-YYYY: {text:?}"),
        )];
    };

    let mut defects = Vec::new();
    if !(1..=31).contains(&day) {
        defects.push(Defect::new(
            DefectCode::BirthDayOutOfRange,
            format!("birth day out of range: {day}"),
        ));
    }
    if !(1..=12).contains(&month) {
        defects.push(Defect::new(
            DefectCode::BirthMonthOutOfRange,
            format!("birth month out of range: {month}"),
        ));
    }
    if !(MIN_BIRTH_YEAR..=i64::from(current_year)).contains(&year) {
        defects.push(Defect::new(
            DefectCode::BirthYearOutOfRange,
            format!("birth year out of range: {year}"),
        ));
    }

    match compose_date(day, month, year) {
        None => defects.push(Defect::new(
            DefectCode::BirthDateImpossible,
            format!("birth date is not a calendar date: {text}"),
        )),
        Some(date) if date > today => defects.push(Defect::new(
            DefectCode::BirthDateInFuture,
            format!("birth date is in the future: {text}"),
        )),
        Some(_) => {}
    }
    defects
}

/// `None` when any component does not fit chrono's types or the date does
/// not exist.
fn compose_date(day: i64, month: i64, year: i64) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

fn check_sex(sex: &Sex) -> Option<Defect> {
    match sex {
        Sex::Unrecognized(raw) if !raw.trim().is_empty() => Some(Defect::new(
            DefectCode::SexUnrecognized,
            format!("sex is not LAKI-LAKI or PEREMPUAN: {raw:?}"),
        )),
        _ => None,
    }
}

fn check_province(province: &Province) -> Option<Defect> {
    match province {
        Province::Unrecognized(raw) if !raw.trim().is_empty() => Some(Defect::new(
            DefectCode::ProvinceUnrecognized,
            format!("province not recognized: {raw:?}"),
        )),
        _ => None,
    }
}

fn check_religion(religion: &Religion) -> Option<Defect> {
    match religion {
        Religion::Unrecognized(raw) if !raw.trim().is_empty() => Some(Defect::new(
            DefectCode::ReligionUnrecognized,
            format!("religion not recognized: {raw:?}"),
        )),
        _ => None,
    }
}

fn check_marital_status(status: &MaritalStatus) -> Option<Defect> {
    match status {
        MaritalStatus::Unrecognized(raw) if !raw.trim().is_empty() => Some(Defect::new(
            DefectCode::MaritalStatusUnrecognized,
            format!("marital status not recognized: {raw:?}"),
        )),
        _ => None,
    }
}

/// Exactly `NNN/NNN`.
fn check_rt_rw(text: &str) -> Option<Defect> {
    let well_formed = matches!(
        text.split_once('/'),
        Some((rt, rw)) if is_three_digits(rt) && is_three_digits(rw)
    );
    (!well_formed).then(|| {
        Defect::new(
            DefectCode::RtRwFormat,
            format!("RT/RW must be NNN/NNN: {text:?}"),
        )
    })
}

fn is_three_digits(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit())
}

// ── Cross-checks ──

/// Compares on the raw day offset alone, so it still runs when the embedded
/// date itself is out of range. An unrecognized declared sex was already
/// reported by rule 7 and is not compared.
fn cross_check_sex(nik: &IdentityNumber, declared: &Sex) -> Option<Defect> {
    let declared_female = declared.is_female()?;
    (declared_female != nik.birth.is_female()).then(|| {
        Defect::new(
            DefectCode::SexMismatch,
            format!(
                "sex does not match identity number: declared {}, encoded {}",
                declared,
                nik.embedded_sex()
            ),
        )
    })
}

/// A declared date that does not split into three integers was reported by
/// rule 6 and is skipped here.
fn cross_check_birth_date(nik: &IdentityNumber, text: &str, current_year: i32) -> Option<Defect> {
    let (day, month, year) = parse_declared_date(text)?;
    let birth = nik.birth;
    let encoded = (
        i64::from(birth.day()),
        i64::from(birth.month),
        i64::from(birth.full_year(current_year)),
    );
    (encoded != (day, month, year)).then(|| {
        Defect::new(
            DefectCode::BirthDateMismatch,
            "declared birth date does not match identity number",
        )
    })
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}
