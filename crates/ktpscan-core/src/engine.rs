//! Single entry point running validation and fusion back to back.

use serde::Serialize;

use crate::clock::Clock;
use crate::defect::ValidationSummary;
use crate::error::CoreError;
use crate::fuse::{FinalVerdict, ScoreFuser, ScoreInputs};
use crate::record::ExtractedRecord;
use crate::validate::{FieldValidator, ValidationOutcome};

/// Validation outcome and verdict for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub outcome: ValidationOutcome,
    pub verdict: FinalVerdict,
}

impl Evaluation {
    pub fn summary(&self) -> ValidationSummary {
        self.outcome.summary()
    }
}

/// Validate `record` and fuse the result with `inputs`.
///
/// The only hard failure is an absent record; every problem with the
/// record's content comes back as a defect.
pub fn evaluate<C: Clock>(
    record: Option<&ExtractedRecord>,
    inputs: ScoreInputs,
    validator: &FieldValidator<C>,
    fuser: &ScoreFuser,
) -> Result<Evaluation, CoreError> {
    let record = record.ok_or(CoreError::MissingRecord)?;
    let outcome = validator.validate(record.clone());
    let verdict = fuser.fuse(inputs, &outcome);
    Ok(Evaluation { outcome, verdict })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::defect::DefectCode;
    use crate::reference::Sex;

    fn validator() -> FieldValidator<FixedClock> {
        FieldValidator::new(FixedClock::ymd(2026, 10, 15).unwrap())
    }

    fn inputs(extractor_confidence: f64) -> ScoreInputs {
        ScoreInputs {
            extractor_confidence,
            image_quality: 1.0,
            upstream_valid: true,
        }
    }

    #[test]
    fn missing_record_is_a_hard_failure() {
        let err = evaluate(None, inputs(0.9), &validator(), &ScoreFuser::default()).unwrap_err();
        assert!(matches!(err, CoreError::MissingRecord));
    }

    #[test]
    fn clean_record_passes_through() {
        let record = ExtractedRecord::new("3201121205900001", "BUDI SANTOSO");
        let eval = evaluate(Some(&record), inputs(0.95), &validator(), &ScoreFuser::default())
            .unwrap();
        assert!(eval.outcome.acceptable);
        assert!(eval.verdict.valid);
        assert!((eval.verdict.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn noisy_record_is_rejected() {
        let record = ExtractedRecord {
            sex: Some(Sex::Female),
            birth_date: Some("01-01-2001".into()),
            rt_rw: Some("1/2".into()),
            ..ExtractedRecord::new("0000001205900000", "B")
        };
        let eval = evaluate(Some(&record), inputs(0.9), &validator(), &ScoreFuser::default())
            .unwrap();
        let summary = eval.summary();
        assert!(summary.error_count > 3);
        assert!(!eval.verdict.valid);
        assert!((eval.verdict.confidence - 0.6).abs() < 1e-9);
        assert!(
            eval.outcome
                .defects
                .iter()
                .any(|d| d.code == DefectCode::SexMismatch)
        );
    }

    #[test]
    fn identity_number_error_converts() {
        let err: CoreError = crate::nik::IdentityNumber::parse("12")
            .map_err(CoreError::from)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid identity number: identity number must be 16 digits, got 2"
        );
    }
}
