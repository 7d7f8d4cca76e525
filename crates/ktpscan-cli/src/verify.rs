//! Verification flow: extractor report → validation → fusion → persistence decision.

use ktpscan_ai::{ExtractError, ExtractionReport, FaceDetection};
use ktpscan_core::{
    Clock, Defect, ExtractedRecord, FieldValidator, QualityIssue, ScoreFuser, ScoreInputs,
    ValidationSummary, evaluate, image_quality_score,
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    /// Accepted; the record would be stored.
    Success,
    /// The extractor could not produce a report.
    Failed,
    /// Not a card, or not trustworthy enough to store.
    InvalidKtp,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::InvalidKtp => "INVALID_KTP",
        }
    }
}

/// Everything the caller needs to present the result and act on it.
#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    pub status: ProcessingStatus,
    pub valid: bool,
    pub confidence: f64,
    pub record: Option<ExtractedRecord>,
    /// Defects found by the validator, empty when validation did not run.
    pub defects: Vec<Defect>,
    pub summary: Option<ValidationSummary>,
    /// The extractor's own errors followed by the defect messages.
    pub validation_errors: Vec<String>,
    pub face: Option<FaceDetection>,
    pub quality_issues: Vec<QualityIssue>,
    pub notes: Vec<String>,
}

impl Verification {
    pub fn would_persist(&self) -> bool {
        self.status == ProcessingStatus::Success
    }
}

/// Run the verification flow on one extraction attempt.
///
/// Validation only runs when the extractor itself judged the image a valid
/// card and returned fields; otherwise its verdict and confidence are
/// reported as they are.
pub fn verify<C: Clock>(
    extraction: Result<ExtractionReport, ExtractError>,
    quality_issues: Vec<QualityIssue>,
    validator: &FieldValidator<C>,
    fuser: &ScoreFuser,
) -> Verification {
    let (report, extraction_failed) = match extraction {
        Ok(report) => (report, false),
        Err(e) => {
            warn!(error = %e, "extraction failed");
            (ExtractionReport::from_error(&e), true)
        }
    };

    let mut valid = report.is_valid;
    let mut confidence = report.confidence.clamp(0.0, 1.0);
    let mut validation_errors = report.validation_errors.clone();
    let mut defects = Vec::new();
    let mut summary = None;

    if report.is_valid {
        let inputs = ScoreInputs {
            extractor_confidence: report.confidence,
            image_quality: image_quality_score(&quality_issues),
            upstream_valid: report.is_valid,
        };
        match evaluate(report.extracted_data.as_ref(), inputs, validator, fuser) {
            Ok(eval) => {
                summary = Some(eval.summary());
                validation_errors.extend(eval.outcome.defects.iter().map(|d| d.message.clone()));
                defects = eval.outcome.defects;
                valid = eval.verdict.valid;
                confidence = eval.verdict.confidence;
            }
            Err(e) => warn!(error = %e, "card judged valid but no fields extracted"),
        }
    }

    let status = if extraction_failed {
        ProcessingStatus::Failed
    } else if valid && report.extracted_data.is_some() {
        ProcessingStatus::Success
    } else {
        ProcessingStatus::InvalidKtp
    };

    let notes = processing_notes(
        report.processing_notes.as_deref(),
        &quality_issues,
        report.face_detection.as_ref(),
    );

    info!(
        status = status.as_str(),
        valid,
        confidence,
        defects = defects.len(),
        face = report.face_detection.as_ref().is_some_and(|f| f.found),
        "verification complete"
    );

    Verification {
        status,
        valid,
        confidence,
        record: report.extracted_data,
        defects,
        summary,
        validation_errors,
        face: report.face_detection,
        quality_issues,
        notes,
    }
}

fn processing_notes(
    extractor_note: Option<&str>,
    quality_issues: &[QualityIssue],
    face: Option<&FaceDetection>,
) -> Vec<String> {
    let mut notes: Vec<String> = extractor_note
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string)
        .into_iter()
        .collect();

    if !quality_issues.is_empty() {
        let issues: Vec<String> = quality_issues.iter().map(|i| i.to_string()).collect();
        notes.push(format!("image quality issues: {}", issues.join(", ")));
    }

    match face {
        Some(f) if f.found => notes.push(format!("face detected (confidence: {:.2})", f.confidence)),
        Some(_) => notes.push("no face detected".to_string()),
        None => {}
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use ktpscan_ai::parse_response;
    use ktpscan_core::{DefectCode, FixedClock};

    fn validator() -> FieldValidator<FixedClock> {
        FieldValidator::new(FixedClock::ymd(2026, 10, 15).unwrap())
    }

    fn run(response: &str, issues: Vec<QualityIssue>) -> Verification {
        verify(parse_response(response), issues, &validator(), &ScoreFuser::default())
    }

    const GOOD: &str = r#"{
        "is_valid_ktp": true,
        "confidence_score": 0.95,
        "extracted_data": {
            "nik": "3201121205900001",
            "nama": "BUDI SANTOSO",
            "tanggal_lahir": "12-05-1990",
            "jenis_kelamin": "LAKI-LAKI",
            "provinsi": "JAWA BARAT"
        },
        "face_detection": {
            "found": true,
            "bounding_box": {"x": 1, "y": 2, "width": 3, "height": 4},
            "confidence": 0.9
        }
    }"#;

    #[test]
    fn clean_card_would_be_persisted() {
        let v = run(GOOD, vec![]);
        assert_eq!(v.status, ProcessingStatus::Success);
        assert!(v.would_persist());
        assert!((v.confidence - 0.95).abs() < 1e-9);
        assert!(v.defects.is_empty());
        assert_eq!(v.notes, vec!["face detected (confidence: 0.90)"]);
    }

    #[test]
    fn quality_issues_scale_confidence_and_are_noted() {
        let v = run(GOOD, vec![QualityIssue::TooDark]);
        assert!((v.confidence - 0.76).abs() < 1e-9, "got {}", v.confidence);
        assert!(v.valid);
        assert_eq!(v.notes[0], "image quality issues: image too dark");
    }

    #[test]
    fn defects_are_appended_to_extractor_errors() {
        let response = r#"{
            "is_valid_ktp": true,
            "confidence_score": 0.9,
            "extracted_data": {"nik": "3201122505900001", "nama": "AN", "jenis_kelamin": "PEREMPUAN"},
            "validation_errors": ["glare on lower half"]
        }"#;
        let v = run(response, vec![]);
        assert_eq!(v.validation_errors.len(), 2);
        assert_eq!(v.validation_errors[0], "glare on lower half");
        assert_eq!(v.defects[0].code, DefectCode::SexMismatch);
        // One defect does not flip validity.
        assert_eq!(v.status, ProcessingStatus::Success);
        assert!((v.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn many_defects_reject_the_card() {
        let response = r#"{
            "is_valid_ktp": true,
            "confidence_score": 0.9,
            "extracted_data": {"nik": "0000001205900000", "nama": "B", "rt_rw": "1/1"}
        }"#;
        let v = run(response, vec![]);
        assert_eq!(v.status, ProcessingStatus::InvalidKtp);
        assert!(!v.would_persist());
        assert!(v.summary.unwrap().error_count > 3);
    }

    #[test]
    fn extractor_rejection_skips_validation() {
        let v = run(
            r#"{"is_valid_ktp": false, "confidence_score": 0.3,
                "validation_errors": ["not an identity card"],
                "face_detection": {"found": false}}"#,
            vec![],
        );
        assert_eq!(v.status, ProcessingStatus::InvalidKtp);
        assert!(v.summary.is_none());
        assert!((v.confidence - 0.3).abs() < 1e-9);
        assert_eq!(v.notes, vec!["no face detected"]);
    }

    #[test]
    fn valid_without_fields_is_not_persisted() {
        let v = run(r#"{"is_valid_ktp": true, "confidence_score": 0.9}"#, vec![]);
        assert_eq!(v.status, ProcessingStatus::InvalidKtp);
        assert!(v.summary.is_none());
    }

    #[test]
    fn unparseable_answer_fails() {
        let v = run("the model said no", vec![]);
        assert_eq!(v.status, ProcessingStatus::Failed);
        assert_eq!(v.confidence, 0.0);
        assert!(v.validation_errors[0].starts_with("extraction failed"));
    }

    #[test]
    fn status_serializes_like_the_log_table() {
        let json = serde_json::to_string(&ProcessingStatus::InvalidKtp).unwrap();
        assert_eq!(json, "\"INVALID_KTP\"");
    }
}
