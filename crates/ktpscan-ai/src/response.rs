//! Decoding of the model's JSON answer into an [`ExtractionReport`].
//!
//! The model is asked for bare JSON but often wraps it in a Markdown code
//! fence; [`strip_code_fence`] removes that before decoding.

use ktpscan_core::ExtractedRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extractor returned an empty response")]
    EmptyResponse,
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Face location in pixels of the analysed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// The bearer's photo as located by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub quality_notes: Option<String>,
}

/// Everything the extractor reports for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// The model's own verdict on whether the image is a genuine KTP.
    #[serde(rename = "is_valid_ktp", default)]
    pub is_valid: bool,
    #[serde(rename = "confidence_score", default)]
    pub confidence: f64,
    #[serde(default)]
    pub extracted_data: Option<ExtractedRecord>,
    #[serde(default)]
    pub face_detection: Option<FaceDetection>,
    #[serde(default)]
    pub validation_errors: Vec<String>,
    #[serde(default)]
    pub processing_notes: Option<String>,
}

impl ExtractionReport {
    /// Degraded report for a failed extraction: invalid, zero confidence,
    /// the failure as its only error.
    pub fn from_error(err: &ExtractError) -> Self {
        Self {
            is_valid: false,
            confidence: 0.0,
            extracted_data: None,
            face_detection: None,
            validation_errors: vec![format!("extraction failed: {err}")],
            processing_notes: None,
        }
    }

    /// Apply the report-level consistency rules after decoding.
    ///
    /// - Fields are only kept when the model judged the card valid.
    /// - A face reported as found without a bounding box is treated as not found.
    fn normalize(mut self) -> Self {
        if !self.is_valid && self.extracted_data.take().is_some() {
            debug!("dropping extracted fields from a report marked invalid");
        }
        if let Some(face) = &mut self.face_detection
            && face.found
            && face.bounding_box.is_none()
        {
            warn!("face reported without bounding box, treating as not found");
            face.found = false;
            face.confidence = 0.0;
            face.quality_notes = Some("face bounding box incomplete".to_string());
        }
        self
    }
}

/// Remove a surrounding ```` ```json ```` (or bare ```` ``` ````) fence.
pub fn strip_code_fence(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Decode the model's raw answer.
pub fn parse_response(text: &str) -> Result<ExtractionReport, ExtractError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(ExtractError::EmptyResponse);
    }
    let report: ExtractionReport = serde_json::from_str(body)?;
    Ok(report.normalize())
}
