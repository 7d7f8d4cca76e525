//! The extractor seam.

use std::path::Path;

use tracing::info;

use crate::response::{ExtractError, ExtractionReport, parse_response};

/// Transcribes a card image and locates the bearer's face.
///
/// Implementations talk to an AI model; the rest of the system only sees the
/// decoded [`ExtractionReport`] or the failure.
pub trait Extractor {
    fn extract(&self, image: &[u8]) -> Result<ExtractionReport, ExtractError>;
}

/// Replays a previously captured model answer, whatever the image.
///
/// Used to re-run validation on stored responses and in tests.
#[derive(Debug, Clone)]
pub struct ReplayExtractor {
    response: String,
}

impl ReplayExtractor {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let response = std::fs::read_to_string(path)?;
        info!(path = %path.display(), bytes = response.len(), "loaded captured response");
        Ok(Self::new(response))
    }
}

impl Extractor for ReplayExtractor {
    fn extract(&self, _image: &[u8]) -> Result<ExtractionReport, ExtractError> {
        parse_response(&self.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_captured_answer() {
        let extractor = ReplayExtractor::new(
            r#"{"is_valid_ktp": true, "confidence_score": 0.8,
                "extracted_data": {"nik": "3201121205900001", "nama": "BUDI"}}"#,
        );
        let report = extractor.extract(b"not really a jpeg").unwrap();
        assert!(report.is_valid);
        assert_eq!(report.extracted_data.unwrap().name, "BUDI");
    }

    #[test]
    fn missing_capture_is_io_error() {
        let err = ReplayExtractor::from_path(Path::new("/nonexistent/ktpscan/response.json"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[test]
    fn works_as_trait_object() {
        let extractor: Box<dyn Extractor> = Box::new(ReplayExtractor::new("not json"));
        assert!(extractor.extract(&[]).is_err());
    }
}
