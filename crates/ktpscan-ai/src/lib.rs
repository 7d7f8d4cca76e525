//! AI extractor layer: decoding the model's answer and the extractor seam.

mod extractor;
mod response;

pub use extractor::{Extractor, ReplayExtractor};
pub use response::{
    BoundingBox, ExtractError, ExtractionReport, FaceDetection, parse_response, strip_code_fence,
};
