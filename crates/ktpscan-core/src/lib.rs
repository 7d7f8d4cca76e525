//! Validation and confidence scoring for transcribed KTP (Indonesian identity card) records.

pub mod clock;
pub mod defect;
pub mod engine;
mod error;
pub mod fuse;
pub mod nik;
pub mod quality;
pub mod record;
pub mod reference;
pub mod validate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use defect::{Defect, DefectCode, Severity, ValidationSummary};
pub use engine::{Evaluation, evaluate};
pub use error::CoreError;
pub use fuse::{FinalVerdict, FusionPolicy, ScoreFuser, ScoreInputs};
pub use nik::{EmbeddedBirthDate, IdentityNumber, IdentityNumberError, RegionLevel};
pub use quality::{ImageMetrics, QualityIssue, image_quality_score};
pub use record::ExtractedRecord;
pub use reference::{MaritalStatus, Province, Religion, Sex};
pub use validate::{FieldValidator, ValidationOutcome};
