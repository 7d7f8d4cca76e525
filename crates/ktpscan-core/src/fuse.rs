//! Fusion of extractor confidence, defects and image quality into one verdict.

use serde::Serialize;
use tracing::debug;

use crate::validate::ValidationOutcome;

/// Tuning constants for [`ScoreFuser`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionPolicy {
    /// Subtracted from the confidence per defect.
    pub penalty_per_defect: f64,
    /// Upper bound on the total defect penalty.
    pub max_penalty: f64,
    /// More defects than this force the verdict to invalid.
    pub max_defects: usize,
}

impl Default for FusionPolicy {
    fn default() -> Self {
        Self {
            penalty_per_defect: 0.1,
            max_penalty: 0.3,
            max_defects: 3,
        }
    }
}

/// External signals the fuser consumes alongside a [`ValidationOutcome`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    /// The extractor's own confidence. Untrusted; clamped to [0, 1].
    pub extractor_confidence: f64,
    /// Image quality in [0, 1], see [`crate::image_quality_score`].
    pub image_quality: f64,
    /// The extractor's own validity verdict.
    pub upstream_valid: bool,
}

/// Final confidence and validity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalVerdict {
    pub confidence: f64,
    pub valid: bool,
}

/// Combines the scoring signals. Stateless; the same inputs always give the
/// same verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreFuser {
    policy: FusionPolicy,
}

impl ScoreFuser {
    pub fn new(policy: FusionPolicy) -> Self {
        Self { policy }
    }

    pub fn fuse(&self, inputs: ScoreInputs, outcome: &ValidationOutcome) -> FinalVerdict {
        self.fuse_count(inputs, outcome.defect_count())
    }

    /// [`ScoreFuser::fuse`] on a bare defect count.
    ///
    /// The penalty is capped, then the image factor is applied
    /// multiplicatively, so a poor image scales the whole score down and a
    /// clean field set cannot compensate for it. Validity is only ever
    /// downgraded: too many defects force it false, otherwise the upstream
    /// verdict stands.
    pub fn fuse_count(&self, inputs: ScoreInputs, defect_count: usize) -> FinalVerdict {
        let base = unit(inputs.extractor_confidence);
        let penalty =
            (defect_count as f64 * self.policy.penalty_per_defect).min(self.policy.max_penalty);
        let confidence = unit((base - penalty) * unit(inputs.image_quality));

        let too_many_defects = defect_count > self.policy.max_defects;
        if too_many_defects && inputs.upstream_valid {
            debug!(
                defect_count,
                max_defects = self.policy.max_defects,
                "too many defects, verdict forced invalid"
            );
        }

        FinalVerdict {
            confidence,
            valid: inputs.upstream_valid && !too_many_defects,
        }
    }
}

/// Clamp to [0, 1]. NaN maps to 0.
fn unit(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}
