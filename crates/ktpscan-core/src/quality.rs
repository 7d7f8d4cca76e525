//! Image-quality flags and their collapse into a single score.
//!
//! The core never looks at pixels. The image pipeline measures the photo and
//! hands over [`ImageMetrics`]; this module turns them into flags and the
//! flags into the factor the fuser multiplies by.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_WIDTH: u32 = 800;
pub const MIN_HEIGHT: u32 = 500;
/// Width/height of an ID-1 card.
pub const CARD_ASPECT_RATIO: f64 = 1.586;
pub const ASPECT_RATIO_TOLERANCE: f64 = 0.5;
pub const DARK_BRIGHTNESS: f64 = 50.0;
pub const BRIGHT_BRIGHTNESS: f64 = 200.0;

/// Score for an image with at least one quality issue.
pub const DEGRADED_QUALITY_SCORE: f64 = 0.8;

/// Measurements taken by the image pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageMetrics {
    pub width: u32,
    pub height: u32,
    /// Mean grey level, 0-255. `None` when the pipeline did not measure it.
    pub mean_brightness: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityIssue {
    LowResolution { width: u32, height: u32 },
    AspectRatio { ratio: f64 },
    TooDark,
    TooBright,
    /// Anything else the pipeline reported, as free text.
    Other { note: String },
}

impl QualityIssue {
    pub fn assess(metrics: &ImageMetrics) -> Vec<QualityIssue> {
        let mut issues = Vec::new();

        if metrics.width < MIN_WIDTH || metrics.height < MIN_HEIGHT {
            issues.push(Self::LowResolution {
                width: metrics.width,
                height: metrics.height,
            });
        }

        if metrics.height > 0 {
            let ratio = f64::from(metrics.width) / f64::from(metrics.height);
            if (ratio - CARD_ASPECT_RATIO).abs() > ASPECT_RATIO_TOLERANCE {
                issues.push(Self::AspectRatio { ratio });
            }
        }

        match metrics.mean_brightness {
            Some(b) if b < DARK_BRIGHTNESS => issues.push(Self::TooDark),
            Some(b) if b > BRIGHT_BRIGHTNESS => issues.push(Self::TooBright),
            _ => {}
        }

        issues
    }
}

impl fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowResolution { width, height } => write!(
                f,
                "low resolution {width}x{height}, at least {MIN_WIDTH}x{MIN_HEIGHT} recommended"
            ),
            Self::AspectRatio { ratio } => write!(
                f,
                "aspect ratio {ratio:.2} is far from the card's {CARD_ASPECT_RATIO:.2}"
            ),
            Self::TooDark => f.write_str("image too dark"),
            Self::TooBright => f.write_str("image too bright"),
            Self::Other { note } => f.write_str(note),
        }
    }
}

/// 1.0 for a clean image, [`DEGRADED_QUALITY_SCORE`] if anything was flagged.
pub fn image_quality_score(issues: &[QualityIssue]) -> f64 {
    if issues.is_empty() {
        1.0
    } else {
        DEGRADED_QUALITY_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(width: u32, height: u32, brightness: f64) -> ImageMetrics {
        ImageMetrics {
            width,
            height,
            mean_brightness: Some(brightness),
        }
    }

    #[test]
    fn good_photo_has_no_issues() {
        let issues = QualityIssue::assess(&metrics(1586, 1000, 128.0));
        assert!(issues.is_empty(), "{issues:?}");
        assert_eq!(image_quality_score(&issues), 1.0);
    }

    #[test]
    fn small_dark_photo() {
        let issues = QualityIssue::assess(&metrics(640, 400, 20.0));
        assert_eq!(
            issues,
            vec![
                QualityIssue::LowResolution { width: 640, height: 400 },
                QualityIssue::TooDark,
            ]
        );
        assert_eq!(image_quality_score(&issues), DEGRADED_QUALITY_SCORE);
    }

    #[test]
    fn portrait_photo_flags_aspect_ratio() {
        let issues = QualityIssue::assess(&metrics(1000, 1500, 230.0));
        assert!(matches!(issues[0], QualityIssue::AspectRatio { .. }));
        assert_eq!(issues[1], QualityIssue::TooBright);
    }

    #[test]
    fn unmeasured_brightness_is_not_flagged() {
        let issues = QualityIssue::assess(&ImageMetrics {
            width: 1600,
            height: 1000,
            mean_brightness: None,
        });
        assert!(issues.is_empty());
    }

    #[test]
    fn zero_height_does_not_divide() {
        let issues = QualityIssue::assess(&metrics(0, 0, 100.0));
        assert_eq!(issues, vec![QualityIssue::LowResolution { width: 0, height: 0 }]);
    }

    #[test]
    fn score_ignores_issue_count() {
        let many = vec![QualityIssue::TooDark; 4];
        assert_eq!(image_quality_score(&many), image_quality_score(&many[..1]));
    }
}
