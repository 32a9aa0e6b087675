use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::anomaly::{DetectorConfig, MIN_IOU_THRESH};
use crate::detection::{split_by_confidence, Detection};
use crate::error::Error;

pub const CONFIDENCE_THRESHOLD: f32 = 0.4;

/// Thresholds for one analysis run. Missing keys fall back to defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Detections below this never reach the tracker and are kept as
    /// low-confidence predictions.
    pub confidence_threshold: f32,
    pub min_iou: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
            min_iou: MIN_IOU_THRESH,
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Splits raw detections at `confidence_threshold` into the tracker's
    /// input and the low-confidence rest.
    #[inline]
    pub fn split(
        &self,
        detections: impl IntoIterator<Item = Detection>,
    ) -> (Vec<Detection>, Vec<Detection>) {
        split_by_confidence(detections, self.confidence_threshold)
    }

    #[inline]
    pub fn detector(&self) -> DetectorConfig {
        DetectorConfig {
            min_iou: self.min_iou,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AnalysisConfig;
    use crate::bbox::BBox;
    use crate::detection::Detection;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.confidence_threshold, 0.4);
        assert_eq!(config.detector().min_iou, 0.5);
    }

    #[test]
    fn test_partial_yaml() {
        let config = AnalysisConfig::from_yaml("min_iou: 0.3\n").unwrap();
        assert_eq!(config.min_iou, 0.3);
        assert_eq!(config.confidence_threshold, 0.4);
    }

    #[test]
    fn test_split_uses_threshold() {
        let dets = || {
            [0.95, 0.6, 0.2]
                .into_iter()
                .map(|p| Detection::new(BBox::ltwh(0, 0, 5, 5), p, 0))
                .collect::<Vec<_>>()
        };

        let (accepted, low) = AnalysisConfig::default().split(dets());
        assert_eq!((accepted.len(), low.len()), (2, 1));

        let strict = AnalysisConfig::from_yaml("confidence_threshold: 0.9\n").unwrap();
        let (accepted, low) = strict.split(dets());
        assert_eq!(accepted.len(), 1);
        assert_eq!(low.iter().map(|d| d.confidence).collect::<Vec<_>>(), vec![0.6, 0.2]);
    }

    #[test]
    fn test_bad_yaml() {
        let err = AnalysisConfig::from_yaml("min_iou: [nope").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AnalysisConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
