use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltwh};

/// Raw detector output, as the detector reports it: left-top-width-height
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub bbox: BBox<Ltwh>,
    #[serde(rename = "p")]
    pub confidence: f32,
    #[serde(rename = "c")]
    pub class: i32,
}

impl Detection {
    #[inline]
    pub fn new(bbox: BBox<Ltwh>, confidence: f32, class: i32) -> Self {
        Self {
            bbox,
            confidence,
            class,
        }
    }
}

/// Partitions detections into the ones handed to the tracker
/// (`confidence >= threshold`) and the low-confidence rest.
pub fn split_by_confidence(
    detections: impl IntoIterator<Item = Detection>,
    threshold: f32,
) -> (Vec<Detection>, Vec<Detection>) {
    detections
        .into_iter()
        .partition(|det| det.confidence >= threshold)
}
