use serde_derive::{Deserialize, Serialize};

use crate::detection::Detection;
use crate::prediction::Prediction;
use crate::track::Track;

/// Everything the detector/tracker pipeline reports for one frame.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Frame {
    pub frame_id: u32,
    #[serde(default)]
    pub dims: Option<(u32, u32)>,
    #[serde(default)]
    pub tracks: Vec<Track>,
    // detections under the confidence threshold, never seen by the tracker
    #[serde(default)]
    pub detections: Vec<Detection>,
}

impl Frame {
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }
}

/// Per-frame aggregate kept by the collection
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub frame_id: u32,
    pub dims: Option<(u32, u32)>,
    pub confident: Vec<Prediction>,
    pub low_confidence: Vec<Prediction>,
}

impl FrameRecord {
    pub(crate) fn new(frame_id: u32, dims: Option<(u32, u32)>) -> Self {
        Self {
            frame_id,
            dims,
            confident: Vec::new(),
            low_confidence: Vec::new(),
        }
    }

    #[inline]
    pub fn num_objects(&self) -> usize {
        self.confident.len()
    }

    #[inline]
    pub fn predictions(&self) -> (&[Prediction], &[Prediction]) {
        (&self.confident, &self.low_confidence)
    }
}
