use serde_derive::{Deserialize, Serialize};
use std::fmt;

use crate::bbox::{BBox, Ltrb};
use crate::class_names::ClassNames;
use crate::detection::Detection;
use crate::track::Track;

/// One object observation in one frame, in the canonical ltrb layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Prediction {
    pub frame_id: u32,
    pub bbox: BBox<Ltrb>,
    pub confidence: Option<f32>,
    pub class_id: i32,
    pub class_name: Option<String>,
}

impl Prediction {
    pub fn new(
        frame_id: u32,
        bbox: BBox<Ltrb>,
        confidence: Option<f32>,
        class_id: i32,
        class_names: &ClassNames,
    ) -> Self {
        Self {
            frame_id,
            bbox,
            confidence,
            class_id,
            class_name: class_names.get(class_id).map(str::to_string),
        }
    }

    #[inline]
    pub fn from_track(frame_id: u32, track: &Track, class_names: &ClassNames) -> Self {
        Self::new(
            frame_id,
            track.bbox,
            track.confidence,
            track.class,
            class_names,
        )
    }

    #[inline]
    pub fn from_detection(frame_id: u32, det: &Detection, class_names: &ClassNames) -> Self {
        Self::new(
            frame_id,
            det.bbox.as_ltrb(),
            Some(det.confidence),
            det.class,
            class_names,
        )
    }

    /// Longer form of `Display` that also carries frame and class id.
    pub fn describe(&self) -> String {
        format!(
            "frame_id={}, class_id={}, {}",
            self.frame_id, self.class_id, self
        )
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.class_name {
            Some(name) => write!(f, "{}, {}, ", name, self.bbox)?,
            None => write!(f, "None, {}, ", self.bbox)?,
        }

        match self.confidence {
            Some(conf) => write!(f, "{:.4}", conf),
            None => f.write_str("None"),
        }
    }
}
