use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::prediction::Prediction;

/// All observations of one object, keyed by frame id. Iteration is always
/// in ascending frame order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ObjectTrack {
    frames: BTreeMap<u32, Prediction>,
}

impl ObjectTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, prediction: Prediction) -> Option<Prediction> {
        self.frames.insert(prediction.frame_id, prediction)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn get(&self, frame_id: u32) -> Option<&Prediction> {
        self.frames.get(&frame_id)
    }

    #[inline]
    pub fn contains(&self, frame_id: u32) -> bool {
        self.frames.contains_key(&frame_id)
    }

    #[inline]
    pub fn first_frame(&self) -> Option<u32> {
        self.frames.keys().next().copied()
    }

    #[inline]
    pub fn last_frame(&self) -> Option<u32> {
        self.frames.keys().next_back().copied()
    }

    /// `(first, last)` frame ids, both inclusive.
    #[inline]
    pub fn bounds(&self) -> Option<(u32, u32)> {
        Some((self.first_frame()?, self.last_frame()?))
    }

    /// Number of frames between the first and the last sighting, inclusive.
    pub fn expected_len(&self) -> usize {
        match self.bounds() {
            Some((mn, mx)) => (mx - mn) as usize + 1,
            None => 0,
        }
    }

    #[inline]
    pub fn frame_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.frames.keys().copied()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Prediction)> {
        self.frames.iter().map(|(id, pred)| (*id, pred))
    }

    #[inline]
    pub fn predictions(&self) -> impl Iterator<Item = &Prediction> {
        self.frames.values()
    }

    /// Consecutive observations in ascending frame order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Prediction, &Prediction)> {
        self.frames.values().zip(self.frames.values().skip(1))
    }

    /// Every frame id from first to last sighting, with the prediction when
    /// the object was seen there.
    pub fn span(&self) -> impl Iterator<Item = (u32, Option<&Prediction>)> {
        // an empty track yields an empty range
        let (mn, mx) = self.bounds().unwrap_or((1, 0));

        (mn..=mx).map(move |id| (id, self.frames.get(&id)))
    }

    /// Frame ids inside the span where the object was not reported.
    pub fn missing_frames(&self) -> Vec<u32> {
        if self.len() == self.expected_len() {
            return Vec::new();
        }

        self.span()
            .filter_map(|(id, pred)| pred.is_none().then_some(id))
            .collect()
    }
}

impl FromIterator<Prediction> for ObjectTrack {
    fn from_iter<I: IntoIterator<Item = Prediction>>(iter: I) -> Self {
        let mut track = Self::new();
        for pred in iter {
            track.insert(pred);
        }

        track
    }
}
