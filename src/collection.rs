use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::class_names::ClassNames;
use crate::detection::Detection;
use crate::error::Error;
use crate::frame::{Frame, FrameRecord};
use crate::object_track::ObjectTrack;
use crate::prediction::Prediction;
use crate::track::{ObjectId, Track};

/// Owns everything collected over one video run: one record per ingested
/// frame and one track history per object.
///
/// Ingestion is single writer and append only. Frame ids have to grow
/// strictly, gaps are fine.
#[derive(Debug, Clone, Default)]
pub struct TrackedFrameCollection {
    class_names: ClassNames,
    frames: Vec<FrameRecord>,
    all_objects: BTreeMap<ObjectId, ObjectTrack>,
}

impl TrackedFrameCollection {
    pub fn new(class_names: ClassNames) -> Self {
        Self {
            class_names,
            frames: Vec::new(),
            all_objects: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn class_names(&self) -> &ClassNames {
        &self.class_names
    }

    /// Adds the confirmed tracks and the low-confidence detections of one
    /// frame. On error nothing is stored.
    pub fn ingest(
        &mut self,
        frame_id: u32,
        tracks: &[Track],
        low_confidence: &[Detection],
    ) -> Result<(), Error> {
        self.ingest_inner(frame_id, None, tracks, low_confidence)
    }

    #[inline]
    pub fn ingest_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        self.ingest_inner(frame.frame_id, frame.dims, &frame.tracks, &frame.detections)
    }

    fn ingest_inner(
        &mut self,
        frame_id: u32,
        dims: Option<(u32, u32)>,
        tracks: &[Track],
        low_confidence: &[Detection],
    ) -> Result<(), Error> {
        self.check_frame(frame_id, tracks)?;

        let mut record = FrameRecord::new(frame_id, dims);

        for track in tracks {
            let pred = Prediction::from_track(frame_id, track, &self.class_names);
            trace!("frame {}: object {} -> {}", frame_id, track.track_id, pred);

            self.all_objects
                .entry(track.track_id.clone())
                .or_default()
                .insert(pred.clone());

            record.confident.push(pred);
        }

        record.low_confidence = low_confidence
            .iter()
            .map(|det| Prediction::from_detection(frame_id, det, &self.class_names))
            .collect();

        debug!(
            "ingested frame {}: {} tracked, {} low confidence",
            frame_id,
            record.confident.len(),
            record.low_confidence.len()
        );

        self.frames.push(record);

        Ok(())
    }

    fn check_frame(&self, frame_id: u32, tracks: &[Track]) -> Result<(), Error> {
        if let Some(last) = self.frames.last() {
            if frame_id <= last.frame_id {
                return Err(Error::InvariantViolation(format!(
                    "frame {} ingested after frame {}",
                    frame_id, last.frame_id
                )));
            }
        }

        let mut seen = HashSet::with_capacity(tracks.len());
        for track in tracks {
            if !seen.insert(&track.track_id) {
                return Err(Error::InvariantViolation(format!(
                    "object {} reported twice in frame {}",
                    track.track_id, frame_id
                )));
            }
        }

        Ok(())
    }

    /// Every object id seen so far, in id order.
    pub fn object_track_ids(&self) -> BTreeSet<ObjectId> {
        self.all_objects.keys().cloned().collect()
    }

    pub fn track_history(&self, object_id: &ObjectId) -> Result<&ObjectTrack, Error> {
        self.all_objects
            .get(object_id)
            .ok_or_else(|| Error::ObjectNotFound(object_id.clone()))
    }

    #[inline]
    pub fn objects(&self) -> impl Iterator<Item = (&ObjectId, &ObjectTrack)> {
        self.all_objects.iter()
    }

    pub fn frame(&self, frame_id: u32) -> Result<&FrameRecord, Error> {
        self.frames
            .binary_search_by_key(&frame_id, |rec| rec.frame_id)
            .map(|idx| &self.frames[idx])
            .map_err(|_| Error::FrameNotFound(frame_id))
    }

    /// Confident and low-confidence predictions of one frame.
    pub fn frame_predictions(
        &self,
        frame_id: u32,
    ) -> Result<(&[Prediction], &[Prediction]), Error> {
        Ok(self.frame(frame_id)?.predictions())
    }

    #[inline]
    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    #[inline]
    pub fn frame_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.frames.iter().map(|rec| rec.frame_id)
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn num_objects(&self) -> usize {
        self.all_objects.len()
    }
}
