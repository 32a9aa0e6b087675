//! Temporal consistency checks over finished object tracks.
//!
//! Every object is inspected on its own with the same battery of checks,
//! in a fixed order:
//!
//! 1. the object keeps a single class for its whole life,
//! 2. it is reported in every frame between its first and last sighting,
//! 3. it is seen in more than one frame,
//! 4. its box overlaps enough between consecutive sightings.
//!
//! All checks run for every object and each one that fires adds its own
//! findings, so an object can collect several of them.

use log::{debug, error, info};
use serde_derive::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::collection::TrackedFrameCollection;
use crate::error::Error;
use crate::object_track::ObjectTrack;
use crate::track::ObjectId;

pub const MIN_IOU_THRESH: f64 = 0.5;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    ClassInconsistent,
    MissingInFrames,
    SingleFrameOccurrence,
    LowIou,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::ClassInconsistent => "class_inconsistent",
            AnomalyKind::MissingInFrames => "missing_in_frames",
            AnomalyKind::SingleFrameOccurrence => "single_frame_occurrence",
            AnomalyKind::LowIou => "low_iou",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fired check. `frames` is never empty, its first entry is the frame
/// the finding points at.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Finding {
    pub kind: AnomalyKind,
    pub frames: Vec<u32>,
    pub detail: String,
}

impl Finding {
    #[inline]
    pub fn frame(&self) -> Option<u32> {
        self.frames.first().copied()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AnomalyReport {
    anomalies: BTreeMap<ObjectId, Vec<Finding>>,

    // objects whose inspection failed, with the reason
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    failures: BTreeMap<ObjectId, String>,
}

impl AnomalyReport {
    /// Findings of one object, empty for clean or unknown objects.
    pub fn get(&self, object_id: &ObjectId) -> &[Finding] {
        self.anomalies
            .get(object_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[inline]
    pub fn is_anomalous(&self, object_id: &ObjectId) -> bool {
        !self.get(object_id).is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &[Finding])> {
        self.anomalies.iter().map(|(id, f)| (id, f.as_slice()))
    }

    /// Number of objects with at least one finding.
    #[inline]
    pub fn len(&self) -> usize {
        self.anomalies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
    }

    pub fn num_findings(&self) -> usize {
        self.anomalies.values().map(Vec::len).sum()
    }

    pub fn count(&self, kind: AnomalyKind) -> usize {
        self.anomalies
            .values()
            .flatten()
            .filter(|f| f.kind == kind)
            .count()
    }

    #[inline]
    pub fn failures(&self) -> &BTreeMap<ObjectId, String> {
        &self.failures
    }

    fn record(&mut self, object_id: &ObjectId, findings: Vec<Finding>) {
        if !findings.is_empty() {
            self.anomalies
                .entry(object_id.clone())
                .or_default()
                .extend(findings);
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    /// Consecutive boxes overlapping less than this are flagged.
    pub min_iou: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_iou: MIN_IOU_THRESH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemporalAnomalyDetector {
    config: DetectorConfig,
}

impl TemporalAnomalyDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn scan(&self, collection: &TrackedFrameCollection) -> AnomalyReport {
        self.scan_objects(collection.objects())
    }

    /// Inspects every object independently. An object that can not be
    /// inspected is recorded as a failure and the scan moves on.
    pub fn scan_objects<'a>(
        &self,
        objects: impl IntoIterator<Item = (&'a ObjectId, &'a ObjectTrack)>,
    ) -> AnomalyReport {
        let mut report = AnomalyReport::default();
        let mut scanned = 0usize;

        for (object_id, track) in objects {
            scanned += 1;

            match self.inspect(object_id, track) {
                Ok(findings) => report.record(object_id, findings),
                Err(err) => {
                    error!("object {}: {}", object_id, err);
                    report.failures.insert(object_id.clone(), err.to_string());
                }
            }
        }

        debug!(
            "scanned {} objects: {} anomalous, {} findings",
            scanned,
            report.len(),
            report.num_findings()
        );

        report
    }

    /// Runs all checks for one object. An empty track is a broken
    /// aggregate and yields `InvariantViolation`.
    pub fn inspect(
        &self,
        object_id: &ObjectId,
        track: &ObjectTrack,
    ) -> Result<Vec<Finding>, Error> {
        if track.is_empty() {
            return Err(Error::InvariantViolation(format!(
                "object {} has an empty track history",
                object_id
            )));
        }

        let mut findings = Vec::new();
        findings.extend(check_class_consistency(track));
        findings.extend(check_continuity(track));
        findings.extend(check_single_occurrence(track));
        findings.extend(check_iou(track, self.config.min_iou));

        for finding in &findings {
            info!("object_id={}: {}", object_id, finding.detail);
        }

        Ok(findings)
    }
}

fn class_label(name: Option<&str>) -> &str {
    name.unwrap_or("None")
}

/// Fires when the object was given more than one class name. Points at the
/// first frame whose class differs from the previous sighting.
pub fn check_class_consistency(track: &ObjectTrack) -> Option<Finding> {
    let classes: BTreeSet<Option<&str>> = track
        .predictions()
        .map(|p| p.class_name.as_deref())
        .collect();

    if classes.len() <= 1 {
        return None;
    }

    let (prev, next) = track
        .pairs()
        .find(|(a, b)| a.class_name != b.class_name)?;

    let all = classes
        .iter()
        .map(|c| class_label(*c))
        .collect::<Vec<_>>()
        .join(", ");

    Some(Finding {
        kind: AnomalyKind::ClassInconsistent,
        frames: vec![next.frame_id],
        detail: format!(
            "occurs as the following classes: {}; changes from {} to {} at frame {}",
            all,
            class_label(prev.class_name.as_deref()),
            class_label(next.class_name.as_deref()),
            next.frame_id
        ),
    })
}

/// Fires when the object vanished for at least one frame between its first
/// and last sighting. Lists every missing frame, lowest first.
pub fn check_continuity(track: &ObjectTrack) -> Option<Finding> {
    let missing = track.missing_frames();
    let first = *missing.first()?;

    Some(Finding {
        kind: AnomalyKind::MissingInFrames,
        detail: format!(
            "is missing in {} frames, first missing frame {}",
            missing.len(),
            first
        ),
        frames: missing,
    })
}

/// Fires for objects seen exactly once, usually a false detection.
pub fn check_single_occurrence(track: &ObjectTrack) -> Option<Finding> {
    if track.len() != 1 {
        return None;
    }

    let frame_id = track.first_frame()?;

    Some(Finding {
        kind: AnomalyKind::SingleFrameOccurrence,
        frames: vec![frame_id],
        detail: format!(
            "occurs only in frame {}, may indicate false detection",
            frame_id
        ),
    })
}

/// One finding per consecutive pair of sightings whose IoU is strictly
/// below `min_iou`.
pub fn check_iou(track: &ObjectTrack, min_iou: f64) -> Vec<Finding> {
    track
        .pairs()
        .filter_map(|(a, b)| {
            let iou = a.bbox.iou(&b.bbox);

            (iou < min_iou).then(|| Finding {
                kind: AnomalyKind::LowIou,
                frames: vec![a.frame_id, b.frame_id],
                detail: format!(
                    "iou={:.4} is lower than threshold of {} between frame {} and frame {}",
                    iou, min_iou, a.frame_id, b.frame_id
                ),
            })
        })
        .collect()
}
