pub mod anomaly;
pub mod bbox;
pub mod class_names;
pub mod collection;
pub mod config;
pub mod detection;
pub mod error;
pub mod frame;
pub mod object_track;
pub mod prediction;
pub mod track;

pub use anomaly::{AnomalyKind, AnomalyReport, Finding, TemporalAnomalyDetector};
pub use class_names::ClassNames;
pub use collection::TrackedFrameCollection;
pub use config::AnalysisConfig;
pub use detection::Detection;
pub use frame::Frame;
pub use object_track::ObjectTrack;
pub use prediction::Prediction;
pub use track::{ObjectId, Track};

use error::Error;

/// Feeds frames in order and scans the result once the sequence is done.
/// Stops at the first frame that can not be ingested.
pub fn analyze<'a>(
    frames: impl IntoIterator<Item = &'a Frame>,
    class_names: ClassNames,
    config: &AnalysisConfig,
) -> Result<(TrackedFrameCollection, AnomalyReport), Error> {
    let mut collection = TrackedFrameCollection::new(class_names);
    for frame in frames {
        collection.ingest_frame(frame)?;
    }

    let report = TemporalAnomalyDetector::new(config.detector()).scan(&collection);

    Ok((collection, report))
}
