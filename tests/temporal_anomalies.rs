use tcheck::bbox::BBox;
use tcheck::detection::Detection;
use tcheck::{
    analyze, AnalysisConfig, AnomalyKind, ClassNames, Frame, ObjectId, TemporalAnomalyDetector,
    Track, TrackedFrameCollection,
};

fn class_names() -> ClassNames {
    [(0, "person"), (2, "car"), (7, "truck")]
        .into_iter()
        .collect()
}

/// Object 1 drives smoothly through frames 0..=9 and is always a car.
/// Object 2 skips frame 4, turns into a truck at frame 6 and jumps at 8.
/// Object 3 shows up once.
fn frames() -> Vec<Frame> {
    (0..10u32)
        .map(|i| {
            let x = i as i32 * 2;
            let smooth = Track::new(1u32, BBox::ltrb(x, 0, x + 20, 20), Some(0.9), 2);
            let mut tracks = vec![smooth];

            if i != 4 {
                let (l, class) = match i {
                    0..=5 => (100, 2),
                    6..=7 => (100, 7),
                    _ => (200, 7),
                };
                tracks.push(Track::new(2u32, BBox::ltrb(l, 100, l + 30, 130), None, class));
            }

            if i == 3 {
                tracks.push(Track::new("x3", BBox::ltrb(400, 400, 410, 410), Some(0.5), 0));
            }

            let raw = vec![
                Detection::new(BBox::ltwh(300, 300, 10, 10), 0.2, 0),
                Detection::new(BBox::ltwh(310, 300, 10, 10), 0.7, 0),
            ];
            let (_, low) = AnalysisConfig::default().split(raw);

            Frame {
                frame_id: i,
                dims: Some((640, 480)),
                tracks,
                detections: low,
            }
        })
        .collect()
}

#[test]
fn test_full_run() {
    let frames = frames();
    let (collection, report) =
        analyze(&frames, class_names(), &AnalysisConfig::default()).unwrap();

    assert_eq!(collection.num_frames(), 10);
    assert_eq!(collection.num_objects(), 3);

    let smooth = ObjectId::from(1u32);
    assert!(!report.is_anomalous(&smooth));

    let flaky = report.get(&ObjectId::from(2u32));
    let kinds: Vec<_> = flaky.iter().map(|f| (f.kind, f.frame())).collect();
    assert_eq!(
        kinds,
        vec![
            (AnomalyKind::ClassInconsistent, Some(6)),
            (AnomalyKind::MissingInFrames, Some(4)),
            (AnomalyKind::LowIou, Some(7)),
        ]
    );

    let once = report.get(&ObjectId::from("x3"));
    assert_eq!(once.len(), 1);
    assert_eq!(once[0].kind, AnomalyKind::SingleFrameOccurrence);
    assert_eq!(once[0].frames, vec![3]);

    assert_eq!(report.len(), 2);
    assert!(report.failures().is_empty());
}

#[test]
fn test_low_confidence_kept_per_frame() {
    let frames = frames();
    let (collection, _) =
        analyze(&frames, class_names(), &AnalysisConfig::default()).unwrap();

    let (confident, low) = collection.frame_predictions(3).unwrap();
    assert_eq!(confident.len(), 3);
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].bbox, BBox::ltrb(300, 300, 310, 310));
    assert_eq!(low[0].class_name.as_deref(), Some("person"));
}

#[test]
fn test_history_matches_input() {
    let frames = frames();
    let mut collection = TrackedFrameCollection::new(class_names());
    for frame in &frames {
        collection.ingest_frame(frame).unwrap();
    }

    let id = ObjectId::from(2u32);
    let history = collection.track_history(&id).unwrap();

    let expected: Vec<u32> = (0..10).filter(|&i| i != 4).collect();
    assert_eq!(history.frame_ids().collect::<Vec<_>>(), expected);

    for frame in &frames {
        let track = frame.iter().find(|t| t.track_id == id);
        match (track, history.get(frame.frame_id)) {
            (Some(track), Some(pred)) => {
                assert_eq!(pred.bbox, track.bbox);
                assert_eq!(pred.confidence, track.confidence);
                assert_eq!(pred.class_id, track.class);
            }
            (None, None) => {}
            other => panic!("frame {}: mismatch {:?}", frame.frame_id, other),
        }
    }
}

#[test]
fn test_out_of_order_stops_ingestion() {
    let mut frames = frames();
    frames.swap(4, 5);

    let err = analyze(&frames, class_names(), &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, tcheck::error::Error::InvariantViolation(_)));
}

#[test]
fn test_scan_is_repeatable() {
    let frames = frames();
    let mut collection = TrackedFrameCollection::new(class_names());
    for frame in &frames {
        collection.ingest_frame(frame).unwrap();
    }

    let detector = TemporalAnomalyDetector::default();
    assert_eq!(detector.scan(&collection), detector.scan(&collection));
}

#[test]
fn test_frames_from_json_lines() {
    let dump = r#"{"frame_id":0,"tracks":[{"track_id":"7","bbox":[0,0,10,10],"confidence":0.9,"class":2}]}
{"frame_id":2,"tracks":[{"track_id":"7","bbox":[8,8,18,18],"class":2}],"detections":[{"bbox":[1,1,2,2],"p":0.1,"c":0}]}"#;

    let frames: Vec<Frame> = dump
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let (_, report) = analyze(&frames, class_names(), &AnalysisConfig::default()).unwrap();
    let findings = report.get(&ObjectId::from(7u32));

    assert_eq!(report.count(AnomalyKind::MissingInFrames), 1);
    assert_eq!(report.count(AnomalyKind::LowIou), 1);
    assert_eq!(findings[0].frames, vec![1]);
}

#[test]
fn test_numeric_track_ids_from_json() {
    let dump = r#"{"frame_id":0,"tracks":[{"track_id":7,"bbox":[0,0,10,10],"confidence":0.9,"class":2}]}
{"frame_id":1,"tracks":[{"track_id":7,"bbox":[0,0,10,10],"class":2},{"track_id":"7b","bbox":[5,5,9,9],"class":0}]}"#;

    let frames: Vec<Frame> = dump
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let (collection, report) =
        analyze(&frames, class_names(), &AnalysisConfig::default()).unwrap();

    let history = collection.track_history(&ObjectId::from(7u32)).unwrap();
    assert_eq!(history.frame_ids().collect::<Vec<_>>(), vec![0, 1]);
    assert!(!report.is_anomalous(&ObjectId::from(7u32)));
    assert!(report.is_anomalous(&ObjectId::from("7b")));
}
