//! Reads a JSON-lines dump of tracked frames, one `Frame` per line, and
//! prints the anomaly report as JSON.
//!
//! usage: scan_tracks <frames.jsonl> [class_names.json] [config.yaml]

use std::io::BufRead;

use tcheck::{analyze, AnalysisConfig, ClassNames, Frame};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let frames_file = args.next().ok_or("expected frames file name")?;

    let class_names: ClassNames = match args.next() {
        Some(path) => serde_json::from_reader(std::fs::File::open(path)?)?,
        None => ClassNames::new(),
    };

    let config = match args.next() {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    let reader = std::io::BufReader::new(std::fs::File::open(frames_file)?);
    let mut frames = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Frame>(&line) {
            Ok(mut frame) => {
                // dumps may carry every raw detection, keep the ones the
                // tracker never saw
                let (_, low) = config.split(frame.detections.drain(..));
                frame.detections = low;
                frames.push(frame);
            }
            Err(err) => {
                eprintln!("wrong file format at line {}: {}", idx + 1, err);
                return Err(err.into());
            }
        }
    }

    let (collection, report) = analyze(&frames, class_names, &config)?;

    eprintln!(
        "{} frames, {} objects, {} anomalous",
        collection.num_frames(),
        collection.num_objects(),
        report.len()
    );

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
