use std::io::{BufReader, Write};

use assert_approx_eq::assert_approx_eq;
use fs_err as fs;
use scantrack_apps::{
    publish_cycle, read_events, JsonLinesPublisher, LocatorConfig, OutputRecord, SensorEvent,
    TargetLocator,
};
use scantrack_interface::{DummyPositionPublisher, DummyScanPublisher, ScanPublisher};

fn sample_events() -> Vec<SensorEvent> {
    read_events(BufReader::new(
        fs::File::open("data/sample_events.jsonl").unwrap(),
    ))
    .unwrap()
}

fn replay(
    config: LocatorConfig,
    events: &[SensorEvent],
    scan_publisher: Option<&dyn ScanPublisher>,
    position_publisher: &DummyPositionPublisher,
) -> TargetLocator {
    let mut locator = TargetLocator::new(config).unwrap();
    for event in events {
        if let Some(cycle) = locator.handle(event).unwrap() {
            publish_cycle(&cycle, scan_publisher, position_publisher).unwrap();
        }
    }
    locator
}

#[test]
fn replay_sample_events() {
    let events = sample_events();
    assert_eq!(events.len(), 24);

    let scans = DummyScanPublisher::new();
    let positions = DummyPositionPublisher::new();
    let locator = replay(LocatorConfig::default(), &events, Some(&scans), &positions);

    assert_eq!(scans.published().len(), 20);
    assert_eq!(positions.published().len(), 20);
    for scan in scans.published() {
        assert_eq!(scan.header.frame_id, "laser");
        assert!(!scan.ranges.is_empty());
        assert!(scan.ranges.len() <= 24);
    }

    let tracker = locator.tracker().unwrap();
    assert_approx_eq!(tracker.range(), 5.0, 0.1);
    assert_approx_eq!(tracker.bearing().to_degrees(), 20.0, 1.0);

    let last = positions.published().pop().unwrap();
    assert_approx_eq!(last.distance, tracker.range());
    assert_approx_eq!(last.heading, tracker.bearing().to_degrees());
    assert_eq!(last.cov_size, 4);
}

#[test]
fn replay_sample_events_without_tracker() {
    let events = sample_events();
    let positions = DummyPositionPublisher::new();
    let config = LocatorConfig {
        use_tracker: false,
        ..Default::default()
    };
    let locator = replay(config, &events, None, &positions);
    assert!(locator.tracker().is_none());

    let published = positions.published();
    assert_eq!(published.len(), 20);
    for (i, position) in published.iter().enumerate() {
        let expected = if i % 2 == 0 { 4.98 } else { 5.02 };
        assert_approx_eq!(position.distance, expected);
        let hint = if (i / 5) % 2 == 0 { 19.5 } else { 20.5 };
        assert_approx_eq!(position.heading, hint);
    }
}

#[test]
fn replay_to_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let events_path = dir.path().join("events.jsonl");
    let output_path = dir.path().join("output.jsonl");
    {
        let mut file = fs::File::create(&events_path).unwrap();
        writeln!(file, r#"{{"type": "Bearing", "args": {{"heading": 0.0}}}}"#).unwrap();
        for _ in 0..3 {
            writeln!(
                file,
                r#"{{"type": "Scan", "args": {{"angle_min": -0.5, "angle_max": 0.5, "angle_increment": 0.1, "range_min": 0.1, "range_max": 10.0, "ranges": [9.0, 9.0, 9.0, 2.0, 2.0, 2.0, 2.0, 2.0, 9.0, 9.0, 9.0]}}}}"#
            )
            .unwrap();
        }
    }

    let events = read_events(BufReader::new(fs::File::open(&events_path).unwrap())).unwrap();
    let publisher = JsonLinesPublisher::new(fs::File::create(&output_path).unwrap());
    let mut locator = TargetLocator::new(LocatorConfig::default()).unwrap();
    for event in &events {
        if let Some(cycle) = locator.handle(event).unwrap() {
            publish_cycle(&cycle, Some(&publisher), &publisher).unwrap();
        }
    }
    publisher.flush().unwrap();
    drop(publisher);

    let records: Vec<OutputRecord> = fs::read_to_string(&output_path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 6);
    for pair in records.chunks(2) {
        match &pair[0] {
            // window [-0.2, 0.2] covers indices [3, 7)
            OutputRecord::FilteredScan(scan) => assert_eq!(scan.ranges, vec![2.0; 4]),
            r => panic!("unexpected record {r:?}"),
        }
        match &pair[1] {
            OutputRecord::Position(position) => {
                assert_approx_eq!(position.distance, 2.0);
                assert_approx_eq!(position.heading, 0.0);
            }
            r => panic!("unexpected record {r:?}"),
        }
    }
}
