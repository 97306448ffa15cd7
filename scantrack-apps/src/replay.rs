use std::{
    io::{BufRead, Write},
    sync::Mutex,
};

use scantrack_interface::{PositionPolar, PositionPublisher, Scan2D, ScanPublisher};
use serde::{Deserialize, Serialize};

use crate::{Error, SensorEvent};

/// Reads one [`SensorEvent`] per line. Blank lines and lines starting with
/// `#` are skipped.
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<SensorEvent>, Error> {
    let mut events = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        events.push(serde_json::from_str(line).map_err(|e| Error::EventParseFailure(i + 1, e))?);
    }
    Ok(events)
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "args")]
pub enum OutputRecord {
    Position(PositionPolar),
    FilteredScan(Scan2D),
}

/// Writes everything it is asked to publish as JSON lines.
#[derive(Debug)]
pub struct JsonLinesPublisher<W> {
    writer: Mutex<W>,
}

impl<W> JsonLinesPublisher<W>
where
    W: Write + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn flush(&self) -> Result<(), Error> {
        self.writer.lock().unwrap().flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap()
    }

    fn write_record(
        &self,
        topic: &str,
        record: &OutputRecord,
    ) -> Result<(), scantrack_interface::Error> {
        let to_publish_error = |message: String| scantrack_interface::Error::Publish {
            topic: topic.to_owned(),
            message,
        };
        let line = serde_json::to_string(record).map_err(|e| to_publish_error(e.to_string()))?;
        let mut writer = self.writer.lock().unwrap();
        writeln!(writer, "{line}").map_err(|e| to_publish_error(e.to_string()))
    }
}

impl<W> PositionPublisher for JsonLinesPublisher<W>
where
    W: Write + Send,
{
    fn publish_position(&self, position: &PositionPolar) -> Result<(), scantrack_interface::Error> {
        self.write_record("position", &OutputRecord::Position(position.clone()))
    }
}

impl<W> ScanPublisher for JsonLinesPublisher<W>
where
    W: Write + Send,
{
    fn publish_scan(&self, scan: &Scan2D) -> Result<(), scantrack_interface::Error> {
        self.write_record("filtered_scan", &OutputRecord::FilteredScan(scan.clone()))
    }
}
