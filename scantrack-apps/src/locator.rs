use scantrack_base::{
    BearingContext, GateDecision, GatedTracker, IndexClamp, Measurement, RangeEstimator,
    SectorExtractor,
};
use scantrack_interface::{
    BearingHint, BearingSensor, LaserScan2D, PositionPolar, PositionPublisher, Scan2D,
    ScanPublisher,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, LocatorConfig};

/// Inbound event delivered by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "args")]
pub enum SensorEvent {
    Scan(Scan2D),
    Bearing(BearingHint),
}

/// Everything one scan produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanCycle {
    /// The part of the scan around the current bearing.
    pub filtered_scan: Scan2D,
    pub clamp: IndexClamp,
    /// Percentile distance of the sector, `None` if it had no usable samples.
    pub distance: Option<f64>,
    pub estimate: Option<PositionPolar>,
    /// Outcome of gating, `None` if the tracker did not correct this cycle.
    pub decision: Option<GateDecision>,
}

/// Locates a single target: narrows each scan to the latest bearing hint,
/// turns the sector into a distance and tracks it over time.
///
/// Events must be fed one at a time; the locator owns all of its state.
#[derive(Debug)]
pub struct TargetLocator {
    config: LocatorConfig,
    context: BearingContext,
    extractor: SectorExtractor,
    estimator: RangeEstimator,
    tracker: Option<GatedTracker>,
}

impl TargetLocator {
    pub fn new(config: LocatorConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            context: BearingContext::new(0.0, config.bearing_half_width),
            extractor: SectorExtractor::new(),
            estimator: RangeEstimator::new(config.range_estimator.clone())?,
            tracker: None,
            config,
        })
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    pub fn context(&self) -> BearingContext {
        self.context
    }

    /// `None` until the first distance has been estimated.
    pub fn tracker(&self) -> Option<&GatedTracker> {
        self.tracker.as_ref()
    }

    pub fn on_bearing_hint(&mut self, hint: BearingHint) {
        self.context = self.context.with_bearing(hint.bearing());
        debug!(heading = hint.heading, "bearing hint");
    }

    pub fn on_scan(&mut self, scan: &Scan2D) -> Result<ScanCycle, Error> {
        let sector = self.extractor.extract(scan, self.context.window());
        let distance = self.estimator.estimate_scan(&sector.scan);
        if distance.is_none() {
            debug!(seq = scan.header.seq, "no range estimate in sector");
        }

        let (estimate, decision) = if self.config.use_tracker {
            self.track(distance)?
        } else {
            let estimate =
                distance.map(|distance| PositionPolar::from_radians(distance, self.context.bearing));
            (estimate, None)
        };

        Ok(ScanCycle {
            filtered_scan: sector.scan,
            clamp: sector.clamp,
            distance,
            estimate,
            decision,
        })
    }

    fn track(
        &mut self,
        distance: Option<f64>,
    ) -> Result<(Option<PositionPolar>, Option<GateDecision>), Error> {
        let candidates: Vec<Measurement> = distance
            .map(|distance| Measurement::new(distance, self.context.bearing))
            .into_iter()
            .collect();

        let decision = match &mut self.tracker {
            Some(tracker) => tracker.step(&candidates)?,
            None => match candidates.first() {
                Some(initial) => {
                    self.tracker = Some(GatedTracker::new(*initial, &self.config.tracker)?);
                    None
                }
                None => return Ok((None, None)),
            },
        };

        let estimate = self
            .tracker
            .as_ref()
            .map(|tracker| PositionPolar::from_radians(tracker.range(), tracker.bearing()));
        Ok((estimate, decision))
    }

    /// Returns the cycle if the event was a scan.
    pub fn handle(&mut self, event: &SensorEvent) -> Result<Option<ScanCycle>, Error> {
        match event {
            SensorEvent::Bearing(hint) => {
                self.on_bearing_hint(*hint);
                Ok(None)
            }
            SensorEvent::Scan(scan) => self.on_scan(scan).map(Some),
        }
    }

    /// Reads the latest bearing hint and scan and processes them.
    ///
    /// A sensor without a hint yet keeps the previous bearing.
    pub fn poll_once(
        &mut self,
        scanner: &dyn LaserScan2D,
        bearing_sensor: &dyn BearingSensor,
    ) -> Result<ScanCycle, Error> {
        match bearing_sensor.current_bearing() {
            Ok(hint) => self.on_bearing_hint(hint),
            Err(scantrack_interface::Error::NoBearing { message }) => {
                debug!("keep bearing {}: {}", self.context.bearing, message);
            }
            Err(e) => return Err(e.into()),
        }
        let scan = scanner.current_scan()?;
        self.on_scan(&scan)
    }
}

/// Sends the outputs of a cycle. The filtered scan is skipped if there is
/// no scan publisher.
pub fn publish_cycle(
    cycle: &ScanCycle,
    scan_publisher: Option<&dyn ScanPublisher>,
    position_publisher: &dyn PositionPublisher,
) -> Result<(), Error> {
    if let Some(scan_publisher) = scan_publisher {
        scan_publisher.publish_scan(&cycle.filtered_scan)?;
    }
    if let Some(estimate) = &cycle.estimate {
        position_publisher.publish_position(estimate)?;
    }
    Ok(())
}
