use nalgebra::{Matrix4, Vector2, Vector4};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Gaussian, LinearGaussianFilter};

/// Candidate `(range, bearing)` observation of the target.
pub type Measurement = Vector2<f64>;
/// `(range, bearing, range_rate, bearing_rate)`
pub type TrackVector = Vector4<f64>;
pub type TrackCovariance = Matrix4<f64>;

/// What to do with the candidate closest to the prediction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GatingPolicy {
    /// Always fuse the closest candidate; the threshold only ranks.
    #[default]
    RankOnly,
    /// Fuse the closest candidate only if its score is within the threshold.
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    /// Diagonal of the process noise covariance.
    #[serde(default = "default_process_noise")]
    pub process_noise: [f64; 4],
    /// Diagonal of the observation noise covariance.
    #[serde(default = "default_observation_noise")]
    pub observation_noise: [f64; 4],
    /// Diagonal of the covariance the track starts with.
    #[serde(default = "default_initial_uncertainty")]
    pub initial_uncertainty: [f64; 4],
    #[serde(default = "default_mahalanobis_threshold")]
    pub mahalanobis_threshold: f64,
    #[serde(default)]
    pub gating: GatingPolicy,
}

fn default_process_noise() -> [f64; 4] {
    [1e-1, 1e-4, 1e-1, 1e-4]
}

fn default_observation_noise() -> [f64; 4] {
    [1e-2, 2e-1, 5e-1, 1e-2]
}

fn default_initial_uncertainty() -> [f64; 4] {
    [1.0; 4]
}

fn default_mahalanobis_threshold() -> f64 {
    1.0
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            process_noise: default_process_noise(),
            observation_noise: default_observation_noise(),
            initial_uncertainty: default_initial_uncertainty(),
            mahalanobis_threshold: default_mahalanobis_threshold(),
            gating: GatingPolicy::default(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), Error> {
        for (name, variances) in [
            ("tracker.process_noise", &self.process_noise),
            ("tracker.observation_noise", &self.observation_noise),
            ("tracker.initial_uncertainty", &self.initial_uncertainty),
        ] {
            if let Some(v) = variances.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
                return Err(Error::InvalidConfig(
                    name.into(),
                    format!("variance {v} must be finite and strictly positive"),
                ));
            }
        }
        if !(self.mahalanobis_threshold.is_finite() && self.mahalanobis_threshold >= 0.0) {
            return Err(Error::InvalidConfig(
                "tracker.mahalanobis_threshold".into(),
                format!("{} must be finite and not negative", self.mahalanobis_threshold),
            ));
        }
        Ok(())
    }
}

/// Result of ranking one batch of candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateDecision {
    /// Index of the closest candidate in the batch.
    pub index: usize,
    /// Squared Mahalanobis distance of that candidate.
    pub score: f64,
    /// Whether the candidate was (or would be) fused.
    pub accepted: bool,
}

struct Gate {
    decision: GateDecision,
    innovation: TrackVector,
    inverse_innovation_covariance: TrackCovariance,
}

/// Constant-velocity range/bearing tracker that fuses the most plausible of
/// several candidate measurements per cycle.
///
/// Every candidate is turned into a full state observation by appending its
/// finite difference to the previously fused measurement as rate terms, so
/// the observation matrix is the identity.
#[derive(Debug, Clone)]
pub struct GatedTracker {
    filter: LinearGaussianFilter<4, 4>,
    previous: Measurement,
    mahalanobis_threshold: f64,
    gating: GatingPolicy,
}

impl GatedTracker {
    pub fn new(initial: Measurement, config: &TrackerConfig) -> Result<Self, Error> {
        config.validate()?;
        #[rustfmt::skip]
        let transition = Matrix4::new(
            1.0, 0.0, 1.0, 0.0,
            0.0, 1.0, 0.0, 1.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        let filter = LinearGaussianFilter::new(
            transition,
            Matrix4::identity(),
            Matrix4::from_diagonal(&Vector4::from(config.process_noise)),
            Matrix4::from_diagonal(&Vector4::from(config.observation_noise)),
            Gaussian::diagonal([initial[0], initial[1], 0.0, 0.0], config.initial_uncertainty),
        );
        Ok(Self {
            filter,
            previous: initial,
            mahalanobis_threshold: config.mahalanobis_threshold,
            gating: config.gating,
        })
    }

    pub fn state(&self) -> &Gaussian<4> {
        self.filter.state()
    }

    pub fn mean(&self) -> &TrackVector {
        &self.filter.state().mean
    }

    pub fn covariance(&self) -> &TrackCovariance {
        &self.filter.state().covariance
    }

    pub fn covariance_trace(&self) -> f64 {
        self.filter.state().trace()
    }

    pub fn range(&self) -> f64 {
        self.mean()[0]
    }

    pub fn bearing(&self) -> f64 {
        self.mean()[1]
    }

    /// The measurement used for the next rate terms.
    pub fn previous(&self) -> &Measurement {
        &self.previous
    }

    pub fn mahalanobis_threshold(&self) -> f64 {
        self.mahalanobis_threshold
    }

    pub fn gating(&self) -> GatingPolicy {
        self.gating
    }

    pub fn predict(&mut self) {
        self.filter.predict();
    }

    /// Full observation for a candidate: the candidate plus its change since
    /// the previously fused measurement.
    pub fn observation(&self, candidate: &Measurement) -> TrackVector {
        let rate = candidate - self.previous;
        Vector4::new(candidate[0], candidate[1], rate[0], rate[1])
    }

    /// Ranks `candidates` against the current belief without changing it.
    ///
    /// Returns `None` for an empty batch.
    pub fn select(&self, candidates: &[Measurement]) -> Result<Option<GateDecision>, Error> {
        Ok(self.gate(candidates)?.map(|gate| gate.decision))
    }

    fn gate(&self, candidates: &[Measurement]) -> Result<Option<Gate>, Error> {
        if candidates.is_empty() {
            return Ok(None);
        }
        let s_inv = self.filter.inverse_innovation_covariance()?;

        let mut best: Option<(usize, f64, TrackVector)> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            let innovation = self.filter.innovation(&self.observation(candidate));
            let score = innovation.dot(&(s_inv * innovation));
            // strict comparison keeps the first of equal scores
            if best.map_or(true, |(_, best_score, _)| score < best_score) {
                best = Some((index, score, innovation));
            }
        }

        Ok(best.map(|(index, score, innovation)| Gate {
            decision: GateDecision {
                index,
                score,
                accepted: match self.gating {
                    GatingPolicy::RankOnly => true,
                    GatingPolicy::Reject => score <= self.mahalanobis_threshold,
                },
            },
            innovation,
            inverse_innovation_covariance: s_inv,
        }))
    }

    /// Fuses the candidate closest to the current belief.
    ///
    /// An empty batch leaves the tracker untouched. Under
    /// [`GatingPolicy::Reject`] a closest candidate beyond the threshold is
    /// reported but not fused.
    pub fn correct(&mut self, candidates: &[Measurement]) -> Result<Option<GateDecision>, Error> {
        let Some(gate) = self.gate(candidates)? else {
            return Ok(None);
        };
        let decision = gate.decision;
        if decision.accepted {
            self.filter
                .correct_with(&gate.innovation, &gate.inverse_innovation_covariance);
            self.previous = candidates[decision.index];
            debug!(
                index = decision.index,
                score = decision.score,
                range = self.range(),
                bearing = self.bearing(),
                "fused candidate"
            );
        } else {
            debug!(
                index = decision.index,
                score = decision.score,
                threshold = self.mahalanobis_threshold,
                "rejected candidate"
            );
        }
        Ok(Some(decision))
    }

    /// One predict/correct cycle.
    pub fn step(&mut self, candidates: &[Measurement]) -> Result<Option<GateDecision>, Error> {
        self.predict();
        self.correct(candidates)
    }
}

#[cfg(test)]
mod test {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn tracker_at(range: f64, bearing: f64) -> GatedTracker {
        GatedTracker::new(Measurement::new(range, bearing), &TrackerConfig::default()).unwrap()
    }

    #[test]
    fn test_new() {
        let tracker = tracker_at(5.0, 0.1);
        assert_approx_eq!(tracker.range(), 5.0);
        assert_approx_eq!(tracker.bearing(), 0.1);
        assert_approx_eq!(tracker.mean()[2], 0.0);
        assert_approx_eq!(tracker.mean()[3], 0.0);
        assert_approx_eq!(tracker.covariance_trace(), 4.0);
        assert_eq!(tracker.previous(), &Measurement::new(5.0, 0.1));
        assert_eq!(tracker.gating(), GatingPolicy::RankOnly);
        assert_approx_eq!(tracker.mahalanobis_threshold(), 1.0);
    }

    #[test]
    fn test_invalid_config() {
        let mut config = TrackerConfig::default();
        config.observation_noise[1] = 0.0;
        assert!(matches!(
            GatedTracker::new(Measurement::new(1.0, 0.0), &config),
            Err(Error::InvalidConfig(..))
        ));

        let mut config = TrackerConfig::default();
        config.process_noise[3] = f64::NAN;
        assert!(config.validate().is_err());

        let config = TrackerConfig {
            mahalanobis_threshold: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_predict_moves_with_rates() {
        let mut tracker = tracker_at(5.0, 0.1);
        tracker.step(&[Measurement::new(6.0, 0.3)]).unwrap();
        let mean = *tracker.mean();
        tracker.predict();
        assert_approx_eq!(tracker.range(), mean[0] + mean[2]);
        assert_approx_eq!(tracker.bearing(), mean[1] + mean[3]);
        assert_approx_eq!(tracker.mean()[2], mean[2]);
        assert_approx_eq!(tracker.mean()[3], mean[3]);
    }

    #[test]
    fn test_observation_appends_rates() {
        let tracker = tracker_at(5.0, 0.1);
        let observation = tracker.observation(&Measurement::new(5.5, 0.05));
        assert_approx_eq!(observation[0], 5.5);
        assert_approx_eq!(observation[1], 0.05);
        assert_approx_eq!(observation[2], 0.5);
        assert_approx_eq!(observation[3], -0.05);
    }

    #[test]
    fn test_selects_min_mahalanobis() {
        let mut tracker = tracker_at(5.0, 0.1);
        tracker.predict();
        let candidates = [
            Measurement::new(5.0, 0.1),
            Measurement::new(5.2, 0.11),
            Measurement::new(50.0, 3.0),
        ];
        let decision = tracker.select(&candidates).unwrap().unwrap();
        assert_eq!(decision.index, 0);
        assert!(decision.accepted);

        let reversed = [candidates[2], candidates[1], candidates[0]];
        assert_eq!(tracker.select(&reversed).unwrap().unwrap().index, 2);
    }

    #[test]
    fn test_first_minimum_wins() {
        let mut tracker = tracker_at(5.0, 0.1);
        tracker.predict();
        let candidates = [
            Measurement::new(30.0, 1.0),
            Measurement::new(5.3, 0.12),
            Measurement::new(5.3, 0.12),
        ];
        let decision = tracker.correct(&candidates).unwrap().unwrap();
        assert_eq!(decision.index, 1);
        assert_eq!(tracker.previous(), &candidates[1]);
    }

    #[test]
    fn test_rank_only_fuses_far_candidate() {
        let mut tracker = tracker_at(5.0, 0.1);
        tracker.predict();
        let decision = tracker
            .correct(&[Measurement::new(50.0, 3.0)])
            .unwrap()
            .unwrap();
        assert!(decision.score > tracker.mahalanobis_threshold());
        assert!(decision.accepted);
        assert!(tracker.range() > 5.0);
        assert_eq!(tracker.previous(), &Measurement::new(50.0, 3.0));
    }

    #[test]
    fn test_reject_policy_drops_far_candidate() {
        let config = TrackerConfig {
            gating: GatingPolicy::Reject,
            ..Default::default()
        };
        let mut tracker = GatedTracker::new(Measurement::new(5.0, 0.1), &config).unwrap();
        tracker.predict();
        let before = tracker.state().clone();
        let decision = tracker
            .correct(&[Measurement::new(50.0, 3.0)])
            .unwrap()
            .unwrap();
        assert!(!decision.accepted);
        assert_eq!(tracker.state(), &before);
        assert_eq!(tracker.previous(), &Measurement::new(5.0, 0.1));

        let decision = tracker
            .correct(&[Measurement::new(5.0, 0.1)])
            .unwrap()
            .unwrap();
        assert!(decision.accepted);
    }

    #[test]
    fn test_correct_reduces_uncertainty() {
        let mut tracker = tracker_at(5.0, 0.1);
        tracker.predict();
        let predicted_trace = tracker.covariance_trace();
        tracker.correct(&[Measurement::new(5.1, 0.1)]).unwrap();
        assert!(tracker.covariance_trace() < predicted_trace);
    }

    #[test]
    fn test_empty_candidates() {
        let mut tracker = tracker_at(5.0, 0.1);
        tracker.predict();
        let before = tracker.state().clone();
        assert!(tracker.correct(&[]).unwrap().is_none());
        assert!(tracker.select(&[]).unwrap().is_none());
        assert_eq!(tracker.state(), &before);
    }

    #[test]
    fn test_config_toml() {
        let config: TrackerConfig = toml::from_str(
            r#"
mahalanobis_threshold = 4.0
gating = "reject"
observation_noise = [0.1, 0.1, 0.1, 0.1]
"#,
        )
        .unwrap();
        assert_eq!(config.gating, GatingPolicy::Reject);
        assert_approx_eq!(config.mahalanobis_threshold, 4.0);
        assert_eq!(config.process_noise, default_process_noise());
        assert!(toml::from_str::<TrackerConfig>("unknown = 1").is_err());
    }
}
