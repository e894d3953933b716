//! # Point Filter
//!
//! Rejects noisy samples before they are stored.
//!
//! Each candidate is checked against its own accuracy and, once a baseline
//! exists, against the last accepted sample (elapsed time and distance).
//! Every threshold is optional; `None` disables that check.
//!
//! Thresholds are not validated. A negative threshold simply makes its
//! comparison always pass or always fail.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{DateTime, Duration};
//! use track_analyzer::{filter_points, FilterConfig, Sample};
//!
//! let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
//! let batch = vec![
//!     Sample::new(46.5000, 7.9000, 1800.0, t0).with_accuracy(5.0, 4.0),
//!     // 1 second later: too soon
//!     Sample::new(46.5010, 7.9000, 1801.0, t0 + Duration::seconds(1)).with_accuracy(5.0, 4.0),
//!     // Poor horizontal fix
//!     Sample::new(46.5020, 7.9000, 1802.0, t0 + Duration::seconds(10)).with_accuracy(65.0, 4.0),
//!     Sample::new(46.5030, 7.9000, 1803.0, t0 + Duration::seconds(20)).with_accuracy(5.0, 4.0),
//! ];
//!
//! let kept = filter_points(&batch, None, &FilterConfig::default());
//! assert_eq!(kept.len(), 2);
//! assert_eq!(kept[1].altitude, 1803.0);
//! ```

use log::{debug, trace};

use crate::geo_utils::haversine_distance;
use crate::Sample;

/// Thresholds for the point filter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterConfig {
    /// Reject candidates no more than this many seconds from the last accepted sample.
    /// Default: 3.0 seconds
    pub minimum_elapsed_time: Option<f64>,

    /// Reject candidates no more than this many meters from the last accepted sample.
    /// Default: 10.0 meters
    pub minimum_distance_between_points: Option<f64>,

    /// Reject candidates whose horizontal accuracy radius exceeds this.
    /// Default: 10.0 meters
    pub minimum_horizontal_accuracy: Option<f64>,

    /// Reject candidates whose vertical accuracy radius exceeds this.
    /// Default: 10.0 meters
    pub minimum_vertical_accuracy: Option<f64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            minimum_elapsed_time: Some(3.0),
            minimum_distance_between_points: Some(10.0),
            minimum_horizontal_accuracy: Some(10.0),
            minimum_vertical_accuracy: Some(10.0),
        }
    }
}

/// Why a candidate sample was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    HorizontalAccuracy,
    VerticalAccuracy,
    ElapsedTime,
    Distance,
}

impl FilterConfig {
    /// A filter with every check disabled.
    pub fn accept_all() -> Self {
        Self {
            minimum_elapsed_time: None,
            minimum_distance_between_points: None,
            minimum_horizontal_accuracy: None,
            minimum_vertical_accuracy: None,
        }
    }

    /// First failed check for `candidate`, or `None` if it should be kept.
    ///
    /// Accuracy checks apply on their own; time and distance checks only
    /// apply when there is a `last` accepted sample.
    pub fn rejection(&self, candidate: &Sample, last: Option<&Sample>) -> Option<Rejection> {
        if exceeds(candidate.horizontal_accuracy, self.minimum_horizontal_accuracy) {
            return Some(Rejection::HorizontalAccuracy);
        }
        if exceeds(candidate.vertical_accuracy, self.minimum_vertical_accuracy) {
            return Some(Rejection::VerticalAccuracy);
        }

        let last = last?;
        if let Some(min_elapsed) = self.minimum_elapsed_time {
            if candidate.seconds_since(last).abs() <= min_elapsed {
                return Some(Rejection::ElapsedTime);
            }
        }
        if let Some(min_distance) = self.minimum_distance_between_points {
            if haversine_distance(last, candidate) <= min_distance {
                return Some(Rejection::Distance);
            }
        }

        None
    }
}

fn exceeds(value: f64, threshold: Option<f64>) -> bool {
    threshold.is_some_and(|limit| value > limit)
}

/// Return the candidates worth keeping, in their original order.
///
/// `last_accepted` is the most recently stored sample, or `None` for the first
/// batch of a track. Each accepted candidate becomes the baseline for the
/// ones after it. Never fails; the result may be empty.
pub fn filter_points(
    candidates: &[Sample],
    last_accepted: Option<&Sample>,
    config: &FilterConfig,
) -> Vec<Sample> {
    let mut accepted: Vec<Sample> = Vec::with_capacity(candidates.len());
    let mut last = last_accepted.copied();

    for candidate in candidates {
        match config.rejection(candidate, last.as_ref()) {
            Some(reason) => {
                trace!("[PointFilter] Rejected sample at {}: {:?}", candidate.timestamp, reason);
            }
            None => {
                accepted.push(*candidate);
                last = Some(*candidate);
            }
        }
    }

    debug!(
        "[PointFilter] Accepted {}/{} candidates",
        accepted.len(),
        candidates.len()
    );
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    // ~1m of latitude
    const METER_DEG: f64 = 1.0 / 111_195.0;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    /// Sample `meters` north of the origin, `seconds` after t0
    fn at(meters: f64, seconds: i64) -> Sample {
        Sample::new(46.0 + meters * METER_DEG, 8.0, 1000.0, t0() + Duration::seconds(seconds))
    }

    fn distance_only(meters: f64) -> FilterConfig {
        FilterConfig {
            minimum_distance_between_points: Some(meters),
            ..FilterConfig::accept_all()
        }
    }

    #[test]
    fn test_distance_threshold() {
        let config = distance_only(10.0);

        let kept = filter_points(&[at(0.0, 0), at(5.0, 10)], None, &config);
        assert_eq!(kept.len(), 1);

        let kept = filter_points(&[at(0.0, 0), at(15.0, 10)], None, &config);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_distance_against_previous_batch() {
        let last = at(0.0, 0);
        let config = distance_only(10.0);
        assert!(filter_points(&[at(5.0, 10)], Some(&last), &config).is_empty());
        assert_eq!(filter_points(&[at(15.0, 10)], Some(&last), &config).len(), 1);
    }

    #[test]
    fn test_elapsed_time_is_inclusive() {
        let config = FilterConfig {
            minimum_elapsed_time: Some(3.0),
            ..FilterConfig::accept_all()
        };
        let last = at(0.0, 0);
        assert_eq!(
            config.rejection(&at(100.0, 3), Some(&last)),
            Some(Rejection::ElapsedTime)
        );
        assert_eq!(config.rejection(&at(100.0, 4), Some(&last)), None);
        // Absolute difference: an older candidate is also too close in time
        assert_eq!(
            config.rejection(&at(100.0, -2), Some(&last)),
            Some(Rejection::ElapsedTime)
        );
    }

    #[test]
    fn test_elapsed_time_just_over_threshold_is_kept() {
        let config = FilterConfig {
            minimum_elapsed_time: Some(3.0),
            ..FilterConfig::accept_all()
        };
        let last = at(0.0, 0);
        let mut candidate = at(100.0, 3);
        candidate.timestamp = candidate.timestamp + Duration::microseconds(500);
        assert_eq!(config.rejection(&candidate, Some(&last)), None);
    }

    #[test]
    fn test_accuracy_rejects_without_baseline() {
        let config = FilterConfig::default();
        let vague = at(0.0, 0).with_accuracy(25.0, 3.0);
        let flat = at(0.0, 0).with_accuracy(3.0, 25.0);
        assert_eq!(config.rejection(&vague, None), Some(Rejection::HorizontalAccuracy));
        assert_eq!(config.rejection(&flat, None), Some(Rejection::VerticalAccuracy));
        assert!(filter_points(&[vague, flat], None, &config).is_empty());
    }

    #[test]
    fn test_accuracy_at_threshold_is_kept() {
        let config = FilterConfig::default();
        assert_eq!(config.rejection(&at(0.0, 0).with_accuracy(10.0, 10.0), None), None);
    }

    #[test]
    fn test_first_survivor_becomes_baseline() {
        // The first candidate is rejected on accuracy, so the second one is the
        // baseline and the third (3m further) is too close to it.
        let config = FilterConfig::default();
        let batch = [
            at(0.0, 0).with_accuracy(50.0, 1.0),
            at(20.0, 10),
            at(23.0, 20),
            at(40.0, 30),
        ];
        let kept = filter_points(&batch, None, &config);
        let times: Vec<i64> = kept.iter().map(|s| (s.timestamp - t0()).num_seconds()).collect();
        assert_eq!(times, vec![10, 30]);
    }

    #[test]
    fn test_accept_all_keeps_everything() {
        let batch: Vec<Sample> = (0..5).map(|_| at(0.0, 0).with_accuracy(500.0, 500.0)).collect();
        assert_eq!(filter_points(&batch, None, &FilterConfig::accept_all()), batch);
    }

    #[test]
    fn test_empty_batch() {
        assert!(filter_points(&[], Some(&at(0.0, 0)), &FilterConfig::default()).is_empty());
    }

    #[test]
    fn test_output_is_subsequence() {
        let batch: Vec<Sample> = (0..50)
            .map(|i| at((i * 7 % 23) as f64 * 4.0 + i as f64, i as i64 * 2).with_accuracy((i % 13) as f64, 2.0))
            .collect();
        let kept = filter_points(&batch, None, &FilterConfig::default());

        let mut cursor = batch.iter();
        for sample in &kept {
            assert!(cursor.any(|candidate| candidate == sample));
        }
        assert!(kept.len() < batch.len());
    }
}
