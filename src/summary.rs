//! Whole-track rollup of leg statistics.

use crate::{Direction, Leg, Stat};

/// Runs, vertical ascent/descent and distances over a list of legs.
///
/// Descent is reported as a negative number.
///
/// # Example
/// ```
/// use chrono::{DateTime, Duration};
/// use track_analyzer::{analyze_track, AnalyzerConfig, Sample};
///
/// let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
/// let track: Vec<Sample> = [2000.0, 2100.0, 2200.0, 2050.0, 1900.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &alt)| Sample::new(46.0 + i as f64 * 0.001, 8.0, alt, t0 + Duration::minutes(i as i64)))
///     .collect();
///
/// let summary = analyze_track(&track, &AnalyzerConfig::default()).summary;
/// assert_eq!(summary.runs, 1);
/// assert_eq!(summary.vertical_ascent, 200.0);
/// assert_eq!(summary.vertical_descent, -150.0);
/// assert_eq!(summary.max_altitude(), Some(2200.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackSummary {
    /// Number of Down legs
    pub runs: u32,
    /// Number of legs summarized
    pub leg_count: u32,
    /// Sum of vertical deltas over Up legs (meters)
    pub vertical_ascent: f64,
    /// Negated sum of vertical deltas over Down legs (meters, <= 0)
    pub vertical_descent: f64,
    pub ascent_distance: f64,
    pub descent_distance: f64,
    /// Distance over all legs, including Unknown ones
    pub total_distance: f64,
    /// All leg stats combined
    pub stat: Stat,
}

impl TrackSummary {
    /// Summarize final legs. An empty list gives the zero summary.
    pub fn summarize(legs: &[Leg]) -> Self {
        let mut summary = TrackSummary::default();

        for leg in legs {
            let stat = &leg.stat;
            summary.stat = summary.stat.combine(stat);
            summary.leg_count += 1;

            match leg.direction() {
                Direction::Up => {
                    summary.vertical_ascent += stat.vertical_delta();
                    summary.ascent_distance += stat.distance();
                }
                Direction::Down => {
                    summary.vertical_descent -= stat.vertical_delta();
                    summary.descent_distance += stat.distance();
                    summary.runs += 1;
                }
                Direction::Unknown => {}
            }
            summary.total_distance += stat.distance();
        }

        summary
    }

    pub fn min_altitude(&self) -> Option<f64> {
        self.stat.min_altitude()
    }

    pub fn max_altitude(&self) -> Option<f64> {
        self.stat.max_altitude()
    }

    pub fn max_speed(&self) -> Option<f64> {
        self.stat.max_speed()
    }
}
