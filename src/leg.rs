//! Directional legs: contiguous runs of samples with an attached [`Stat`].

use std::fmt;

use crate::{Sample, Stat};

/// Vertical trend of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    #[default]
    Unknown,
    Up,
    Down,
}

impl Direction {
    /// Classify a net altitude change: positive is Up, negative is Down.
    pub fn from_altitude_change(change: f64) -> Self {
        if change > 0.0 {
            Direction::Up
        } else if change < 0.0 {
            Direction::Down
        } else {
            Direction::Unknown
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Unknown => "unknown",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.pad(name)
    }
}

/// A contiguous run of samples classified as one directional trend.
///
/// Indices refer to positions in the canonical (timestamp-sorted) track.
/// `end_sample` is `None` while the leg is still being built.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub start_index: usize,
    pub start_sample: Sample,
    pub end_index: usize,
    pub end_sample: Option<Sample>,
    /// Explicit direction; `None` means derive it from the altitude change
    direction_override: Option<Direction>,
    pub stat: Stat,
}

impl Leg {
    /// Open a leg at `index` with an empty stat and no end.
    pub fn open(index: usize, sample: Sample) -> Self {
        Self {
            start_index: index,
            start_sample: sample,
            end_index: index,
            end_sample: None,
            direction_override: None,
            stat: Stat::Empty,
        }
    }

    /// Set the (possibly tentative) last sample of the leg.
    pub fn set_end(&mut self, index: usize, sample: Sample) {
        self.end_index = index;
        self.end_sample = Some(sample);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction_override = Some(direction);
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.set_direction(direction);
        self
    }

    /// End altitude minus start altitude. 0 while the leg is open.
    pub fn altitude_change(&self) -> f64 {
        match &self.end_sample {
            Some(end) => end.altitude - self.start_sample.altitude,
            None => 0.0,
        }
    }

    /// Explicit direction if one was set, otherwise the sign of [`Leg::altitude_change`].
    pub fn direction(&self) -> Direction {
        self.direction_override
            .unwrap_or_else(|| Direction::from_altitude_change(self.altitude_change()))
    }

    /// Representative altitude: the end sample's altitude (start while open).
    pub fn altitude(&self) -> f64 {
        self.end_sample.as_ref().unwrap_or(&self.start_sample).altitude
    }

    /// Altitude truncated toward zero to whole meters, used for leg equality.
    pub fn altitude_meters(&self) -> i64 {
        self.altitude().trunc() as i64
    }

    /// Number of samples spanned. An end set before the start counts as one.
    pub fn sample_count(&self) -> usize {
        self.end_index.saturating_sub(self.start_index) + 1
    }

    /// Merge two legs into one spanning both index ranges, with the given direction.
    ///
    /// Keeps the lower start and the higher end (with their samples) and unions
    /// the stats.
    ///
    /// # Example
    /// ```
    /// use chrono::Utc;
    /// use track_analyzer::{Direction, Leg, Sample};
    ///
    /// let now = Utc::now();
    /// let mut a = Leg::open(0, Sample::new(46.0, 8.0, 100.0, now));
    /// a.set_end(3, Sample::new(46.0, 8.0, 120.0, now));
    /// let mut b = Leg::open(4, Sample::new(46.0, 8.0, 118.0, now));
    /// b.set_end(6, Sample::new(46.0, 8.0, 150.0, now));
    ///
    /// let merged = a.combine(&b, Direction::Up);
    /// assert_eq!((merged.start_index, merged.end_index), (0, 6));
    /// assert_eq!(merged.altitude(), 150.0);
    /// ```
    pub fn combine(&self, other: &Leg, direction: Direction) -> Leg {
        let (start_index, start_sample) = if other.start_index < self.start_index {
            (other.start_index, other.start_sample)
        } else {
            (self.start_index, self.start_sample)
        };
        let (end_index, end_sample) = if other.end_index > self.end_index {
            (other.end_index, other.end_sample.or(self.end_sample))
        } else {
            (self.end_index, self.end_sample.or(other.end_sample))
        };

        Leg {
            start_index,
            start_sample,
            end_index,
            end_sample,
            direction_override: Some(direction),
            stat: self.stat.combine(&other.stat),
        }
    }
}

/// Coarse equality: start index, whole-meter altitude, direction and end index.
impl PartialEq for Leg {
    fn eq(&self, other: &Self) -> bool {
        self.start_index == other.start_index
            && self.altitude_meters() == other.altitude_meters()
            && self.direction() == other.direction()
            && self.end_index == other.end_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn leg(start: usize, start_alt: f64, end: usize, end_alt: f64) -> Leg {
        let mut leg = Leg::open(start, Sample::new(46.0, 8.0, start_alt, t0()));
        leg.set_end(end, Sample::new(46.0, 8.0, end_alt, t0()));
        leg
    }

    #[test]
    fn test_direction_derived_from_altitude_change() {
        assert_eq!(leg(0, 100.0, 3, 130.0).direction(), Direction::Up);
        assert_eq!(leg(0, 100.0, 3, 70.0).direction(), Direction::Down);
        assert_eq!(leg(0, 100.0, 3, 100.0).direction(), Direction::Unknown);
    }

    #[test]
    fn test_open_leg_is_unknown() {
        let open = Leg::open(5, Sample::new(46.0, 8.0, 640.0, t0()));
        assert_eq!(open.direction(), Direction::Unknown);
        assert_eq!(open.altitude_change(), 0.0);
        assert_eq!(open.altitude(), 640.0);
        assert_eq!(open.sample_count(), 1);
    }

    #[test]
    fn test_sample_count_with_end_before_start() {
        assert_eq!(leg(5, 100.0, 3, 90.0).sample_count(), 1);
        assert_eq!(leg(5, 100.0, 5, 90.0).sample_count(), 1);
        assert_eq!(leg(5, 100.0, 8, 90.0).sample_count(), 4);
    }

    #[test]
    fn test_override_wins_over_derived() {
        let flat = leg(0, 100.0, 2, 100.0).with_direction(Direction::Up);
        assert_eq!(flat.direction(), Direction::Up);

        let down = leg(0, 100.0, 2, 90.0).with_direction(Direction::Up);
        assert_eq!(down.direction(), Direction::Up);
    }

    #[test]
    fn test_combine_spans_both_ranges() {
        let later = leg(5, 90.0, 9, 60.0);
        let earlier = leg(0, 100.0, 4, 95.0);

        // Order of arguments does not matter for the span
        let merged = later.combine(&earlier, Direction::Down);
        assert_eq!(merged.start_index, 0);
        assert_eq!(merged.start_sample.altitude, 100.0);
        assert_eq!(merged.end_index, 9);
        assert_eq!(merged.altitude(), 60.0);
        assert_eq!(merged.direction(), Direction::Down);
        assert_eq!(merged.sample_count(), 10);
    }

    #[test]
    fn test_combine_unions_stats() {
        let mut a = leg(0, 100.0, 1, 110.0);
        a.stat.fold(&a.start_sample, 0.0);
        a.stat.fold(&Sample::new(46.0, 8.0, 110.0, t0()), 12.0);
        let mut b = leg(2, 90.0, 2, 90.0);
        b.stat.fold(&b.start_sample, 8.0);

        let merged = a.combine(&b, Direction::Unknown);
        assert_eq!(merged.stat.distance(), 20.0);
        assert_eq!(merged.stat.min_altitude(), Some(90.0));
        assert_eq!(merged.stat.max_altitude(), Some(110.0));
    }

    #[test]
    fn test_equality_truncates_altitude() {
        assert_eq!(leg(0, 0.0, 4, 120.2), leg(0, 0.0, 4, 120.9));
        assert_ne!(leg(0, 0.0, 4, 120.9), leg(0, 0.0, 4, 121.0));
        assert_ne!(leg(0, 0.0, 4, 120.0), leg(0, 0.0, 5, 120.0));
        assert_ne!(
            leg(0, 0.0, 4, 120.0),
            leg(0, 0.0, 4, 120.0).with_direction(Direction::Down)
        );
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Down.to_string(), "down");
        assert_eq!(Direction::Unknown.to_string(), "unknown");
    }
}
