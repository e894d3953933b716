//! Streaming accumulator of altitude extremes, distance and top speed.
//!
//! A [`Stat`] starts [`Stat::Empty`]. The first sample folded in seeds both
//! altitude extremes with that sample's altitude instead of comparing against
//! a zero default, so an empty accumulator can never leak a fake 0 m minimum.

use crate::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    /// Nothing folded in yet
    #[default]
    Empty,
    Seeded {
        min_altitude: f64,
        max_altitude: f64,
        /// Cumulative distance in meters
        distance: f64,
        /// Highest speed seen, in m/s; `None` until a sample reports one
        max_speed: Option<f64>,
    },
}

impl Stat {
    /// Stat holding a single sample.
    ///
    /// A negative or non-finite speed means the sample has no speed reading
    /// and does not count toward `max_speed`.
    pub fn from_sample(sample: &Sample, distance: f64) -> Self {
        let speed = sample.speed;
        Stat::Seeded {
            min_altitude: sample.altitude,
            max_altitude: sample.altitude,
            distance,
            max_speed: (speed.is_finite() && speed >= 0.0).then_some(speed),
        }
    }

    /// Fold a sample in, adding `distance` (meters travelled to reach it).
    pub fn fold(&mut self, sample: &Sample, distance: f64) {
        *self = self.combine(&Stat::from_sample(sample, distance));
    }

    /// Union of two stats. Commutative and associative, with `Empty` as identity.
    ///
    /// # Example
    /// ```
    /// use chrono::Utc;
    /// use track_analyzer::{Sample, Stat};
    ///
    /// let now = Utc::now();
    /// let a = Stat::from_sample(&Sample::new(46.0, 8.0, 1200.0, now).with_speed(3.0), 40.0);
    /// let b = Stat::from_sample(&Sample::new(46.0, 8.0, 1350.0, now).with_speed(7.5), 60.0);
    ///
    /// let both = a.combine(&b);
    /// assert_eq!(both.vertical_delta(), 150.0);
    /// assert_eq!(both.distance(), 100.0);
    /// assert_eq!(both.max_speed(), Some(7.5));
    /// assert_eq!(both.combine(&Stat::Empty), both);
    /// ```
    pub fn combine(&self, other: &Stat) -> Stat {
        match (*self, *other) {
            (Stat::Empty, other) => other,
            (seeded, Stat::Empty) => seeded,
            (
                Stat::Seeded {
                    min_altitude: min_a,
                    max_altitude: max_a,
                    distance: dist_a,
                    max_speed: speed_a,
                },
                Stat::Seeded {
                    min_altitude: min_b,
                    max_altitude: max_b,
                    distance: dist_b,
                    max_speed: speed_b,
                },
            ) => Stat::Seeded {
                min_altitude: min_a.min(min_b),
                max_altitude: max_a.max(max_b),
                distance: dist_a + dist_b,
                max_speed: match (speed_a, speed_b) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, None) => a,
                    (None, b) => b,
                },
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Stat::Empty)
    }

    pub fn min_altitude(&self) -> Option<f64> {
        match self {
            Stat::Empty => None,
            Stat::Seeded { min_altitude, .. } => Some(*min_altitude),
        }
    }

    pub fn max_altitude(&self) -> Option<f64> {
        match self {
            Stat::Empty => None,
            Stat::Seeded { max_altitude, .. } => Some(*max_altitude),
        }
    }

    /// Highest reported speed. `None` when empty or when no sample had a speed.
    pub fn max_speed(&self) -> Option<f64> {
        match self {
            Stat::Empty => None,
            Stat::Seeded { max_speed, .. } => *max_speed,
        }
    }

    /// Cumulative distance in meters (0 when empty).
    pub fn distance(&self) -> f64 {
        match self {
            Stat::Empty => 0.0,
            Stat::Seeded { distance, .. } => *distance,
        }
    }

    /// `max_altitude - min_altitude`. Never negative; carries no direction.
    pub fn vertical_delta(&self) -> f64 {
        match self {
            Stat::Empty => 0.0,
            Stat::Seeded {
                min_altitude,
                max_altitude,
                ..
            } => max_altitude - min_altitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn at(altitude: f64, speed: f64) -> Sample {
        Sample::new(46.0, 8.0, altitude, t0()).with_speed(speed)
    }

    #[test]
    fn test_empty_stat() {
        let stat = Stat::default();
        assert!(stat.is_empty());
        assert_eq!(stat.min_altitude(), None);
        assert_eq!(stat.max_speed(), None);
        assert_eq!(stat.distance(), 0.0);
        assert_eq!(stat.vertical_delta(), 0.0);
    }

    #[test]
    fn test_first_fold_seeds_extremes() {
        // A negative first altitude must not be clamped against a 0 m default
        let mut stat = Stat::Empty;
        stat.fold(&at(-12.0, 1.0), 5.0);
        assert_eq!(stat.min_altitude(), Some(-12.0));
        assert_eq!(stat.max_altitude(), Some(-12.0));
        assert_eq!(stat.distance(), 5.0);
        assert_eq!(stat.vertical_delta(), 0.0);
    }

    #[test]
    fn test_fold_tracks_extremes_and_sum() {
        let mut stat = Stat::Empty;
        for (alt, speed, dist) in [(1500.0, 2.0, 0.0), (1480.0, 9.0, 30.0), (1530.0, 4.0, 25.0)] {
            stat.fold(&at(alt, speed), dist);
        }
        assert_eq!(stat.min_altitude(), Some(1480.0));
        assert_eq!(stat.max_altitude(), Some(1530.0));
        assert_eq!(stat.distance(), 55.0);
        assert_eq!(stat.max_speed(), Some(9.0));
        assert_eq!(stat.vertical_delta(), 50.0);
    }

    #[test]
    fn test_combine_is_commutative_and_associative() {
        let a = Stat::from_sample(&at(100.0, 1.0), 10.0);
        let b = Stat::from_sample(&at(80.0, 3.0), 20.0);
        let c = Stat::from_sample(&at(140.0, 2.0), 40.0);

        assert_eq!(a.combine(&b), b.combine(&a));
        assert_eq!(a.combine(&b).combine(&c), a.combine(&b.combine(&c)));
        assert_eq!(Stat::Empty.combine(&a), a);
    }

    #[test]
    fn test_max_not_below_min() {
        let mut stat = Stat::Empty;
        for alt in [300.0, 120.0, 450.0, 90.0, 200.0] {
            stat.fold(&at(alt, 0.0), 1.0);
            assert!(stat.max_altitude() >= stat.min_altitude());
            assert!(stat.vertical_delta() >= 0.0);
        }
    }

    #[test]
    fn test_missing_speed_is_not_a_maximum() {
        // Sample::new leaves speed at -1.0 (no reading)
        let mut stat = Stat::Empty;
        for alt in [1200.0, 1210.0, 1195.0] {
            stat.fold(&Sample::new(46.0, 8.0, alt, t0()), 10.0);
        }
        assert!(!stat.is_empty());
        assert_eq!(stat.max_speed(), None);

        stat.fold(&at(1190.0, f64::NAN), 10.0);
        stat.fold(&at(1185.0, f64::INFINITY), 10.0);
        assert_eq!(stat.max_speed(), None);
    }

    #[test]
    fn test_mixed_speeds_keep_reported_maximum() {
        let mut stat = Stat::Empty;
        for speed in [-1.0, 0.0, 4.5, -1.0, 2.0, -3.0] {
            stat.fold(&at(1000.0, speed), 1.0);
        }
        assert_eq!(stat.max_speed(), Some(4.5));

        let silent = Stat::from_sample(&at(900.0, -1.0), 0.0);
        let standing = Stat::from_sample(&at(900.0, 0.0), 0.0);
        assert_eq!(silent.combine(&standing).max_speed(), Some(0.0));
        assert_eq!(standing.combine(&silent).max_speed(), Some(0.0));
    }
}
