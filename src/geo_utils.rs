//! # Geographic Utilities
//!
//! Geodesic helpers shared by the point filter and the track analyzer.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two samples |
//! | [`track_distance`] | Total length of a track in meters |
//! | [`sort_by_timestamp`] | Restore canonical (ascending timestamp) order |
//!
//! ## Example
//!
//! ```rust
//! use chrono::{DateTime, Duration};
//! use track_analyzer::{geo_utils, Sample};
//!
//! let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
//! let mut track = vec![
//!     Sample::new(46.5600, 7.9300, 2000.0, t0 + Duration::seconds(20)),
//!     Sample::new(46.5580, 7.9300, 1990.0, t0),
//!     Sample::new(46.5590, 7.9300, 1995.0, t0 + Duration::seconds(10)),
//! ];
//!
//! geo_utils::sort_by_timestamp(&mut track);
//! assert_eq!(track[0].altitude, 1990.0);
//!
//! let length = geo_utils::track_distance(&track);
//! println!("Track length: {:.0}m", length);
//! ```
//!
//! ## Algorithm Notes
//!
//! Distances use the haversine formula on a spherical Earth (mean radius) and
//! ignore altitude. Coincident samples are exactly 0 m apart; nothing here
//! divides by a distance.

use geo::{Distance, Haversine, Point};

use crate::Sample;

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two samples in meters.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use track_analyzer::{geo_utils, Sample};
///
/// let now = Utc::now();
/// let zermatt = Sample::new(46.0207, 7.7491, 1608.0, now);
/// let matterhorn = Sample::new(45.9763, 7.6586, 4478.0, now);
///
/// let distance = geo_utils::haversine_distance(&zermatt, &matterhorn);
/// assert!((distance - 8_560.0).abs() < 100.0);
/// ```
#[inline]
pub fn haversine_distance(a: &Sample, b: &Sample) -> f64 {
    let point1 = Point::new(a.longitude, a.latitude);
    let point2 = Point::new(b.longitude, b.latitude);
    Haversine::distance(point1, point2)
}

/// Sum of consecutive haversine distances. Empty or single-sample tracks return 0.0.
pub fn track_distance(samples: &[Sample]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    samples
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

// =============================================================================
// Ordering
// =============================================================================

/// Sort samples into canonical order (ascending timestamp).
///
/// The sort is stable, so samples sharing a timestamp keep their arrival order.
pub fn sort_by_timestamp(samples: &mut [Sample]) {
    samples.sort_by_key(|s| s.timestamp);
}

// =============================================================================
// Unit Tests
// =============================================================================
