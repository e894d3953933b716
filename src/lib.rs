//! # Track Analyzer
//!
//! GPS track noise filtering and ascent/descent segmentation for outdoor activities
//! (hiking, skiing, ski touring).
//!
//! This library provides:
//! - A point filter that rejects noisy samples before they are stored
//! - Segmentation of a track into directional legs (ascents, descents, flats)
//! - Per-leg and whole-track statistics (distance, vertical gain/loss, runs, speed)
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch analysis with rayon
//! - **`serde`** - Derive `Serialize`/`Deserialize` on the public types
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{DateTime, Duration};
//! use track_analyzer::{analyze_track, AnalyzerConfig, Direction, Sample};
//!
//! let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
//! let altitudes = [1200.0, 1240.0, 1290.0, 1250.0, 1190.0, 1150.0];
//!
//! let track: Vec<Sample> = altitudes
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &alt)| {
//!         Sample::new(46.5 + i as f64 * 0.001, 7.9, alt, start + Duration::seconds(i as i64 * 30))
//!     })
//!     .collect();
//!
//! let analysis = analyze_track(&track, &AnalyzerConfig::default());
//! assert_eq!(analysis.legs.len(), 2);
//! assert_eq!(analysis.legs[0].direction(), Direction::Up);
//! assert_eq!(analysis.summary.runs, 1);
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod geo_utils;

// Pre-ingestion noise rejection
pub mod filter;
pub use filter::{filter_points, FilterConfig, Rejection};

pub mod stat;
pub use stat::Stat;

pub mod leg;
pub use leg::{Direction, Leg};

// Segmentation and cleanup passes
pub mod analyzer;
pub use analyzer::{analyze_track, collapse, de_between, segment};

pub mod summary;
pub use summary::TrackSummary;

// ============================================================================
// Core Types
// ============================================================================

/// A single timestamped geospatial and kinematic reading.
///
/// Accuracy values are radii of uncertainty in meters. A negative `speed` or
/// `course` means the receiver did not report one.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use track_analyzer::Sample;
///
/// let sample = Sample::new(46.5586, 7.9253, 2061.0, Utc::now())
///     .with_accuracy(5.0, 3.0)
///     .with_speed(4.2);
/// assert!(sample.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude above sea level in meters
    pub altitude: f64,
    pub horizontal_accuracy: f64,
    pub vertical_accuracy: f64,
    /// Ground speed in m/s
    pub speed: f64,
    /// Heading in degrees from true north
    pub course: f64,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    /// Create a sample with perfect accuracy and no speed or course.
    pub fn new(latitude: f64, longitude: f64, altitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            horizontal_accuracy: 0.0,
            vertical_accuracy: 0.0,
            speed: -1.0,
            course: -1.0,
            timestamp,
        }
    }

    pub fn with_accuracy(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_accuracy = horizontal;
        self.vertical_accuracy = vertical;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_course(mut self, course: f64) -> Self {
        self.course = course;
        self
    }

    /// Check if the sample has valid coordinates and a finite altitude.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.altitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Signed seconds elapsed between `other` and this sample.
    ///
    /// Nanosecond resolution; gaps too large for an `i64` of nanoseconds
    /// (about 292 years) fall back to milliseconds.
    pub fn seconds_since(&self, other: &Sample) -> f64 {
        let elapsed = self.timestamp.signed_duration_since(other.timestamp);
        match elapsed.num_nanoseconds() {
            Some(nanos) => nanos as f64 / 1_000_000_000.0,
            None => elapsed.num_milliseconds() as f64 / 1_000.0,
        }
    }
}

/// Configuration for track segmentation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyzerConfig {
    /// Minimum net altitude change (meters) a leg must show before a reversal
    /// in step direction can split it. Also the merge tolerance of the
    /// de-betweening pass. Negative values are not rejected.
    /// Default: 25.0 meters
    pub altitude_sensitivity: f64,
}

impl AnalyzerConfig {
    pub fn with_sensitivity(altitude_sensitivity: f64) -> Self {
        Self { altitude_sensitivity }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            altitude_sensitivity: 25.0,
        }
    }
}

/// Final legs of a track together with their rollup.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackAnalysis {
    pub legs: Vec<Leg>,
    pub summary: TrackSummary,
}

/// Reasons a track cannot be handed to the analyzer as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error("sample {index} has invalid coordinates or altitude")]
    InvalidSample { index: usize },
    #[error("sample {index} is earlier than its predecessor")]
    OutOfOrder { index: usize },
}

// ============================================================================
// Core Functions
// ============================================================================

/// Check that a track is in canonical (ascending timestamp) order and that
/// every sample is valid.
///
/// Equal timestamps are allowed. Use [`geo_utils::sort_by_timestamp`] to
/// restore canonical order for samples that arrived out of order.
pub fn validate_track(samples: &[Sample]) -> Result<(), TrackError> {
    for (index, sample) in samples.iter().enumerate() {
        if !sample.is_valid() {
            return Err(TrackError::InvalidSample { index });
        }
        if index > 0 && sample.timestamp < samples[index - 1].timestamp {
            return Err(TrackError::OutOfOrder { index });
        }
    }
    Ok(())
}

/// Validate a track and analyze it.
///
/// # Example
/// ```
/// use chrono::{DateTime, Duration};
/// use track_analyzer::{analyze_validated_track, AnalyzerConfig, Sample, TrackError};
///
/// let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
/// let track = vec![
///     Sample::new(46.50, 7.90, 1500.0, t0 + Duration::seconds(10)),
///     Sample::new(46.51, 7.90, 1520.0, t0),
/// ];
///
/// let result = analyze_validated_track(&track, &AnalyzerConfig::default());
/// assert_eq!(result.unwrap_err(), TrackError::OutOfOrder { index: 1 });
/// ```
pub fn analyze_validated_track(
    samples: &[Sample],
    config: &AnalyzerConfig,
) -> Result<TrackAnalysis, TrackError> {
    validate_track(samples)?;
    Ok(analyze_track(samples, config))
}

/// Analyze many independent tracks.
pub fn analyze_tracks(tracks: &[Vec<Sample>], config: &AnalyzerConfig) -> Vec<TrackAnalysis> {
    tracks.iter().map(|track| analyze_track(track, config)).collect()
}

/// Analyze many tracks using parallel processing.
///
/// This is the same as `analyze_tracks` but uses rayon to analyze tracks
/// concurrently. Output order matches input order.
#[cfg(feature = "parallel")]
pub fn analyze_tracks_parallel(
    tracks: &[Vec<Sample>],
    config: &AnalyzerConfig,
) -> Vec<TrackAnalysis> {
    use rayon::prelude::*;

    let start = std::time::Instant::now();
    let analyses: Vec<TrackAnalysis> = tracks
        .par_iter()
        .map(|track| analyze_track(track, config))
        .collect();

    log::info!(
        "[TrackAnalyzer] Analyzed {} tracks in parallel in {:?}",
        analyses.len(),
        start.elapsed()
    );
    analyses
}

// ============================================================================
// Tests
// ============================================================================
