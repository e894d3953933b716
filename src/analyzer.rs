//! # Leg Segmentation
//!
//! Splits a track into directional legs and cleans up the result.
//!
//! ## Algorithm
//! 1. **Segment**: one linear pass with a single open leg. A leg is split only
//!    when its net altitude change exceeds the sensitivity *and* the latest step
//!    points the other way (hysteresis against altimeter noise).
//! 2. **Collapse**: merge neighbouring legs that ended up with the same direction.
//! 3. **De-between**: fold legs that are not a local extremum (their altitude
//!    sits between the neighbours' altitudes), or that moved less than the
//!    sensitivity, into the preceding leg.
//!
//! Every pass is O(n) and preserves leg order, so the final legs still
//! partition `[0, n)` without gaps.
//!
//! Samples must already be in canonical (ascending timestamp) order; see
//! [`crate::validate_track`] and [`crate::geo_utils::sort_by_timestamp`].

use log::debug;

use crate::geo_utils::haversine_distance;
use crate::{AnalyzerConfig, Direction, Leg, Sample, TrackAnalysis, TrackSummary};

// =============================================================================
// Segmentation
// =============================================================================

/// Partition a track into raw directional legs.
///
/// The first leg starts Unknown and adopts the direction of the first step.
/// Each later leg starts at the sample that reversed the trend, already
/// carrying that step's direction. Each sample's stat contribution (its
/// altitude, speed and the distance travelled to reach it) lands in the leg
/// containing it, so leg distances add up to the track distance.
///
/// Empty input yields no legs; a single sample yields one Unknown leg.
///
/// # Example
/// ```
/// use chrono::{DateTime, Duration};
/// use track_analyzer::{segment, AnalyzerConfig, Direction, Sample};
///
/// let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
/// let track: Vec<Sample> = [100.0, 105.0, 90.0, 85.0, 95.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &alt)| Sample::new(46.0 + i as f64 * 0.0001, 8.0, alt, t0 + Duration::seconds(i as i64)))
///     .collect();
///
/// let legs = segment(&track, &AnalyzerConfig::with_sensitivity(1.0));
/// let directions: Vec<Direction> = legs.iter().map(|l| l.direction()).collect();
/// assert_eq!(directions, vec![Direction::Up, Direction::Down, Direction::Up]);
/// ```
pub fn segment(samples: &[Sample], config: &AnalyzerConfig) -> Vec<Leg> {
    let Some(first) = samples.first() else {
        return Vec::new();
    };

    let mut legs = Vec::new();
    let mut open = Leg::open(0, *first);
    open.stat.fold(first, 0.0);

    for (offset, pair) in samples.windows(2).enumerate() {
        let index = offset + 1;
        let (prev, cur) = (&pair[0], &pair[1]);
        let step = step_direction(prev, cur);

        open.set_end(index - 1, *prev);
        if trend_changed(&mut open, step, config.altitude_sensitivity) {
            let closed = std::mem::replace(&mut open, Leg::open(index, *cur).with_direction(step));
            legs.push(closed);
        }
        open.stat.fold(cur, haversine_distance(prev, cur));
    }

    let last = samples.len() - 1;
    open.set_end(last, samples[last]);
    legs.push(open);

    legs
}

/// Direction of a single step between consecutive samples.
///
/// Equal altitudes classify as Up. Asymmetric, but must match legs that were
/// already stored with this tie-break.
fn step_direction(prev: &Sample, cur: &Sample) -> Direction {
    if prev.altitude > cur.altitude {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Decide whether `step` ends the open leg.
///
/// An unclassified leg adopts the step's direction and never splits on its
/// first classification. Net changes within the sensitivity never split.
fn trend_changed(leg: &mut Leg, step: Direction, sensitivity: f64) -> bool {
    if leg.direction() == Direction::Unknown {
        leg.set_direction(step);
        return false;
    }
    if leg.altitude_change().abs() <= sensitivity {
        return false;
    }
    step != leg.direction()
}

// =============================================================================
// Cleanup Passes
// =============================================================================

/// Merge consecutive legs that share a direction.
///
/// Legs equal to their predecessor (see [`Leg`]'s coarse equality) are dropped.
pub fn collapse(legs: &[Leg]) -> Vec<Leg> {
    let mut collapsed: Vec<Leg> = Vec::with_capacity(legs.len());

    for leg in legs {
        if let Some(last) = collapsed.last_mut() {
            if *last == *leg {
                continue;
            }
            if last.direction() == leg.direction() {
                let direction = last.direction();
                *last = last.combine(leg, direction);
                continue;
            }
        }
        collapsed.push(leg.clone());
    }

    collapsed
}

/// Fold pass-through and insignificant legs into their predecessor.
///
/// A leg is merged into the running accumulator when its altitude lies
/// within the closed range spanned by the accumulator's and the next leg's
/// altitudes, or when it differs from the accumulator's altitude by no more
/// than the sensitivity. The last leg has no successor, so only the
/// sensitivity test applies to it. Merged legs take the accumulator's direction.
pub fn de_between(legs: &[Leg], config: &AnalyzerConfig) -> Vec<Leg> {
    let Some((first, rest)) = legs.split_first() else {
        return Vec::new();
    };

    let mut result = Vec::new();
    let mut acc = first.clone();

    for (offset, leg) in rest.iter().enumerate() {
        let between = rest
            .get(offset + 1)
            .is_some_and(|next| is_between(acc.altitude(), leg.altitude(), next.altitude()));
        let insignificant = (leg.altitude() - acc.altitude()).abs() <= config.altitude_sensitivity;

        if between || insignificant {
            let direction = acc.direction();
            acc = acc.combine(leg, direction);
        } else {
            result.push(std::mem::replace(&mut acc, leg.clone()));
        }
    }
    result.push(acc);

    result
}

/// True if `value` lies in the closed interval spanned by `a` and `b`, in either order.
fn is_between(a: f64, value: f64, b: f64) -> bool {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    low <= value && value <= high
}

// =============================================================================
// Pipeline
// =============================================================================

/// Segment a track, run both cleanup passes and summarize the final legs.
pub fn analyze_track(samples: &[Sample], config: &AnalyzerConfig) -> TrackAnalysis {
    let raw = segment(samples, config);
    let collapsed = collapse(&raw);
    let legs = de_between(&collapsed, config);
    let summary = TrackSummary::summarize(&legs);

    debug!(
        "[TrackAnalyzer] {} samples -> {} raw legs -> {} collapsed -> {} final (sensitivity {}m)",
        samples.len(),
        raw.len(),
        collapsed.len(),
        legs.len(),
        config.altitude_sensitivity
    );

    TrackAnalysis { legs, summary }
}

// =============================================================================
// Tests
// =============================================================================
