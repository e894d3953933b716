//! Filter a synthetic ski day and break it into legs.
//!
//! Run with: cargo run --example basic_analysis

use chrono::{DateTime, Duration, Utc};
use track_analyzer::{analyze_track, filter_points, AnalyzerConfig, FilterConfig, Sample};

fn main() {
    let start: DateTime<Utc> = DateTime::from_timestamp(1_704_103_200, 0).unwrap_or_else(Utc::now);

    // Two lift rides and two runs, one sample every 5 seconds
    let profile = [(1600.0, 2300.0), (2300.0, 1650.0), (1650.0, 2450.0), (2450.0, 1600.0)];
    let mut raw = Vec::new();
    let mut tick = 0i64;
    for (from, to) in profile {
        for step in 0..60 {
            let alt = from + (to - from) * step as f64 / 60.0;
            // Every 7th fix is a poor one that the filter should drop
            let accuracy = if tick % 7 == 0 { 40.0 } else { 5.0 };
            raw.push(
                Sample::new(46.50 + tick as f64 * 0.0004, 7.90, alt, start + Duration::seconds(tick * 5))
                    .with_accuracy(accuracy, 4.0)
                    .with_speed(if to < from { 12.0 } else { 4.0 }),
            );
            tick += 1;
        }
    }

    let kept = filter_points(&raw, None, &FilterConfig::default());
    println!("Point filter: kept {} of {} samples\n", kept.len(), raw.len());

    let config = AnalyzerConfig::default();
    let analysis = analyze_track(&kept, &config);

    println!("Legs (sensitivity {}m):", config.altitude_sensitivity);
    for leg in &analysis.legs {
        println!(
            "  {:>4}..{:<4} {:<7} {:>6.0}m vertical, {:>6.0}m distance",
            leg.start_index,
            leg.end_index,
            leg.direction(),
            leg.stat.vertical_delta(),
            leg.stat.distance()
        );
    }

    let summary = analysis.summary;
    println!("\nSummary:");
    println!("  runs: {}", summary.runs);
    println!("  vertical ascent: {:.0}m", summary.vertical_ascent);
    println!("  vertical descent: {:.0}m", summary.vertical_descent);
    println!("  total distance: {:.0}m", summary.total_distance);
    if let (Some(min), Some(max)) = (summary.min_altitude(), summary.max_altitude()) {
        println!("  altitude range: {:.0}m - {:.0}m", min, max);
    }
    if let Some(speed) = summary.max_speed() {
        println!("  max speed: {:.1} m/s", speed);
    }
}
