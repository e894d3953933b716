//! Analyze many tracks in parallel.
//!
//! Run with: cargo run --example batch_analysis --features parallel

use chrono::{DateTime, Duration, Utc};
use std::time::Instant;
use track_analyzer::{analyze_tracks, analyze_tracks_parallel, AnalyzerConfig, Sample};

fn main() {
    println!("Batch Track Analysis Example\n");

    let start: DateTime<Utc> = DateTime::from_timestamp(1_704_103_200, 0).unwrap_or_else(Utc::now);

    // Hikes with a varying number of hills
    let tracks: Vec<Vec<Sample>> = (0..200)
        .map(|t| {
            let hills = 1 + t % 5;
            (0..2_000)
                .map(|i| {
                    let phase = i as f64 / 2_000.0 * hills as f64 * std::f64::consts::TAU;
                    let alt = 1200.0 + 300.0 * (1.0 - phase.cos()) / 2.0 + (i % 3) as f64;
                    Sample::new(
                        46.0 + t as f64 * 0.01,
                        8.0 + i as f64 * 0.0001,
                        alt,
                        start + Duration::seconds(i as i64 * 2),
                    )
                })
                .collect()
        })
        .collect();

    let config = AnalyzerConfig::default();

    let timer = Instant::now();
    let sequential = analyze_tracks(&tracks, &config);
    println!("Sequential: {} tracks in {:?}", sequential.len(), timer.elapsed());

    let timer = Instant::now();
    let parallel = analyze_tracks_parallel(&tracks, &config);
    println!("Parallel:   {} tracks in {:?}\n", parallel.len(), timer.elapsed());

    for (i, analysis) in parallel.iter().take(5).enumerate() {
        println!(
            "track-{}: {} legs, {} descents, +{:.0}m / {:.0}m",
            i,
            analysis.legs.len(),
            analysis.summary.runs,
            analysis.summary.vertical_ascent,
            analysis.summary.vertical_descent
        );
    }
}
