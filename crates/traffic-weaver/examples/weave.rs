//! Build one week of synthetic five-minute traffic from hourly averages.
//!
//! Run with `RUST_LOG=traffic_weaver=debug cargo run --example weave` to see
//! the pipeline stages.

use std::f64::consts::PI;

use tracing_subscriber::EnvFilter;
use traffic_weaver::prelude::*;

fn main() -> Result<(), WeaverError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    // One day of hourly averages with a morning and an evening peak.
    let hours: Vec<f64> = (0..24).map(f64::from).collect();
    let averages: Vec<f64> = hours
        .iter()
        .map(|h| {
            let morning = (-(h - 9.0).powi(2) / 8.0).exp();
            let evening = 1.5 * (-(h - 20.0).powi(2) / 6.0).exp();
            20.0 + 60.0 * (morning + evening)
        })
        .collect();

    let mut weaver = Weaver::new(&hours, &averages)?;
    weaver
        .append_one_sample(true)?
        .recreate_from_average(12, ExpAdaptiveRfa::new())?
        .integral_match(&IntegralMatching::new())?
        .repeat(7)?
        .trend(|t| 5.0 * (t * 2.0 * PI).sin(), true)?
        .noise(&Noise::snr(35.0).seed(2024))?;

    let series = weaver.series();
    let peak = series.y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let low = series.y.iter().cloned().fold(f64::INFINITY, f64::min);

    println!("Samples: {}", series.len());
    println!("Range:   [{low:.2}, {peak:.2}]");
    println!();
    println!("First day at hourly resolution:");
    for (x, y) in series.x.iter().zip(&series.y).step_by(12).take(24) {
        println!("{x:>8.2} {y:>10.3}");
    }

    Ok(())
}
