use std::error::Error;
use std::f64::consts::TAU;
use std::path::PathBuf;

use clap::Parser;
use plotters::prelude::*;

use rust_eclipse::astro::{Orbit, RateStrategy};

/// Plots how each rate strategy scales angular speed around an orbit.
#[derive(Debug, Parser)]
struct Args {
    /// Orbital eccentricity
    #[arg(short, long, default_value_t = 0.3)]
    eccentricity: f64,

    /// Semi-major axis; only matters for the inverse-square strategy
    #[arg(short = 'a', long, default_value_t = 1.0)]
    semimajor_axis: f64,

    /// Output image
    #[arg(short, long, default_value = "plots/rate-curves.png")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let orbit = Orbit::new(args.semimajor_axis, args.eccentricity)?;

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    draw_plot(&args.output, &orbit, 360)?;

    // Print the extremes; handy for picking orbit speeds
    for strategy in RateStrategy::ALL {
        println!(
            "{:<20} periapsis {:.4}, apoapsis {:.4}",
            strategy.name(),
            strategy.factor(&orbit, 0.0),
            strategy.factor(&orbit, TAU / 2.0),
        );
    }
    Ok(())
}

fn draw_plot(path: &PathBuf, orbit: &Orbit, n_points: usize) -> Result<(), Box<dyn Error>> {
    let samples: Vec<Vec<(f64, f64)>> = RateStrategy::ALL
        .iter()
        .map(|strategy| {
            (0..=n_points)
                .map(|i| TAU * i as f64 / n_points as f64)
                .map(|theta| (theta, strategy.factor(orbit, theta)))
                .collect()
        })
        .collect();
    let y_max = samples
        .iter()
        .flatten()
        .map(|&(_, y)| y)
        .fold(0.0, f64::max);

    let root = BitMapBackend::new(path, (800, 480)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Rate factor, e = {}", orbit.eccentricity()),
            ("sans-serif", 20),
        )
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..TAU, 0.0..(1.1 * y_max))?;

    chart
        .configure_mesh()
        .x_desc("true anomaly (rad)")
        .y_desc("factor")
        .draw()?;

    let colors = [RED, BLUE, GREEN];
    for ((strategy, points), color) in RateStrategy::ALL.iter().zip(samples).zip(colors) {
        chart
            .draw_series(LineSeries::new(points, &color))?
            .label(strategy.name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
