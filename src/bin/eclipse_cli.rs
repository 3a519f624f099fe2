use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use rust_eclipse::config::{CliArgs, SystemConfig};
use rust_eclipse::eclipse::fast_path;
use rust_eclipse::logging::init_logging;
use rust_eclipse::model::{BodyRole, EventData, TickReport};
use rust_eclipse::render::render_png;
use rust_eclipse::view::{Projection, Viewport};

/// Runs the orrery without a window and reports every eclipse it sees.
#[derive(Debug, Parser)]
#[command(name = "eclipse_cli")]
struct Args {
    #[command(flatten)]
    system: CliArgs,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 5000)]
    frames: usize,

    /// Wall-clock milliseconds between frames
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Print a state line every this many frames (0 for none)
    #[arg(long, default_value_t = 0)]
    report_every: usize,

    /// Directory to write PNG frames into
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Write a PNG every this many frames
    #[arg(long, default_value_t = 100)]
    png_every: usize,

    /// Leave out the eclipse inset from PNG frames
    #[arg(long)]
    no_inset: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = SystemConfig::load_or_default(args.system.config.as_deref())?;
    config.apply_cli_overrides(&args.system);
    if args.print_config {
        println!("{}", config.to_ron_string()?);
        return Ok(());
    }
    init_logging(&config.log_level);

    // The summary below lists every event, so keep them all
    let mut simulation = config.build_simulation()?.with_event_history(usize::MAX);
    if simulation.clock().is_paused() {
        tracing::warn!("Clock starts paused; resuming for a headless run");
        simulation.clock_mut().resume(0.0);
    }

    let projection = Projection::for_mode(config.view, Viewport::default());
    if let Some(dir) = &args.png_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut disagreements = 0;
    for frame in 0..args.frames {
        let report = match simulation.frame(frame as f64 * args.frame_ms) {
            Some(report) => report,
            None => continue,
        };

        if fast_path::classify_state(simulation.state()).kind() != report.kind() {
            disagreements += 1;
        }
        if args.report_every > 0 && frame % args.report_every == 0 {
            print_report(&report);
        }
        if let Some(dir) = &args.png_dir {
            if args.png_every > 0 && frame % args.png_every == 0 {
                let path = dir.join(format!("frame-{:06}.png", frame));
                render_png(
                    &path,
                    simulation.state(),
                    report.eclipse,
                    &projection,
                    !args.no_inset,
                )?;
            }
        }
    }

    println!("Eclipse events:");
    for event in simulation.events() {
        let description = match event.data {
            EventData::EclipseBegan(e) => format!("{} began", e),
            EventData::EclipseChanged { from, to } => format!("{} became {}", from, to),
            EventData::EclipseEnded(e) => format!("{} ended", e),
        };
        println!("    t = {:>10.2}: {}", event.time, description);
    }

    let began = simulation
        .events()
        .iter()
        .filter(|e| matches!(e.data, EventData::EclipseBegan(_)))
        .count();
    println!(
        "{} frames, simulated time {:.1}, {} eclipses, {} frames where the fast path disagreed on the kind",
        args.frames,
        simulation.state().time(),
        began,
        disagreements,
    );
    Ok(())
}

fn print_report(report: &TickReport) {
    println!("t = {:.2}: {}", report.time, report.eclipse);
    for role in BodyRole::ALL {
        let body = report.body(role);
        println!(
            "    {:<9} rotation {:>6.3}  orbit {:>6.3}  distance {:>7.2}  at ({:.1}, {:.1}, {:.1})",
            role.to_string(),
            body.rotation_angle,
            body.orbit_angle,
            body.distance,
            body.position.x,
            body.position.y,
            body.position.z,
        );
    }
}
