use std::process::ExitCode;

use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;

use rust_eclipse::config::{CliArgs, SystemConfig};
use rust_eclipse::gui::Orrery;
use rust_eclipse::logging::init_logging;

/// Interactive three-body orrery.
///
/// Keys: Space pauses, `.` and `,` change the time scale, R reverses time,
/// V cycles the view, X toggles the eclipse inset, scroll or +/- zooms.
#[derive(Debug, Parser)]
#[command(name = "rust-eclipse")]
struct Args {
    #[command(flatten)]
    system: CliArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match SystemConfig::load_or_default(args.system.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args.system);
    init_logging(&config.log_level);

    let simulation = match config.build_simulation() {
        Ok(simulation) => simulation,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut window = Window::new("Eclipse Orrery");
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(Some(60));

    let orrery = Orrery::new(simulation, config.view, &mut window);
    window.render_loop(orrery);
    ExitCode::SUCCESS
}
