use std::path::PathBuf;

use clap::Args;

use super::SystemConfig;
use crate::astro::RateStrategy;
use crate::view::ViewMode;

/// Command-line settings shared by the binaries.
///
/// Anything given here overrides the value loaded from the config file.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// Path to a RON system description
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Integer time scale; negative runs the system backwards
    #[arg(short, long, allow_negative_numbers = true)]
    pub time_scale: Option<i32>,

    /// Start (or don't start) with the clock paused
    #[arg(long)]
    pub paused: Option<bool>,

    /// How angular speed varies around the orbit
    #[arg(long, value_enum)]
    pub rate: Option<RateStrategy>,

    /// Initial projection
    #[arg(long, value_enum)]
    pub view: Option<ViewMode>,

    /// Log filter (error, warn, info, debug, trace); RUST_LOG wins over this
    #[arg(long)]
    pub log_level: Option<String>,
}

impl SystemConfig {
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(scale) = args.time_scale {
            self.clock.time_scale = scale;
        }
        if let Some(paused) = args.paused {
            self.clock.start_paused = paused;
        }
        if let Some(rate) = args.rate {
            self.rate = rate;
        }
        if let Some(view) = args.view {
            self.view = view;
        }
        if let Some(ref level) = args.log_level {
            self.log_level = level.clone();
        }
    }
}
