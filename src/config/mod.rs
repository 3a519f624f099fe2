//! RON system descriptions.
//!
//! A [SystemConfig] names the three bodies and their constants, plus the
//! knobs for the rate strategy, the eclipse thresholds and the clock. Every
//! section is optional; missing sections fall back to the Sun/Earth/Moon
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::astro::RateStrategy;
use crate::eclipse::{ClassifierConfig, EclipseClassifier};
use crate::model::{
    BodyInfo, BodyRole, CelestialBody, Simulation, SimulationClock, SimulationState,
};
use crate::view::ViewMode;

mod cli;
mod error;

pub use cli::CliArgs;
pub use error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    pub star: StarConfig,
    pub primary: OrbiterConfig,
    pub satellite: OrbiterConfig,
    pub rate: RateStrategy,
    pub eclipse: ClassifierConfig,
    pub clock: ClockConfig,
    pub view: ViewMode,
    /// Default log filter, used unless RUST_LOG is set
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarConfig {
    pub name: String,
    pub radius: f64,
    pub rotation_speed: f64,
}

/// An orbiting body. Unlike the other sections, all fields must be given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrbiterConfig {
    pub name: String,
    pub radius: f64,
    pub rotation_speed: f64,
    pub orbit_speed: f64,
    pub semimajor_axis: f64,
    pub eccentricity: f64,
    /// True anomaly at time zero, radians
    pub initial_anomaly: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    pub time_scale: i32,
    pub start_paused: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        SystemConfig {
            star: StarConfig::default(),
            primary: OrbiterConfig::earth(),
            satellite: OrbiterConfig::moon(),
            rate: RateStrategy::default(),
            eclipse: ClassifierConfig::default(),
            clock: ClockConfig::default(),
            view: ViewMode::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        StarConfig {
            name: "Sun".to_owned(),
            radius: 75.0,
            rotation_speed: 0.01,
        }
    }
}

impl OrbiterConfig {
    pub fn earth() -> Self {
        OrbiterConfig {
            name: "Earth".to_owned(),
            radius: 20.0,
            rotation_speed: 0.02,
            orbit_speed: 0.005,
            semimajor_axis: 300.0,
            eccentricity: 0.0167,
            initial_anomaly: 0.0,
        }
    }

    pub fn moon() -> Self {
        OrbiterConfig {
            name: "Moon".to_owned(),
            radius: 12.0,
            rotation_speed: 0.03,
            orbit_speed: 0.03,
            semimajor_axis: 75.0,
            eccentricity: 0.0554,
            initial_anomaly: 0.0,
        }
    }

    fn build(&self, role: BodyRole) -> Result<CelestialBody, ConfigError> {
        let info = BodyInfo {
            name: self.name.clone(),
            radius: self.radius,
            rotation_speed: self.rotation_speed,
        };
        let body = CelestialBody::orbiting(
            role,
            info,
            self.semimajor_axis,
            self.eccentricity,
            self.orbit_speed,
            self.initial_anomaly,
        )?;
        Ok(body)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            time_scale: 1,
            start_paused: false,
        }
    }
}

// --- Load / Save ---

impl SystemConfig {
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(ConfigError::Parse)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = Self::from_ron_str(&contents)?;
        tracing::info!("Loaded system from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the default system.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let serialized = self.to_ron_string()?;
        std::fs::write(path, serialized).map_err(ConfigError::Write)?;
        Ok(())
    }

    // --- Building the model ---

    pub fn build_state(&self) -> Result<SimulationState, ConfigError> {
        let star = CelestialBody::fixed(
            BodyRole::Star,
            BodyInfo {
                name: self.star.name.clone(),
                radius: self.star.radius,
                rotation_speed: self.star.rotation_speed,
            },
        )?;
        let primary = self.primary.build(BodyRole::Primary)?;
        let satellite = self.satellite.build(BodyRole::Satellite)?;
        let state = SimulationState::new(star, primary, satellite, self.rate)?;
        Ok(state)
    }

    pub fn build_clock(&self) -> SimulationClock {
        if self.clock.start_paused {
            SimulationClock::new_paused(self.clock.time_scale)
        } else {
            SimulationClock::new(self.clock.time_scale)
        }
    }

    pub fn build_simulation(&self) -> Result<Simulation, ConfigError> {
        Ok(Simulation::new(
            self.build_state()?,
            self.build_clock(),
            EclipseClassifier::new(self.eclipse.clone()),
        ))
    }
}
