//! The simulated system: three bodies, the clock that drives them, and the
//! per-frame driver that ties state updates to eclipse classification.

mod body;
mod clock;
mod events;
mod simulation;
mod state;

pub use body::{BodyInfo, BodyRole, BodySnapshot, CelestialBody};
pub use clock::{tick, SimulationClock, TIME_FACTOR_PER_MS};
pub use events::{EclipseEvent, EventData};
pub use simulation::{Simulation, TickReport};
pub use state::SimulationState;

use crate::astro::OrbitError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("invalid orbit for {name}: {source}")]
    InvalidOrbit {
        name: String,
        #[source]
        source: OrbitError,
    },
    #[error("radius of {name} must be positive and finite, got {radius}")]
    InvalidRadius { name: String, radius: f64 },
    #[error("{quantity} of {name} must be finite, got {value}")]
    NonFinite {
        name: String,
        quantity: &'static str,
        value: f64,
    },
    #[error("{name} cannot be used as the {role}")]
    InvalidRole { name: String, role: BodyRole },
}
