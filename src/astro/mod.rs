//! Keplerian orbit geometry and the angular-rate model that drives it.
//!
//! - [Orbit] maps a true anomaly to an offset from the focus of an ellipse.
//! - [RateStrategy] decides how fast the true anomaly advances at each point
//!   of the orbit, approximating Kepler's second law without integrating the
//!   equations of motion.

mod orbit;
mod rate;

pub use orbit::{compute_position, plane_to_world, Orbit, OrbitError, OrbitPoint};
pub use rate::RateStrategy;
