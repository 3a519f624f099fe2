use std::fmt;

use serde::{Deserialize, Serialize};

use super::Orbit;

/// How the angular speed of a body varies along its orbit.
///
/// Each strategy returns a non-negative factor that multiplies the body's base
/// orbit speed. They all make a body move faster near periapsis and slower
/// near apoapsis, but they disagree on the exact curve.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum RateStrategy {
    /// `((1 + e cos θ) / (1 + e))^2`: the squared conic denominator, scaled so
    /// that the factor is exactly 1 at periapsis. Independent of the size of
    /// the orbit, and identically 1 for circles.
    #[default]
    PeriapsisNormalized,
    /// `1 / r^2`, the raw inverse-square proxy for conservation of angular
    /// momentum. Depends on the absolute distance scale of the scene.
    InverseSquare,
    /// `(1 + e cos θ)^2 / (1 - e^2)^(3/2)`: the exact rate from Kepler's
    /// second law when the base speed is read as the mean motion, so one full
    /// revolution takes `2π / base_speed` on average.
    AngularMomentum,
}

impl RateStrategy {
    pub const ALL: [RateStrategy; 3] = [
        RateStrategy::PeriapsisNormalized,
        RateStrategy::InverseSquare,
        RateStrategy::AngularMomentum,
    ];

    /// Multiplier for the base orbit speed when the body is at true anomaly
    /// `theta`.
    pub fn factor(self, orbit: &Orbit, theta: f64) -> f64 {
        let e = orbit.eccentricity();
        let denominator = 1.0 + e * theta.cos();
        match self {
            RateStrategy::PeriapsisNormalized => (denominator / (1.0 + e)).powi(2),
            RateStrategy::InverseSquare => orbit.radius_at(theta).powi(-2),
            RateStrategy::AngularMomentum => {
                denominator.powi(2) / ((1.0 - e) * (1.0 + e)).powf(1.5)
            }
        }
    }

    /// The strategy after this one in [RateStrategy::ALL], wrapping around.
    pub fn next(self) -> RateStrategy {
        match self {
            RateStrategy::PeriapsisNormalized => RateStrategy::InverseSquare,
            RateStrategy::InverseSquare => RateStrategy::AngularMomentum,
            RateStrategy::AngularMomentum => RateStrategy::PeriapsisNormalized,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RateStrategy::PeriapsisNormalized => "periapsis-normalized",
            RateStrategy::InverseSquare => "inverse-square",
            RateStrategy::AngularMomentum => "angular-momentum",
        }
    }
}

impl fmt::Display for RateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
