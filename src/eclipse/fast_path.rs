//! Angle-only eclipse approximation.
//!
//! Only the two orbit angles are consulted, which is enough when both orbits
//! share a plane and the star sits at the origin. The thresholds are fixed.
//! The eclipse kind agrees with [EclipseClassifier](super::EclipseClassifier)
//! away from the edges of the windows, but subtypes use their own bands.

use std::f64::consts::{PI, TAU};

use super::{Eclipse, LunarEclipse, SolarEclipse};
use crate::math::angle::angular_separation;
use crate::model::SimulationState;

/// Half-width of both eclipse windows, in radians.
pub const WINDOW: f64 = 0.1;

const SOLAR_PARTIAL: f64 = 0.05;
const LUNAR_PENUMBRAL: f64 = 0.05;
const LUNAR_PARTIAL: f64 = 0.02;

/// Classifies from the primary's and satellite's orbit angles.
///
/// A solar eclipse needs the satellite on the star side of the primary, so
/// the two angles differ by about π. A lunar eclipse needs them to be about
/// equal.
pub fn classify_by_angles(
    primary_anomaly: f64,
    primary_eccentricity: f64,
    satellite_anomaly: f64,
) -> Eclipse {
    let separation = angular_separation(primary_anomaly, satellite_anomaly);

    let solar_miss = (separation - PI).abs();
    if solar_miss < WINDOW {
        let subtype = if solar_miss > SOLAR_PARTIAL {
            SolarEclipse::Partial
        } else if is_annular_half(primary_anomaly, primary_eccentricity) {
            SolarEclipse::Annular
        } else {
            SolarEclipse::Total
        };
        return Eclipse::Solar(subtype);
    }

    if separation < WINDOW {
        let subtype = if separation > LUNAR_PENUMBRAL {
            LunarEclipse::Penumbral
        } else if separation > LUNAR_PARTIAL {
            LunarEclipse::Partial
        } else {
            LunarEclipse::Total
        };
        return Eclipse::Lunar(subtype);
    }

    Eclipse::None
}

/// Runs [classify_by_angles] on the current state.
pub fn classify_state(state: &SimulationState) -> Eclipse {
    let eccentricity = state.primary().orbit().map_or(0.0, |o| o.eccentricity());
    classify_by_angles(
        state.primary().orbit_angle(),
        eccentricity,
        state.satellite().orbit_angle(),
    )
}

fn is_annular_half(primary_anomaly: f64, eccentricity: f64) -> bool {
    let bound = eccentricity.acos();
    primary_anomaly > bound && primary_anomaly < TAU - bound
}

#[cfg(test)]
mod tests {
    use super::*;

    use itertools::iproduct;

    use crate::astro::RateStrategy;
    use crate::eclipse::EclipseClassifier;
    use crate::model::{BodyInfo, BodyRole, CelestialBody};

    #[test]
    fn test_solar_bands() {
        assert_eq!(
            classify_by_angles(0.0, 0.0167, PI),
            Eclipse::Solar(SolarEclipse::Total)
        );
        assert_eq!(
            classify_by_angles(0.0, 0.0167, PI + 0.07),
            Eclipse::Solar(SolarEclipse::Partial)
        );
        assert_eq!(
            classify_by_angles(PI, 0.0167, 0.0),
            Eclipse::Solar(SolarEclipse::Annular)
        );
        assert_eq!(classify_by_angles(0.0, 0.0167, PI + 0.12), Eclipse::None);
    }

    #[test]
    fn test_lunar_bands() {
        assert_eq!(
            classify_by_angles(1.0, 0.0, 1.0),
            Eclipse::Lunar(LunarEclipse::Total)
        );
        assert_eq!(
            classify_by_angles(1.0, 0.0, 1.03),
            Eclipse::Lunar(LunarEclipse::Partial)
        );
        assert_eq!(
            classify_by_angles(1.0, 0.0, 0.92),
            Eclipse::Lunar(LunarEclipse::Penumbral)
        );
        assert_eq!(classify_by_angles(1.0, 0.0, 1.2), Eclipse::None);
    }

    #[test]
    fn test_lunar_window_wraps() {
        assert_eq!(
            classify_by_angles(0.01, 0.0, TAU - 0.01),
            Eclipse::Lunar(LunarEclipse::Total)
        );
    }

    fn state_at(primary_anomaly: f64, satellite_anomaly: f64) -> SimulationState {
        let info = |name: &str, radius| BodyInfo {
            name: name.to_owned(),
            radius,
            rotation_speed: 0.0,
        };
        let star = CelestialBody::fixed(BodyRole::Star, info("Sun", 75.0)).unwrap();
        let primary = CelestialBody::orbiting(
            BodyRole::Primary,
            info("Earth", 20.0),
            300.0,
            0.0167,
            0.005,
            primary_anomaly,
        )
        .unwrap();
        let satellite = CelestialBody::orbiting(
            BodyRole::Satellite,
            info("Moon", 12.0),
            75.0,
            0.0554,
            0.03,
            satellite_anomaly,
        )
        .unwrap();
        SimulationState::new(star, primary, satellite, RateStrategy::default()).unwrap()
    }

    #[test]
    fn test_agrees_with_classifier_on_kind() {
        let classifier = EclipseClassifier::default();
        let steps = 90;
        let angle = |i: usize| TAU * i as f64 / steps as f64;

        for (i, j) in iproduct!(0..steps, 0..steps) {
            let (primary, satellite) = (angle(i), angle(j) + 0.013 * i as f64);
            let separation = angular_separation(primary, satellite);
            // Skip the window edges, where rounding may go either way
            if (separation - WINDOW).abs() < 0.01 || (PI - separation - WINDOW).abs() < 0.01 {
                continue;
            }

            let state = state_at(primary, satellite);
            assert_eq!(
                classify_state(&state).kind(),
                classifier.classify(&state).kind(),
                "primary at {}, satellite at {}",
                primary,
                satellite
            );
        }
    }
}
