use std::fmt;

use nalgebra::{Point3, Vector3};

use super::ModelError;
use crate::astro::{Orbit, RateStrategy};
use crate::math::angle::wrap_angle;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum BodyRole {
    Star,
    Primary,
    Satellite,
}

impl BodyRole {
    pub const ALL: [BodyRole; 3] = [BodyRole::Star, BodyRole::Primary, BodyRole::Satellite];

    /// The body this one orbits, if any.
    pub fn parent(self) -> Option<BodyRole> {
        match self {
            BodyRole::Star => None,
            BodyRole::Primary => Some(BodyRole::Star),
            BodyRole::Satellite => Some(BodyRole::Primary),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BodyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodyRole::Star => "star",
            BodyRole::Primary => "primary",
            BodyRole::Satellite => "satellite",
        };
        f.write_str(name)
    }
}

// All the immutable info about a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo {
    pub name: String,
    pub radius: f64,
    /// Spin rate, in radians per unit of simulated time
    pub rotation_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct OrbitalMotion {
    orbit: Orbit,
    /// Base angular rate, before Kepler modulation
    orbit_speed: f64,
}

/// One body of the system. Only the angles, position and distance change
/// once the body is created.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    role: BodyRole,
    info: BodyInfo,
    motion: Option<OrbitalMotion>,
    rotation_angle: f64,
    orbit_angle: f64,
    // Derived from orbit_angle and the parent's position
    offset: Vector3<f64>,
    position: Point3<f64>,
    distance: f64,
}

/// What a body looks like after a tick; this is the engine's per-body output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub role: BodyRole,
    pub rotation_angle: f64,
    pub orbit_angle: f64,
    pub position: Point3<f64>,
    pub distance: f64,
}

fn check_info(info: &BodyInfo) -> Result<(), ModelError> {
    if !(info.radius.is_finite() && info.radius > 0.0) {
        return Err(ModelError::InvalidRadius {
            name: info.name.clone(),
            radius: info.radius,
        });
    }
    check_finite(&info.name, "rotation speed", info.rotation_speed)
}

fn check_finite(name: &str, quantity: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::NonFinite {
            name: name.to_owned(),
            quantity,
            value,
        })
    }
}

impl CelestialBody {
    /// A body that sits at the origin and only spins.
    pub fn fixed(role: BodyRole, info: BodyInfo) -> Result<Self, ModelError> {
        check_info(&info)?;
        Ok(CelestialBody {
            role,
            info,
            motion: None,
            rotation_angle: 0.0,
            orbit_angle: 0.0,
            offset: Vector3::zeros(),
            position: Point3::origin(),
            distance: 0.0,
        })
    }

    /// A body on an elliptical orbit around its parent, starting at the true
    /// anomaly `initial_anomaly`. Its position is only meaningful once it has
    /// been placed relative to its parent.
    pub fn orbiting(
        role: BodyRole,
        info: BodyInfo,
        semimajor_axis: f64,
        eccentricity: f64,
        orbit_speed: f64,
        initial_anomaly: f64,
    ) -> Result<Self, ModelError> {
        check_info(&info)?;
        check_finite(&info.name, "orbit speed", orbit_speed)?;
        check_finite(&info.name, "initial anomaly", initial_anomaly)?;
        let orbit =
            Orbit::new(semimajor_axis, eccentricity).map_err(|source| ModelError::InvalidOrbit {
                name: info.name.clone(),
                source,
            })?;

        let mut body = CelestialBody {
            role,
            info,
            motion: Some(OrbitalMotion { orbit, orbit_speed }),
            rotation_angle: 0.0,
            orbit_angle: wrap_angle(initial_anomaly),
            offset: Vector3::zeros(),
            position: Point3::origin(),
            distance: 0.0,
        };
        body.place(&Point3::origin());
        Ok(body)
    }

    // -- Accessors --

    pub fn role(&self) -> BodyRole {
        self.role
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn radius(&self) -> f64 {
        self.info.radius
    }

    pub fn orbit(&self) -> Option<&Orbit> {
        self.motion.as_ref().map(|m| &m.orbit)
    }

    pub fn orbit_speed(&self) -> f64 {
        self.motion.map_or(0.0, |m| m.orbit_speed)
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Offset from the parent's position; zero for a fixed body.
    pub fn offset(&self) -> Vector3<f64> {
        self.offset
    }

    /// Distance from the parent; zero for a fixed body.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            role: self.role,
            rotation_angle: self.rotation_angle,
            orbit_angle: self.orbit_angle,
            position: self.position,
            distance: self.distance,
        }
    }

    // -- Updates --

    pub(crate) fn spin(&mut self, time_factor: f64) {
        self.rotation_angle =
            wrap_angle(self.rotation_angle + self.info.rotation_speed * time_factor);
    }

    /// Moves the body along its orbit. The rate factor is evaluated at the
    /// anomaly the body had at the start of the tick.
    pub(crate) fn advance_orbit(
        &mut self,
        time_factor: f64,
        strategy: RateStrategy,
        parent_position: &Point3<f64>,
    ) {
        if let Some(motion) = self.motion {
            let rate = strategy.factor(&motion.orbit, self.orbit_angle);
            self.orbit_angle =
                wrap_angle(self.orbit_angle + motion.orbit_speed * time_factor * rate);
        }
        self.place(parent_position);
    }

    /// Recomputes the derived position from the current anomaly.
    pub(crate) fn place(&mut self, parent_position: &Point3<f64>) {
        if let Some(motion) = self.motion {
            let point = motion.orbit.point_at(self.orbit_angle);
            self.offset = point.to_world();
            self.distance = point.distance;
            self.position = *parent_position + self.offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn info(name: &str, radius: f64) -> BodyInfo {
        BodyInfo {
            name: name.to_owned(),
            radius,
            rotation_speed: 0.02,
        }
    }

    #[test]
    fn test_fixed_body() {
        let star = CelestialBody::fixed(BodyRole::Star, info("Sun", 75.0)).unwrap();
        assert!(star.orbit().is_none());
        assert_eq!(star.position(), Point3::origin());
        assert_eq!(star.distance(), 0.0);
        assert_eq!(star.orbit_speed(), 0.0);
    }

    #[test]
    fn test_orbiting_body_starts_placed() {
        let body =
            CelestialBody::orbiting(BodyRole::Primary, info("Earth", 20.0), 300.0, 0.1, 0.005, PI)
                .unwrap();
        assert_relative_eq!(body.distance(), 330.0, max_relative = 1e-14);
        assert_relative_eq!(body.position().x, -330.0, max_relative = 1e-14);
        assert_relative_eq!(body.offset().norm(), body.distance(), max_relative = 1e-15);
    }

    #[test]
    fn test_placement_follows_parent() {
        let mut body =
            CelestialBody::orbiting(BodyRole::Satellite, info("Moon", 12.0), 75.0, 0.0, 0.03, 0.0)
                .unwrap();
        let parent = Point3::new(100.0, 0.0, -50.0);
        body.place(&parent);
        assert_relative_eq!(body.position(), Point3::new(175.0, 0.0, -50.0));
        assert_relative_eq!(body.distance(), 75.0);
    }

    #[test]
    fn test_spin_wraps() {
        let mut star = CelestialBody::fixed(BodyRole::Star, info("Sun", 75.0)).unwrap();
        // 0.02 rad per unit time, for 500 units: 10 rad
        star.spin(500.0);
        assert_relative_eq!(star.rotation_angle(), 10.0 - 2.0 * PI, max_relative = 1e-12);
        star.spin(-500.0);
        assert!(star.rotation_angle() < 1e-12 || star.rotation_angle() > 2.0 * PI - 1e-12);
    }

    #[test]
    fn test_invalid_bodies() {
        assert_eq!(
            CelestialBody::fixed(BodyRole::Star, info("Sun", 0.0)),
            Err(ModelError::InvalidRadius {
                name: "Sun".to_owned(),
                radius: 0.0
            })
        );
        assert!(matches!(
            CelestialBody::orbiting(BodyRole::Primary, info("Earth", 20.0), 300.0, 1.0, 0.005, 0.0),
            Err(ModelError::InvalidOrbit { .. })
        ));
        assert!(matches!(
            CelestialBody::orbiting(BodyRole::Primary, info("Earth", 20.0), -1.0, 0.0, 0.005, 0.0),
            Err(ModelError::InvalidOrbit { .. })
        ));
        assert!(matches!(
            CelestialBody::orbiting(
                BodyRole::Primary,
                info("Earth", 20.0),
                300.0,
                0.0,
                f64::NAN,
                0.0
            ),
            Err(ModelError::NonFinite { .. })
        ));
        assert!(matches!(
            CelestialBody::orbiting(
                BodyRole::Primary,
                info("Earth", 20.0),
                300.0,
                0.0,
                0.005,
                f64::INFINITY
            ),
            Err(ModelError::NonFinite { quantity: "initial anomaly", .. })
        ));
    }
}
