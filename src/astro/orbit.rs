use std::f64::consts::PI;

use nalgebra::{Vector2, Vector3};

use crate::math::angle::wrap_angle;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum OrbitError {
    #[error("semi-major axis must be positive and finite, got {0}")]
    InvalidSemimajorAxis(f64),
    #[error("eccentricity must lie in [0, 1), got {0}")]
    InvalidEccentricity(f64),
}

/// A closed elliptical orbit, described in its own plane.
///
/// The attracting body sits at the origin, which is one focus of the ellipse,
/// and periapsis lies along the +x axis. Angles are true anomalies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    semimajor_axis: f64,
    eccentricity: f64,
}

/// Where a body is on its orbit, relative to the focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPoint {
    /// Offset from the focus, in the orbital plane.
    pub offset: Vector2<f64>,
    /// Distance from the focus. Always equal to `offset.norm()`.
    pub distance: f64,
}

impl OrbitPoint {
    pub fn to_world(&self) -> Vector3<f64> {
        plane_to_world(&self.offset)
    }
}

/// Embeds an orbital-plane vector into world space.
///
/// World space is right-handed with Y pointing up, and every orbit lies in the
/// XZ plane. Plane +x maps to world +X and plane +y to world -Z, so increasing
/// anomaly is a counter-clockwise motion when seen from above.
pub fn plane_to_world(v: &Vector2<f64>) -> Vector3<f64> {
    Vector3::new(v.x, 0.0, -v.y)
}

/// Evaluates the orbit with the given elements at the true anomaly `theta`.
pub fn compute_position(
    semimajor_axis: f64,
    eccentricity: f64,
    theta: f64,
) -> Result<OrbitPoint, OrbitError> {
    Ok(Orbit::new(semimajor_axis, eccentricity)?.point_at(theta))
}

impl Orbit {
    pub fn new(semimajor_axis: f64, eccentricity: f64) -> Result<Self, OrbitError> {
        if !(semimajor_axis.is_finite() && semimajor_axis > 0.0) {
            return Err(OrbitError::InvalidSemimajorAxis(semimajor_axis));
        }
        // NaN fails this check too
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbitError::InvalidEccentricity(eccentricity));
        }

        Ok(Orbit {
            semimajor_axis,
            eccentricity,
        })
    }

    pub fn circular(radius: f64) -> Result<Self, OrbitError> {
        Self::new(radius, 0.0)
    }

    // -- Orbital elements --

    pub fn semimajor_axis(&self) -> f64 {
        self.semimajor_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn semiminor_axis(&self) -> f64 {
        let e = self.eccentricity;
        self.semimajor_axis * (1.0 - e * e).sqrt()
    }

    /// Semi-latus rectum, a(1 - e^2)
    pub fn semilatus_rectum(&self) -> f64 {
        let e = self.eccentricity;
        self.semimajor_axis * (1.0 - e) * (1.0 + e)
    }

    pub fn periapsis(&self) -> f64 {
        self.semimajor_axis * (1.0 - self.eccentricity)
    }

    pub fn apoapsis(&self) -> f64 {
        self.semimajor_axis * (1.0 + self.eccentricity)
    }

    /// Center of the ellipse, relative to the focus.
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(-self.semimajor_axis * self.eccentricity, 0.0)
    }

    // -- Evaluation --

    pub fn radius_at(&self, theta: f64) -> f64 {
        self.semilatus_rectum() / (1.0 + self.eccentricity * theta.cos())
    }

    pub fn point_at(&self, theta: f64) -> OrbitPoint {
        let theta = wrap_angle(theta);
        let distance = self.radius_at(theta);
        OrbitPoint {
            offset: Vector2::new(distance * theta.cos(), distance * theta.sin()),
            distance,
        }
    }

    /// Evenly spaced (in anomaly) points around the whole orbit. The first
    /// point is repeated at the end, so the path closes.
    pub fn outline(&self, num_segments: usize) -> impl Iterator<Item = Vector2<f64>> + '_ {
        (0..=num_segments).map(move |i| {
            let theta = 2.0 * PI * i as f64 / num_segments as f64;
            self.point_at(theta).offset
        })
    }
}
