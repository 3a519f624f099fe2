use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use super::{Eclipse, LunarEclipse, SolarEclipse};
use crate::math::geometry::{alignment, apparent_radius};
use crate::model::{CelestialBody, SimulationState};

/// Thresholds used by [EclipseClassifier].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum alignment (cosine of the angle at the primary between the
    /// satellite and the star) for a solar eclipse.
    pub solar_alignment: f64,
    /// The satellite must be closer than this to the primary for a solar
    /// eclipse, in scene units.
    pub proximity: f64,
    /// Lunar eclipses happen while `1 + alignment` is below this. The default
    /// gives the same angular window as `solar_alignment`.
    pub lunar_epsilon: f64,
    /// Apparent size ratio (satellite / star) above which a solar eclipse is
    /// total.
    ///
    /// With the default Sun/Earth/Moon bodies the ratio stays near 0.6, so
    /// every solar eclipse is partial. Total and annular eclipses need a
    /// bigger or closer satellite.
    pub total_size_ratio: f64,
    /// Apparent size ratio above which a solar eclipse is annular.
    pub annular_size_ratio: f64,
    /// Shadow coverage above which a lunar eclipse is total.
    pub total_coverage: f64,
    /// Shadow coverage above which a lunar eclipse is partial.
    pub partial_coverage: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            solar_alignment: 0.995,
            proximity: 200.0,
            lunar_epsilon: 0.005,
            total_size_ratio: 1.05,
            annular_size_ratio: 0.95,
            total_coverage: 0.95,
            partial_coverage: 0.3,
        }
    }
}

/// Where a body is and how big it is; all the classifier needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyGeometry {
    pub position: Point3<f64>,
    pub radius: f64,
}

impl BodyGeometry {
    pub fn new(position: Point3<f64>, radius: f64) -> Self {
        BodyGeometry { position, radius }
    }

    pub fn of(body: &CelestialBody) -> Self {
        Self::new(body.position(), body.radius())
    }

    fn distance_to(&self, other: &BodyGeometry) -> f64 {
        (self.position - other.position).norm()
    }
}

/// Classifies eclipses from the 3-D configuration of the three bodies.
///
/// Stateless: every call looks only at the geometry it is given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EclipseClassifier {
    config: ClassifierConfig,
}

impl EclipseClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        EclipseClassifier { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, state: &SimulationState) -> Eclipse {
        self.classify_geometry(
            &BodyGeometry::of(state.star()),
            &BodyGeometry::of(state.primary()),
            &BodyGeometry::of(state.satellite()),
        )
    }

    pub fn classify_geometry(
        &self,
        star: &BodyGeometry,
        primary: &BodyGeometry,
        satellite: &BodyGeometry,
    ) -> Eclipse {
        // Coincident bodies have no meaningful alignment
        let alignment = match alignment(&primary.position, &satellite.position, &star.position) {
            Some(a) => a,
            None => return Eclipse::None,
        };

        // Both can't really fire at once, but if they do, solar wins
        if let Some(solar) = self.solar(alignment, star, primary, satellite) {
            Eclipse::Solar(solar)
        } else if let Some(lunar) = self.lunar(alignment) {
            Eclipse::Lunar(lunar)
        } else {
            Eclipse::None
        }
    }

    fn solar(
        &self,
        alignment: f64,
        star: &BodyGeometry,
        primary: &BodyGeometry,
        satellite: &BodyGeometry,
    ) -> Option<SolarEclipse> {
        if alignment <= self.config.solar_alignment
            || satellite.distance_to(primary) >= self.config.proximity
        {
            return None;
        }

        let ratio = size_ratio(star, primary, satellite);
        let subtype = if ratio > self.config.total_size_ratio {
            SolarEclipse::Total
        } else if ratio > self.config.annular_size_ratio {
            SolarEclipse::Annular
        } else {
            SolarEclipse::Partial
        };
        Some(subtype)
    }

    fn lunar(&self, alignment: f64) -> Option<LunarEclipse> {
        if (alignment + 1.0).abs() >= self.config.lunar_epsilon {
            return None;
        }

        let coverage = self.lunar_coverage(alignment);
        let subtype = if coverage > self.config.total_coverage {
            LunarEclipse::Total
        } else if coverage > self.config.partial_coverage {
            LunarEclipse::Partial
        } else {
            LunarEclipse::Penumbral
        };
        Some(subtype)
    }

    /// How deep the satellite is in the primary's shadow: 1 when the star,
    /// primary and satellite are exactly collinear, falling to 0 at the edge
    /// of the lunar window.
    pub fn lunar_coverage(&self, alignment: f64) -> f64 {
        (1.0 - (alignment + 1.0).abs() / self.config.lunar_epsilon).max(0.0)
    }
}

/// Apparent size of the satellite relative to the star, as seen from the
/// primary.
pub fn size_ratio(star: &BodyGeometry, primary: &BodyGeometry, satellite: &BodyGeometry) -> f64 {
    let satellite_size = apparent_radius(satellite.radius, satellite.distance_to(primary));
    let star_size = apparent_radius(star.radius, star.distance_to(primary));
    satellite_size / star_size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> BodyGeometry {
        BodyGeometry::new(Point3::origin(), 75.0)
    }

    fn primary() -> BodyGeometry {
        BodyGeometry::new(Point3::new(300.0, 0.0, 0.0), 20.0)
    }

    /// Satellite at `angle` around the primary, 75 units out.
    fn satellite(angle: f64, radius: f64) -> BodyGeometry {
        let offset = 75.0 * nalgebra::Vector3::new(angle.cos(), 0.0, -angle.sin());
        BodyGeometry::new(primary().position + offset, radius)
    }

    fn classify(satellite: BodyGeometry) -> Eclipse {
        EclipseClassifier::default().classify_geometry(&star(), &primary(), &satellite)
    }

    #[test]
    fn test_solar_subtypes() {
        use std::f64::consts::PI;
        // Star subtends 75/300 = 0.25, satellite r/75
        assert_eq!(classify(satellite(PI, 12.0)), Eclipse::Solar(SolarEclipse::Partial));
        assert_eq!(classify(satellite(PI, 18.75)), Eclipse::Solar(SolarEclipse::Annular));
        assert_eq!(classify(satellite(PI, 20.0)), Eclipse::Solar(SolarEclipse::Total));

        // Still inside the alignment window
        assert_eq!(classify(satellite(PI + 0.09, 20.0)), Eclipse::Solar(SolarEclipse::Total));
        // Outside it
        assert_eq!(classify(satellite(PI + 0.11, 20.0)), Eclipse::None);
    }

    #[test]
    fn test_solar_needs_proximity() {
        let classifier = EclipseClassifier::new(ClassifierConfig {
            proximity: 50.0,
            ..ClassifierConfig::default()
        });
        let satellite = satellite(std::f64::consts::PI, 20.0);
        assert_eq!(
            classifier.classify_geometry(&star(), &primary(), &satellite),
            Eclipse::None
        );
    }

    #[test]
    fn test_lunar_subtypes() {
        // The satellite's offset from the anti-star direction sets how far
        // 1 + alignment is from zero: 1 - cos(angle)
        assert_eq!(classify(satellite(0.0, 12.0)), Eclipse::Lunar(LunarEclipse::Total));
        assert_eq!(classify(satellite(0.01, 12.0)), Eclipse::Lunar(LunarEclipse::Total));
        assert_eq!(classify(satellite(0.05, 12.0)), Eclipse::Lunar(LunarEclipse::Partial));
        assert_eq!(classify(satellite(-0.05, 12.0)), Eclipse::Lunar(LunarEclipse::Partial));
        assert_eq!(classify(satellite(0.09, 12.0)), Eclipse::Lunar(LunarEclipse::Penumbral));
        assert_eq!(classify(satellite(0.2, 12.0)), Eclipse::None);
    }

    #[test]
    fn test_quadrature_is_not_an_eclipse() {
        use std::f64::consts::FRAC_PI_2;
        assert_eq!(classify(satellite(FRAC_PI_2, 12.0)), Eclipse::None);
        assert_eq!(classify(satellite(-FRAC_PI_2, 12.0)), Eclipse::None);
    }

    #[test]
    fn test_lunar_coverage() {
        let classifier = EclipseClassifier::default();
        assert_eq!(classifier.lunar_coverage(-1.0), 1.0);
        assert!((classifier.lunar_coverage(-1.0 + 0.0025) - 0.5).abs() < 1e-12);
        assert_eq!(classifier.lunar_coverage(0.0), 0.0);
    }

    #[test]
    fn test_solar_has_priority() {
        // A degenerate config where every alignment counts as both
        let classifier = EclipseClassifier::new(ClassifierConfig {
            solar_alignment: -2.0,
            lunar_epsilon: 10.0,
            ..ClassifierConfig::default()
        });
        let eclipse = classifier.classify_geometry(&star(), &primary(), &satellite(0.0, 12.0));
        assert_eq!(eclipse.kind(), crate::eclipse::EclipseKind::Solar);
    }

    #[test]
    fn test_coincident_bodies() {
        let on_top = BodyGeometry::new(primary().position, 12.0);
        assert_eq!(classify(on_top), Eclipse::None);
    }
}
