//! Detection and classification of eclipses.
//!
//! [EclipseClassifier] is the canonical policy: it works from the bodies' 3-D
//! positions and sizes, so every projection agrees with it. The [fast_path]
//! module has a cheaper angle-only approximation that only looks at the two
//! orbit angles.

use std::fmt;

mod classifier;
pub mod fast_path;
mod inset;

pub use classifier::{BodyGeometry, ClassifierConfig, EclipseClassifier};
pub use inset::{Disc, EclipseInset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarEclipse {
    Total,
    Annular,
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LunarEclipse {
    Total,
    Partial,
    Penumbral,
}

/// Result of classifying one tick. "No eclipse" is an ordinary outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Eclipse {
    #[default]
    None,
    /// The satellite passes between the star and the primary
    Solar(SolarEclipse),
    /// The primary passes between the star and the satellite
    Lunar(LunarEclipse),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EclipseKind {
    Solar,
    Lunar,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EclipseSubtype {
    Total,
    Annular,
    Partial,
    Penumbral,
    None,
}

impl Eclipse {
    pub fn is_active(&self) -> bool {
        !matches!(self, Eclipse::None)
    }

    pub fn kind(&self) -> EclipseKind {
        match self {
            Eclipse::None => EclipseKind::None,
            Eclipse::Solar(_) => EclipseKind::Solar,
            Eclipse::Lunar(_) => EclipseKind::Lunar,
        }
    }

    pub fn subtype(&self) -> EclipseSubtype {
        match self {
            Eclipse::None => EclipseSubtype::None,
            Eclipse::Solar(SolarEclipse::Total) => EclipseSubtype::Total,
            Eclipse::Solar(SolarEclipse::Annular) => EclipseSubtype::Annular,
            Eclipse::Solar(SolarEclipse::Partial) => EclipseSubtype::Partial,
            Eclipse::Lunar(LunarEclipse::Total) => EclipseSubtype::Total,
            Eclipse::Lunar(LunarEclipse::Partial) => EclipseSubtype::Partial,
            Eclipse::Lunar(LunarEclipse::Penumbral) => EclipseSubtype::Penumbral,
        }
    }
}

impl fmt::Display for Eclipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Eclipse::None => "no eclipse",
            Eclipse::Solar(SolarEclipse::Total) => "total solar eclipse",
            Eclipse::Solar(SolarEclipse::Annular) => "annular solar eclipse",
            Eclipse::Solar(SolarEclipse::Partial) => "partial solar eclipse",
            Eclipse::Lunar(LunarEclipse::Total) => "total lunar eclipse",
            Eclipse::Lunar(LunarEclipse::Partial) => "partial lunar eclipse",
            Eclipse::Lunar(LunarEclipse::Penumbral) => "penumbral lunar eclipse",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_fields() {
        let none = Eclipse::None;
        assert!(!none.is_active());
        assert_eq!(none.kind(), EclipseKind::None);
        assert_eq!(none.subtype(), EclipseSubtype::None);
        assert_eq!(none.to_string(), "no eclipse");

        let annular = Eclipse::Solar(SolarEclipse::Annular);
        assert!(annular.is_active());
        assert_eq!(annular.kind(), EclipseKind::Solar);
        assert_eq!(annular.subtype(), EclipseSubtype::Annular);

        let penumbral = Eclipse::Lunar(LunarEclipse::Penumbral);
        assert_eq!(penumbral.kind(), EclipseKind::Lunar);
        assert_eq!(penumbral.subtype(), EclipseSubtype::Penumbral);
        assert_eq!(penumbral.to_string(), "penumbral lunar eclipse");
    }
}
