use nalgebra::{Unit, Vector2, Vector3};

use super::Eclipse;
use crate::math::geometry::{apparent_radius, reject};
use crate::model::SimulationState;

/// Umbra size relative to the satellite's own disc, as seen from the primary.
pub const SHADOW_SCALE: f64 = 2.5;

/// A disc in the inset, in angular units around the line of sight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vector2<f64>,
    pub radius: f64,
}

/// Close-up of an eclipse in progress, as seen from the primary.
///
/// For a solar eclipse the line of sight points at the star, for a lunar
/// eclipse it points away from it, into the primary's shadow. The x axis of
/// the inset is the direction of orbital motion and y is out of the orbital
/// plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EclipseInset {
    None,
    Solar {
        star: Disc,
        satellite: Disc,
        eclipse: Eclipse,
    },
    Lunar {
        satellite: Disc,
        shadow: Disc,
        eclipse: Eclipse,
    },
}

impl EclipseInset {
    pub fn new(state: &SimulationState, eclipse: Eclipse) -> Self {
        let primary = state.primary().position();
        let to_star = state.star().position() - primary;
        let to_satellite = state.satellite().position() - primary;

        let line_of_sight = match eclipse {
            Eclipse::None => return EclipseInset::None,
            Eclipse::Solar(_) => to_star,
            Eclipse::Lunar(_) => -to_star,
        };
        let (right, up) = match sight_basis(&line_of_sight) {
            Some(basis) => basis,
            None => return EclipseInset::None,
        };

        let satellite_distance = to_satellite.norm();
        let satellite = Disc {
            center: project_direction(&to_satellite, &line_of_sight, &right, &up),
            radius: apparent_radius(state.satellite().radius(), satellite_distance),
        };

        match eclipse {
            Eclipse::Solar(_) => EclipseInset::Solar {
                star: Disc {
                    center: Vector2::zeros(),
                    radius: apparent_radius(state.star().radius(), to_star.norm()),
                },
                satellite,
                eclipse,
            },
            _ => EclipseInset::Lunar {
                shadow: Disc {
                    center: Vector2::zeros(),
                    radius: SHADOW_SCALE * satellite.radius,
                },
                satellite,
                eclipse,
            },
        }
    }

    pub fn eclipse(&self) -> Eclipse {
        match self {
            EclipseInset::None => Eclipse::None,
            EclipseInset::Solar { eclipse, .. } | EclipseInset::Lunar { eclipse, .. } => *eclipse,
        }
    }

    /// The two discs, background first. Empty when there is nothing to show.
    pub fn discs(&self) -> Option<(Disc, Disc)> {
        match *self {
            EclipseInset::None => None,
            EclipseInset::Solar { star, satellite, .. } => Some((star, satellite)),
            EclipseInset::Lunar {
                satellite, shadow, ..
            } => Some((shadow, satellite)),
        }
    }
}

fn sight_basis(line_of_sight: &Vector3<f64>) -> Option<(Vector3<f64>, Vector3<f64>)> {
    let up = Vector3::y();
    let right = Unit::try_new(line_of_sight.cross(&up), 1e-20)?;
    Some((right.into_inner(), up))
}

/// Angular offset of `direction` from the line of sight, small-angle.
fn project_direction(
    direction: &Vector3<f64>,
    line_of_sight: &Vector3<f64>,
    right: &Vector3<f64>,
    up: &Vector3<f64>,
) -> Vector2<f64> {
    let off_axis = reject(direction, line_of_sight) / direction.norm();
    Vector2::new(off_axis.dot(right), off_axis.dot(up))
}
