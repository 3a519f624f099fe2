use nalgebra::{Point2, Vector2};

use crate::astro::plane_to_world;
use crate::eclipse::Disc;
use crate::model::{BodyRole, CelestialBody, SimulationState};
use crate::view::{painter_order, Projected, Projection};

const ORBIT_SEGMENTS: usize = 128;

/// Everything needed to paint one frame, already in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    /// Orbit outlines, primary's first
    pub orbits: Vec<(BodyRole, Vec<Point2<f64>>)>,
    /// Visible bodies, far to near
    pub bodies: Vec<(BodyRole, Projected)>,
}

impl SceneLayout {
    pub fn new(state: &SimulationState, projection: &Projection) -> Self {
        let orbits = [BodyRole::Primary, BodyRole::Satellite]
            .into_iter()
            .filter_map(|role| {
                let body = state.body(role);
                let parent = state.body(role.parent()?);
                Some((role, orbit_path(body, parent, projection)))
            })
            .collect();

        let mut bodies: Vec<_> = state
            .bodies()
            .into_iter()
            .filter_map(|body| {
                let projected = projection.project(&body.position(), body.radius())?;
                Some((body.role(), projected))
            })
            .collect();
        painter_order(&mut bodies);

        SceneLayout { orbits, bodies }
    }
}

fn orbit_path(
    body: &CelestialBody,
    parent: &CelestialBody,
    projection: &Projection,
) -> Vec<Point2<f64>> {
    let orbit = match body.orbit() {
        Some(orbit) => orbit,
        None => return vec![],
    };
    let center = parent.position();
    orbit
        .outline(ORBIT_SEGMENTS)
        .filter_map(|offset| projection.project_point(&(center + plane_to_world(&offset))))
        .collect()
}

/// Maps an inset disc (angular units around the line of sight) to pixels,
/// given the inset's center and how many pixels one radian takes.
pub fn inset_disc_to_pixels(disc: &Disc, center: Point2<f64>, scale: f64) -> (Point2<f64>, f64) {
    // Inset y is up, pixel y is down
    let offset = Vector2::new(disc.center.x, -disc.center.y) * scale;
    (center + offset, disc.radius * scale)
}

/// Pixels per radian that make the larger disc fill `fill` of `half_size`.
pub fn inset_scale(background: &Disc, foreground: &Disc, half_size: f64, fill: f64) -> f64 {
    let largest = background.radius.max(foreground.radius);
    if largest > 0.0 {
        fill * half_size / largest
    } else {
        0.0
    }
}

pub(crate) fn to_pixel(point: &Point2<f64>) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}
