//! Projections from the simulation's 3-D frame onto a 2-D drawing surface.
//!
//! Every view is an explicit camera (eye, target, up) turned into an
//! [Isometry3](nalgebra::Isometry3) with `look_at_rh`, followed by either an
//! orthographic or a perspective lens. Nothing here draws; the renderers
//! consume [Projected] points.

use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

mod projection;

pub use projection::{CameraSetup, Lens, Projection};

/// How far from the star the default views reach, in scene units.
pub const SCENE_EXTENT: f64 = 420.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ViewMode {
    /// Looking down the orbit normal
    #[default]
    Top,
    /// Edge-on, in the orbital plane
    Side,
    /// Perspective from above and in front
    ThreeD,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Top, ViewMode::Side, ViewMode::ThreeD];

    /// The next mode in the cycle Top -> Side -> ThreeD -> Top.
    pub fn next(self) -> Self {
        match self {
            ViewMode::Top => ViewMode::Side,
            ViewMode::Side => ViewMode::ThreeD,
            ViewMode::ThreeD => ViewMode::Top,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ViewMode::Top => "top",
            ViewMode::Side => "side",
            ViewMode::ThreeD => "3d",
        };
        write!(f, "{}", name)
    }
}

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }

    /// Maps normalized device coordinates (-1..1, y up) to pixels (y down).
    pub fn ndc_to_pixel(&self, ndc: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            (ndc.x + 1.0) * 0.5 * self.width as f64,
            (1.0 - ndc.y) * 0.5 * self.height as f64,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(800, 600)
    }
}

/// A point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub pixel: Point2<f64>,
    /// Distance in front of the camera; larger is further away
    pub depth: f64,
    /// On-screen radius of a sphere at this point, in pixels
    pub radius: f64,
}

/// Sorts items far-to-near, so drawing them in order makes nearer ones cover
/// further ones.
pub fn painter_order<T>(items: &mut [(T, Projected)]) {
    items.sort_by(|(_, a), (_, b)| b.depth.total_cmp(&a.depth));
}
