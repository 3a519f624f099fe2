use std::f64::consts::FRAC_PI_4;

use nalgebra::{Isometry3, Perspective3, Point2, Point3, Vector3};

use super::{Projected, ViewMode, Viewport, SCENE_EXTENT};

/// Where the camera sits and which way is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSetup {
    pub eye: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
}

impl CameraSetup {
    /// The camera for each view. Top looks down from +Y with -Z as screen up,
    /// so counter-clockwise orbits stay counter-clockwise on screen. Side
    /// looks from +Z along the plane. 3-D sits above and in front.
    pub fn for_mode(mode: ViewMode) -> Self {
        let (eye, up) = match mode {
            ViewMode::Top => (Point3::new(0.0, 2.0 * SCENE_EXTENT, 0.0), -Vector3::z()),
            ViewMode::Side => (Point3::new(0.0, 0.0, 2.0 * SCENE_EXTENT), Vector3::y()),
            ViewMode::ThreeD => (Point3::new(0.0, 300.0, 400.0), Vector3::y()),
        };
        CameraSetup {
            eye,
            target: Point3::origin(),
            up,
        }
    }

    pub fn view_transform(&self) -> Isometry3<f64> {
        Isometry3::look_at_rh(&self.eye, &self.target, &self.up)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lens {
    /// Parallel projection; `half_height` scene units fit above the center
    Orthographic { half_height: f64 },
    Perspective(Perspective3<f64>),
}

impl Lens {
    fn for_mode(mode: ViewMode, viewport: &Viewport) -> Self {
        match mode {
            ViewMode::Top | ViewMode::Side => {
                // Fit the scene in the narrower dimension
                let aspect = viewport.aspect();
                let half_height = if aspect >= 1.0 {
                    SCENE_EXTENT
                } else {
                    SCENE_EXTENT / aspect
                };
                Lens::Orthographic { half_height }
            }
            ViewMode::ThreeD => {
                Lens::Perspective(Perspective3::new(viewport.aspect(), FRAC_PI_4, 1.0, 1e4))
            }
        }
    }
}

/// A camera plus a lens, ready to map scene points to pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    camera: CameraSetup,
    view: Isometry3<f64>,
    lens: Lens,
    viewport: Viewport,
}

impl Projection {
    pub fn new(camera: CameraSetup, lens: Lens, viewport: Viewport) -> Self {
        Projection {
            camera,
            view: camera.view_transform(),
            lens,
            viewport,
        }
    }

    pub fn for_mode(mode: ViewMode, viewport: Viewport) -> Self {
        Self::new(
            CameraSetup::for_mode(mode),
            Lens::for_mode(mode, &viewport),
            viewport,
        )
    }

    pub fn camera(&self) -> &CameraSetup {
        &self.camera
    }

    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn view_transform(&self) -> &Isometry3<f64> {
        &self.view
    }

    /// Projects a sphere of the given radius centered at `point`. Returns
    /// `None` if the point can't be seen (behind a perspective camera).
    pub fn project(&self, point: &Point3<f64>, radius: f64) -> Option<Projected> {
        let in_view = self.view * point;
        let depth = -in_view.z;

        let (ndc, pixels_per_unit) = match self.lens {
            Lens::Orthographic { half_height } => {
                let half_width = half_height * self.viewport.aspect();
                let ndc = Point2::new(in_view.x / half_width, in_view.y / half_height);
                (ndc, self.viewport.height as f64 / (2.0 * half_height))
            }
            Lens::Perspective(ref perspective) => {
                if depth <= perspective.znear() {
                    return None;
                }
                let clip = perspective.project_point(&in_view);
                let focal = self.viewport.height as f64 / (2.0 * (perspective.fovy() / 2.0).tan());
                (clip.xy(), focal / depth)
            }
        };

        let pixel = self.viewport.ndc_to_pixel(&ndc);
        if !pixel.x.is_finite() || !pixel.y.is_finite() {
            return None;
        }
        Some(Projected {
            pixel,
            depth,
            radius: radius * pixels_per_unit,
        })
    }

    /// Pixel position of a point, ignoring size.
    pub fn project_point(&self, point: &Point3<f64>) -> Option<Point2<f64>> {
        self.project(point, 0.0).map(|p| p.pixel)
    }
}
