use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Orthographic3, Point3};

use crate::view::{CameraSetup, Lens, Projection, ViewMode, Viewport};

const KEY_CAMERA_ZOOM_IN: Key = Key::Equals;
const KEY_CAMERA_ZOOM_OUT: Key = Key::Minus;

const ZOOM_STEP: f64 = 1.2;
const ZOOM_LIMITS: (f64, f64) = (0.1, 10.0);

// A camera that shows exactly what the plotters renderer would for the same
// view mode. Both go through `view::Projection`, so the two front ends can't
// disagree about where things are. The only freedom is zoom, which moves the
// eye along its line of sight (perspective) or widens the lens (orthographic).
pub struct OrreryCamera {
    mode: ViewMode,
    zoom: f64,
    width: u32,
    height: u32,
}

impl OrreryCamera {
    pub fn new(mode: ViewMode) -> Self {
        OrreryCamera {
            mode,
            zoom: 1.0,
            width: 800,
            height: 600,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn zoom(&mut self, factor: f64) {
        self.zoom = nalgebra::clamp(self.zoom * factor, ZOOM_LIMITS.0, ZOOM_LIMITS.1);
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// The projection for the current mode, zoom and window size.
    pub fn projection(&self) -> Projection {
        let base = Projection::for_mode(self.mode, self.viewport());
        let setup = base.camera();
        let eye = setup.target + (setup.eye - setup.target) * self.zoom;

        let lens = match *base.lens() {
            Lens::Orthographic { half_height } => Lens::Orthographic {
                half_height: half_height * self.zoom,
            },
            perspective => perspective,
        };
        Projection::new(CameraSetup { eye, ..*setup }, lens, self.viewport())
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        let projection = self.projection();
        let (znear, zfar) = self.clip_planes();
        let matrix = match *projection.lens() {
            Lens::Orthographic { half_height } => {
                let half_width = half_height * projection.viewport().aspect();
                Orthographic3::new(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    znear as f64,
                    zfar as f64,
                )
                .into_inner()
            }
            Lens::Perspective(perspective) => perspective.into_inner(),
        };
        nalgebra::convert(matrix)
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }
}

impl Camera for OrreryCamera {
    fn handle_event(&mut self, _canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off < 0.0 {
                    self.zoom(ZOOM_STEP);
                } else if off > 0.0 {
                    self.zoom(ZOOM_STEP.recip())
                }
            }
            WindowEvent::FramebufferSize(w, h) => {
                self.width = w;
                self.height = h;
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_IN, Action::Press, _) => self.zoom(ZOOM_STEP.recip()),
            WindowEvent::Key(KEY_CAMERA_ZOOM_OUT, Action::Press, _) => self.zoom(ZOOM_STEP),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        nalgebra::convert(self.projection().camera().eye)
    }

    fn view_transform(&self) -> Isometry3<f32> {
        nalgebra::convert(*self.projection().view_transform())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        match *self.projection().lens() {
            Lens::Perspective(perspective) => (perspective.znear() as f32, perspective.zfar() as f32),
            Lens::Orthographic { .. } => (1.0, 1e4),
        }
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
