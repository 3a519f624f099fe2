use std::f32::consts::TAU;

use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3, UnitQuaternion, Vector2, Vector3};

use super::camera::OrreryCamera;
use crate::astro::plane_to_world;
use crate::eclipse::{Disc, EclipseInset};
use crate::model::{BodyRole, CelestialBody, Simulation, SimulationState};
use crate::render::{body_color, inset_disc_to_pixels, inset_scale};
use crate::view::ViewMode;

const ORBIT_SEGMENTS: usize = 128;
const INSET_SIZE: f32 = 240.0;
const INSET_MARGIN: f32 = 10.0;

pub struct View {
    camera: OrreryCamera,
    // Indexed by BodyRole::index
    spheres: Vec<SceneNode>,
    show_inset: bool,
}

impl View {
    pub fn new(simulation: &Simulation, mode: ViewMode, window: &mut Window) -> Self {
        let spheres = simulation
            .state()
            .bodies()
            .into_iter()
            .map(|body| Self::create_body_object(window, body))
            .collect();

        let mut view = View {
            camera: OrreryCamera::new(mode),
            spheres,
            show_inset: true,
        };
        view.update_scene_objects(simulation.state());
        view
    }

    fn create_body_object(window: &mut Window, body: &CelestialBody) -> SceneNode {
        let mut sphere = window.add_sphere(body.radius() as f32);
        let color = color_of(body.role());
        sphere.set_color(color.x, color.y, color.z);
        sphere
    }

    pub fn cycle_view_mode(&mut self) {
        let mode = self.camera.mode().next();
        self.camera.set_mode(mode);
        println!("View mode is {}", mode);
    }

    pub fn toggle_inset(&mut self) {
        self.show_inset = !self.show_inset;
    }

    pub fn update_scene_objects(&mut self, state: &SimulationState) {
        for (sphere, body) in self.spheres.iter_mut().zip(state.bodies()) {
            let position: Point3<f32> = nalgebra::convert(body.position());
            sphere.set_local_translation(Translation3::from(position));
            sphere.set_local_rotation(UnitQuaternion::from_axis_angle(
                &Vector3::y_axis(),
                body.rotation_angle() as f32,
            ));
        }
    }

    pub fn prerender_scene(&mut self, window: &mut Window, simulation: &Simulation, fps: f64) {
        self.draw_orbits(window, simulation.state());
        if self.show_inset {
            self.draw_inset(window, simulation);
        }

        let default_font = Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);
        window.draw_text(
            &self.status_text(simulation, fps),
            &Point2::origin(),
            60.0,
            &default_font,
            &text_color,
        );
    }

    fn draw_orbits(&self, window: &mut Window, state: &SimulationState) {
        for role in [BodyRole::Primary, BodyRole::Satellite] {
            let body = state.body(role);
            let (orbit, parent) = match (body.orbit(), role.parent()) {
                (Some(orbit), Some(parent)) => (orbit, state.body(parent)),
                _ => continue,
            };

            let center = parent.position();
            let color = color_of(role) * 0.5;
            let points: Vec<Point3<f32>> = orbit
                .outline(ORBIT_SEGMENTS)
                .map(|offset| nalgebra::convert(center + plane_to_world(&offset)))
                .collect();
            for pair in points.windows(2) {
                window.draw_line(&pair[0], &pair[1], &color);
            }
        }
    }

    fn draw_inset(&self, window: &mut Window, simulation: &Simulation) {
        // Planar coordinates put the origin at the window center, y up
        let half_width = window.width() as f32 / 2.0;
        let half_height = window.height() as f32 / 2.0;
        let center = Point2::new(
            half_width - INSET_MARGIN - INSET_SIZE / 2.0,
            half_height - INSET_MARGIN - INSET_SIZE / 2.0,
        );

        let frame_color = Point3::new(0.6, 0.6, 0.6);
        let half = INSET_SIZE / 2.0;
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)]
            .map(|(x, y)| center + Vector2::new(x * half, y * half));
        for pair in corners.windows(2) {
            window.draw_planar_line(&pair[0], &pair[1], &frame_color);
        }

        let inset = EclipseInset::new(simulation.state(), simulation.eclipse());
        let (background, foreground) = match inset.discs() {
            Some(discs) => discs,
            None => return,
        };
        let (background_role, foreground_role) = match inset {
            EclipseInset::Solar { .. } => (BodyRole::Star, BodyRole::Satellite),
            _ => (BodyRole::Primary, BodyRole::Satellite),
        };

        let scale = inset_scale(&background, &foreground, half as f64, 0.6);
        for (disc, role) in [(background, background_role), (foreground, foreground_role)] {
            draw_planar_circle(window, &disc, center, scale, &color_of(role));
        }
    }

    fn status_text(&self, simulation: &Simulation, fps: f64) -> String {
        let state = simulation.state();
        let clock = simulation.clock();
        format!(
            "Time: {:.1}
Time scale: {}{}
View: {}
Rate: {}
{}
FPS: {:.0}",
            state.time(),
            clock.time_scale(),
            if clock.is_paused() { " (paused)" } else { "" },
            self.camera.mode(),
            state.strategy(),
            simulation.eclipse(),
            fps,
        )
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, None, None)
    }
}

fn color_of(role: BodyRole) -> Point3<f32> {
    let color = body_color(role);
    Point3::new(color.0, color.1, color.2).map(|c| c as f32 / 255.0)
}

fn draw_planar_circle(
    window: &mut Window,
    disc: &Disc,
    center: Point2<f32>,
    scale: f64,
    color: &Point3<f32>,
) {
    // The helper works in y-down pixels; mirror the disc so it comes out y-up
    let mirrored = Disc {
        center: Vector2::new(disc.center.x, -disc.center.y),
        radius: disc.radius,
    };
    let (disc_center, radius) = inset_disc_to_pixels(&mirrored, Point2::origin(), scale);
    let disc_center = center + nalgebra::convert::<_, Vector2<f32>>(disc_center.coords);
    let radius = radius as f32;

    let point_at = |i: usize| {
        let angle = TAU * i as f32 / ORBIT_SEGMENTS as f32;
        disc_center + radius * Vector2::new(angle.cos(), angle.sin())
    };
    for i in 0..ORBIT_SEGMENTS {
        window.draw_planar_line(&point_at(i), &point_at(i + 1), color);
    }
}
