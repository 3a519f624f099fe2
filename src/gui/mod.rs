use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::model::Simulation;
use crate::view::ViewMode;

mod camera;
mod controller;
mod view;

pub use camera::OrreryCamera;
pub use controller::FpsCounter;

/// Interactive window state: the simulation plus everything needed to show
/// it and react to keys.
pub struct Orrery {
    simulation: Simulation,
    view: View,
    controller: Controller,
}

impl Orrery {
    pub fn new(simulation: Simulation, mode: ViewMode, window: &mut Window) -> Self {
        Self {
            view: View::new(&simulation, mode, window),
            simulation,
            controller: Controller::new(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        // Process events
        for event in events.iter() {
            self.controller
                .process_event(event, &mut self.simulation, &mut self.view);
        }
    }
}

impl State for Orrery {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        if self.simulation.frame(self.controller.now_ms()).is_some() {
            self.view.update_scene_objects(self.simulation.state());
        }
        self.view
            .prerender_scene(window, &self.simulation, self.controller.fps());
        self.controller.increment_frame_counter();
    }
}
