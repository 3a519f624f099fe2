use std::time::Instant;

use kiss3d::event::{Action, Event, Key, WindowEvent};

use super::view::View;
use crate::model::Simulation;

// Key config, all in one place
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_REVERSE: Key = Key::R;
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_CYCLE_VIEW: Key = Key::V;
const KEY_TOGGLE_INSET: Key = Key::X;
const KEY_CYCLE_RATE: Key = Key::K;

pub struct Controller {
    start: Instant,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            start: Instant::now(),
            fps_counter: FpsCounter::new(1000),
        }
    }

    /// Frame timestamp for the simulation clock, in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn process_event(&mut self, event: Event, simulation: &mut Simulation, view: &mut View) {
        if let WindowEvent::Key(KEY_CYCLE_RATE, Action::Press, _) = event.value {
            let state = simulation.state_mut();
            state.set_strategy(state.strategy().next());
            println!("Rate strategy is {}", state.strategy());
            return;
        }

        let clock = simulation.clock_mut();
        match event.value {
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                clock.faster();
                println!("Time scale is {}", clock.time_scale());
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                clock.slower();
                println!("Time scale is {}", clock.time_scale());
            }
            WindowEvent::Key(KEY_REVERSE, Action::Press, _) => {
                clock.reverse();
                println!("Time scale is {}", clock.time_scale());
            }
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => {
                clock.toggle_pause(self.now_ms());
            }
            WindowEvent::Key(KEY_CYCLE_VIEW, Action::Press, _) => {
                view.cycle_view_mode();
            }
            WindowEvent::Key(KEY_TOGGLE_INSET, Action::Press, _) => {
                view.toggle_inset();
            }
            _ => {}
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
