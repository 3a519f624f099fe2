use std::collections::VecDeque;

use super::{
    BodyRole, BodySnapshot, EclipseEvent, EventData, SimulationClock, SimulationState,
};
use crate::eclipse::{Eclipse, EclipseClassifier, EclipseKind, EclipseSubtype};

/// Everything the engine publishes after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Simulated time after the tick
    pub time: f64,
    /// Star, primary and satellite, in that order
    pub bodies: [BodySnapshot; 3],
    pub eclipse: Eclipse,
}

impl TickReport {
    pub fn body(&self, role: BodyRole) -> &BodySnapshot {
        &self.bodies[role.index()]
    }

    pub fn eclipse_active(&self) -> bool {
        self.eclipse.is_active()
    }

    pub fn kind(&self) -> EclipseKind {
        self.eclipse.kind()
    }

    pub fn subtype(&self) -> EclipseSubtype {
        self.eclipse.subtype()
    }
}

/// How many eclipse events a [Simulation] keeps unless told otherwise.
pub const DEFAULT_EVENT_HISTORY: usize = 256;

/// Drives a [SimulationState] from host frames.
///
/// Each frame runs the clock, then updates every body, and only then
/// classifies the result, so the classifier never sees a half-updated system.
pub struct Simulation {
    state: SimulationState,
    clock: SimulationClock,
    classifier: EclipseClassifier,
    eclipse: Eclipse,
    events: VecDeque<EclipseEvent>,
    event_history: usize,
}

impl Simulation {
    pub fn new(
        state: SimulationState,
        clock: SimulationClock,
        classifier: EclipseClassifier,
    ) -> Self {
        let eclipse = classifier.classify(&state);
        Simulation {
            state,
            clock,
            classifier,
            eclipse,
            events: VecDeque::new(),
            event_history: DEFAULT_EVENT_HISTORY,
        }
    }

    /// Keeps at most `limit` events; older ones are dropped first.
    pub fn with_event_history(mut self, limit: usize) -> Self {
        self.event_history = limit;
        self.trim_events();
        self
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    /// Classification as of the most recent tick.
    pub fn eclipse(&self) -> Eclipse {
        self.eclipse
    }

    /// The most recent eclipse transitions, oldest first.
    pub fn events(&self) -> &VecDeque<EclipseEvent> {
        &self.events
    }

    pub fn report(&self) -> TickReport {
        TickReport {
            time: self.state.time(),
            bodies: self.state.snapshots(),
            eclipse: self.eclipse,
        }
    }

    /// Handles one host frame. Returns `None`, and changes nothing, while the
    /// clock is paused.
    pub fn frame(&mut self, timestamp_ms: f64) -> Option<TickReport> {
        let time_factor = self.clock.frame(timestamp_ms)?;
        Some(self.step(time_factor))
    }

    /// Runs a single tick with an explicit time factor, bypassing the clock.
    pub fn step(&mut self, time_factor: f64) -> TickReport {
        self.state.step(time_factor);
        let eclipse = self.classifier.classify(&self.state);
        self.record_transition(eclipse);
        self.report()
    }

    fn record_transition(&mut self, eclipse: Eclipse) {
        let time = self.state.time();
        for data in EventData::transitions(self.eclipse, eclipse) {
            match data {
                EventData::EclipseBegan(e) => tracing::info!("t = {:.2}: {} began", time, e),
                EventData::EclipseChanged { from, to } => {
                    tracing::info!("t = {:.2}: {} became {}", time, from, to)
                }
                EventData::EclipseEnded(e) => tracing::info!("t = {:.2}: {} ended", time, e),
            }
            self.events.push_back(EclipseEvent { time, data });
        }
        self.trim_events();
        self.eclipse = eclipse;
    }

    fn trim_events(&mut self) {
        while self.events.len() > self.event_history {
            self.events.pop_front();
        }
    }
}
