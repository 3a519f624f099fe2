use crate::eclipse::Eclipse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventData {
    EclipseBegan(Eclipse),
    /// Same kind of eclipse, different subtype (e.g. partial becoming total)
    EclipseChanged { from: Eclipse, to: Eclipse },
    EclipseEnded(Eclipse),
}

/// A change in eclipse classification between two consecutive ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct EclipseEvent {
    /// Simulated time of the tick on which the change was observed
    pub time: f64,
    pub data: EventData,
}

impl EventData {
    /// The events needed to get from one classification to the next, in order.
    pub fn transitions(from: Eclipse, to: Eclipse) -> Vec<EventData> {
        if from == to {
            return vec![];
        }
        match (from.is_active(), to.is_active()) {
            (false, false) => vec![],
            (false, true) => vec![EventData::EclipseBegan(to)],
            (true, false) => vec![EventData::EclipseEnded(from)],
            (true, true) if from.kind() == to.kind() => {
                vec![EventData::EclipseChanged { from, to }]
            }
            (true, true) => vec![EventData::EclipseEnded(from), EventData::EclipseBegan(to)],
        }
    }
}
