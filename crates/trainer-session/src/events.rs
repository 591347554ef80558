//! Domain events emitted at the analytics/notification boundary.

use crate::models::{SessionConfig, TrainingMode};
use std::cell::RefCell;

/// Fire-and-forget notifications consumed by an external collaborator. The
/// core never waits on or inspects delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainerEvent {
    /// A session began.
    SessionStarted {
        mode: TrainingMode,
        config: SessionConfig,
    },
    /// A session was finalized.
    SessionCompleted {
        mode: TrainingMode,
        accuracy: f64,
        questions_completed: u32,
    },
}

/// Receiver for trainer events.
pub trait EventSink {
    fn emit(&self, event: TrainerEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: TrainerEvent) {}
}

/// Sink that collects events in memory, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<TrainerEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<TrainerEvent> {
        self.events.borrow().clone()
    }

    /// Drain the collected events.
    pub fn take(&self) -> Vec<TrainerEvent> {
        self.events.take()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: TrainerEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_collects() {
        let sink = RecordingSink::new();
        sink.emit(TrainerEvent::SessionStarted {
            mode: TrainingMode::Flashcard,
            config: SessionConfig::Open,
        });
        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.events().is_empty());
    }
}
