//! Session orchestration: phase ownership and auto-save triggers.

use crate::events::{EventSink, TrainerEvent};
use crate::models::{
    ActiveSession, AnswerOutcome, SessionConfig, SessionId, SessionPhase, TrainingMode,
};
use crate::store::KvStore;
use crate::summary::finalize_session;
use deck_engine::StackKey;
use std::collections::HashSet;
use tracing::debug;

/// Coordinates the session lifecycle for one training mode.
///
/// Owns the [`SessionPhase`] and guarantees at-most-once finalization per
/// session id across the explicit stop, auto-completion, stack-change, and
/// teardown paths: every path runs the same save-or-discard check, and a
/// checked-and-marked id set gates the persist side effect.
pub struct SessionController<S, E> {
    store: S,
    events: E,
    mode: TrainingMode,
    stack: StackKey,
    phase: SessionPhase,
    finalized: HashSet<SessionId>,
}

impl<S: KvStore, E: EventSink> SessionController<S, E> {
    pub fn new(store: S, events: E, mode: TrainingMode, stack: StackKey) -> Self {
        Self {
            store,
            events,
            mode,
            stack,
            phase: SessionPhase::Idle,
            finalized: HashSet::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Training mode this controller drives.
    pub fn mode(&self) -> TrainingMode {
        self.mode
    }

    /// Stack sessions currently run against.
    pub fn stack(&self) -> StackKey {
        self.stack
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// First-activation hook: when `auto_start` is configured and nothing is
    /// running, start an open session so passive visits are tracked. The
    /// open-session save threshold keeps incidental visits out of history.
    pub fn activate(&mut self, auto_start: bool) {
        if auto_start && matches!(self.phase, SessionPhase::Idle) {
            self.start_session(SessionConfig::Open);
        }
    }

    /// Start a new session. A live session that meets the save threshold is
    /// finalized first (auto-save-then-replace); one below it is discarded.
    pub fn start_session(&mut self, config: SessionConfig) {
        if self.phase.is_active() {
            self.finalize_or_discard();
        }
        self.finalized.clear();

        let session = ActiveSession::new(self.mode, self.stack, config);
        debug!("starting {} session {}", self.mode, session.id);
        self.events.emit(TrainerEvent::SessionStarted {
            mode: self.mode,
            config,
        });
        self.phase = SessionPhase::Active(session);
    }

    /// Route an answer outcome into the live session. A no-op outside
    /// `Active`, which also covers stale callbacks arriving after
    /// finalization. Completing a structured session finalizes it.
    pub fn record_outcome(&mut self, outcome: AnswerOutcome) {
        let SessionPhase::Active(session) = &mut self.phase else {
            return;
        };
        let completed = session.apply_outcome(outcome);
        if completed {
            self.finalize_or_discard();
        }
    }

    /// Explicit stop: finalize when the save threshold is met and show the
    /// summary, discard to idle otherwise.
    pub fn stop(&mut self) {
        self.finalize_or_discard();
    }

    /// Dismiss the end-of-session summary.
    pub fn dismiss_summary(&mut self) {
        if matches!(self.phase, SessionPhase::Summary(_)) {
            self.phase = SessionPhase::Idle;
        }
    }

    /// Start a fresh session reusing the just-finished session's config.
    pub fn start_next_from_summary(&mut self) {
        let SessionPhase::Summary(summary) = &self.phase else {
            return;
        };
        let config = summary.record.config;
        self.start_session(config);
    }

    /// The stack selection changed: run the stop check on the live session,
    /// then point at the new stack so the next session starts clean.
    pub fn stack_changed(&mut self, stack: StackKey) {
        if stack == self.stack {
            return;
        }
        if self.phase.is_active() {
            self.finalize_or_discard();
        }
        self.stack = stack;
    }

    /// The surrounding context is going away (unload or teardown): run the
    /// stop check once. Safe alongside the other paths; the finalized-id set
    /// keeps the record single.
    pub fn teardown(&mut self) {
        if self.phase.is_active() {
            self.finalize_or_discard();
        }
    }

    fn finalize_or_discard(&mut self) {
        let SessionPhase::Active(session) = &self.phase else {
            return;
        };

        if !session.meets_save_threshold() {
            debug!("discarding session {} below save threshold", session.id);
            self.phase = SessionPhase::Idle;
            return;
        }

        // Check-and-mark before the persist side effect.
        if !self.finalized.insert(session.id) {
            self.phase = SessionPhase::Idle;
            return;
        }

        let session = session.clone();
        let summary = finalize_session(&mut self.store, &self.events, &session);
        self.phase = SessionPhase::Summary(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{RecordingSink, TrainerEvent};
    use crate::models::Encouragement;
    use crate::records::load_history;
    use crate::store::MemoryStore;

    fn controller() -> SessionController<MemoryStore, RecordingSink> {
        SessionController::new(
            MemoryStore::new(),
            RecordingSink::new(),
            TrainingMode::Flashcard,
            StackKey::Mnemonica,
        )
    }

    fn answer(correct: bool) -> AnswerOutcome {
        AnswerOutcome {
            correct,
            question_advanced: true,
        }
    }

    #[test]
    fn test_auto_start_only_when_idle_and_configured() {
        let mut controller = controller();
        controller.activate(false);
        assert!(matches!(controller.phase(), SessionPhase::Idle));

        controller.activate(true);
        assert!(controller.phase().is_active());
        let id = controller.phase().session().unwrap().id;

        // A second activation must not replace the running session.
        controller.activate(true);
        assert_eq!(controller.phase().session().unwrap().id, id);
    }

    #[test]
    fn test_open_session_below_threshold_discards_on_stop() {
        let mut controller = controller();
        controller.start_session(SessionConfig::Open);
        controller.record_outcome(answer(true));
        controller.record_outcome(answer(true));

        controller.stop();
        assert!(matches!(controller.phase(), SessionPhase::Idle));
        assert!(load_history(controller.store()).is_empty());
    }

    #[test]
    fn test_open_session_at_threshold_persists_on_stop() {
        let mut controller = controller();
        controller.start_session(SessionConfig::Open);
        for _ in 0..3 {
            controller.record_outcome(answer(true));
        }

        controller.stop();
        let summary = controller.phase().summary().expect("summary phase");
        assert_eq!(summary.record.questions_completed, 3);
        assert_eq!(load_history(controller.store()).len(), 1);
    }

    #[test]
    fn test_structured_session_auto_finalizes_at_target() {
        let mut controller = controller();
        controller.start_session(SessionConfig::Structured { total_questions: 2 });
        controller.record_outcome(answer(true));
        assert!(controller.phase().is_active());

        controller.record_outcome(answer(false));
        let summary = controller.phase().summary().expect("summary phase");
        assert_eq!(summary.record.questions_completed, 2);
        assert_eq!(summary.record.successes, 1);
        assert_eq!(summary.record.fails, 1);
    }

    #[test]
    fn test_finalization_is_idempotent_per_session() {
        let mut controller = controller();
        controller.start_session(SessionConfig::Open);
        for _ in 0..5 {
            controller.record_outcome(answer(true));
        }

        controller.stop();
        controller.teardown();
        controller.stop();
        assert_eq!(load_history(controller.store()).len(), 1);
    }

    #[test]
    fn test_outcomes_after_finalization_are_ignored() {
        let mut controller = controller();
        controller.start_session(SessionConfig::Structured { total_questions: 1 });
        controller.record_outcome(answer(true));
        assert!(controller.phase().summary().is_some());

        // Stale timer callback after the summary is up.
        controller.record_outcome(answer(false));
        let record = &controller.phase().summary().unwrap().record;
        assert_eq!(record.questions_completed, 1);
        assert_eq!(record.fails, 0);
    }

    #[test]
    fn test_stack_change_saves_qualifying_session() {
        let mut controller = controller();
        controller.start_session(SessionConfig::Open);
        for _ in 0..4 {
            controller.record_outcome(answer(true));
        }

        controller.stack_changed(StackKey::SiStebbins);
        assert_eq!(controller.stack(), StackKey::SiStebbins);
        let history = load_history(controller.store());
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].stack, StackKey::Mnemonica);

        // The next session runs against the new stack.
        controller.start_session(SessionConfig::Open);
        assert_eq!(
            controller.phase().session().unwrap().stack,
            StackKey::SiStebbins
        );
    }

    #[test]
    fn test_stack_change_discards_thin_session() {
        let mut controller = controller();
        controller.start_session(SessionConfig::Open);
        controller.record_outcome(answer(true));

        controller.stack_changed(StackKey::NewDeckOrder);
        assert!(matches!(controller.phase(), SessionPhase::Idle));
        assert!(load_history(controller.store()).is_empty());
    }

    #[test]
    fn test_start_over_active_session_saves_it_first() {
        let mut controller = controller();
        controller.start_session(SessionConfig::Open);
        for _ in 0..3 {
            controller.record_outcome(answer(true));
        }

        controller.start_session(SessionConfig::Structured { total_questions: 10 });
        assert!(controller.phase().is_active());
        assert_eq!(load_history(controller.store()).len(), 1);
    }

    #[test]
    fn test_start_next_from_summary_reuses_config() {
        let mut controller = controller();
        let config = SessionConfig::Structured { total_questions: 1 };
        controller.start_session(config);
        controller.record_outcome(answer(true));
        assert!(controller.phase().summary().is_some());

        controller.start_next_from_summary();
        let session = controller.phase().session().expect("active phase");
        assert_eq!(session.config, config);
        assert_eq!(session.questions_completed, 0);
    }

    #[test]
    fn test_dismiss_summary_returns_to_idle() {
        let mut controller = controller();
        controller.start_session(SessionConfig::Structured { total_questions: 1 });
        controller.record_outcome(answer(true));

        controller.dismiss_summary();
        assert!(matches!(controller.phase(), SessionPhase::Idle));

        // Dismissing twice is harmless.
        controller.dismiss_summary();
        assert!(matches!(controller.phase(), SessionPhase::Idle));
    }

    #[test]
    fn test_events_emitted_on_start_and_completion() {
        let mut controller = controller();
        controller.start_session(SessionConfig::Structured { total_questions: 1 });
        controller.record_outcome(answer(true));

        let events = controller.events.take();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], TrainerEvent::SessionStarted { .. }));
        assert!(matches!(
            events[1],
            TrainerEvent::SessionCompleted {
                questions_completed: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_perfect_structured_run_reads_perfect() {
        let mut controller = controller();
        controller.start_session(SessionConfig::Structured { total_questions: 3 });
        for _ in 0..3 {
            controller.record_outcome(answer(true));
        }
        let summary = controller.phase().summary().unwrap();
        assert_eq!(summary.encouragement, Encouragement::Perfect);
    }
}
