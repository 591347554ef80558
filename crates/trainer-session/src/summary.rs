//! End-of-session summaries and the finalization pipeline.

use crate::events::{EventSink, TrainerEvent};
use crate::models::{
    ActiveSession, AllTimeStatsEntry, Encouragement, SessionRecord, SessionSummary, StatsKey,
};
use crate::records::{
    build_session_record, load_all_time_stats, load_history, save_session_record,
    update_all_time_stats,
};
use crate::store::KvStore;
use std::collections::HashMap;
use tracing::debug;

/// Recent same-key records feeding the previous-average comparison.
const RECENT_WINDOW: usize = 5;
/// Accuracy at or above this reads as consistent.
const CONSISTENT_ACCURACY: f64 = 0.8;
/// Accuracy at or above this reads as progress.
const PROGRESS_ACCURACY: f64 = 0.5;

/// Compute the summary for a freshly built record.
///
/// `history` and `stats` must reflect the state *before* this record's own
/// contribution. The record is additionally excluded from `history` by id,
/// so a caller handing over a log the record was already saved into gets
/// identical results.
pub fn compute_session_summary(
    record: &SessionRecord,
    history: &[SessionRecord],
    stats: &HashMap<StatsKey, AllTimeStatsEntry>,
) -> SessionSummary {
    let key = StatsKey::of(record);
    let recent: Vec<&SessionRecord> = history
        .iter()
        .filter(|r| r.id != record.id && StatsKey::of(r) == key)
        .take(RECENT_WINDOW)
        .collect();

    let previous_average_accuracy = if recent.is_empty() {
        None
    } else {
        Some(recent.iter().map(|r| r.accuracy).sum::<f64>() / recent.len() as f64)
    };

    let is_new_global_best_streak = stats.get(&key).is_some_and(|prior| {
        record.best_streak > prior.global_best_streak && record.best_streak > 0
    });

    let is_accuracy_improvement =
        previous_average_accuracy.is_some_and(|average| record.accuracy > average);

    // First match wins.
    let encouragement = if record.accuracy == 1.0 {
        Encouragement::Perfect
    } else if previous_average_accuracy.is_none() {
        Encouragement::GreatStart
    } else if is_new_global_best_streak {
        Encouragement::NewBestStreak {
            streak: record.best_streak,
        }
    } else if is_accuracy_improvement {
        Encouragement::Improvement
    } else if record.accuracy >= CONSISTENT_ACCURACY {
        Encouragement::Consistent
    } else if record.accuracy >= PROGRESS_ACCURACY {
        Encouragement::Progress
    } else {
        Encouragement::KeepGoing
    };

    SessionSummary {
        record: record.clone(),
        encouragement,
        is_accuracy_improvement,
        is_new_global_best_streak,
        previous_average_accuracy,
    }
}

/// Finalize a session: persist its record, roll the all-time stats, emit the
/// completion event, and return the summary.
///
/// The summary is computed against history and stats snapshots taken before
/// the record is written, so best-streak and average comparisons never see
/// the session's own contribution.
pub fn finalize_session<S: KvStore, E: EventSink>(
    store: &mut S,
    events: &E,
    session: &ActiveSession,
) -> SessionSummary {
    let record = build_session_record(session);
    let history = load_history(store);
    let stats = load_all_time_stats(store);

    save_session_record(store, &record);
    let summary = compute_session_summary(&record, &history, &stats);
    update_all_time_stats(store, &record);

    events.emit(TrainerEvent::SessionCompleted {
        mode: record.mode,
        accuracy: record.accuracy,
        questions_completed: record.questions_completed,
    });
    debug!("finalized {} session {}", record.mode, record.id);
    summary
}
