//! Session history log and all-time stats rollup.

use crate::models::{ActiveSession, AllTimeStatsEntry, SessionRecord, StatsKey};
use crate::store::{read_json, write_json, KvStore};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Store key for the session history log.
pub const HISTORY_KEY: &str = "sessions:history";
/// Store key for the all-time stats map.
pub const STATS_KEY: &str = "sessions:all_time_stats";
/// Records retained in the history log; the oldest are evicted past this.
pub const HISTORY_CAP: usize = 50;

/// Convert a finished session into its immutable record. Stamps the end
/// time, rounds the duration to whole seconds, computes the final accuracy,
/// and drops the current streak (only the best streak is historical).
pub fn build_session_record(session: &ActiveSession) -> SessionRecord {
    let ended_at = Utc::now();
    let duration_ms = ended_at
        .signed_duration_since(session.started_at)
        .num_milliseconds();
    SessionRecord {
        id: session.id,
        mode: session.mode,
        stack: session.stack,
        config: session.config,
        started_at: session.started_at,
        ended_at,
        duration_seconds: (duration_ms as f64 / 1000.0).round() as i64,
        successes: session.successes,
        fails: session.fails,
        questions_completed: session.questions_completed,
        best_streak: session.best_streak,
        accuracy: session.accuracy(),
    }
}

/// Load the history log, most recent first. Corrupt entries are dropped
/// individually; a corrupt log degrades to empty.
pub fn load_history(store: &impl KvStore) -> Vec<SessionRecord> {
    let Some(raw) = read_json::<Vec<Value>>(store, HISTORY_KEY) else {
        return Vec::new();
    };
    raw.into_iter()
        .filter_map(|entry| match serde_json::from_value::<SessionRecord>(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("dropping malformed history entry: {err}");
                None
            }
        })
        .collect()
}

/// Prepend a record to the capped history log and write it back. The write
/// is best-effort; the in-memory list is fully assembled before any store
/// access can fail.
pub fn save_session_record(store: &mut impl KvStore, record: &SessionRecord) {
    let mut history = load_history(store);
    history.insert(0, record.clone());
    history.truncate(HISTORY_CAP);
    write_json(store, HISTORY_KEY, &history);
}

/// Load the all-time stats map. Entries whose key is not a known
/// `"{mode}:{stack}"` pairing, or whose value has the wrong shape, are
/// dropped individually.
pub fn load_all_time_stats(store: &impl KvStore) -> HashMap<StatsKey, AllTimeStatsEntry> {
    let Some(raw) = read_json::<HashMap<String, Value>>(store, STATS_KEY) else {
        return HashMap::new();
    };
    raw.into_iter()
        .filter_map(|(key, value)| {
            let Ok(parsed) = key.parse::<StatsKey>() else {
                warn!("dropping stats entry with unknown key {key}");
                return None;
            };
            match serde_json::from_value::<AllTimeStatsEntry>(value) {
                Ok(entry) => Some((parsed, entry)),
                Err(err) => {
                    warn!("dropping malformed stats entry {key}: {err}");
                    None
                }
            }
        })
        .collect()
}

/// Fold a record into its (mode, stack) entry and write the map back.
pub fn update_all_time_stats(store: &mut impl KvStore, record: &SessionRecord) {
    let mut stats = load_all_time_stats(store);
    stats.entry(StatsKey::of(record)).or_default().absorb(record);

    let by_key: HashMap<String, AllTimeStatsEntry> = stats
        .into_iter()
        .map(|(key, entry)| (key.to_string(), entry))
        .collect();
    write_json(store, STATS_KEY, &by_key);
}
