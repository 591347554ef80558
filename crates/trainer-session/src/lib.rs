//! # trainer-session
//!
//! Session lifecycle for memorized-stack training: the idle/active/summary
//! phase machine, scoring and streak accounting, persistence and all-time
//! stats rollup, end-of-session summaries, and the per-mode game reducers.
//!
//! ## Features
//!
//! - `SessionController` owning the phase with auto-start, auto-save on
//!   stack change and teardown, and at-most-once finalization
//! - Capped session history and monotonic all-time stats in a key-value
//!   store, validated on every read
//! - Encouragement summaries comparing against rolling history and
//!   all-time bests
//! - Flashcard and ACAAN reducers with countdown bookkeeping

mod config;
mod controller;
mod events;
mod game;
mod models;
mod records;
mod settings;
mod store;
mod summary;

pub use config::{Config, SessionTrackingConfig, TimerConfig};
pub use controller::SessionController;
pub use events::{EventSink, NullSink, RecordingSink, TrainerEvent};
pub use game::{
    AcaanGame, Countdown, FlashcardGame, FlashcardQuestion, GameAction, CHOICE_COUNT,
};
pub use models::{
    ActiveSession, AllTimeStatsEntry, AnswerOutcome, Encouragement, SessionConfig, SessionId,
    SessionPhase, SessionRecord, SessionSummary, StatsKey, TrainingMode,
    OPEN_SESSION_MIN_QUESTIONS, SESSION_LENGTH_PRESETS,
};
pub use records::{
    build_session_record, load_all_time_stats, load_history, save_session_record,
    update_all_time_stats, HISTORY_CAP, HISTORY_KEY, STATS_KEY,
};
pub use settings::{
    load_display_style, load_timer_settings, save_display_style, save_timer_settings,
    CardDisplayStyle, TimerSettings, DEFAULT_TIMER_SECS, DISPLAY_STYLE_KEY, MAX_TIMER_SECS,
    MIN_TIMER_SECS, TIMER_SETTINGS_KEY,
};
pub use store::{read_json, write_json, KvStore, MemoryStore, SqliteStore, StoreError, StoreResult};
pub use summary::{compute_session_summary, finalize_session};
