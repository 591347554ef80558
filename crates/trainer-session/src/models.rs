//! Data models for training sessions.

use chrono::{DateTime, Utc};
use deck_engine::StackKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique session identifier.
pub type SessionId = Uuid;

/// Training discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMode {
    /// Position/card recall drills.
    Flashcard,
    /// Any Card At Any Number cut-depth drills.
    Acaan,
}

impl TrainingMode {
    /// All modes.
    pub const ALL: [TrainingMode; 2] = [TrainingMode::Flashcard, TrainingMode::Acaan];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flashcard => "Flashcard",
            Self::Acaan => "ACAAN",
        }
    }

    /// Stable identifier used in persisted keys.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Flashcard => "flashcard",
            Self::Acaan => "acaan",
        }
    }
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TrainingMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter().copied().find(|m| m.id() == s).ok_or(())
    }
}

/// Question counts offered for structured sessions.
pub const SESSION_LENGTH_PRESETS: [u32; 4] = [10, 20, 50, 100];

/// Questions an open session must complete before it is worth saving.
pub const OPEN_SESSION_MIN_QUESTIONS: u32 = 3;

/// How a session ends: after a fixed question count, or only when stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionConfig {
    /// Finite session with a question target.
    Structured { total_questions: u32 },
    /// Unbounded session, runs until stopped or navigated away.
    Open,
}

impl SessionConfig {
    /// Whether a question count is one of the offered presets.
    pub fn is_preset(total_questions: u32) -> bool {
        SESSION_LENGTH_PRESETS.contains(&total_questions)
    }
}

/// Outcome of one answer event. Correctness and advancement are independent
/// flags: a retry-until-correct mode reports wrong answers without advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Whether the answer was correct.
    pub correct: bool,
    /// Whether the drill moved on to the next question.
    pub question_advanced: bool,
}

/// A live practice session. Owned by the controller for its lifetime and
/// converted into a [`SessionRecord`] exactly once at finalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSession {
    /// Unique identifier.
    pub id: SessionId,
    /// Training discipline.
    pub mode: TrainingMode,
    /// Stack trained against.
    pub stack: StackKey,
    /// Session shape.
    pub config: SessionConfig,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// Correct answers so far.
    pub successes: u32,
    /// Incorrect answers so far.
    pub fails: u32,
    /// Questions completed so far.
    pub questions_completed: u32,
    /// Streak of consecutive correct answers.
    pub current_streak: u32,
    /// Best streak reached this session. Non-decreasing.
    pub best_streak: u32,
}

impl ActiveSession {
    /// Start a fresh session with zeroed counters.
    pub fn new(mode: TrainingMode, stack: StackKey, config: SessionConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            stack,
            config,
            started_at: Utc::now(),
            successes: 0,
            fails: 0,
            questions_completed: 0,
            current_streak: 0,
            best_streak: 0,
        }
    }

    /// Record a correct answer: success count and streak go up, best streak
    /// follows.
    pub fn record_correct(&mut self) {
        self.successes += 1;
        self.current_streak += 1;
        self.best_streak = self.best_streak.max(self.current_streak);
    }

    /// Record an incorrect answer: fail count goes up, streak resets.
    pub fn record_incorrect(&mut self) {
        self.fails += 1;
        self.current_streak = 0;
    }

    /// Record that the drill moved to the next question. Returns true once a
    /// structured session has reached its target; the counter never runs
    /// past the limit.
    pub fn record_question_advanced(&mut self) -> bool {
        if self.is_complete() {
            return true;
        }
        self.questions_completed += 1;
        self.is_complete()
    }

    /// Apply one answer outcome. Returns true when the session just became
    /// complete.
    pub fn apply_outcome(&mut self, outcome: AnswerOutcome) -> bool {
        if outcome.correct {
            self.record_correct();
        } else {
            self.record_incorrect();
        }
        if outcome.question_advanced {
            self.record_question_advanced()
        } else {
            false
        }
    }

    /// Whether a structured session has hit its question target. Open
    /// sessions never complete on their own.
    pub fn is_complete(&self) -> bool {
        match self.config {
            SessionConfig::Structured { total_questions } => {
                self.questions_completed >= total_questions
            }
            SessionConfig::Open => false,
        }
    }

    /// Whether the session has enough substance to be persisted. Structured
    /// sessions qualify after one question; open sessions need
    /// [`OPEN_SESSION_MIN_QUESTIONS`] so incidental page visits stay out of
    /// the history.
    pub fn meets_save_threshold(&self) -> bool {
        match self.config {
            SessionConfig::Structured { .. } => self.questions_completed > 0,
            SessionConfig::Open => self.questions_completed >= OPEN_SESSION_MIN_QUESTIONS,
        }
    }

    /// Accuracy so far.
    pub fn accuracy(&self) -> f64 {
        accuracy(self.successes, self.fails)
    }
}

/// Accuracy as successes over attempts, 0.0 when nothing was attempted.
pub(crate) fn accuracy(successes: u32, fails: u32) -> f64 {
    let attempts = successes + fails;
    if attempts == 0 {
        0.0
    } else {
        f64::from(successes) / f64::from(attempts)
    }
}

/// Immutable snapshot of a finished session. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Identifier carried over from the active session.
    pub id: SessionId,
    /// Training discipline.
    pub mode: TrainingMode,
    /// Stack trained against.
    pub stack: StackKey,
    /// Session shape.
    pub config: SessionConfig,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// When the session was finalized.
    pub ended_at: DateTime<Utc>,
    /// Whole seconds between start and end, rounded.
    pub duration_seconds: i64,
    /// Correct answers.
    pub successes: u32,
    /// Incorrect answers.
    pub fails: u32,
    /// Questions completed.
    pub questions_completed: u32,
    /// Best streak reached.
    pub best_streak: u32,
    /// Final accuracy in [0, 1].
    pub accuracy: f64,
}

/// Monotonically accumulating rollup for one (mode, stack) pairing. Values
/// only increase or take a max.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllTimeStatsEntry {
    /// Sessions finalized.
    #[serde(default)]
    pub total_sessions: u32,
    /// Questions completed across all sessions.
    #[serde(default)]
    pub total_questions: u32,
    /// Correct answers across all sessions.
    #[serde(default)]
    pub total_successes: u32,
    /// Incorrect answers across all sessions.
    #[serde(default)]
    pub total_fails: u32,
    /// Best streak ever reached.
    #[serde(default)]
    pub global_best_streak: u32,
}

impl AllTimeStatsEntry {
    /// Fold one finalized record into the rollup.
    pub fn absorb(&mut self, record: &SessionRecord) {
        self.total_sessions += 1;
        self.total_questions += record.questions_completed;
        self.total_successes += record.successes;
        self.total_fails += record.fails;
        self.global_best_streak = self.global_best_streak.max(record.best_streak);
    }
}

/// Key for the all-time stats map, persisted as `"{mode}:{stack}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatsKey {
    /// Training discipline.
    pub mode: TrainingMode,
    /// Stack trained against.
    pub stack: StackKey,
}

impl StatsKey {
    /// The key a record rolls up under.
    pub fn of(record: &SessionRecord) -> Self {
        Self {
            mode: record.mode,
            stack: record.stack,
        }
    }
}

impl fmt::Display for StatsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.mode, self.stack)
    }
}

impl FromStr for StatsKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mode, stack) = s.split_once(':').ok_or(())?;
        Ok(Self {
            mode: mode.parse()?,
            stack: stack.parse()?,
        })
    }
}

/// Qualitative end-of-session encouragement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Encouragement {
    /// Every answer was correct.
    Perfect,
    /// First recorded session for this mode and stack.
    GreatStart,
    /// Beat the stored all-time best streak.
    NewBestStreak {
        /// The new best streak.
        streak: u32,
    },
    /// Accuracy above the recent average.
    Improvement,
    /// Accuracy at or above 80%.
    Consistent,
    /// Accuracy at or above 50%.
    Progress,
    /// Everything else.
    KeepGoing,
}

/// Derived, ephemeral summary computed once per finalized session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// The finalized record.
    pub record: SessionRecord,
    /// Selected encouragement.
    pub encouragement: Encouragement,
    /// Accuracy beat the recent same-mode-and-stack average.
    pub is_accuracy_improvement: bool,
    /// Best streak beat the stored all-time best.
    pub is_new_global_best_streak: bool,
    /// Mean accuracy of recent same-mode-and-stack sessions, if any.
    pub previous_average_accuracy: Option<f64>,
}

/// What the user is doing right now. Owned by the session controller.
#[derive(Debug, Clone)]
pub enum SessionPhase {
    /// No session running.
    Idle,
    /// A session is live.
    Active(ActiveSession),
    /// A session just finished; its summary is showing.
    Summary(SessionSummary),
}

impl SessionPhase {
    /// Whether a session is live.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&ActiveSession> {
        match self {
            Self::Active(session) => Some(session),
            _ => None,
        }
    }

    /// The showing summary, if any.
    pub fn summary(&self) -> Option<&SessionSummary> {
        match self {
            Self::Summary(summary) => Some(summary),
            _ => None,
        }
    }
}
