//! User settings persisted in the key-value store.
//!
//! Every read validates the stored shape and range; malformed data degrades
//! to defaults rather than erroring.

use crate::store::{read_json, write_json, KvStore};
use serde::{Deserialize, Serialize};

/// Store key for timer settings.
pub const TIMER_SETTINGS_KEY: &str = "settings:timer";
/// Store key for the card display style.
pub const DISPLAY_STYLE_KEY: &str = "settings:display_style";

/// Shortest accepted countdown.
pub const MIN_TIMER_SECS: u32 = 5;
/// Longest accepted countdown.
pub const MAX_TIMER_SECS: u32 = 120;
/// Default countdown duration.
pub const DEFAULT_TIMER_SECS: u32 = 30;

/// Countdown timer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Whether the countdown runs at all.
    #[serde(default = "default_timer_enabled")]
    pub enabled: bool,
    /// Countdown duration in seconds.
    #[serde(default = "default_timer_secs")]
    pub duration_secs: u32,
}

fn default_timer_enabled() -> bool {
    true
}

fn default_timer_secs() -> u32 {
    DEFAULT_TIMER_SECS
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_secs: DEFAULT_TIMER_SECS,
        }
    }
}

impl TimerSettings {
    fn is_valid(&self) -> bool {
        (MIN_TIMER_SECS..=MAX_TIMER_SECS).contains(&self.duration_secs)
    }
}

/// How cards are rendered in prompts and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardDisplayStyle {
    /// Short symbols, e.g. "QH".
    #[default]
    Symbols,
    /// Full names, e.g. "Queen of Hearts".
    Words,
}

/// Load timer settings; out-of-range durations count as malformed.
pub fn load_timer_settings(store: &impl KvStore) -> TimerSettings {
    read_json::<TimerSettings>(store, TIMER_SETTINGS_KEY)
        .filter(TimerSettings::is_valid)
        .unwrap_or_default()
}

/// Persist timer settings (best-effort).
pub fn save_timer_settings(store: &mut impl KvStore, settings: TimerSettings) {
    write_json(store, TIMER_SETTINGS_KEY, &settings);
}

/// Load the card display style.
pub fn load_display_style(store: &impl KvStore) -> CardDisplayStyle {
    read_json(store, DISPLAY_STYLE_KEY).unwrap_or_default()
}

/// Persist the card display style (best-effort).
pub fn save_display_style(store: &mut impl KvStore, style: CardDisplayStyle) {
    write_json(store, DISPLAY_STYLE_KEY, &style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_missing_settings_default() {
        let store = MemoryStore::new();
        assert_eq!(load_timer_settings(&store), TimerSettings::default());
        assert_eq!(load_display_style(&store), CardDisplayStyle::Symbols);
    }

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        let settings = TimerSettings {
            enabled: false,
            duration_secs: 45,
        };
        save_timer_settings(&mut store, settings);
        assert_eq!(load_timer_settings(&store), settings);

        save_display_style(&mut store, CardDisplayStyle::Words);
        assert_eq!(load_display_style(&store), CardDisplayStyle::Words);
    }

    #[test]
    fn test_malformed_settings_degrade_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(TIMER_SETTINGS_KEY, "{\"enabled\": \"yes\"}").unwrap();
        assert_eq!(load_timer_settings(&store), TimerSettings::default());

        store.set(DISPLAY_STYLE_KEY, "\"holographic\"").unwrap();
        assert_eq!(load_display_style(&store), CardDisplayStyle::Symbols);
    }

    #[test]
    fn test_out_of_range_duration_degrades() {
        let mut store = MemoryStore::new();
        store
            .set(TIMER_SETTINGS_KEY, "{\"enabled\": true, \"duration_secs\": 0}")
            .unwrap();
        assert_eq!(load_timer_settings(&store), TimerSettings::default());

        store
            .set(
                TIMER_SETTINGS_KEY,
                "{\"enabled\": true, \"duration_secs\": 9000}",
            )
            .unwrap();
        assert_eq!(load_timer_settings(&store), TimerSettings::default());
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let mut store = MemoryStore::new();
        store.set(TIMER_SETTINGS_KEY, "{\"enabled\": false}").unwrap();
        let settings = load_timer_settings(&store);
        assert!(!settings.enabled);
        assert_eq!(settings.duration_secs, DEFAULT_TIMER_SECS);
    }
}
