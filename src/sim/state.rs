//! Game state and core session types
//!
//! `GameState` is the whole session: settings, word list, round counters,
//! live words and every pending timer. Nothing lives in globals.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;
use thiserror::Error;

use super::placement::{PlacementSolver, Rect};
use super::spawn::SpawnScheduler;
use super::timers::{TimerId, TimerQueue};
use crate::settings::{Settings, SettingsError};
use crate::words::{WordList, WordListError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Choosing words and settings
    Setup,
    /// Levels are being played
    Running,
    /// Every word has been a target; waits for reset
    GameOver,
}

/// Click feedback shown on a word before it disappears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Feedback {
    Correct,
    Wrong,
}

/// A word currently on screen
#[derive(Debug, Clone)]
pub struct SpawnedWord {
    pub id: u32,
    pub text: String,
    /// Cloud mode only
    pub rect: Option<Rect>,
    /// Pending removal (natural expiry, or end of feedback once clicked)
    pub expiry: TimerId,
    pub feedback: Option<Feedback>,
    /// False once clicked, so a word scores at most once
    pub interactive: bool,
    /// Cloud words drift when motion is enabled
    pub moving: bool,
}

/// Notable things that happened, for the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    LevelStarted { level: u32, target: String },
    WordSpawned { id: u32 },
    WordRemoved { id: u32 },
    Hit { id: u32, hits: u32 },
    Miss { id: u32 },
    GameOver { levels: u32 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Words(#[from] WordListError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("settings cannot change while a game is running")]
    SettingsLocked,
    #[error("a new game can only start from setup (currently {0:?})")]
    NotInSetup(GamePhase),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub settings: Settings,
    /// Empty until a game starts
    pub words: Option<WordList>,
    /// Current level (1-based once running)
    pub level: u32,
    /// Correct hits in the current level
    pub hits: u32,
    pub target_word: String,
    /// Every word that has been a target this game, in order
    pub used_target_words: Vec<String>,
    /// Live words keyed by id (ordered for deterministic iteration)
    pub live_words: BTreeMap<u32, SpawnedWord>,
    /// Set between the last hit of a level and the next level
    pub advance_pending: bool,
    pub scheduler: SpawnScheduler,
    pub placement: PlacementSolver,
    pub timers: TimerQueue,
    /// Virtual clock (ms since the session was created)
    pub now_ms: u64,
    events: Vec<GameEvent>,
    next_word_id: u32,
}

impl GameState {
    /// Create a new session in `Setup`
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Setup,
            settings,
            words: None,
            level: 0,
            hits: 0,
            target_word: String::new(),
            used_target_words: Vec::new(),
            live_words: BTreeMap::new(),
            advance_pending: false,
            scheduler: SpawnScheduler::default(),
            placement: PlacementSolver::default(),
            timers: TimerQueue::new(),
            now_ms: 0,
            events: Vec::new(),
            next_word_id: 0,
        }
    }

    /// Allocate a word id; never reused within a session
    pub fn next_word_id(&mut self) -> u32 {
        let id = self.next_word_id;
        self.next_word_id += 1;
        id
    }

    /// Replace the settings (only outside a running game)
    pub fn configure(&mut self, settings: Settings) -> Result<(), SessionError> {
        if self.phase == GamePhase::Running {
            return Err(SessionError::SettingsLocked);
        }
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Speed control; allowed at any time, affects reader words spawned from now on
    pub fn set_scroll_speed(&mut self, speed: u8) -> Result<(), SessionError> {
        self.settings.set_scroll_speed(speed)?;
        Ok(())
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove every live word
    pub fn clear_live_words(&mut self) {
        let ids: Vec<u32> = self.live_words.keys().copied().collect();
        self.live_words.clear();
        for id in ids {
            self.events.push(GameEvent::WordRemoved { id });
        }
    }

    /// Remove one live word if it is still there (stale ids are ignored)
    pub fn remove_word(&mut self, id: u32) -> bool {
        match self.live_words.remove(&id) {
            Some(_) => {
                self.events.push(GameEvent::WordRemoved { id });
                true
            }
            None => {
                log::trace!("Stale removal for word {}", id);
                false
            }
        }
    }

    /// Rectangles of the live cloud words
    pub fn occupied_rects(&self) -> Vec<Rect> {
        self.live_words.values().filter_map(|w| w.rect).collect()
    }

    /// Words still eligible as a target
    pub fn available_targets(&self) -> Vec<String> {
        match &self.words {
            Some(words) => words
                .iter()
                .filter(|w| !self.used_target_words.iter().any(|u| u == w))
                .map(str::to_owned)
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_setup() {
        let state = GameState::new(1, Settings::default());
        assert_eq!(state.phase, GamePhase::Setup);
        assert_eq!(state.level, 0);
        assert!(state.live_words.is_empty());
        assert!(state.timers.is_empty());
    }

    #[test]
    fn test_word_ids_are_monotonic() {
        let mut state = GameState::new(1, Settings::default());
        let a = state.next_word_id();
        let b = state.next_word_id();
        assert!(b > a);
    }

    #[test]
    fn test_configure_validates() {
        let mut state = GameState::new(1, Settings::default());
        let mut bad = Settings::default();
        bad.word_lifespan_ms = 0;
        assert!(matches!(
            state.configure(bad),
            Err(SessionError::Settings(SettingsError::ZeroLifespan))
        ));
        assert_eq!(state.settings, Settings::default());
    }

    #[test]
    fn test_remove_unknown_word_is_noop() {
        let mut state = GameState::new(1, Settings::default());
        assert!(!state.remove_word(42));
        assert!(state.drain_events().is_empty());
    }
}
