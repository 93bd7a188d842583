//! Word Hunter - a vocabulary drill game
//!
//! Core modules:
//! - `sim`: Deterministic round engine (levels, spawning, placement, timers)
//! - `words`: Word list parsing and validation
//! - `settings`: Mode and tunable parameters
//! - `hud`: Snapshot of everything the host page renders
//! - `platform`: Browser/native platform abstraction (fullscreen)

pub mod hud;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod words;

pub use hud::HudSnapshot;
pub use settings::{Mode, Settings, SettingsError, WordCountRange};
pub use sim::{GamePhase, GameState, SessionError};
pub use words::{WordList, WordListError};

/// Game configuration constants
pub mod consts {
    /// Correct hits needed to clear a level
    pub const HITS_PER_LEVEL: u32 = 10;
    /// Minimum distinct words before a game may start
    pub const MIN_WORDS_FOR_GAME: usize = 5;
    /// Chance that a spawned word is the target word
    pub const TARGET_PROBABILITY: f64 = 0.25;

    /// Cloud spawn interval never drops below this (ms)
    pub const CLOUD_MIN_SPAWN_INTERVAL_MS: u64 = 150;
    /// Reader spawn interval is drawn from [MIN, MAX) per tick (ms)
    pub const READER_SPAWN_INTERVAL_MIN_MS: u64 = 1500;
    pub const READER_SPAWN_INTERVAL_MAX_MS: u64 = 2500;
    /// Reader word lifetime = (11 - speed) * this (ms)
    pub const READER_MS_PER_SPEED_STEP: u64 = 1200;

    /// Clicked words linger this long for the feedback animation (ms)
    pub const FEEDBACK_DELAY_MS: u64 = 300;
    /// Pause between the last hit of a level and the next level (ms)
    pub const LEVEL_ADVANCE_DELAY_MS: u64 = 500;

    /// Play area in percentage units
    pub const PLAY_AREA: f32 = 100.0;
    /// Box reserved for one spawned word (percent of the play area)
    pub const WORD_BOX_WIDTH: f32 = 15.0;
    pub const WORD_BOX_HEIGHT: f32 = 8.0;
    /// Centered box reserved for the target word display
    pub const TARGET_ZONE_WIDTH: f32 = 40.0;
    pub const TARGET_ZONE_HEIGHT: f32 = 20.0;
    /// Random placement proposals per spawn before giving up
    pub const PLACEMENT_ATTEMPTS: u32 = 20;
}
