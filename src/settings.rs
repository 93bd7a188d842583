//! Game settings
//!
//! In-memory only; every session starts from `Settings::default()` or from
//! JSON handed over by the host page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::READER_MS_PER_SPEED_STEP;

/// Slowest reader scroll speed
pub const MIN_SCROLL_SPEED: u8 = 1;
/// Fastest reader scroll speed
pub const MAX_SCROLL_SPEED: u8 = 10;

/// Lifespan choices offered by the setup screen (ms)
pub const LIFESPAN_OPTIONS_MS: [u64; 7] = [2000, 2500, 3000, 3500, 4000, 4500, 5000];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("word count range {min}-{max} is invalid (need 1 <= min <= max)")]
    InvalidRange { min: u32, max: u32 },
    #[error("word lifespan must be positive")]
    ZeroLifespan,
    #[error("scroll speed {0} is outside 1..=10")]
    ScrollSpeedOutOfRange(u8),
    #[error("unknown game mode '{0}'")]
    UnknownMode(String),
    #[error("cannot parse word count range '{0}'")]
    BadRange(String),
    #[error("settings JSON rejected: {0}")]
    Json(String),
}

/// Presentation mode, exclusive per round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Words pop up at random non-overlapping positions
    #[default]
    Cloud,
    /// Words scroll along a single track
    Reader,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Cloud => "cloud",
            Mode::Reader => "reader",
        }
    }

    pub fn parse(s: &str) -> Result<Self, SettingsError> {
        match s.trim().to_lowercase().as_str() {
            "cloud" => Ok(Mode::Cloud),
            "reader" => Ok(Mode::Reader),
            other => Err(SettingsError::UnknownMode(other.to_string())),
        }
    }
}

/// How many words the cloud should hold at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCountRange {
    pub min: u32,
    pub max: u32,
}

impl Default for WordCountRange {
    fn default() -> Self {
        Self { min: 5, max: 10 }
    }
}

impl WordCountRange {
    /// Ranges offered by the setup screen
    pub const PRESETS: [WordCountRange; 4] = [
        WordCountRange { min: 2, max: 5 },
        WordCountRange { min: 5, max: 10 },
        WordCountRange { min: 10, max: 15 },
        WordCountRange { min: 15, max: 20 },
    ];

    /// Parse "min-max" as used by the range buttons
    pub fn parse(s: &str) -> Result<Self, SettingsError> {
        let bad = || SettingsError::BadRange(s.to_string());
        let (min, max) = s.split_once('-').ok_or_else(bad)?;
        let min = min.trim().parse().map_err(|_| bad())?;
        let max = max.trim().parse().map_err(|_| bad())?;
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min == 0 || self.min > self.max {
            return Err(SettingsError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Midpoint of the range, the word count the cloud aims for
    pub fn average(&self) -> f64 {
        (self.min + self.max) as f64 / 2.0
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,
    /// Cloud words drift while visible
    pub words_should_move: bool,
    pub word_count_range: WordCountRange,
    /// How long a cloud word stays on screen (ms)
    pub word_lifespan_ms: u64,
    /// Reader scroll speed, 1 (slow) to 10 (fast)
    pub scroll_speed: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Cloud,
            words_should_move: true,
            word_count_range: WordCountRange::default(),
            word_lifespan_ms: 3000,
            scroll_speed: 5,
        }
    }
}

impl Settings {
    /// Build settings from host-supplied JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| SettingsError::Json(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.word_count_range.validate()?;
        if self.word_lifespan_ms == 0 {
            return Err(SettingsError::ZeroLifespan);
        }
        if !(MIN_SCROLL_SPEED..=MAX_SCROLL_SPEED).contains(&self.scroll_speed) {
            return Err(SettingsError::ScrollSpeedOutOfRange(self.scroll_speed));
        }
        Ok(())
    }

    pub fn set_scroll_speed(&mut self, speed: u8) -> Result<(), SettingsError> {
        if !(MIN_SCROLL_SPEED..=MAX_SCROLL_SPEED).contains(&speed) {
            return Err(SettingsError::ScrollSpeedOutOfRange(speed));
        }
        self.scroll_speed = speed;
        Ok(())
    }

    /// One step slower; no-op at the lower bound
    pub fn slower(&mut self) {
        if self.can_go_slower() {
            self.scroll_speed -= 1;
        }
    }

    /// One step faster; no-op at the upper bound
    pub fn faster(&mut self) {
        if self.can_go_faster() {
            self.scroll_speed += 1;
        }
    }

    pub fn can_go_slower(&self) -> bool {
        self.scroll_speed > MIN_SCROLL_SPEED
    }

    pub fn can_go_faster(&self) -> bool {
        self.scroll_speed < MAX_SCROLL_SPEED
    }

    /// Time a reader word needs to cross the track at the current speed
    pub fn scroll_duration_ms(&self) -> u64 {
        (11 - self.scroll_speed.clamp(MIN_SCROLL_SPEED, MAX_SCROLL_SPEED)) as u64
            * READER_MS_PER_SPEED_STEP
    }
}
