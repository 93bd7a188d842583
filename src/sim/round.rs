//! Round engine: Setup -> Running (levels) -> GameOver
//!
//! Owns level and hit counters and target selection. Each level draws an
//! unused target uniformly at random; once every word has been a target the
//! game is over.

use rand::Rng;

use super::spawn::{start_spawning, stop_spawning};
use super::state::{GameEvent, GamePhase, GameState, SessionError};
use super::timers::Task;
use crate::consts::{HITS_PER_LEVEL, LEVEL_ADVANCE_DELAY_MS};
use crate::words::WordList;

/// Validate raw input and start a game. On failure nothing changes.
pub fn start_game_from_input(state: &mut GameState, raw: &str) -> Result<(), SessionError> {
    if state.phase != GamePhase::Setup {
        return Err(SessionError::NotInSetup(state.phase));
    }
    let words = WordList::parse(raw)?;
    start_game(state, words)
}

/// Setup -> Running with a validated list
pub fn start_game(state: &mut GameState, words: WordList) -> Result<(), SessionError> {
    if state.phase != GamePhase::Setup {
        return Err(SessionError::NotInSetup(state.phase));
    }
    state.settings.validate()?;

    log::info!(
        "Starting game with {} words ({} mode)",
        words.len(),
        state.settings.mode.as_str()
    );

    state.words = Some(words);
    state.phase = GamePhase::Running;
    state.level = 0;
    state.hits = 0;
    state.used_target_words.clear();
    state.advance_pending = false;

    start_new_level(state);
    Ok(())
}

/// Pick the next target, or end the game when none are left
pub fn start_new_level(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.advance_pending = false;

    let available = state.available_targets();
    if available.is_empty() {
        stop_spawning(state);
        state.clear_live_words();
        state.phase = GamePhase::GameOver;
        log::info!("Game over after {} levels", state.level);
        state.push_event(GameEvent::GameOver { levels: state.level });
        return;
    }

    let idx = state.rng.random_range(0..available.len());
    let target = available[idx].clone();
    state.used_target_words.push(target.clone());
    state.target_word = target;
    state.level += 1;
    state.hits = 0;

    state.clear_live_words();
    log::info!("Level {}: find '{}'", state.level, state.target_word);
    state.push_event(GameEvent::LevelStarted {
        level: state.level,
        target: state.target_word.clone(),
    });

    start_spawning(state);
}

/// Count a correct hit. Returns true if it completed the level.
///
/// The tenth hit stops spawning and schedules the next level after a short
/// delay; hits landing inside that window are not counted.
pub fn register_hit(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Running || state.advance_pending {
        return false;
    }

    state.hits += 1;
    if state.hits < HITS_PER_LEVEL {
        return false;
    }

    log::debug!("Level {} cleared", state.level);
    state.advance_pending = true;
    stop_spawning(state);
    state
        .timers
        .schedule(state.now_ms + LEVEL_ADVANCE_DELAY_MS, Task::AdvanceLevel);
    true
}

/// Back to Setup from any phase; drops all round, spawn and timer state
pub fn reset(state: &mut GameState) {
    stop_spawning(state);
    state.timers.clear();
    state.live_words.clear();
    state.drain_events();

    state.phase = GamePhase::Setup;
    state.words = None;
    state.level = 0;
    state.hits = 0;
    state.target_word.clear();
    state.used_target_words.clear();
    state.advance_pending = false;
    log::info!("Session reset");
}
