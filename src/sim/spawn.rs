//! Spawn scheduler
//!
//! One repeating `SpawnTick` timer per round. Cloud mode ticks at a fixed
//! interval derived from lifespan and word-count range; reader mode draws a
//! fresh interval for every tick. Every spawned word schedules its own removal.

use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState, SpawnedWord};
use super::timers::{Task, TimerId};
use crate::consts::*;
use crate::settings::{Mode, Settings};
use crate::words::WordList;

/// Why a spawn tick produced no word. Never surfaced to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSkip {
    /// Round not running, or a level advance is pending
    NotRunning,
    /// Cloud already holds `max` words
    AtCapacity,
    /// Word list has nothing but the target word
    NoDistractors,
    /// Placement attempts all collided
    PlacementExhausted,
}

/// Spawn timer bookkeeping
#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    timer: Option<TimerId>,
    mode: Mode,
    cloud_interval_ms: u64,
}

impl SpawnScheduler {
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }
}

/// Cloud tick interval: lifespan spread over the average word count, floored at 150ms
pub fn cloud_spawn_interval_ms(settings: &Settings) -> u64 {
    let interval = settings.word_lifespan_ms as f64 / settings.word_count_range.average();
    (interval as u64).max(CLOUD_MIN_SPAWN_INTERVAL_MS)
}

/// Reader tick interval, drawn from [1500, 2500)
pub fn reader_spawn_interval_ms<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.random_range(READER_SPAWN_INTERVAL_MIN_MS..READER_SPAWN_INTERVAL_MAX_MS)
}

/// Pick the text of a new word: the target with probability 0.25, else a random distractor
pub fn choose_word_text<R: Rng + ?Sized>(
    rng: &mut R,
    words: &WordList,
    target: &str,
) -> Result<String, SpawnSkip> {
    let is_target = rng.random_bool(TARGET_PROBABILITY);
    let distractors: Vec<&str> = words.iter().filter(|w| *w != target).collect();
    if distractors.is_empty() {
        return Err(SpawnSkip::NoDistractors);
    }

    if is_target {
        Ok(target.to_owned())
    } else {
        let idx = rng.random_range(0..distractors.len());
        Ok(distractors[idx].to_owned())
    }
}

/// (Re)start the spawn timer for the current mode
pub fn start_spawning(state: &mut GameState) {
    stop_spawning(state);
    state.scheduler.mode = state.settings.mode;
    state.scheduler.cloud_interval_ms = cloud_spawn_interval_ms(&state.settings);
    log::debug!(
        "Spawning started ({} mode, cloud interval {}ms)",
        state.scheduler.mode.as_str(),
        state.scheduler.cloud_interval_ms
    );
    schedule_next_tick(state);
}

/// Cancel the spawn timer. Idempotent; pending word removals are left alone.
pub fn stop_spawning(state: &mut GameState) {
    if let Some(id) = state.scheduler.timer.take() {
        state.timers.cancel(id);
    }
}

fn schedule_next_tick(state: &mut GameState) {
    let delay = match state.scheduler.mode {
        Mode::Cloud => state.scheduler.cloud_interval_ms,
        Mode::Reader => reader_spawn_interval_ms(&mut state.rng),
    };
    let id = state.timers.schedule(state.now_ms + delay, Task::SpawnTick);
    state.scheduler.timer = Some(id);
}

/// Handle a fired `SpawnTick` timer
pub fn on_spawn_tick(state: &mut GameState, fired: TimerId) {
    // A tick from a scheduler that has since been stopped or restarted
    if state.scheduler.timer != Some(fired) {
        return;
    }
    state.scheduler.timer = None;

    match spawn_word(state) {
        Ok(id) => log::trace!("Spawned word {} at {}ms", id, state.now_ms),
        Err(skip) => log::trace!("Spawn skipped: {:?}", skip),
    }

    schedule_next_tick(state);
}

/// One spawn attempt in the scheduler's mode
pub fn spawn_word(state: &mut GameState) -> Result<u32, SpawnSkip> {
    if state.phase != GamePhase::Running || state.advance_pending {
        return Err(SpawnSkip::NotRunning);
    }
    match state.scheduler.mode {
        Mode::Cloud => spawn_cloud_word(state),
        Mode::Reader => spawn_reader_word(state),
    }
}

fn spawn_cloud_word(state: &mut GameState) -> Result<u32, SpawnSkip> {
    let max = state.settings.word_count_range.max as usize;
    if state.live_words.len() >= max {
        return Err(SpawnSkip::AtCapacity);
    }

    let words = state.words.as_ref().ok_or(SpawnSkip::NotRunning)?;
    let text = choose_word_text(&mut state.rng, words, &state.target_word)?;

    let existing = state.occupied_rects();
    let rect = state
        .placement
        .place(&mut state.rng, &existing)
        .map_err(|_| SpawnSkip::PlacementExhausted)?;

    let id = state.next_word_id();
    let expiry = state.timers.schedule(
        state.now_ms + state.settings.word_lifespan_ms,
        Task::RemoveWord { id },
    );
    state.live_words.insert(
        id,
        SpawnedWord {
            id,
            text,
            rect: Some(rect),
            expiry,
            feedback: None,
            interactive: true,
            moving: state.settings.words_should_move,
        },
    );
    state.push_event(GameEvent::WordSpawned { id });
    Ok(id)
}

fn spawn_reader_word(state: &mut GameState) -> Result<u32, SpawnSkip> {
    let words = state.words.as_ref().ok_or(SpawnSkip::NotRunning)?;
    let text = choose_word_text(&mut state.rng, words, &state.target_word)?;

    // Lifetime uses the speed at spawn time; later speed changes don't touch it
    let lifetime = state.settings.scroll_duration_ms();
    let id = state.next_word_id();
    let expiry = state
        .timers
        .schedule(state.now_ms + lifetime, Task::RemoveWord { id });
    state.live_words.insert(
        id,
        SpawnedWord {
            id,
            text,
            rect: None,
            expiry,
            feedback: None,
            interactive: true,
            moving: false,
        },
    );
    state.push_event(GameEvent::WordSpawned { id });
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WordCountRange;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running_state(mode: Mode) -> GameState {
        let settings = Settings {
            mode,
            ..Default::default()
        };
        let mut state = GameState::new(42, settings);
        state.words = Some(WordList::parse("A, B, C, D, E").unwrap());
        state.phase = GamePhase::Running;
        state.target_word = "A".to_string();
        state.scheduler.mode = mode;
        state
    }

    #[test]
    fn test_cloud_interval() {
        let settings = Settings::default();
        // 3000ms / 7.5 words
        assert_eq!(cloud_spawn_interval_ms(&settings), 400);

        let crowded = Settings {
            word_lifespan_ms: 2000,
            word_count_range: WordCountRange { min: 15, max: 20 },
            ..Default::default()
        };
        assert_eq!(cloud_spawn_interval_ms(&crowded), 150);
    }

    #[test]
    fn test_reader_interval_bounds() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..500 {
            let ms = reader_spawn_interval_ms(&mut rng);
            assert!((1500..2500).contains(&ms));
        }
    }

    #[test]
    fn test_choose_word_text_mix() {
        let mut rng = Pcg32::seed_from_u64(9);
        let words = WordList::parse("A, B, C, D, E").unwrap();
        let mut targets = 0;
        for _ in 0..4000 {
            let text = choose_word_text(&mut rng, &words, "C").unwrap();
            assert!(words.contains(&text));
            if text == "C" {
                targets += 1;
            }
        }
        // About a quarter should be the target
        assert!((800..1200).contains(&targets), "targets = {}", targets);
    }

    #[test]
    fn test_choose_word_text_without_distractors() {
        let mut rng = Pcg32::seed_from_u64(9);
        let words = WordList::parse_with_minimum("only", 1).unwrap();
        assert_eq!(
            choose_word_text(&mut rng, &words, "only"),
            Err(SpawnSkip::NoDistractors)
        );
    }

    #[test]
    fn test_cloud_capacity() {
        let mut state = running_state(Mode::Cloud);
        state.settings.word_count_range = WordCountRange { min: 1, max: 3 };
        for _ in 0..200 {
            let _ = spawn_word(&mut state);
            assert!(state.live_words.len() <= 3);
        }
        assert_eq!(state.live_words.len(), 3);
        assert_eq!(spawn_word(&mut state), Err(SpawnSkip::AtCapacity));
    }

    #[test]
    fn test_cloud_word_schedules_expiry() {
        let mut state = running_state(Mode::Cloud);
        let id = spawn_word(&mut state).unwrap();
        let word = &state.live_words[&id];
        assert!(word.rect.is_some());
        assert!(word.moving);
        assert_eq!(state.timers.due_time(word.expiry), Some(3000));
    }

    #[test]
    fn test_reader_lifetime_uses_speed_at_spawn() {
        let mut state = running_state(Mode::Reader);
        state.settings.scroll_speed = 10;
        let fast = spawn_word(&mut state).unwrap();
        state.settings.scroll_speed = 1;
        let slow = spawn_word(&mut state).unwrap();

        let fast_due = state.timers.due_time(state.live_words[&fast].expiry);
        let slow_due = state.timers.due_time(state.live_words[&slow].expiry);
        assert_eq!(fast_due, Some(1200));
        assert_eq!(slow_due, Some(12000));
        assert!(state.live_words[&fast].rect.is_none());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut state = running_state(Mode::Cloud);
        start_spawning(&mut state);
        assert!(state.scheduler.is_running());
        assert_eq!(state.timers.len(), 1);
        stop_spawning(&mut state);
        stop_spawning(&mut state);
        assert!(!state.scheduler.is_running());
        assert!(state.timers.is_empty());
    }

    #[test]
    fn test_stale_tick_ignored() {
        let mut state = running_state(Mode::Cloud);
        start_spawning(&mut state);
        let old = state.scheduler.timer.unwrap();
        start_spawning(&mut state);
        on_spawn_tick(&mut state, old);
        assert!(state.live_words.is_empty());
        assert_eq!(state.timers.len(), 1);
    }

    #[test]
    fn test_no_spawn_while_advance_pending() {
        let mut state = running_state(Mode::Reader);
        state.advance_pending = true;
        assert_eq!(spawn_word(&mut state), Err(SpawnSkip::NotRunning));
    }
}
