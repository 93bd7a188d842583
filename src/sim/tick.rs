//! Event-loop tick
//!
//! Applies one frame of player input, then advances the virtual clock and
//! fires every timer that came due, each at its own due time. Events raised
//! during the frame are handed back to the caller.

use super::interaction::activate_word;
use super::round::{reset, start_new_level};
use super::spawn::on_spawn_tick;
use super::state::{GameEvent, GamePhase, GameState};
use super::timers::{Task, TimerId};

/// Input collected since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Word ids clicked or activated by keyboard, in order
    pub activate: Vec<u32>,
    /// Reader speed control
    pub faster: bool,
    pub slower: bool,
    /// Quit / play again: back to setup
    pub quit: bool,
    /// Demo mode - the engine clicks target words itself
    pub autoplay: bool,
}

/// Advance the session by `elapsed_ms` and return the events of this frame
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: u64) -> Vec<GameEvent> {
    if input.quit {
        reset(state);
    } else {
        apply_input(state, input);
    }

    advance_clock(state, elapsed_ms);
    state.drain_events()
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    if input.faster {
        state.settings.faster();
    }
    if input.slower {
        state.settings.slower();
    }

    for &id in &input.activate {
        activate_word(state, id);
    }

    if input.autoplay && state.phase == GamePhase::Running {
        if let Some(id) = autoplay_pick(state) {
            activate_word(state, id);
        }
    }
}

/// Oldest target word still clickable
fn autoplay_pick(state: &GameState) -> Option<u32> {
    state
        .live_words
        .values()
        .find(|w| w.interactive && w.text == state.target_word)
        .map(|w| w.id)
}

/// Move the clock forward, firing due timers in order
pub fn advance_clock(state: &mut GameState, elapsed_ms: u64) {
    let until = state.now_ms + elapsed_ms;
    while let Some((timer, due_ms, task)) = state.timers.pop_due(until) {
        state.now_ms = state.now_ms.max(due_ms);
        run_task(state, timer, task);
    }
    state.now_ms = until;
}

fn run_task(state: &mut GameState, timer: TimerId, task: Task) {
    match task {
        Task::SpawnTick => on_spawn_tick(state, timer),
        Task::RemoveWord { id } => {
            state.remove_word(id);
        }
        Task::AdvanceLevel => {
            if state.advance_pending {
                start_new_level(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::{Mode, Settings, WordCountRange};
    use crate::sim::round::start_game_from_input;

    fn cloud_game(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Settings::default());
        start_game_from_input(&mut state, "A, B, C, D, E, F, G").unwrap();
        state
    }

    #[test]
    fn test_cloud_spawns_on_interval() {
        let mut state = cloud_game(1);
        let input = TickInput::default();

        tick(&mut state, &input, 399);
        assert!(state.live_words.is_empty());

        // Default interval is 400ms; placement may occasionally miss
        tick(&mut state, &input, 4000);
        assert!(!state.live_words.is_empty());
        assert_eq!(state.now_ms, 4399);
    }

    #[test]
    fn test_words_expire_after_lifespan() {
        let mut state = cloud_game(2);
        let input = TickInput::default();
        tick(&mut state, &input, 400);
        let first = *state.live_words.keys().next().expect("first word placed");

        tick(&mut state, &input, 2999);
        assert!(state.live_words.contains_key(&first));
        tick(&mut state, &input, 1);
        assert!(!state.live_words.contains_key(&first));
    }

    #[test]
    fn test_frame_size_does_not_matter() {
        let mut coarse = cloud_game(77);
        let mut fine = cloud_game(77);
        let input = TickInput::default();

        tick(&mut coarse, &input, 5000);
        for _ in 0..500 {
            tick(&mut fine, &input, 10);
        }

        let coarse_ids: Vec<_> = coarse.live_words.keys().collect();
        let fine_ids: Vec<_> = fine.live_words.keys().collect();
        assert_eq!(coarse_ids, fine_ids);
        assert_eq!(coarse.now_ms, fine.now_ms);
    }

    #[test]
    fn test_cloud_never_exceeds_range_max() {
        let settings = Settings {
            word_count_range: WordCountRange { min: 5, max: 10 },
            word_lifespan_ms: 5000,
            ..Default::default()
        };
        let mut state = GameState::new(3, settings);
        start_game_from_input(&mut state, "A, B, C, D, E, F, G").unwrap();
        let input = TickInput::default();
        for _ in 0..2000 {
            tick(&mut state, &input, 16);
            assert!(state.live_words.len() <= 10);
        }
    }

    #[test]
    fn test_reader_interval_and_lifetime() {
        let settings = Settings {
            mode: Mode::Reader,
            scroll_speed: 10,
            ..Default::default()
        };
        let mut state = GameState::new(4, settings);
        start_game_from_input(&mut state, "A, B, C, D, E").unwrap();
        let input = TickInput::default();

        tick(&mut state, &input, READER_SPAWN_INTERVAL_MIN_MS - 1);
        assert!(state.live_words.is_empty());
        tick(&mut state, &input, READER_SPAWN_INTERVAL_MAX_MS - READER_SPAWN_INTERVAL_MIN_MS + 1);
        assert_eq!(state.live_words.len(), 1);

        // Speed 10 words live 1200ms, shorter than the next spawn gap
        tick(&mut state, &input, 1200);
        assert!(state.live_words.len() <= 1);
    }

    #[test]
    fn test_speed_controls() {
        let mut state = cloud_game(5);
        let speed = state.settings.scroll_speed;
        tick(
            &mut state,
            &TickInput {
                faster: true,
                ..Default::default()
            },
            0,
        );
        assert_eq!(state.settings.scroll_speed, speed + 1);
        tick(
            &mut state,
            &TickInput {
                slower: true,
                ..Default::default()
            },
            0,
        );
        assert_eq!(state.settings.scroll_speed, speed);
    }

    #[test]
    fn test_quit_resets() {
        let mut state = cloud_game(6);
        tick(&mut state, &TickInput::default(), 1000);
        tick(
            &mut state,
            &TickInput {
                quit: true,
                ..Default::default()
            },
            0,
        );
        assert_eq!(state.phase, GamePhase::Setup);
        assert!(state.live_words.is_empty());

        // Nothing left to fire
        tick(&mut state, &TickInput::default(), 10_000);
        assert!(state.live_words.is_empty());
        assert_eq!(state.level, 0);
    }

    #[test]
    fn test_quit_frame_still_advances_clock() {
        let mut state = cloud_game(8);
        tick(&mut state, &TickInput::default(), 1000);
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        tick(&mut state, &quit, 250);
        assert_eq!(state.phase, GamePhase::Setup);
        assert_eq!(state.now_ms, 1250);
    }

    #[test]
    fn test_tick_hands_over_frame_events() {
        let mut state = cloud_game(9);
        let autoplay = TickInput {
            autoplay: true,
            ..Default::default()
        };

        // The level start from `start_game` comes out of the first frame
        let first = tick(&mut state, &autoplay, 16);
        assert!(matches!(first.first(), Some(GameEvent::LevelStarted { level: 1, .. })));

        let mut spawned = 0;
        let mut hits = 0;
        for _ in 0..5000 {
            for event in tick(&mut state, &autoplay, 16) {
                match event {
                    GameEvent::WordSpawned { .. } => spawned += 1,
                    GameEvent::Hit { .. } => hits += 1,
                    _ => {}
                }
            }
            // Nothing is left queued between frames
            assert!(state.drain_events().is_empty());
        }
        assert!(spawned > 0);
        assert!(hits > 0);
    }

    #[test]
    fn test_level_advances_after_delay() {
        let mut state = cloud_game(7);
        let autoplay = TickInput {
            autoplay: true,
            ..Default::default()
        };
        let mut guard = 0;
        while !state.advance_pending {
            tick(&mut state, &autoplay, 16);
            guard += 1;
            assert!(guard < 100_000, "level never completed");
        }
        assert_eq!(state.level, 1);
        assert_eq!(state.hits, HITS_PER_LEVEL);

        tick(&mut state, &TickInput::default(), LEVEL_ADVANCE_DELAY_MS - 20);
        assert_eq!(state.level, 1);
        tick(&mut state, &TickInput::default(), 20);
        assert_eq!(state.level, 2);
        assert_eq!(state.hits, 0);
        assert!(state.live_words.is_empty());
    }
}
