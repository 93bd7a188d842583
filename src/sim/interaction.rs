//! Word activation (click / Enter / Space)

use super::round::register_hit;
use super::state::{Feedback, GameEvent, GamePhase, GameState};
use super::timers::Task;
use crate::consts::FEEDBACK_DELAY_MS;

/// Outcome of activating a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Target word; `level_complete` on the tenth hit
    Hit { level_complete: bool },
    /// Distractor
    Miss,
    /// Target word clicked while the level advance is pending
    Unscored,
    /// Already clicked, or no game running
    Ignored,
    /// Id no longer on screen (expired or removed)
    Stale,
}

/// Resolve an activation on a live word by id
pub fn activate_word(state: &mut GameState, id: u32) -> Activation {
    if state.phase != GamePhase::Running {
        return Activation::Ignored;
    }

    let feedback_due = state.now_ms + FEEDBACK_DELAY_MS;
    let Some(word) = state.live_words.get_mut(&id) else {
        log::trace!("Activation on stale word {}", id);
        return Activation::Stale;
    };
    if !word.interactive {
        return Activation::Ignored;
    }

    let correct = word.text == state.target_word;
    word.interactive = false;
    word.feedback = Some(if correct {
        Feedback::Correct
    } else {
        Feedback::Wrong
    });

    // Feedback removal replaces a later natural expiry
    let expires_first = state
        .timers
        .due_time(word.expiry)
        .is_some_and(|due| due <= feedback_due);
    if !expires_first {
        state.timers.cancel(word.expiry);
        word.expiry = state.timers.schedule(feedback_due, Task::RemoveWord { id });
    }

    if !correct {
        state.push_event(GameEvent::Miss { id });
        return Activation::Miss;
    }

    if state.advance_pending {
        return Activation::Unscored;
    }
    let level_complete = register_hit(state);
    state.push_event(GameEvent::Hit {
        id,
        hits: state.hits,
    });
    Activation::Hit { level_complete }
}
