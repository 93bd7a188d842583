//! Deterministic round engine
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Virtual clock only (advanced by `tick`)
//! - Seeded RNG only
//! - Stable iteration order (live words keyed by id)
//! - No rendering or platform dependencies

pub mod interaction;
pub mod placement;
pub mod round;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use interaction::{Activation, activate_word};
pub use placement::{PlacementError, PlacementSolver, Rect};
pub use round::{register_hit, reset, start_game, start_game_from_input, start_new_level};
pub use spawn::{SpawnScheduler, SpawnSkip, start_spawning, stop_spawning};
pub use state::{Feedback, GameEvent, GamePhase, GameState, SessionError, SpawnedWord};
pub use tick::{TickInput, advance_clock, tick};
pub use timers::{Task, TimerId, TimerQueue};
