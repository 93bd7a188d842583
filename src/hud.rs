//! HUD snapshot
//!
//! Everything the host page needs to draw a frame, serialized to JSON.

use serde::Serialize;

use crate::consts::HITS_PER_LEVEL;
use crate::settings::Mode;
use crate::sim::{Feedback, GamePhase, GameState};

/// One live word as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordView {
    pub id: u32,
    pub text: String,
    /// Cloud mode position (percent of the play area)
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub feedback: Option<Feedback>,
    pub interactive: bool,
    pub moving: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub mode: Mode,
    pub level: u32,
    pub hits: u32,
    pub hits_per_level: u32,
    pub target_word: String,
    pub words: Vec<WordView>,
    pub scroll_speed: u8,
    /// Current visual crossing time for reader words
    pub scroll_duration_ms: u64,
    pub can_go_slower: bool,
    pub can_go_faster: bool,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let words = state
            .live_words
            .values()
            .map(|w| WordView {
                id: w.id,
                text: w.text.clone(),
                left: w.rect.map(|r| r.min.x),
                top: w.rect.map(|r| r.min.y),
                feedback: w.feedback,
                interactive: w.interactive,
                moving: w.moving,
            })
            .collect();

        Self {
            phase: state.phase,
            mode: state.settings.mode,
            level: state.level,
            hits: state.hits,
            hits_per_level: HITS_PER_LEVEL,
            target_word: state.target_word.clone(),
            words,
            scroll_speed: state.settings.scroll_speed,
            scroll_duration_ms: state.settings.scroll_duration_ms(),
            can_go_slower: state.settings.can_go_slower(),
            can_go_faster: state.settings.can_go_faster(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn level_label(&self) -> String {
        format!("Level: {}", self.level)
    }

    pub fn hits_label(&self) -> String {
        format!("Hits: {} / {}", self.hits, self.hits_per_level)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{TickInput, start_game_from_input, tick};

    #[test]
    fn test_capture_setup() {
        let state = GameState::new(1, Settings::default());
        let hud = HudSnapshot::capture(&state);
        assert_eq!(hud.phase, GamePhase::Setup);
        assert!(hud.words.is_empty());
        assert_eq!(hud.hits_label(), "Hits: 0 / 10");
        assert!(!hud.is_game_over());
    }

    #[test]
    fn test_capture_running_cloud() {
        let mut state = GameState::new(8, Settings::default());
        start_game_from_input(&mut state, "A, B, C, D, E").unwrap();
        tick(&mut state, &TickInput::default(), 2000);

        let hud = HudSnapshot::capture(&state);
        assert_eq!(hud.level_label(), "Level: 1");
        assert_eq!(hud.target_word, state.target_word);
        assert_eq!(hud.words.len(), state.live_words.len());
        assert!(hud.words.iter().all(|w| w.left.is_some() && w.top.is_some()));

        let json = hud.to_json().unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        assert!(json.contains("\"mode\":\"cloud\""));
    }
}
