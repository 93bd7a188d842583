//! Word list parsing and validation
//!
//! Raw text from the input widget is split on newlines and commas, trimmed,
//! stripped of empty tokens and deduplicated in first-seen order.

use std::collections::HashSet;

use thiserror::Error;

use crate::consts::MIN_WORDS_FOR_GAME;

/// Sample list offered to the input widget on first load
pub const DEFAULT_WORD_INPUT: &str = "Apfel, Banane, Kirsche, Weltraum, Tier, Haus, Sonne, Mond, Stern, Blume, Baum, Auto, Straße, Spiel, Spaß";

/// Word list validation failure (recoverable, shown to the player)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordListError {
    #[error("the list must contain at least {required} different words (found {found})")]
    InsufficientWords { required: usize, found: usize },
}

/// Validated, deduplicated word list. Immutable for the duration of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Parse with the default minimum
    pub fn parse(raw: &str) -> Result<Self, WordListError> {
        Self::parse_with_minimum(raw, MIN_WORDS_FOR_GAME)
    }

    pub fn parse_with_minimum(raw: &str, minimum: usize) -> Result<Self, WordListError> {
        let mut seen = HashSet::new();
        let words: Vec<String> = raw
            .split(['\n', ','])
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .filter(|w| seen.insert(*w))
            .map(str::to_owned)
            .collect();

        if words.len() < minimum {
            return Err(WordListError::InsufficientWords {
                required: minimum,
                found: words.len(),
            });
        }

        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }
}
