use crate::error::GameError;
use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

static WORDLIST_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/wordlists");

/// The three fixed word lists a game can be played with
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Next difficulty in menu order, wrapping back to easy
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn word_list(self) -> Result<WordList, GameError> {
        WordList::load(&self.to_string())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::InvalidDifficulty(s.to_string())),
        }
    }
}

/// Ordered, duplicate-free list of uppercase words to hide in the grid
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WordList {
    pub name: String,
    pub words: Vec<String>,
}

impl WordList {
    /// Load one of the word lists embedded at build time
    pub fn load(name: &str) -> Result<Self, GameError> {
        let invalid = |reason: String| GameError::WordList {
            name: name.to_string(),
            reason,
        };

        let file = WORDLIST_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| invalid("no such embedded word list".to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| invalid("file is not valid utf-8".to_string()))?;

        serde_json::from_str(contents).map_err(|e| invalid(e.to_string()))
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

    /// Check the list invariants: at least one word, non-empty uppercase A-Z
    /// words, no duplicates, nothing longer than `max_len`.
    pub fn validate(&self, max_len: usize) -> Result<(), GameError> {
        let invalid = |reason: String| GameError::WordList {
            name: self.name.clone(),
            reason,
        };

        if self.words.is_empty() {
            return Err(invalid("list has no words".to_string()));
        }

        let mut seen = HashSet::new();
        for word in &self.words {
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(invalid(format!("'{word}' is not an uppercase A-Z word")));
            }
            if word.len() > max_len {
                return Err(invalid(format!(
                    "'{word}' is longer than the grid ({max_len})"
                )));
            }
            if !seen.insert(word.as_str()) {
                return Err(invalid(format!("'{word}' appears more than once")));
            }
        }

        Ok(())
    }
}
