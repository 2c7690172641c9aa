use thiserror::Error;

/// Errors raised while setting up a game. Everything that happens once a
/// session is running (selections, ticks) is total and never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    InvalidDifficulty(String),
    #[error("could not place '{word}' in the grid after {attempts} attempts")]
    PlacementFailure { word: String, attempts: usize },
    #[error("word list '{name}' is invalid: {reason}")]
    WordList { name: String, reason: String },
}
