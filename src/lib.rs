// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod grid;
pub mod logging;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod ui;

pub use difficulty::{Difficulty, WordList};
pub use error::GameError;
pub use grid::{Coord, Grid, GridGenerator};
pub use session::{GameSession, MatchResult, Phase, TickOutcome};
