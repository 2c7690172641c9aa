use crate::difficulty::{Difficulty, WordList};
use crate::error::GameError;
use crate::grid::{Coord, Grid, GridGenerator};
use crate::selection::Selection;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub const GRID_SIZE: usize = 10;
pub const COUNTDOWN_SECS: u32 = 60;

/// Whole-board generation attempts before a start/reset fails
const BOARD_ROUNDS: usize = 8;

/// Coarse lifecycle of a session. Won and TimedOut are terminal until the
/// next start/reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    TimedOut,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Phase::Playing)
    }
}

/// Result of releasing a drag gesture
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchResult {
    /// Fewer than two cells, or the game is already over
    NoAttempt,
    NoMatch,
    Matched(String),
}

/// Result of one elapsed second
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// The countdown just reached zero
    Timeout,
    /// Session is not playing; nothing changed
    Idle,
}

/// All mutable play state for one game, changed only through the methods
/// below.
#[derive(Debug)]
pub struct GameSession {
    generator: GridGenerator<StdRng>,
    difficulty: Difficulty,
    words: WordList,
    grid: Grid,
    found: Vec<String>,
    selection: Selection,
    seconds_remaining: u32,
    phase: Phase,
}

impl GameSession {
    pub fn new(difficulty: Difficulty) -> Result<Self, GameError> {
        Self::with_rng(difficulty, StdRng::from_entropy())
    }

    /// Session whose grids are reproducible for a given seed
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(difficulty: Difficulty, rng: StdRng) -> Result<Self, GameError> {
        Self::with_generator(difficulty, GridGenerator::new(rng))
    }

    /// Session built by (and resetting through) the given generator
    pub fn with_generator(
        difficulty: Difficulty,
        mut generator: GridGenerator<StdRng>,
    ) -> Result<Self, GameError> {
        let (words, grid) = build_board(&mut generator, difficulty)?;
        info!(%difficulty, words = words.len(), "session started");

        Ok(Self {
            generator,
            difficulty,
            words,
            grid,
            found: Vec::new(),
            selection: Selection::default(),
            seconds_remaining: COUNTDOWN_SECS,
            phase: Phase::Playing,
        })
    }

    /// Fresh grid, no found words, full countdown. On error the current
    /// session is left as it was.
    pub fn start_or_reset(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        let (words, grid) = build_board(&mut self.generator, difficulty)?;

        self.difficulty = difficulty;
        self.words = words;
        self.grid = grid;
        self.found.clear();
        self.selection.clear();
        self.seconds_remaining = COUNTDOWN_SECS;
        self.phase = Phase::Playing;

        info!(%difficulty, words = self.words.len(), "session started");
        Ok(())
    }

    /// Swap the generator used by later resets. The current grid is kept.
    pub fn set_generator(&mut self, generator: GridGenerator<StdRng>) {
        self.generator = generator;
    }

    /// Same as [`GameSession::start_or_reset`] for a textual difficulty key
    pub fn start_or_reset_key(&mut self, key: &str) -> Result<(), GameError> {
        let difficulty = key.parse::<Difficulty>()?;
        self.start_or_reset(difficulty)
    }

    pub fn begin_selection(&mut self, row: usize, col: usize) {
        self.selection = Selection::begin(Coord::new(row, col));
    }

    pub fn extend_selection(&mut self, row: usize, col: usize) {
        if !self.selection.is_empty() {
            self.selection.push(Coord::new(row, col));
        }
    }

    pub fn commit_selection(&mut self) -> MatchResult {
        let selection = std::mem::take(&mut self.selection);

        if self.phase.is_terminal() || selection.len() < 2 {
            return MatchResult::NoAttempt;
        }

        let Some(candidate) = selection.spell(&self.grid) else {
            debug!(cells = selection.len(), "selection not in a single row or column");
            return MatchResult::NoMatch;
        };

        if !self.words.contains(&candidate) || self.is_found(&candidate) {
            debug!(%candidate, "no match");
            return MatchResult::NoMatch;
        }

        self.found.push(candidate.clone());
        info!(
            word = %candidate,
            score = self.score(),
            total = self.words.len(),
            "word found"
        );
        self.update_phase();

        MatchResult::Matched(candidate)
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing || self.seconds_remaining == 0 {
            return TickOutcome::Idle;
        }

        self.seconds_remaining -= 1;
        self.update_phase();

        if self.phase == Phase::TimedOut {
            TickOutcome::Timeout
        } else {
            TickOutcome::Running
        }
    }

    fn update_phase(&mut self) {
        let next = next_phase(
            self.phase,
            self.found.len(),
            self.words.len(),
            self.seconds_remaining,
        );
        if next != self.phase {
            info!(from = ?self.phase, to = ?next, "phase changed");
            self.phase = next;
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn found_words(&self) -> &[String] {
        &self.found
    }

    pub fn word_list(&self) -> &WordList {
        &self.words
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> usize {
        self.found.len()
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found.iter().any(|w| w == word)
    }

    /// Grid cells covered by words found so far
    pub fn found_cells(&self) -> HashSet<Coord> {
        self.found
            .iter()
            .filter_map(|word| self.grid.placement_of(word))
            .flat_map(|placement| placement.cells())
            .collect()
    }
}

fn build_board(
    generator: &mut GridGenerator<StdRng>,
    difficulty: Difficulty,
) -> Result<(WordList, Grid), GameError> {
    let words = difficulty.word_list()?;
    words.validate(GRID_SIZE)?;

    // Early words can leave no room for a long later one; start over with a
    // fresh board a few times before giving up.
    let mut round = 1;
    loop {
        match generator.generate(&words.words, GRID_SIZE) {
            Ok(grid) => {
                debug!(%difficulty, round, "generated grid\n{grid}");
                return Ok((words, grid));
            }
            Err(e) if round < BOARD_ROUNDS => {
                warn!(%difficulty, round, error = %e, "board generation failed, retrying");
                round += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Phase as a function of progress; terminal phases stick.
fn next_phase(previous: Phase, found: usize, total: usize, seconds_remaining: u32) -> Phase {
    match previous {
        Phase::Playing if found == total => Phase::Won,
        Phase::Playing if seconds_remaining == 0 => Phase::TimedOut,
        other => other,
    }
}
