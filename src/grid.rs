use crate::error::GameError;
use rand::Rng;
use std::fmt;
use tracing::{debug, warn};

pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Upper bound on random origin/orientation samples tried for a single word
/// before generation gives up with [`GameError::PlacementFailure`].
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Zero-based (row, col) position in a grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from(v: (usize, usize)) -> Self {
        Coord { row: v.0, col: v.1 }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Words run left-to-right or top-to-bottom, never backwards or diagonally
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// The cell `offset` steps away from `origin` along this orientation
    pub fn step(self, origin: Coord, offset: usize) -> Coord {
        match self {
            Orientation::Horizontal => Coord::new(origin.row, origin.col + offset),
            Orientation::Vertical => Coord::new(origin.row + offset, origin.col),
        }
    }
}

/// Where one word of the list ended up
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub origin: Coord,
    pub orientation: Orientation,
}

impl Placement {
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.word.chars().count()).map(|i| self.orientation.step(self.origin, i))
    }
}

/// A fully populated square letter grid plus the answer key of placed words
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<char>,
    placements: Vec<Placement>,
}

impl Grid {
    /// Build a grid from literal rows. Every row must have as many letters as
    /// there are rows; placements are left empty.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let letters: Vec<char> = row.as_ref().chars().collect();
            if letters.len() != size {
                return None;
            }
            cells.extend(letters);
        }
        Some(Self {
            size,
            cells,
            placements: Vec::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, coord: Coord) -> Option<char> {
        if coord.row < self.size && coord.col < self.size {
            Some(self.cells[coord.row * self.size + coord.col])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks(0) panics, and an empty grid has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement_of(&self, word: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.word == word)
    }

    /// True if `word` reads left-to-right in some row or top-to-bottom in
    /// some column.
    pub fn contains_word(&self, word: &str) -> bool {
        let rows = self.rows().map(|row| row.iter().collect::<String>());
        let cols = (0..self.size).map(|col| {
            (0..self.size)
                .map(|row| self.cells[row * self.size + col])
                .collect::<String>()
        });
        rows.chain(cols).any(|line| line.contains(word))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: String = row.iter().collect();
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Randomized word placement: each word is dropped at random origins until it
/// lands on a run of empty cells, then the leftovers get random letters.
#[derive(Debug)]
pub struct GridGenerator<R: Rng> {
    rng: R,
    max_attempts: usize,
}

impl<R: Rng> GridGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Place every word (in list order) and fill the remaining cells.
    /// Fails as a whole if any word cannot be placed.
    pub fn generate<S: AsRef<str>>(&mut self, words: &[S], size: usize) -> Result<Grid, GameError> {
        let mut slots: Vec<Option<char>> = vec![None; size * size];
        let mut placements = Vec::with_capacity(words.len());

        for word in words {
            let placement = self.place_word(&mut slots, size, word.as_ref())?;
            placements.push(placement);
        }

        let cells = slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| self.random_letter()))
            .collect();

        Ok(Grid {
            size,
            cells,
            placements,
        })
    }

    fn place_word(
        &mut self,
        slots: &mut [Option<char>],
        size: usize,
        word: &str,
    ) -> Result<Placement, GameError> {
        let letters: Vec<char> = word.chars().collect();

        if letters.is_empty() || letters.len() > size {
            warn!(word, size, "word cannot fit in the grid");
            return Err(GameError::PlacementFailure {
                word: word.to_string(),
                attempts: 0,
            });
        }

        for attempt in 1..=self.max_attempts {
            let orientation = Orientation::random(&mut self.rng);
            let origin = Coord::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));

            if !can_place(slots, size, letters.len(), origin, orientation) {
                continue;
            }

            for (i, letter) in letters.iter().enumerate() {
                let cell = orientation.step(origin, i);
                slots[cell.row * size + cell.col] = Some(*letter);
            }

            debug!(word, %origin, ?orientation, attempt, "placed word");
            return Ok(Placement {
                word: word.to_string(),
                origin,
                orientation,
            });
        }

        warn!(word, attempts = self.max_attempts, "gave up placing word");
        Err(GameError::PlacementFailure {
            word: word.to_string(),
            attempts: self.max_attempts,
        })
    }

    fn random_letter(&mut self) -> char {
        ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char
    }
}

/// A run fits when it stays inside the grid and every cell is still empty.
/// Occupied cells always conflict, even if they hold the same letter.
fn can_place(
    slots: &[Option<char>],
    size: usize,
    len: usize,
    origin: Coord,
    orientation: Orientation,
) -> bool {
    let start = match orientation {
        Orientation::Horizontal => origin.col,
        Orientation::Vertical => origin.row,
    };
    if start + len > size {
        return false;
    }

    (0..len).all(|i| {
        let cell = orientation.step(origin, i);
        slots[cell.row * size + cell.col].is_none()
    })
}
