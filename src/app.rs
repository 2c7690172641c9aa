use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{error, info};

use crate::{
    celebration::Celebration,
    difficulty::Difficulty,
    error::GameError,
    grid::Coord,
    runtime::SecondClock,
    session::{GameSession, MatchResult, Phase, TickOutcome},
    ui,
};

/// Message shown over the board until the next reset
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    TimeUp,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Presentation state wrapped around a [`GameSession`]
#[derive(Debug)]
pub struct App {
    pub session: GameSession,
    pub celebration: Celebration,
    pub clock: SecondClock,
    pub notice: Option<Notice>,
    /// Last known terminal area, used to map mouse positions onto cells
    pub viewport: Rect,
    dragging: bool,
    last_cell: Option<Coord>,
}

impl App {
    pub fn new(session: GameSession) -> Self {
        let mut clock = SecondClock::new();
        clock.arm();

        Self {
            session,
            celebration: Celebration::new(),
            clock,
            notice: None,
            viewport: Rect::new(0, 0, 80, 24),
            dragging: false,
            last_cell: None,
        }
    }

    pub fn reset(&mut self, difficulty: Difficulty) {
        self.dragging = false;
        self.last_cell = None;

        match self.session.start_or_reset(difficulty) {
            Ok(()) => {
                self.notice = None;
                self.celebration.stop();
                self.clock.arm();
            }
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, e: GameError) {
        error!(error = %e, "could not start a new game");
        self.notice = Some(Notice::Error(e.to_string()));
    }

    /// Advance animations and the countdown by one frame of `dt`
    pub fn on_tick(&mut self, dt: Duration) {
        self.celebration.update(dt.as_secs_f64());

        for _ in 0..self.clock.advance(dt) {
            match self.session.tick() {
                TickOutcome::Running => {}
                TickOutcome::Timeout => {
                    info!(score = self.session.score(), "time's up");
                    self.notice = Some(Notice::TimeUp);
                    self.clock.disarm();
                    break;
                }
                TickOutcome::Idle => {
                    self.clock.disarm();
                    break;
                }
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> AppAction {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return AppAction::Quit;
        }

        match key.code {
            KeyCode::Char('r') => self.reset(self.session.difficulty()),
            KeyCode::Char('d') => self.reset(self.session.difficulty().next()),
            KeyCode::Char('1') => self.reset(Difficulty::Easy),
            KeyCode::Char('2') => self.reset(Difficulty::Medium),
            KeyCode::Char('3') => self.reset(Difficulty::Hard),
            _ => {}
        }

        AppAction::Continue
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        let cell = self.cell_at(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(c) = cell {
                    self.session.begin_selection(c.row, c.col);
                    self.dragging = true;
                    self.last_cell = Some(c);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                // drag events repeat while the pointer stays on one cell
                if let Some(c) = cell.filter(|c| self.dragging && Some(*c) != self.last_cell) {
                    self.session.extend_selection(c.row, c.col);
                    self.last_cell = Some(c);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.dragging {
                    self.dragging = false;
                    self.last_cell = None;
                    let result = self.session.commit_selection();
                    self.on_match(result);
                }
            }
            _ => {}
        }
    }

    fn on_match(&mut self, result: MatchResult) {
        if let MatchResult::Matched(_) = result {
            if self.session.phase() == Phase::Won {
                info!(
                    seconds_left = self.session.seconds_remaining(),
                    "all words found"
                );
                self.clock.disarm();
                self.celebration
                    .start(self.viewport.width, self.viewport.height);
            }
        }
    }

    /// Grid cell under a terminal position, if any
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Coord> {
        let size = self.session.grid().size();
        let inner = ui::grid_cells_area(self.viewport, size);

        // clipped parts of the grid are not clickable on small terminals
        if column < inner.x
            || row < inner.y
            || column >= inner.x + inner.width
            || row >= inner.y + inner.height
        {
            return None;
        }
        let col = ((column - inner.x) / ui::CELL_WIDTH) as usize;
        let row = (row - inner.y) as usize;

        (row < size && col < size).then(|| Coord::new(row, col))
    }

    /// Terminal position of the middle of a grid cell
    pub fn cell_position(&self, coord: Coord) -> (u16, u16) {
        let inner = ui::grid_cells_area(self.viewport, self.session.grid().size());
        (
            inner.x + coord.col as u16 * ui::CELL_WIDTH + ui::CELL_WIDTH / 2,
            inner.y + coord.row as u16,
        )
    }
}
