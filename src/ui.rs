use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, Notice},
    celebration::Celebration,
    grid::Coord,
    session::Phase,
};

/// Terminal columns per grid letter
pub const CELL_WIDTH: u16 = 3;

const VERTICAL_MARGIN: u16 = 1;
const WORDS_WIDTH: u16 = 24;
const GUTTER: u16 = 2;

/// Screen regions of the game board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub title: Rect,
    pub score: Rect,
    pub timer: Rect,
    pub grid: Rect,
    pub words: Rect,
    pub legend: Rect,
}

pub fn board_layout(area: Rect, size: usize) -> BoardLayout {
    let grid_width = size as u16 * CELL_WIDTH + 2;
    let grid_height = size as u16 + 2;

    let rows = Layout::vertical([
        Constraint::Length(1),           // title
        Constraint::Length(1),           // score
        Constraint::Length(1),           // time left
        Constraint::Length(1),           // padding
        Constraint::Length(grid_height), // grid + word list
        Constraint::Length(1),           // padding
        Constraint::Length(1),           // legend
    ])
    .vertical_margin(VERTICAL_MARGIN)
    .split(area);

    let body = Layout::horizontal([
        Constraint::Length(grid_width),
        Constraint::Length(GUTTER),
        Constraint::Length(WORDS_WIDTH),
    ])
    .flex(Flex::Center)
    .split(rows[4]);

    BoardLayout {
        title: rows[0],
        score: rows[1],
        timer: rows[2],
        grid: body[0],
        words: body[2],
        legend: rows[6],
    }
}

/// Area holding the letters themselves, inside the grid border
pub fn grid_cells_area(area: Rect, size: usize) -> Rect {
    let grid = board_layout(area, size).grid;
    Rect::new(
        grid.x + 1,
        grid.y + 1,
        grid.width.saturating_sub(2),
        grid.height.saturating_sub(2),
    )
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let layout = board_layout(area, session.grid().size());

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let selected_style = Style::default()
            .patch(bold_style)
            .fg(Color::Black)
            .bg(Color::Yellow);
        let found_style = Style::default().patch(bold_style).fg(Color::Green);

        Paragraph::new(Span::styled(
            "Word Search",
            Style::default().patch(bold_style).fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .render(layout.title, buf);

        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(
                    "Score: {} / {}",
                    session.score(),
                    session.word_list().len()
                ),
                bold_style,
            ),
            Span::styled(format!("   [{}]", session.difficulty()), dim_style),
        ]))
        .alignment(Alignment::Center)
        .render(layout.score, buf);

        let timer_style = if session.seconds_remaining() <= 10 && session.is_active() {
            Style::default().patch(bold_style).fg(Color::Red)
        } else {
            bold_style
        };
        Paragraph::new(Span::styled(
            format!("Time Left: {} seconds", session.seconds_remaining()),
            timer_style,
        ))
        .alignment(Alignment::Center)
        .render(layout.timer, buf);

        // grid
        let found_cells = session.found_cells();
        let selection = session.selection();
        let lines: Vec<Line> = session
            .grid()
            .rows()
            .enumerate()
            .map(|(row, letters)| {
                Line::from(
                    letters
                        .iter()
                        .enumerate()
                        .map(|(col, letter)| {
                            let coord = Coord::new(row, col);
                            let style = if selection.contains(coord) {
                                selected_style
                            } else if found_cells.contains(&coord) {
                                found_style
                            } else {
                                bold_style
                            };
                            Span::styled(format!(" {letter} "), style)
                        })
                        .collect::<Vec<Span>>(),
                )
            })
            .collect();

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .render(layout.grid, buf);

        // word list
        let words: Vec<Line> = session
            .word_list()
            .words
            .iter()
            .map(|word| {
                if session.is_found(word) {
                    Line::from(vec![
                        Span::styled("✔ ", found_style),
                        Span::styled(
                            word.clone(),
                            found_style.add_modifier(Modifier::CROSSED_OUT),
                        ),
                    ])
                } else {
                    Line::from(vec![Span::raw("  "), Span::styled(word.clone(), bold_style)])
                }
            })
            .collect();

        Paragraph::new(words)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Words to Find "),
            )
            .render(layout.words, buf);

        let legend = match &self.notice {
            Some(Notice::Error(message)) => Span::styled(
                message.clone(),
                Style::default().patch(bold_style).fg(Color::Red),
            ),
            _ => Span::styled(
                "drag to select / (r)eset / (d)ifficulty / (1)(2)(3) level / (esc)ape",
                italic_style,
            ),
        };
        Paragraph::new(legend)
            .alignment(Alignment::Center)
            .render(layout.legend, buf);

        match session.phase() {
            Phase::Won => render_popup(
                &[
                    "Congratulations!",
                    "You found all the words!",
                    "",
                    "(r) play again",
                ],
                Color::Green,
                layout.grid,
                buf,
            ),
            Phase::TimedOut => {
                let summary = format!(
                    "You found {} of {} words",
                    session.score(),
                    session.word_list().len()
                );
                render_popup(
                    &["Time's up!", &summary, "", "(r) try again"],
                    Color::Red,
                    layout.grid,
                    buf,
                );
            }
            Phase::Playing => {}
        }

        if self.celebration.is_active {
            render_celebration(&self.celebration, area, buf);
        }
    }
}

/// Bordered message box centered over `over`
fn render_popup(lines: &[&str], color: Color, over: Rect, buf: &mut Buffer) {
    let text_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let width = text_width + 4;
    let height = lines.len() as u16 + 2;

    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(over);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);

    Clear.render(area, buf);
    Paragraph::new(
        lines
            .iter()
            .map(|l| Line::from(l.to_string()))
            .collect::<Vec<Line>>(),
    )
    .alignment(Alignment::Center)
    .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL))
    .render(area, buf);
}

/// Render celebration sparks on top of the board
fn render_celebration(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for spark in &celebration.sparks {
        if spark.x < 0.0 || spark.y < 0.0 {
            continue;
        }
        let x = spark.x as u16;
        let y = spark.y as u16;
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = colors[spark.color_index % colors.len()];
        let life = 1.0 - (spark.age / spark.max_age);
        let style = if spark.is_letter() || life > 0.6 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if life > 0.3 {
            Style::default().fg(color)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&spark.symbol.to_string());
            cell.set_style(style);
        }
    }
}
