use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use wordsearch::{
    app::{App, AppAction, Notice},
    grid::Coord,
    runtime::{FixedTicker, GameEvent, Runner, TestEventSource},
    Difficulty, GameSession, Phase,
};

fn mouse(kind: MouseEventKind, pos: (u16, u16)) -> GameEvent {
    GameEvent::Mouse(MouseEvent {
        kind,
        column: pos.0,
        row: pos.1,
        modifiers: KeyModifiers::NONE,
    })
}

/// Queue the press/drag/release events that trace `word` across the grid
fn send_word(tx: &mpsc::Sender<GameEvent>, app: &App, word: &str) {
    let cells: Vec<Coord> = app
        .session
        .grid()
        .placement_of(word)
        .unwrap()
        .cells()
        .collect();

    tx.send(mouse(
        MouseEventKind::Down(MouseButton::Left),
        app.cell_position(cells[0]),
    ))
    .unwrap();
    for c in &cells[1..] {
        tx.send(mouse(
            MouseEventKind::Drag(MouseButton::Left),
            app.cell_position(*c),
        ))
        .unwrap();
    }
    tx.send(mouse(
        MouseEventKind::Up(MouseButton::Left),
        app.cell_position(*cells.last().unwrap()),
    ))
    .unwrap();
}

/// Drive the app like the binary does, until Esc or `max_steps`
fn drive<T: wordsearch::runtime::Ticker>(
    app: &mut App,
    runner: &Runner<TestEventSource, T>,
    max_steps: usize,
) {
    for _ in 0..max_steps {
        match runner.step() {
            GameEvent::Tick => app.on_tick(runner.tick_interval()),
            GameEvent::Resize => {}
            GameEvent::Mouse(m) => app.on_mouse(m),
            GameEvent::Key(k) => {
                if app.on_key(k) == AppAction::Quit {
                    return;
                }
            }
        }
    }
}

#[test]
fn headless_mouse_flow_wins_easy_game() {
    let mut app = App::new(GameSession::with_seed(Difficulty::Easy, 2024).unwrap());

    let (tx, rx) = mpsc::channel();
    for word in ["CAT", "DOG", "COW"] {
        send_word(&tx, &app, word);
    }
    tx.send(GameEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
        .unwrap();

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    drive(&mut app, &runner, 100);

    assert_eq!(app.session.phase(), Phase::Won);
    assert_eq!(app.session.score(), 3);
    assert_eq!(app.session.found_words(), ["CAT", "DOG", "COW"]);
    assert!(app.celebration.is_active);
}

#[test]
fn headless_diagonal_drag_scores_nothing() {
    let mut app = App::new(GameSession::with_seed(Difficulty::Medium, 8).unwrap());

    let (tx, rx) = mpsc::channel();
    tx.send(mouse(
        MouseEventKind::Down(MouseButton::Left),
        app.cell_position(Coord::new(0, 0)),
    ))
    .unwrap();
    for i in 1..6 {
        tx.send(mouse(
            MouseEventKind::Drag(MouseButton::Left),
            app.cell_position(Coord::new(i, i)),
        ))
        .unwrap();
    }
    tx.send(mouse(
        MouseEventKind::Up(MouseButton::Left),
        app.cell_position(Coord::new(5, 5)),
    ))
    .unwrap();

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    drive(&mut app, &runner, 10);

    assert_eq!(app.session.score(), 0);
    assert!(app.session.selection().is_empty());
}

#[test]
fn headless_timed_out_by_ticks() {
    let mut app = App::new(GameSession::with_seed(Difficulty::Hard, 3).unwrap());

    // no events at all; every step is a tick. A 1s "frame" makes the
    // countdown move one second per step.
    let (_tx, rx) = mpsc::channel::<GameEvent>();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    for step in 1..=60u32 {
        assert!(matches!(runner.step(), GameEvent::Tick));
        app.on_tick(Duration::from_secs(1));
        if step < 60 {
            assert_eq!(app.session.phase(), Phase::Playing, "step {step}");
        }
    }

    assert_eq!(app.session.seconds_remaining(), 0);
    assert_eq!(app.session.phase(), Phase::TimedOut);
    assert_eq!(app.notice, Some(Notice::TimeUp));

    app.on_tick(Duration::from_secs(10));
    assert_eq!(app.session.seconds_remaining(), 0);
}

#[test]
fn headless_difficulty_switch_resets_progress() {
    let mut app = App::new(GameSession::with_seed(Difficulty::Easy, 11).unwrap());

    let (tx, rx) = mpsc::channel();
    send_word(&tx, &app, "DOG");
    tx.send(GameEvent::Key(KeyEvent::new(
        KeyCode::Char('3'),
        KeyModifiers::NONE,
    )))
    .unwrap();
    tx.send(GameEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
        .unwrap();

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    drive(&mut app, &runner, 50);

    assert_eq!(app.session.difficulty(), Difficulty::Hard);
    assert_eq!(app.session.score(), 0);
    assert_eq!(app.session.word_list().len(), 6);
    assert_eq!(app.session.phase(), Phase::Playing);
}
