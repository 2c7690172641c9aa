use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::{Duration, Instant},
};
use tracing::info;
use wordsearch::{
    app::{App, AppAction},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    difficulty::Difficulty,
    logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, GameEvent, Runner, Ticker},
    session::GameSession,
};

/// word search puzzle for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Find every hidden word by dragging across the letter grid with the mouse before the 60 second countdown runs out."
)]
pub struct Cli {
    /// word list to play with (defaults to the configured difficulty)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// seed for the grid generator, for reproducible puzzles
    #[clap(long)]
    seed: Option<u64>,

    /// remember the chosen difficulty as the default for future games
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// CLI flags win over the config file
    fn resolve(&self, config: &Config) -> Config {
        Config {
            difficulty: self.difficulty.unwrap_or(config.difficulty),
            ..config.clone()
        }
    }

    fn new_session(&self, difficulty: Difficulty) -> Result<GameSession, Box<dyn Error>> {
        let session = match self.seed {
            Some(seed) => GameSession::with_seed(difficulty, seed)?,
            None => GameSession::new(difficulty)?,
        };
        Ok(session)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        logging::init_tracing(&path);
    }

    let store = FileConfigStore::new();
    let config = cli.resolve(&store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved config");
    }

    let mut app = App::new(cli.new_session(config.difficulty)?);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(config.tick_rate_ms.max(1))),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    let mut last_frame = Instant::now();

    loop {
        let size = terminal.size()?;
        app.viewport = ratatui::layout::Rect::new(0, 0, size.width, size.height);
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            GameEvent::Tick => {
                let now = Instant::now();
                app.on_tick(now - last_frame);
                last_frame = now;
            }
            GameEvent::Resize => {}
            GameEvent::Mouse(mouse) => app.on_mouse(mouse),
            GameEvent::Key(key) => {
                if app.on_key(key) == AppAction::Quit {
                    break;
                }
            }
        }
    }

    info!("quit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["wordsearch"]);
        assert_eq!(cli.difficulty, None);
        assert_eq!(cli.seed, None);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_difficulty() {
        let cli = Cli::parse_from(["wordsearch", "-d", "hard"]);
        assert_eq!(cli.difficulty, Some(Difficulty::Hard));

        let cli = Cli::parse_from(["wordsearch", "--difficulty", "medium"]);
        assert_eq!(cli.difficulty, Some(Difficulty::Medium));
    }

    #[test]
    fn test_cli_rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["wordsearch", "-d", "extreme"]).is_err());
    }

    #[test]
    fn test_cli_seed_and_save() {
        let cli = Cli::parse_from(["wordsearch", "--seed", "42", "--save-config"]);
        assert_eq!(cli.seed, Some(42));
        assert!(cli.save_config);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config {
            difficulty: Difficulty::Medium,
            tick_rate_ms: 50,
        };

        let cli = Cli::parse_from(["wordsearch"]);
        assert_eq!(cli.resolve(&config), config);

        let cli = Cli::parse_from(["wordsearch", "-d", "easy"]);
        let resolved = cli.resolve(&config);
        assert_eq!(resolved.difficulty, Difficulty::Easy);
        assert_eq!(resolved.tick_rate_ms, 50);
    }

    #[test]
    fn test_seeded_sessions_repeat() {
        let cli = Cli::parse_from(["wordsearch", "--seed", "7"]);
        let a = cli.new_session(Difficulty::Hard).unwrap();
        let b = cli.new_session(Difficulty::Hard).unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_tui_loop_quits_on_escape() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        use ratatui::backend::TestBackend;
        use std::sync::mpsc;
        use wordsearch::runtime::TestEventSource;

        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(5)),
        );

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::new(GameSession::with_seed(Difficulty::Easy, 1).unwrap());

        start_tui(&mut terminal, &mut app, &runner).unwrap();
        assert_eq!(app.viewport.width, 80);
    }
}
