use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, mouse, resize)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Production event source using crossterm. Mouse capture must be enabled on
/// the terminal for mouse events to arrive.
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => GameEvent::Key(key),
                Ok(CtEvent::Mouse(mouse)) => GameEvent::Mouse(mouse),
                Ok(CtEvent::Resize(_, _)) => GameEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };

            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.ticker.interval()
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> GameEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => GameEvent::Tick,
        }
    }
}

/// Turns frame-rate ticks into whole seconds for the session countdown.
///
/// The clock only accumulates while armed. Re-arming discards any partial
/// second, so a countdown that starts over never inherits time from the
/// game it replaced.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecondClock {
    elapsed: Duration,
    armed: bool,
}

impl SecondClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from zero
    pub fn arm(&mut self) {
        self.elapsed = Duration::ZERO;
        self.armed = true;
    }

    /// Stop counting and drop any partial second
    pub fn disarm(&mut self) {
        self.elapsed = Duration::ZERO;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed elapsed wall time; returns how many whole seconds became due
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.armed {
            return 0;
        }

        self.elapsed += dt;
        let due = self.elapsed.as_secs();
        self.elapsed -= Duration::from_secs(due);
        due as u32
    }
}
