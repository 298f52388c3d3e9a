use std::io::{self as stdio, stdout, Stdout};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::{Cli, FRAME_POLL_MS};
use crate::io::{
    sample_input, Buzzer, Clock, Debouncer, FileStore, KeyboardStick, LcdBuffer, MatrixBuffer,
    Movement, StdRandom, SystemClock,
};
use crate::machine::{Machine, Output};
use crate::ui::draw_console;
use crate::ui::render::dispatch;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Where key events come from.
pub trait EventSource {
    fn poll(&mut self, timeout: Duration) -> stdio::Result<bool>;
    fn read(&mut self) -> stdio::Result<Event>;
}

/// crossterm's global terminal event queue.
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll(&mut self, timeout: Duration) -> stdio::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> stdio::Result<Event> {
        event::read()
    }
}

/// Discards everything already queued. Returns how many events were dropped.
pub fn drain_events(source: &mut impl EventSource) -> stdio::Result<usize> {
    let mut dropped = 0;
    while source.poll(Duration::ZERO)? {
        let _ = source.read()?;
        dropped += 1;
    }
    Ok(dropped)
}

/// Emulated peripherals the machine's output is rendered into.
struct Console {
    matrix: MatrixBuffer,
    lcd: LcdBuffer,
    buzzer: Buzzer,
}

impl Console {
    fn new() -> Self {
        Self {
            matrix: MatrixBuffer::new(),
            lcd: LcdBuffer::new(),
            buzzer: Buzzer::new(),
        }
    }

    fn draw(&self, terminal: &mut Term) -> Result<()> {
        terminal
            .draw(|frame| draw_console(frame, &self.matrix, &self.lcd, &self.buzzer))
            .context("drawing console")?;
        Ok(())
    }

    /// Applies queued requests in order. A hold shows what is on screen so
    /// far and blocks before the rest is applied. Returns whether any hold
    /// ran.
    fn apply(&mut self, outputs: &mut Vec<Output>, terminal: &mut Term) -> Result<bool> {
        let mut held = false;
        for output in outputs.drain(..) {
            match output {
                Output::Hold(duration) => {
                    self.draw(terminal)?;
                    thread::sleep(duration);
                    held = true;
                }
                other => dispatch(&other, &mut self.matrix, &mut self.lcd, &mut self.buzzer),
            }
        }
        Ok(held)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let store = FileStore::open(&cli.eeprom)
        .with_context(|| format!("opening store {}", cli.eeprom.display()))?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("store {}, seed {seed}", cli.eeprom.display());

    let mut tui = TuiGuard::new()?;
    run_loop(tui.terminal_mut(), store, seed)
}

fn run_loop(terminal: &mut Term, store: FileStore, seed: u64) -> Result<()> {
    let clock = SystemClock::new();
    let mut console = Console::new();
    let mut stick = KeyboardStick::new();
    let mut debounce = Debouncer::default();
    let mut events = TerminalEvents;
    let mut outputs = Vec::new();

    let rng = StdRandom::from_entropy();
    let mut machine = Machine::boot(store, rng, seed, clock.now_millis(), &mut outputs);
    if console.apply(&mut outputs, terminal)? {
        ignore_held_input(&mut events, &mut stick)?;
    }

    loop {
        let now = clock.now_millis();
        stick.set_now(now);

        if events.poll(Duration::from_millis(FRAME_POLL_MS))? {
            if let Event::Key(key) = events.read()? {
                if key.kind != KeyEventKind::Release {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        break;
                    }
                    handle_input(key.code, &mut stick);
                }
            }
        }

        let input = sample_input(&mut stick, &mut debounce, now);
        machine.tick(now, input, &mut outputs);
        if console.apply(&mut outputs, terminal)? {
            ignore_held_input(&mut events, &mut stick)?;
        }
        console.draw(terminal)?;
    }
    log::info!("quit requested");
    Ok(())
}

/// Blocking pauses take no input: keys typed during one are dropped, and so
/// is any deflection or press still pending from before it.
fn ignore_held_input(events: &mut impl EventSource, stick: &mut KeyboardStick) -> Result<()> {
    let dropped = drain_events(events).context("draining input after hold")?;
    if dropped > 0 {
        log::debug!("dropped {dropped} events queued during hold");
    }
    stick.release();
    Ok(())
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn handle_input(code: KeyCode, stick: &mut KeyboardStick) {
    let movement = match code {
        KeyCode::Left | KeyCode::Char('a') => Movement::Left,
        KeyCode::Right | KeyCode::Char('d') => Movement::Right,
        KeyCode::Up | KeyCode::Char('w') => Movement::Up,
        KeyCode::Down | KeyCode::Char('s') => Movement::Down,
        KeyCode::Char(' ') => {
            stick.press_button();
            return;
        }
        _ => return,
    };
    stick.push(movement);
}
