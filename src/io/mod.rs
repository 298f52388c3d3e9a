//! Device boundary: the collaborators the console drives, plus input sampling.
//!
//! Everything behind these traits is a thin wrapper over hardware (or, on a
//! host, over the terminal). The simulation never calls them directly; it
//! emits [`crate::machine::Output`] requests that `ui::render` dispatches.

pub mod host;
pub mod store;

use std::time::Duration;

use thiserror::Error;

use crate::config::{AXIS_HIGH, AXIS_LOW, DEBOUNCE_MS};

pub use host::{Buzzer, KeyboardStick, LcdBuffer, MatrixBuffer, StdRandom, SystemClock};
pub use store::{FileStore, MemoryStore};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store access {offset}..{end} is outside the {size}-byte image")]
    OutOfRange { offset: usize, end: usize, size: usize },
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Bitmap display: one on/off LED per cell.
pub trait DisplaySurface {
    fn set_cell(&mut self, row: usize, col: usize, on: bool);
    fn set_brightness(&mut self, level: u8);
}

/// Custom character: eight 5-bit rows plus the symbol a host shows for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub rows: [u8; 8],
    pub symbol: char,
}

pub trait TextDisplay {
    fn clear(&mut self);
    fn move_cursor(&mut self, col: usize, row: usize);
    fn write_text(&mut self, text: &str);
    fn write_glyph(&mut self, id: u8);
    fn define_glyph(&mut self, id: u8, glyph: Glyph);
    fn scroll_left(&mut self);
    fn set_backlight(&mut self, level: u8);
}

pub trait AudioSink {
    /// `None` plays until [`AudioSink::stop`].
    fn play_tone(&mut self, freq: u32, duration: Option<Duration>);
    fn stop(&mut self);
}

pub trait InputSource {
    fn read_axis_x(&mut self) -> i32;
    fn read_axis_y(&mut self) -> i32;
    fn read_button(&mut self) -> bool;
}

pub trait NvStore {
    fn read_bytes(&mut self, offset: usize, len: usize) -> Result<Vec<u8>, StorageError>;
    fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<(), StorageError>;
}

pub trait RandomSource {
    fn seed(&mut self, value: u64);
    /// Uniform draw from `lo..hi` (upper bound exclusive).
    fn next_in_range(&mut self, lo: u32, hi: u32) -> u32;
}

pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Discrete stick event derived once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Movement {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Neutral,
}

impl Movement {
    /// Picks the axis with the larger deflection; anything inside the dead
    /// zone is `Neutral`.
    pub fn from_axes(x: i32, y: i32) -> Self {
        let horizontal = if x < AXIS_LOW {
            Some((Movement::Left, AXIS_LOW - x))
        } else if x > AXIS_HIGH {
            Some((Movement::Right, x - AXIS_HIGH))
        } else {
            None
        };
        let vertical = if y < AXIS_LOW {
            Some((Movement::Up, AXIS_LOW - y))
        } else if y > AXIS_HIGH {
            Some((Movement::Down, y - AXIS_HIGH))
        } else {
            None
        };
        match (horizontal, vertical) {
            (Some((h, dh)), Some((v, dv))) => {
                if dh >= dv {
                    h
                } else {
                    v
                }
            }
            (Some((h, _)), None) => h,
            (None, Some((v, _))) => v,
            (None, None) => Movement::Neutral,
        }
    }

    /// Row/column delta for a grid step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Movement::Up => (-1, 0),
            Movement::Down => (1, 0),
            Movement::Left => (0, -1),
            Movement::Right => (0, 1),
            Movement::Neutral => (0, 0),
        }
    }
}

/// Button debounce: the reported state only follows the raw reading once it
/// has been stable for the window.
#[derive(Clone, Debug)]
pub struct Debouncer {
    window: u64,
    last_raw: bool,
    changed_at: u64,
    stable: bool,
}

impl Debouncer {
    pub fn new(window: u64) -> Self {
        Self {
            window,
            last_raw: false,
            changed_at: 0,
            stable: false,
        }
    }

    pub fn update(&mut self, raw: bool, now: u64) -> bool {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.changed_at = now;
        }
        if now.saturating_sub(self.changed_at) >= self.window {
            self.stable = raw;
        }
        self.stable
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS)
    }
}

/// One tick's worth of input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSample {
    pub movement: Movement,
    pub button: bool,
}

pub fn sample_input(
    source: &mut impl InputSource,
    debounce: &mut Debouncer,
    now: u64,
) -> InputSample {
    let x = source.read_axis_x();
    let y = source.read_axis_y();
    let raw = source.read_button();
    InputSample {
        movement: Movement::from_axes(x, y),
        button: debounce.update(raw, now),
    }
}
