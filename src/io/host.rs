//! Terminal stand-ins for the console hardware.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    AudioSink, Clock, DisplaySurface, Glyph, InputSource, Movement, RandomSource, TextDisplay,
};
use crate::config::{AXIS_CENTER, AXIS_MAX, KEY_HOLD_MS, LCD_COLS, LCD_ROWS, VIEW_SIZE};

#[derive(Clone, Debug)]
pub struct MatrixBuffer {
    pub cells: [[bool; VIEW_SIZE]; VIEW_SIZE],
    pub brightness: u8,
}

impl MatrixBuffer {
    pub fn new() -> Self {
        Self {
            cells: [[false; VIEW_SIZE]; VIEW_SIZE],
            brightness: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }
}

impl Default for MatrixBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for MatrixBuffer {
    fn set_cell(&mut self, row: usize, col: usize, on: bool) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = on;
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LcdCell {
    Char(char),
    Glyph(u8),
}

const GLYPH_SLOTS: usize = 8;

/// 16x2 character display with eight programmable glyph slots.
#[derive(Clone, Debug)]
pub struct LcdBuffer {
    cells: [[LcdCell; LCD_COLS]; LCD_ROWS],
    cursor: (usize, usize),
    glyphs: [Option<Glyph>; GLYPH_SLOTS],
    pub backlight: u8,
}

impl LcdBuffer {
    pub fn new() -> Self {
        Self {
            cells: [[LcdCell::Char(' '); LCD_COLS]; LCD_ROWS],
            cursor: (0, 0),
            glyphs: [None; GLYPH_SLOTS],
            backlight: 0,
        }
    }

    pub fn row_text(&self, row: usize) -> String {
        let Some(cells) = self.cells.get(row) else {
            return String::new();
        };
        cells
            .iter()
            .map(|cell| match *cell {
                LcdCell::Char(ch) => ch,
                LcdCell::Glyph(id) => self
                    .glyphs
                    .get(id as usize)
                    .and_then(|g| g.map(|g| g.symbol))
                    .unwrap_or('?'),
            })
            .collect()
    }

    fn put(&mut self, cell: LcdCell) {
        let (col, row) = self.cursor;
        if row < LCD_ROWS && col < LCD_COLS {
            self.cells[row][col] = cell;
        }
        self.cursor.0 = col.saturating_add(1);
    }
}

impl Default for LcdBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay for LcdBuffer {
    fn clear(&mut self) {
        self.cells = [[LcdCell::Char(' '); LCD_COLS]; LCD_ROWS];
        self.cursor = (0, 0);
    }

    fn move_cursor(&mut self, col: usize, row: usize) {
        self.cursor = (col, row);
    }

    fn write_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.put(LcdCell::Char(ch));
        }
    }

    fn write_glyph(&mut self, id: u8) {
        self.put(LcdCell::Glyph(id));
    }

    fn define_glyph(&mut self, id: u8, glyph: Glyph) {
        if let Some(slot) = self.glyphs.get_mut(id as usize) {
            *slot = Some(glyph);
        }
    }

    fn scroll_left(&mut self) {
        for row in self.cells.iter_mut() {
            row.rotate_left(1);
        }
    }

    fn set_backlight(&mut self, level: u8) {
        self.backlight = level;
    }
}

#[derive(Clone, Debug, Default)]
pub struct Buzzer {
    tone: Option<u32>,
    ends_at: Option<Instant>,
}

impl Buzzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frequency currently sounding, if any.
    pub fn sounding(&self) -> Option<u32> {
        match self.ends_at {
            Some(end) if Instant::now() >= end => None,
            _ => self.tone,
        }
    }
}

impl AudioSink for Buzzer {
    fn play_tone(&mut self, freq: u32, duration: Option<Duration>) {
        self.tone = Some(freq);
        self.ends_at = duration.map(|d| Instant::now() + d);
    }

    fn stop(&mut self) {
        self.tone = None;
        self.ends_at = None;
    }
}

/// Keyboard-driven joystick. A key press deflects the stick for a short
/// hold window, so a tap reads as press-then-release like the real stick.
#[derive(Clone, Debug, Default)]
pub struct KeyboardStick {
    now: u64,
    deflection: Option<(Movement, u64)>,
    button_until: u64,
}

impl KeyboardStick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_now(&mut self, now: u64) {
        self.now = now;
    }

    pub fn push(&mut self, movement: Movement) {
        self.deflection = Some((movement, self.now + KEY_HOLD_MS));
    }

    pub fn press_button(&mut self) {
        self.button_until = self.now + KEY_HOLD_MS;
    }

    /// Centres the stick and lets go of the button.
    pub fn release(&mut self) {
        self.deflection = None;
        self.button_until = 0;
    }

    fn active(&self) -> Movement {
        match self.deflection {
            Some((movement, until)) if self.now < until => movement,
            _ => Movement::Neutral,
        }
    }
}

impl InputSource for KeyboardStick {
    fn read_axis_x(&mut self) -> i32 {
        match self.active() {
            Movement::Left => 0,
            Movement::Right => AXIS_MAX,
            _ => AXIS_CENTER,
        }
    }

    fn read_axis_y(&mut self) -> i32 {
        match self.active() {
            Movement::Up => 0,
            Movement::Down => AXIS_MAX,
            _ => AXIS_CENTER,
        }
    }

    fn read_button(&mut self) -> bool {
        self.now < self.button_until
    }
}

#[derive(Clone, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// `StdRng`-backed random source; reseedable like the hardware PRNG.
#[derive(Clone, Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(value: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(value),
        }
    }
}

impl RandomSource for StdRandom {
    fn seed(&mut self, value: u64) {
        self.rng = StdRng::seed_from_u64(value);
    }

    fn next_in_range(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcd_writes_clip_at_row_end() {
        let mut lcd = LcdBuffer::new();
        lcd.move_cursor(12, 1);
        lcd.write_text("ABCDEFG");
        assert_eq!(lcd.row_text(1), "            ABCD");
        assert_eq!(lcd.row_text(0), " ".repeat(LCD_COLS));
    }

    #[test]
    fn lcd_glyphs_render_their_symbol() {
        let mut lcd = LcdBuffer::new();
        lcd.define_glyph(
            2,
            Glyph {
                rows: [0; 8],
                symbol: '♥',
            },
        );
        lcd.write_glyph(2);
        lcd.write_glyph(5);
        assert!(lcd.row_text(0).starts_with("♥?"));
    }

    #[test]
    fn lcd_scroll_left_rotates_rows() {
        let mut lcd = LcdBuffer::new();
        lcd.write_text("AB");
        lcd.scroll_left();
        assert!(lcd.row_text(0).starts_with("B "));
        assert!(lcd.row_text(0).ends_with('A'));
    }

    #[test]
    fn stick_deflection_expires() {
        let mut stick = KeyboardStick::new();
        stick.set_now(1000);
        stick.push(Movement::Left);
        assert_eq!(stick.read_axis_x(), 0);
        assert_eq!(stick.read_axis_y(), AXIS_CENTER);
        stick.set_now(1000 + KEY_HOLD_MS);
        assert_eq!(stick.read_axis_x(), AXIS_CENTER);
    }

    #[test]
    fn release_centres_stick_and_drops_button() {
        let mut stick = KeyboardStick::new();
        stick.set_now(500);
        stick.push(Movement::Down);
        stick.press_button();
        stick.release();
        assert_eq!(stick.read_axis_y(), AXIS_CENTER);
        assert!(!stick.read_button());
    }

    #[test]
    fn seeded_random_is_reproducible_and_bounded() {
        let mut a = StdRandom::seeded(7);
        let mut b = StdRandom::seeded(7);
        for _ in 0..100 {
            let va = a.next_in_range(0, 4);
            assert!(va < 4);
            assert_eq!(va, b.next_in_range(0, 4));
        }
        assert_eq!(a.next_in_range(5, 5), 5);
    }

    #[test]
    fn buzzer_stop_silences() {
        let mut buzzer = Buzzer::new();
        buzzer.play_tone(440, None);
        assert_eq!(buzzer.sounding(), Some(440));
        buzzer.stop();
        assert_eq!(buzzer.sounding(), None);
    }
}
