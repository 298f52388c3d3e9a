//! Render requests. The game and the mode machine both speak this
//! vocabulary; `ui::render` is the only consumer.

mod items;

use std::time::Duration;

use crate::game::{Difficulty, Entry, Settings, Surface};

pub use items::{MenuItem, SettingsItem};

/// What the text display should show. Each variant carries everything
/// needed to draw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Menu(MenuItem),
    Settings(SettingsItem),
    SettingsInput {
        item: SettingsItem,
        settings: Settings,
        name_cursor: usize,
    },
    About {
        offset: usize,
    },
    HowTo,
    Highscores {
        slot: usize,
        entry: Entry,
    },
    ResetConfirm,
    Difficulty(Difficulty),
    /// Static labels; values arrive as `Stats`/`Lives`.
    Playing,
    FinalScore {
        score: u16,
        rank: Option<usize>,
    },
    Won {
        score: u16,
    },
    GameOver {
        score: u16,
    },
}

/// Render/device requests produced by one tick, applied in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Screen(Screen),
    /// Full 8x8 redraw.
    Viewport {
        surface: Surface,
        player_on: bool,
        bomb_on: bool,
    },
    /// Single matrix cell, for blink toggles.
    Cell {
        row: usize,
        col: usize,
        on: bool,
    },
    FillMatrix(bool),
    Stats {
        time: u16,
        score: u16,
    },
    Lives(u8),
    TextBrightness(u8),
    MatrixBrightness(u8),
    Tone {
        freq: u32,
        duration: Option<Duration>,
    },
    Silence,
    LoadGlyphs,
    /// Blocking pause; the loop takes no input while it runs.
    Hold(Duration),
}
