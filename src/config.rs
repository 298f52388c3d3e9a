// Shared game/device constants.
use std::path::PathBuf;

use clap::Parser;

pub const GRID_SIZE: usize = 16;
pub const VIEW_SIZE: usize = 8;
pub const VIEW_OFFSET: i32 = 3; // player sits at surface cell (3, 3)
pub const SPAWN: (usize, usize) = (1, 1);

pub const LCD_COLS: usize = 16;
pub const LCD_ROWS: usize = 2;

// Joystick axes read 0..=1023, centred near 512.
pub const AXIS_MAX: i32 = 1023;
pub const AXIS_CENTER: i32 = 512;
pub const AXIS_LOW: i32 = 300;
pub const AXIS_HIGH: i32 = 700;

pub const DEBOUNCE_MS: u64 = 50;
pub const PLAYER_BLINK_MS: u64 = 400;
pub const SCROLL_MS: u64 = 350;
pub const SECOND_MS: u64 = 1000;
pub const WELCOME_MS: u64 = 2000;
pub const END_HOLD_MS: u64 = 2500;

pub const PLAY_TIME_WRAP: u16 = 1000;
pub const ALARM_HZ: u32 = 880;
pub const MOVE_CLICK_HZ: u32 = 1200;
pub const MOVE_CLICK_MS: u64 = 20;

pub const LCD_BRIGHTNESS_RANGE: (u8, u8) = (1, 10);
pub const MATRIX_BRIGHTNESS_RANGE: (u8, u8) = (1, 15);

pub const EEPROM_SIZE: usize = 1024;

// How long a single key press keeps the virtual stick deflected.
pub const KEY_HOLD_MS: u64 = 120;
pub const FRAME_POLL_MS: u64 = 15;

/// Host options for running the console on a terminal.
#[derive(Debug, Parser)]
#[command(
    name = "matrix-bomber",
    about = "Bomb-placement game on an 8x8 matrix and 16x2 text display"
)]
pub struct Cli {
    /// File that backs the non-volatile store.
    #[arg(long, default_value = "matrix-bomber.eeprom")]
    pub eeprom: PathBuf,

    /// Fixed map seed; drawn from entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log output file (the terminal is owned by the UI).
    #[arg(long, default_value = "matrix-bomber.log")]
    pub log_file: PathBuf,
}
