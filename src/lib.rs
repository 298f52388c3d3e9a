//! Matrix Bomber: a bomb-placement game for an 8x8 LED matrix, a 16x2 text
//! display, a two-axis stick and a buzzer, with a terminal host that emulates
//! the hardware.

pub mod app;
pub mod config;
pub mod game;
pub mod io;
pub mod machine;
pub mod output;
pub mod storage;
pub mod ui;
