//! Top-level controller: one [`Mode`] at a time, driven once per tick by the
//! sampled stick/button input.
//!
//! Handlers are edge-triggered. A held direction acts once; it has to return
//! to neutral (or change) before it acts again. The bomb button is the only
//! level-triggered input, and only the game reads it.

mod menu;
mod play;
mod screens;

use std::time::Duration;

pub use crate::output::{MenuItem, Output, Screen, SettingsItem};
pub use screens::{ABOUT_CAPTION, about_window};

use crate::config::{SCROLL_MS, WELCOME_MS};
use crate::game::{Game, IntervalTimer, Leaderboard, Profile, Settings};
use crate::io::{InputSample, Movement, NvStore, RandomSource, StorageError};
use crate::storage::Persistence;

/// The active screen and the cursor state it owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Menu(MenuItem),
    Settings(SettingsItem),
    SettingsInput { item: SettingsItem, name_cursor: usize },
    About { offset: usize },
    Game,
    EndGame,
    Highscores { slot: usize },
    ResetHighscoresConfirm,
    HowTo,
    DifficultySelect,
}

pub struct Machine<S, R> {
    mode: Mode,
    settings: Settings,
    profile: Profile,
    leaderboard: Leaderboard,
    persistence: Persistence<S>,
    rng: R,
    game: Option<Game>,
    last_movement: Movement,
    scroll: IntervalTimer,
}

impl<S: NvStore, R: RandomSource> Machine<S, R> {
    /// Loads persisted state, seeds the map generator once for the whole
    /// session, and queues the welcome banner.
    pub fn boot(store: S, mut rng: R, seed: u64, now: u64, out: &mut Vec<Output>) -> Self {
        rng.seed(seed);
        let mut persistence = Persistence::new(store);
        if let Err(err) = persistence.ensure_initialized() {
            log::warn!("could not initialise store: {err}");
        }
        let settings = persistence.load_settings().unwrap_or_else(|err| {
            log::warn!("could not load settings: {err}");
            Settings::default()
        });
        let leaderboard = persistence.load_leaderboard().unwrap_or_else(|err| {
            log::warn!("could not load leaderboard: {err}");
            Leaderboard::new()
        });
        log::info!(
            "booted: difficulty {}, player {}",
            settings.difficulty.label(),
            settings.name_str()
        );

        out.push(Output::LoadGlyphs);
        out.push(Output::TextBrightness(settings.text_brightness));
        out.push(Output::MatrixBrightness(settings.matrix_brightness));
        out.push(Output::FillMatrix(false));
        out.push(Output::Screen(Screen::Welcome));
        out.push(Output::Hold(Duration::from_millis(WELCOME_MS)));
        out.push(Output::Screen(Screen::Menu(MenuItem::StartGame)));

        Self {
            mode: Mode::Menu(MenuItem::StartGame),
            profile: settings.difficulty.profile(),
            settings,
            leaderboard,
            persistence,
            rng,
            game: None,
            last_movement: Movement::Neutral,
            scroll: IntervalTimer::new(SCROLL_MS, now),
        }
    }

    pub fn tick(&mut self, now: u64, input: InputSample, out: &mut Vec<Output>) {
        let movement = input.movement;
        let changed = movement != self.last_movement;
        self.last_movement = movement;

        match self.mode {
            Mode::Game => self.play(now, input, changed, out),
            Mode::About { offset } => self.about(offset, movement, changed, now, out),
            _ if !changed => {}
            Mode::Menu(item) => self.menu(item, movement, now, out),
            Mode::Settings(item) => self.settings_menu(item, movement, out),
            Mode::SettingsInput { item, name_cursor } => {
                self.settings_input(item, name_cursor, movement, out)
            }
            Mode::EndGame => self.end_game(out),
            Mode::Highscores { slot } => self.highscores(slot, movement, out),
            Mode::ResetHighscoresConfirm => self.reset_confirm(movement, out),
            Mode::HowTo => {
                if movement == Movement::Left {
                    self.enter_menu(MenuItem::HowTo, out);
                }
            }
            Mode::DifficultySelect => self.difficulty_select(movement, out),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn game_mut(&mut self) -> Option<&mut Game> {
        self.game.as_mut()
    }

    #[cfg(test)]
    pub(crate) fn persistence_mut(&mut self) -> &mut Persistence<S> {
        &mut self.persistence
    }

    fn set_mode(&mut self, mode: Mode) {
        log::debug!("mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    fn reload_leaderboard(&mut self) {
        match self.persistence.load_leaderboard() {
            Ok(board) => self.leaderboard = board,
            Err(err) => log::warn!("could not reload leaderboard: {err}"),
        }
    }

    fn report(&self, result: Result<(), StorageError>, what: &str) {
        match result {
            Ok(()) => log::info!("saved {what}"),
            Err(err) => log::warn!("could not save {what}: {err}"),
        }
    }
}
