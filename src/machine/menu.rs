use std::time::Duration;

use crate::config::{MOVE_CLICK_HZ, MOVE_CLICK_MS};
use crate::io::{Movement, NvStore, RandomSource};
use crate::machine::{Machine, MenuItem, Mode, Output, Screen, SettingsItem};

impl<S: NvStore, R: RandomSource> Machine<S, R> {
    pub(super) fn click(&self, out: &mut Vec<Output>) {
        if self.settings.sound {
            out.push(Output::Tone {
                freq: MOVE_CLICK_HZ,
                duration: Some(Duration::from_millis(MOVE_CLICK_MS)),
            });
        }
    }

    pub(super) fn enter_menu(&mut self, item: MenuItem, out: &mut Vec<Output>) {
        self.set_mode(Mode::Menu(item));
        out.push(Output::FillMatrix(false));
        out.push(Output::Screen(Screen::Menu(item)));
    }

    pub(super) fn menu(
        &mut self,
        item: MenuItem,
        movement: Movement,
        now: u64,
        out: &mut Vec<Output>,
    ) {
        let next = match movement {
            Movement::Up => item.prev(),
            Movement::Down => item.next(),
            Movement::Right => {
                self.activate(item, now, out);
                return;
            }
            Movement::Left | Movement::Neutral => return,
        };
        if next != item {
            self.mode = Mode::Menu(next);
            self.click(out);
            out.push(Output::Screen(Screen::Menu(next)));
        }
    }

    fn activate(&mut self, item: MenuItem, now: u64, out: &mut Vec<Output>) {
        match item {
            MenuItem::StartGame => self.start_game(now, out),
            MenuItem::Settings => {
                let first = SettingsItem::TextBrightness;
                self.set_mode(Mode::Settings(first));
                out.push(Output::Screen(Screen::Settings(first)));
            }
            MenuItem::About => {
                self.scroll.reset(now);
                self.set_mode(Mode::About { offset: 0 });
                out.push(Output::Screen(Screen::About { offset: 0 }));
            }
            MenuItem::Highscores => {
                self.reload_leaderboard();
                self.set_mode(Mode::Highscores { slot: 0 });
                self.push_highscore(0, out);
            }
            MenuItem::ResetHighscores => {
                self.set_mode(Mode::ResetHighscoresConfirm);
                out.push(Output::Screen(Screen::ResetConfirm));
            }
            MenuItem::HowTo => {
                self.set_mode(Mode::HowTo);
                out.push(Output::Screen(Screen::HowTo));
            }
            MenuItem::Difficulty => {
                self.set_mode(Mode::DifficultySelect);
                out.push(Output::Screen(Screen::Difficulty(self.settings.difficulty)));
            }
        }
    }

    pub(super) fn settings_menu(
        &mut self,
        item: SettingsItem,
        movement: Movement,
        out: &mut Vec<Output>,
    ) {
        match movement {
            Movement::Left => self.enter_menu(MenuItem::Settings, out),
            Movement::Right => {
                self.set_mode(Mode::SettingsInput {
                    item,
                    name_cursor: 0,
                });
                if item == SettingsItem::MatrixBrightness {
                    out.push(Output::FillMatrix(true));
                }
                self.push_settings_input(item, 0, out);
            }
            Movement::Up | Movement::Down => {
                let next = if movement == Movement::Up {
                    item.prev()
                } else {
                    item.next()
                };
                if next != item {
                    self.mode = Mode::Settings(next);
                    self.click(out);
                    out.push(Output::Screen(Screen::Settings(next)));
                }
            }
            Movement::Neutral => {}
        }
    }

    pub(super) fn settings_input(
        &mut self,
        item: SettingsItem,
        name_cursor: usize,
        movement: Movement,
        out: &mut Vec<Output>,
    ) {
        let delta: i8 = match movement {
            Movement::Up => 1,
            Movement::Down => -1,
            _ => 0,
        };
        match (item, movement) {
            (SettingsItem::Name, Movement::Left) if name_cursor > 0 => {
                self.mode = Mode::SettingsInput {
                    item,
                    name_cursor: name_cursor - 1,
                };
                self.push_settings_input(item, name_cursor - 1, out);
            }
            (SettingsItem::Name, Movement::Right) => {
                let cursor = (name_cursor + 1).min(self.settings.name.len() - 1);
                if cursor != name_cursor {
                    self.mode = Mode::SettingsInput {
                        item,
                        name_cursor: cursor,
                    };
                    self.push_settings_input(item, cursor, out);
                }
            }
            (_, Movement::Left) => self.leave_settings_input(item, out),
            (_, Movement::Right | Movement::Neutral) => {}
            (SettingsItem::TextBrightness, _) => {
                if self.settings.step_text_brightness(delta) {
                    out.push(Output::TextBrightness(self.settings.text_brightness));
                    self.push_settings_input(item, name_cursor, out);
                }
            }
            (SettingsItem::MatrixBrightness, _) => {
                if self.settings.step_matrix_brightness(delta) {
                    out.push(Output::MatrixBrightness(self.settings.matrix_brightness));
                    self.push_settings_input(item, name_cursor, out);
                }
            }
            (SettingsItem::Sound, _) => {
                self.settings.sound = !self.settings.sound;
                self.click(out);
                self.push_settings_input(item, name_cursor, out);
            }
            (SettingsItem::Name, _) => {
                if self.settings.step_letter(name_cursor, delta) {
                    self.push_settings_input(item, name_cursor, out);
                }
            }
        }
    }

    fn leave_settings_input(&mut self, item: SettingsItem, out: &mut Vec<Output>) {
        let saved = self.persistence.save_settings(&self.settings);
        self.report(saved, "settings");
        if item == SettingsItem::MatrixBrightness {
            out.push(Output::FillMatrix(false));
        }
        self.set_mode(Mode::Settings(item));
        out.push(Output::Screen(Screen::Settings(item)));
    }

    fn push_settings_input(&self, item: SettingsItem, name_cursor: usize, out: &mut Vec<Output>) {
        out.push(Output::Screen(Screen::SettingsInput {
            item,
            settings: self.settings,
            name_cursor,
        }));
    }
}
