use crate::config::LCD_COLS;
use crate::game::leaderboard::SLOTS;
use crate::game::Entry;
use crate::io::{Movement, NvStore, RandomSource};
use crate::machine::{Machine, MenuItem, Mode, Output, Screen};

pub const ABOUT_CAPTION: &str = concat!(
    "Matrix Bomber - clear every wall before the walls clear you - ",
    "joystick to move, button to drop a bomb"
);

/// Next scroll position; restarts once fewer than a display width of
/// characters remain.
pub fn next_scroll_offset(offset: usize) -> usize {
    let next = offset + 1;
    if ABOUT_CAPTION.chars().count().saturating_sub(next) < LCD_COLS {
        0
    } else {
        next
    }
}

/// The slice of the caption visible at `offset`.
pub fn about_window(offset: usize) -> String {
    ABOUT_CAPTION.chars().skip(offset).take(LCD_COLS).collect()
}

impl<S: NvStore, R: RandomSource> Machine<S, R> {
    pub(super) fn about(
        &mut self,
        offset: usize,
        movement: Movement,
        changed: bool,
        now: u64,
        out: &mut Vec<Output>,
    ) {
        if changed && movement == Movement::Left {
            self.enter_menu(MenuItem::About, out);
            return;
        }
        if self.scroll.poll(now) {
            let offset = next_scroll_offset(offset);
            self.mode = Mode::About { offset };
            out.push(Output::Screen(Screen::About { offset }));
        }
    }

    pub(super) fn highscores(&mut self, slot: usize, movement: Movement, out: &mut Vec<Output>) {
        let next = match movement {
            Movement::Left => {
                self.enter_menu(MenuItem::Highscores, out);
                return;
            }
            Movement::Up => slot.saturating_sub(1),
            Movement::Down => (slot + 1).min(SLOTS - 1),
            Movement::Right | Movement::Neutral => return,
        };
        if next != slot {
            self.mode = Mode::Highscores { slot: next };
            self.click(out);
            self.push_highscore(next, out);
        }
    }

    pub(super) fn push_highscore(&self, slot: usize, out: &mut Vec<Output>) {
        let entry = self.leaderboard.get(slot).copied().unwrap_or(Entry::EMPTY);
        out.push(Output::Screen(Screen::Highscores { slot, entry }));
    }

    pub(super) fn reset_confirm(&mut self, movement: Movement, out: &mut Vec<Output>) {
        match movement {
            Movement::Left => self.enter_menu(MenuItem::ResetHighscores, out),
            Movement::Right => {
                self.leaderboard.reset();
                let saved = self.persistence.save_leaderboard(&self.leaderboard);
                self.report(saved, "reset leaderboard");
                self.enter_menu(MenuItem::Highscores, out);
            }
            _ => {}
        }
    }

    pub(super) fn difficulty_select(&mut self, movement: Movement, out: &mut Vec<Output>) {
        let current = self.settings.difficulty;
        let next = match movement {
            Movement::Left => {
                let saved = self.persistence.save_difficulty(current);
                self.report(saved, "difficulty");
                self.enter_menu(MenuItem::Difficulty, out);
                return;
            }
            Movement::Up => current.raise(),
            Movement::Down => current.lower(),
            Movement::Right | Movement::Neutral => return,
        };
        if next != current {
            self.settings.difficulty = next;
            // takes effect from the next game start
            self.profile = next.profile();
            self.click(out);
            out.push(Output::Screen(Screen::Difficulty(next)));
        }
    }

    pub(super) fn end_game(&mut self, out: &mut Vec<Output>) {
        self.game = None;
        self.enter_menu(MenuItem::StartGame, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_wraps_before_running_out_of_text() {
        let len = ABOUT_CAPTION.chars().count();
        let last = len - LCD_COLS;
        assert_eq!(next_scroll_offset(last - 1), last);
        assert_eq!(next_scroll_offset(last), 0);
        assert_eq!(next_scroll_offset(0), 1);
        assert_eq!(about_window(last).chars().count(), LCD_COLS);
        assert!(about_window(0).starts_with("Matrix Bomber"));
    }
}
