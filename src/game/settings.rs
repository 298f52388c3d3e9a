use crate::config::{LCD_BRIGHTNESS_RANGE, MATRIX_BRIGHTNESS_RANGE};
use crate::game::Difficulty;
use crate::game::leaderboard::NAME_LEN;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub text_brightness: u8,
    pub matrix_brightness: u8,
    pub sound: bool,
    pub name: [u8; NAME_LEN],
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            text_brightness: 5,
            matrix_brightness: 8,
            sound: true,
            name: *b"AAA",
            difficulty: Difficulty::Medium,
        }
    }
}

fn step_within(value: u8, delta: i8, (lo, hi): (u8, u8)) -> u8 {
    (i16::from(value) + i16::from(delta)).clamp(i16::from(lo), i16::from(hi)) as u8
}

impl Settings {
    pub fn step_text_brightness(&mut self, delta: i8) -> bool {
        let next = step_within(self.text_brightness, delta, LCD_BRIGHTNESS_RANGE);
        let changed = next != self.text_brightness;
        self.text_brightness = next;
        changed
    }

    pub fn step_matrix_brightness(&mut self, delta: i8) -> bool {
        let next = step_within(self.matrix_brightness, delta, MATRIX_BRIGHTNESS_RANGE);
        let changed = next != self.matrix_brightness;
        self.matrix_brightness = next;
        changed
    }

    /// Moves the letter at `slot` within 'A'..='Z', no wraparound.
    pub fn step_letter(&mut self, slot: usize, delta: i8) -> bool {
        let Some(letter) = self.name.get_mut(slot) else {
            return false;
        };
        let next = step_within(*letter, delta, (b'A', b'Z'));
        let changed = next != *letter;
        *letter = next;
        changed
    }

    /// Clamps anything a raw store could hand back into the valid ranges.
    pub fn sanitized(mut self) -> Self {
        self.text_brightness = step_within(self.text_brightness, 0, LCD_BRIGHTNESS_RANGE);
        self.matrix_brightness = step_within(self.matrix_brightness, 0, MATRIX_BRIGHTNESS_RANGE);
        for letter in self.name.iter_mut() {
            if !letter.is_ascii_uppercase() {
                *letter = b'A';
            }
        }
        self
    }

    pub fn name_str(&self) -> String {
        self.name.iter().map(|b| *b as char).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn letters_clamp_at_both_ends() {
        let mut s = Settings::default();
        assert!(!s.step_letter(0, -1));
        assert_eq!(s.name[0], b'A');
        s.name[2] = b'Z';
        assert!(!s.step_letter(2, 1));
        assert!(s.step_letter(2, -1));
        assert_eq!(s.name_str(), "AAY");
        assert!(!s.step_letter(3, 1));
    }

    #[test]
    fn sanitize_repairs_erased_values() {
        let raw = Settings {
            text_brightness: 0xFF,
            matrix_brightness: 0,
            sound: true,
            name: [0xFF, b'Q', b'a'],
            difficulty: Difficulty::Low,
        };
        let clean = raw.sanitized();
        assert_eq!(clean.text_brightness, 10);
        assert_eq!(clean.matrix_brightness, 1);
        assert_eq!(clean.name_str(), "AQA");
    }

    proptest! {
        #[test]
        fn prop_brightness_stays_in_range(
            steps in proptest::collection::vec(prop_oneof![Just(1i8), Just(-1i8)], 0..64)
        ) {
            let mut s = Settings::default();
            for delta in steps {
                let _ = s.step_text_brightness(delta);
                let _ = s.step_matrix_brightness(delta);
                prop_assert!((1..=10).contains(&s.text_brightness));
                prop_assert!((1..=15).contains(&s.matrix_brightness));
            }
        }
    }
}
