//! Typed view of the non-volatile store.
//!
//! Fields live at fixed offsets, each one following the previous:
//!
//! | offset | size | field                         |
//! |--------|------|-------------------------------|
//! | 0      | 1    | layout sentinel               |
//! | 1      | 1    | text display brightness       |
//! | 2      | 1    | matrix brightness             |
//! | 3      | 1    | sound on/off                  |
//! | 4      | 1    | difficulty level              |
//! | 5      | 10   | five scores, u16 big-endian   |
//! | 15     | 15   | five 3-letter names           |
//! | 30     | 3    | player name                   |

use crate::game::leaderboard::{NAME_LEN, PLACEHOLDER, SLOTS};
use crate::game::{Difficulty, Entry, Leaderboard, Settings};
use crate::io::{NvStore, StorageError};

/// Written once the layout holds real values; anything else is first boot.
pub const SENTINEL: u8 = 0xB7;

const SCORE_LEN: usize = 2;

pub const SENTINEL_AT: usize = 0;
pub const TEXT_BRIGHTNESS_AT: usize = SENTINEL_AT + 1;
pub const MATRIX_BRIGHTNESS_AT: usize = TEXT_BRIGHTNESS_AT + 1;
pub const SOUND_AT: usize = MATRIX_BRIGHTNESS_AT + 1;
pub const DIFFICULTY_AT: usize = SOUND_AT + 1;
pub const SCORES_AT: usize = DIFFICULTY_AT + 1;
pub const NAMES_AT: usize = SCORES_AT + SLOTS * SCORE_LEN;
pub const PLAYER_NAME_AT: usize = NAMES_AT + SLOTS * NAME_LEN;
pub const LAYOUT_END: usize = PLAYER_NAME_AT + NAME_LEN;

pub struct Persistence<S> {
    store: S,
}

impl<S: NvStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Writes defaults on first boot. Returns `true` if it had to.
    pub fn ensure_initialized(&mut self) -> Result<bool, StorageError> {
        if self.read_u8(SENTINEL_AT)? == SENTINEL {
            return Ok(false);
        }
        log::info!("store has no sentinel, writing defaults");
        let defaults = Settings::default();
        self.save_settings(&defaults)?;
        self.save_difficulty(defaults.difficulty)?;
        self.save_leaderboard(&Leaderboard::new())?;
        self.store.write_bytes(SENTINEL_AT, &[SENTINEL])?;
        Ok(true)
    }

    pub fn load_settings(&mut self) -> Result<Settings, StorageError> {
        let level = self.read_u8(DIFFICULTY_AT)?;
        let difficulty = Difficulty::from_level(level).unwrap_or_else(|| {
            log::warn!("stored difficulty {level} is invalid, using default");
            Difficulty::default()
        });
        let name = self.store.read_bytes(PLAYER_NAME_AT, NAME_LEN)?;
        let raw = Settings {
            text_brightness: self.read_u8(TEXT_BRIGHTNESS_AT)?,
            matrix_brightness: self.read_u8(MATRIX_BRIGHTNESS_AT)?,
            sound: self.read_u8(SOUND_AT)? != 0,
            name: to_name(&name, b'A'),
            difficulty,
        };
        Ok(raw.sanitized())
    }

    /// Brightness, sound and name; difficulty has its own save point.
    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), StorageError> {
        self.store
            .write_bytes(TEXT_BRIGHTNESS_AT, &[settings.text_brightness])?;
        self.store
            .write_bytes(MATRIX_BRIGHTNESS_AT, &[settings.matrix_brightness])?;
        self.store.write_bytes(SOUND_AT, &[u8::from(settings.sound)])?;
        self.store.write_bytes(PLAYER_NAME_AT, &settings.name)?;
        log::debug!("saved settings {settings:?}");
        Ok(())
    }

    pub fn save_difficulty(&mut self, difficulty: Difficulty) -> Result<(), StorageError> {
        self.store.write_bytes(DIFFICULTY_AT, &[difficulty.level()])
    }

    pub fn load_leaderboard(&mut self) -> Result<Leaderboard, StorageError> {
        let scores = self.store.read_bytes(SCORES_AT, SLOTS * SCORE_LEN)?;
        let names = self.store.read_bytes(NAMES_AT, SLOTS * NAME_LEN)?;
        let mut entries = [Entry::EMPTY; SLOTS];
        for (i, entry) in entries.iter_mut().enumerate() {
            let s = &scores[i * SCORE_LEN..(i + 1) * SCORE_LEN];
            entry.score = u16::from_be_bytes([s[0], s[1]]);
            entry.name = to_name(&names[i * NAME_LEN..(i + 1) * NAME_LEN], PLACEHOLDER[0]);
        }
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(Leaderboard::from_entries(entries))
    }

    pub fn save_leaderboard(&mut self, board: &Leaderboard) -> Result<(), StorageError> {
        let mut scores = Vec::with_capacity(SLOTS * SCORE_LEN);
        let mut names = Vec::with_capacity(SLOTS * NAME_LEN);
        for entry in board.entries() {
            scores.extend_from_slice(&entry.score.to_be_bytes());
            names.extend_from_slice(&entry.name);
        }
        self.store.write_bytes(SCORES_AT, &scores)?;
        self.store.write_bytes(NAMES_AT, &names)?;
        log::debug!("saved leaderboard");
        Ok(())
    }

    fn read_u8(&mut self, offset: usize) -> Result<u8, StorageError> {
        let bytes = self.store.read_bytes(offset, 1)?;
        Ok(bytes[0])
    }
}

fn to_name(bytes: &[u8], filler: u8) -> [u8; NAME_LEN] {
    let mut name = [filler; NAME_LEN];
    for (dst, src) in name.iter_mut().zip(bytes) {
        if src.is_ascii_uppercase() {
            *dst = *src;
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryStore;

    fn fresh() -> Persistence<MemoryStore> {
        Persistence::new(MemoryStore::new())
    }

    #[test]
    fn offsets_do_not_overlap() {
        let fields = [
            (SENTINEL_AT, 1),
            (TEXT_BRIGHTNESS_AT, 1),
            (MATRIX_BRIGHTNESS_AT, 1),
            (SOUND_AT, 1),
            (DIFFICULTY_AT, 1),
            (SCORES_AT, SLOTS * SCORE_LEN),
            (NAMES_AT, SLOTS * NAME_LEN),
            (PLAYER_NAME_AT, NAME_LEN),
        ];
        for pair in fields.windows(2) {
            assert_eq!(pair[0].0 + pair[0].1, pair[1].0);
        }
        assert_eq!(LAYOUT_END, 33);
    }

    #[test]
    fn first_boot_writes_defaults_once() {
        let mut p = fresh();
        assert!(p.ensure_initialized().unwrap());
        assert!(!p.ensure_initialized().unwrap());
        assert_eq!(p.load_settings().unwrap(), Settings::default());
        assert_eq!(p.load_leaderboard().unwrap(), Leaderboard::new());
    }

    #[test]
    fn settings_round_trip_through_store() {
        let mut p = fresh();
        let _ = p.ensure_initialized().unwrap();
        let settings = Settings {
            text_brightness: 9,
            matrix_brightness: 2,
            sound: false,
            name: *b"ZED",
            difficulty: Difficulty::High,
        };
        p.save_settings(&settings).unwrap();
        p.save_difficulty(settings.difficulty).unwrap();
        assert_eq!(p.load_settings().unwrap(), settings);
    }

    #[test]
    fn scores_are_big_endian() {
        let mut p = fresh();
        let mut board = Leaderboard::new();
        let _ = board.insert(0x0102, *b"BIG");
        p.save_leaderboard(&board).unwrap();
        let raw = p.store_mut().read_bytes(SCORES_AT, 2).unwrap();
        assert_eq!(raw, vec![0x01, 0x02]);
        let names = p.store_mut().read_bytes(NAMES_AT, 3).unwrap();
        assert_eq!(names, b"BIG".to_vec());
        assert_eq!(p.load_leaderboard().unwrap(), board);
    }

    #[test]
    fn garbage_values_are_repaired_on_load() {
        let mut p = fresh();
        p.store_mut().write_bytes(SENTINEL_AT, &[SENTINEL]).unwrap();
        p.store_mut().write_bytes(DIFFICULTY_AT, &[9]).unwrap();
        let settings = p.load_settings().unwrap();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.text_brightness, 10);
        assert_eq!(settings.matrix_brightness, 15);
        assert_eq!(settings.name_str(), "AAA");
    }
}
