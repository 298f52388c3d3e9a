pub const SLOTS: usize = 5;
pub const NAME_LEN: usize = 3;
pub const PLACEHOLDER: [u8; NAME_LEN] = *b"XXX";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub score: u16,
    pub name: [u8; NAME_LEN],
}

impl Entry {
    pub const EMPTY: Entry = Entry {
        score: 0,
        name: PLACEHOLDER,
    };

    pub fn name_str(&self) -> String {
        self.name.iter().map(|b| *b as char).collect()
    }
}

/// Top five scores, best first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaderboard {
    entries: [Entry; SLOTS],
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: [Entry::EMPTY; SLOTS],
        }
    }

    /// Trusts the caller for ordering; stored tables are written sorted.
    pub fn from_entries(entries: [Entry; SLOTS]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry; SLOTS] {
        &self.entries
    }

    pub fn get(&self, slot: usize) -> Option<&Entry> {
        self.entries.get(slot)
    }

    /// Places `score` above every incumbent it ties or beats, pushing the
    /// rest down and dropping the last slot. `None` leaves the table as is.
    pub fn insert(&mut self, score: u16, name: [u8; NAME_LEN]) -> Option<usize> {
        let rank = self.entries.iter().position(|e| e.score <= score)?;
        self.entries[rank..].rotate_right(1);
        self.entries[rank] = Entry { score, name };
        Some(rank)
    }

    pub fn reset(&mut self) {
        self.entries = [Entry::EMPTY; SLOTS];
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}
