//! Cursor positions of the main menu and the settings menu.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    StartGame,
    Settings,
    About,
    Highscores,
    ResetHighscores,
    HowTo,
    Difficulty,
}

const MENU: [MenuItem; 7] = [
    MenuItem::StartGame,
    MenuItem::Settings,
    MenuItem::About,
    MenuItem::Highscores,
    MenuItem::ResetHighscores,
    MenuItem::HowTo,
    MenuItem::Difficulty,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsItem {
    TextBrightness,
    MatrixBrightness,
    Sound,
    Name,
}

const SETTINGS: [SettingsItem; 4] = [
    SettingsItem::TextBrightness,
    SettingsItem::MatrixBrightness,
    SettingsItem::Sound,
    SettingsItem::Name,
];

// Clamped neighbour in an ordered list; no wraparound.
fn step<T: Copy + PartialEq>(items: &[T], current: T, forward: bool) -> T {
    let Some(at) = items.iter().position(|i| *i == current) else {
        return current;
    };
    let next = if forward {
        (at + 1).min(items.len() - 1)
    } else {
        at.saturating_sub(1)
    };
    items[next]
}

impl MenuItem {
    /// 1-based position in the menu.
    pub fn index(self) -> usize {
        MENU.iter().position(|i| *i == self).map_or(1, |at| at + 1)
    }

    pub fn next(self) -> Self {
        step(&MENU, self, true)
    }

    pub fn prev(self) -> Self {
        step(&MENU, self, false)
    }

    pub fn following(self) -> Option<Self> {
        MENU.get(self.index()).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::StartGame => "Start game",
            MenuItem::Settings => "Settings",
            MenuItem::About => "About",
            MenuItem::Highscores => "Highscores",
            MenuItem::ResetHighscores => "Reset scores",
            MenuItem::HowTo => "How to play",
            MenuItem::Difficulty => "Difficulty",
        }
    }
}

impl SettingsItem {
    pub fn index(self) -> usize {
        SETTINGS.iter().position(|i| *i == self).map_or(1, |at| at + 1)
    }

    pub fn next(self) -> Self {
        step(&SETTINGS, self, true)
    }

    pub fn prev(self) -> Self {
        step(&SETTINGS, self, false)
    }

    pub fn label(self) -> &'static str {
        match self {
            SettingsItem::TextBrightness => "LCD light",
            SettingsItem::MatrixBrightness => "Matrix light",
            SettingsItem::Sound => "Sound",
            SettingsItem::Name => "Name",
        }
    }
}
