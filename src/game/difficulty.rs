/// Difficulty level as shown in the selector (1..=3).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    Low,
    #[default]
    Medium,
    High,
}

impl Difficulty {
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Low => 1,
            Difficulty::Medium => 2,
            Difficulty::High => 3,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Low),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::High),
            _ => None,
        }
    }

    pub fn raise(self) -> Self {
        Self::from_level(self.level() + 1).unwrap_or(self)
    }

    pub fn lower(self) -> Self {
        Self::from_level(self.level() - 1).unwrap_or(self)
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Low => "Low",
            Difficulty::Medium => "Medium",
            Difficulty::High => "High",
        }
    }

    pub fn profile(self) -> Profile {
        Profile::for_difficulty(self)
    }
}

/// Gameplay tuning derived from a [`Difficulty`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    pub difficulty: Difficulty,
    /// Interior cells draw from `0..wall_range`; any nonzero draw is a wall.
    pub wall_range: u32,
    pub lives: u8,
    pub fuse_ms: u64,
    pub bomb_blink_ms: u64,
    pub points_per_wall: u16,
}

impl Profile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (lives, fuse_ms, bomb_blink_ms, points_per_wall) = match difficulty {
            Difficulty::Low => (3, 3000, 250, 10),
            Difficulty::Medium => (2, 2500, 150, 20),
            Difficulty::High => (1, 2000, 80, 30),
        };
        Self {
            difficulty,
            wall_range: u32::from(difficulty.level()) + 1,
            lives,
            fuse_ms,
            bomb_blink_ms,
            points_per_wall,
        }
    }
}
