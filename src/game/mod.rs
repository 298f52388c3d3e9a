pub mod board;
pub mod difficulty;
pub mod effects;
pub mod leaderboard;
pub mod settings;
pub mod state;
pub mod timer;
pub mod viewport;

pub use board::{Cell, Grid, Pos};
pub use difficulty::{Difficulty, Profile};
pub use leaderboard::{Entry, Leaderboard};
pub use settings::Settings;
pub use state::{Bomb, Game, Outcome, Player};
pub use timer::IntervalTimer;
pub use viewport::{Surface, Tile};
