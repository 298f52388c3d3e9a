use crate::config::{ALARM_HZ, PLAYER_BLINK_MS, PLAY_TIME_WRAP, SECOND_MS, SPAWN};
use crate::game::viewport::{self, PLAYER_CELL};
use crate::game::{Grid, IntervalTimer, Pos, Profile};
use crate::io::{InputSample, Movement, RandomSource};
use crate::output::Output;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub lives: u8,
    pub blink_on: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bomb {
    pub pos: Pos,
    pub armed_at: u64,
    pub blink_on: bool,
}

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Died,
}

/// One running game: map, player, the single bomb slot and the timers that
/// pace blinking and the stats clock.
pub struct Game {
    pub grid: Grid,
    pub player: Player,
    pub bomb: Option<Bomb>,
    pub score: u16,
    pub play_time: u16,
    pub profile: Profile,
    sound: bool,
    last_lives: u8,
    second: IntervalTimer,
    player_blink: IntervalTimer,
    bomb_blink: IntervalTimer,
}

impl Game {
    pub fn new(profile: Profile, sound: bool, rng: &mut impl RandomSource, now: u64) -> Self {
        Self::with_grid(Grid::generate(&profile, rng), profile, sound, now)
    }

    pub fn with_grid(grid: Grid, profile: Profile, sound: bool, now: u64) -> Self {
        let (row, col) = SPAWN;
        Self {
            grid,
            player: Player {
                pos: Pos::new(row, col),
                lives: profile.lives,
                blink_on: true,
            },
            bomb: None,
            score: 0,
            play_time: 0,
            profile,
            sound,
            last_lives: profile.lives,
            second: IntervalTimer::new(SECOND_MS, now),
            player_blink: IntervalTimer::new(PLAYER_BLINK_MS, now),
            bomb_blink: IntervalTimer::new(profile.bomb_blink_ms, now),
        }
    }

    /// Everything the displays need when the game screen first appears.
    pub fn announce(&self, out: &mut Vec<Output>) {
        out.push(self.viewport_output());
        out.push(Output::Stats {
            time: self.play_time,
            score: self.score,
        });
        out.push(Output::Lives(self.player.lives));
    }

    pub fn tick(
        &mut self,
        now: u64,
        input: InputSample,
        movement_changed: bool,
        out: &mut Vec<Output>,
    ) -> Option<Outcome> {
        if self.second.poll(now) {
            self.play_time = (self.play_time + 1) % PLAY_TIME_WRAP;
            out.push(Output::Stats {
                time: self.play_time,
                score: self.score,
            });
        }

        if self.player.lives != self.last_lives {
            self.last_lives = self.player.lives;
            out.push(Output::Lives(self.player.lives));
        }

        if input.button {
            self.place_bomb(now, out);
        }

        if movement_changed {
            let _ = self.try_move(input.movement);
            out.push(self.viewport_output());
        }

        if self.player_blink.poll(now) {
            self.player.blink_on = !self.player.blink_on;
        }

        self.blink_bomb(now, out);

        if let Some(bomb) = self.bomb {
            if now.saturating_sub(bomb.armed_at) > self.profile.fuse_ms {
                self.bomb = None;
                let _ = self.apply_blast(&bomb);
                if self.sound {
                    out.push(Output::Silence);
                }
                out.push(Output::Stats {
                    time: self.play_time,
                    score: self.score,
                });
                out.push(self.viewport_output());
            }
        }

        let (row, col) = PLAYER_CELL;
        out.push(Output::Cell {
            row,
            col,
            on: self.player.blink_on,
        });

        self.outcome()
    }

    /// Win is checked first: clearing the last wall counts even if that
    /// same blast took the last life.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.grid.walls_remaining() == 0 {
            Some(Outcome::Won)
        } else if self.player.lives == 0 {
            Some(Outcome::Died)
        } else {
            None
        }
    }

    /// Silently refuses when a bomb is already armed or the target is not
    /// on the visible window.
    pub fn place_bomb(&mut self, now: u64, out: &mut Vec<Output>) -> bool {
        let target = self.player.pos;
        if self.bomb.is_some() || !viewport::contains(self.player.pos, target) {
            return false;
        }
        self.bomb = Some(Bomb {
            pos: target,
            armed_at: now,
            blink_on: true,
        });
        self.bomb_blink.reset(now);
        log::debug!("bomb armed at {target:?}");
        self.push_bomb_cell(out);
        if self.sound {
            out.push(Output::Tone {
                freq: ALARM_HZ,
                duration: None,
            });
        }
        true
    }

    /// Steps the player unless the destination is solid or off the grid.
    pub fn try_move(&mut self, movement: Movement) -> bool {
        if movement == Movement::Neutral {
            return false;
        }
        let (dr, dc) = movement.delta();
        let row = self.player.pos.row as i32 + dr;
        let col = self.player.pos.col as i32 + dc;
        if !self.grid.is_walkable(row, col) {
            return false;
        }
        self.player.pos = Pos::new(row as usize, col as usize);
        true
    }

    /// Ends the game: alarm off and bomb frozen.
    pub fn halt(&mut self, out: &mut Vec<Output>) {
        if let Some(bomb) = self.bomb.as_mut() {
            bomb.blink_on = false;
        }
        out.push(Output::Silence);
    }

    fn blink_bomb(&mut self, now: u64, out: &mut Vec<Output>) {
        let Some(bomb) = self.bomb.as_mut() else {
            return;
        };
        if !self.bomb_blink.poll(now) {
            return;
        }
        bomb.blink_on = !bomb.blink_on;
        let on = bomb.blink_on;
        self.push_bomb_cell(out);
        if self.sound {
            out.push(if on {
                Output::Tone {
                    freq: ALARM_HZ,
                    duration: None,
                }
            } else {
                Output::Silence
            });
        }
    }

    fn push_bomb_cell(&self, out: &mut Vec<Output>) {
        let Some(bomb) = self.bomb else {
            return;
        };
        if let Some((row, col)) = viewport::to_surface(self.player.pos, bomb.pos) {
            out.push(Output::Cell {
                row,
                col,
                on: bomb.blink_on,
            });
        }
    }

    fn viewport_output(&self) -> Output {
        Output::Viewport {
            surface: viewport::project(&self.grid, self.player.pos, self.bomb.map(|b| b.pos)),
            player_on: self.player.blink_on,
            bomb_on: self.bomb.is_some_and(|b| b.blink_on),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Difficulty};

    fn open_game(difficulty: Difficulty) -> Game {
        let mut grid = Grid::new();
        // one wall far away so the board is not already won
        grid.set(Pos::new(14, 14), Cell::Wall);
        Game::with_grid(grid, difficulty.profile(), false, 0)
    }

    fn press() -> InputSample {
        InputSample {
            movement: Movement::Neutral,
            button: true,
        }
    }

    fn idle() -> InputSample {
        InputSample::default()
    }

    #[test]
    fn blocked_moves_leave_player_in_place() {
        let mut game = open_game(Difficulty::Low);
        assert!(!game.try_move(Movement::Up));
        assert!(!game.try_move(Movement::Left));
        assert_eq!(game.player.pos, Pos::new(1, 1));
        game.grid.set(Pos::new(1, 2), Cell::Wall);
        assert!(!game.try_move(Movement::Right));
        assert!(game.try_move(Movement::Down));
        assert_eq!(game.player.pos, Pos::new(2, 1));
    }

    #[test]
    fn only_one_bomb_at_a_time() {
        let mut game = open_game(Difficulty::Low);
        let mut out = Vec::new();
        assert!(game.place_bomb(10, &mut out));
        assert!(game.try_move(Movement::Down));
        assert!(!game.place_bomb(20, &mut out));
        assert_eq!(game.bomb.map(|b| b.pos), Some(Pos::new(1, 1)));
    }

    #[test]
    fn detonation_breaks_adjacent_walls_and_scores() {
        let mut game = open_game(Difficulty::Medium);
        for pos in [Pos::new(5, 6), Pos::new(7, 6), Pos::new(6, 5)] {
            game.grid.set(pos, Cell::Wall);
        }
        game.grid.set(Pos::new(5, 5), Cell::Wall); // diagonal, survives
        game.player.pos = Pos::new(6, 6);
        let mut out = Vec::new();
        assert!(game.place_bomb(0, &mut out));
        // walk away, out of the blast
        game.player.pos = Pos::new(6, 9);

        let fuse = game.profile.fuse_ms;
        let _ = game.tick(fuse, idle(), false, &mut out);
        assert!(game.bomb.is_some(), "fuse must strictly elapse");
        let _ = game.tick(fuse + 1, idle(), false, &mut out);

        assert!(game.bomb.is_none());
        assert_eq!(game.score, 3 * game.profile.points_per_wall);
        assert_eq!(game.player.lives, game.profile.lives);
        for pos in [Pos::new(5, 6), Pos::new(7, 6), Pos::new(6, 5)] {
            assert_eq!(game.grid.get(pos), Cell::Empty);
        }
        assert_eq!(game.grid.get(Pos::new(5, 5)), Cell::Wall);
        assert_eq!(game.grid.get(Pos::new(14, 14)), Cell::Wall);
    }

    #[test]
    fn player_north_of_bomb_loses_exactly_one_life() {
        let mut game = open_game(Difficulty::Low);
        game.player.pos = Pos::new(6, 6);
        let mut out = Vec::new();
        assert!(game.place_bomb(0, &mut out));
        assert!(game.try_move(Movement::Up));
        let fuse = game.profile.fuse_ms;
        let _ = game.tick(fuse + 1, idle(), false, &mut out);
        assert_eq!(game.player.lives, game.profile.lives - 1);

        out.clear();
        let _ = game.tick(fuse + 2, idle(), false, &mut out);
        assert!(out.contains(&Output::Lives(game.profile.lives - 1)));
    }

    #[test]
    fn diagonal_player_is_safe() {
        let mut game = open_game(Difficulty::Low);
        game.player.pos = Pos::new(6, 6);
        let mut out = Vec::new();
        assert!(game.place_bomb(0, &mut out));
        game.player.pos = Pos::new(5, 5);
        let _ = game.tick(game.profile.fuse_ms + 1, idle(), false, &mut out);
        assert_eq!(game.player.lives, game.profile.lives);
    }

    #[test]
    fn win_beats_death_when_both_happen() {
        let mut grid = Grid::new();
        grid.set(Pos::new(2, 3), Cell::Wall);
        let mut game = Game::with_grid(grid, Difficulty::High.profile(), false, 0);
        game.player.pos = Pos::new(2, 2);
        let mut out = Vec::new();
        assert!(game.place_bomb(0, &mut out));
        assert_eq!(game.player.lives, 1);
        let outcome = game.tick(game.profile.fuse_ms + 1, idle(), false, &mut out);
        assert_eq!(game.player.lives, 0);
        assert_eq!(outcome, Some(Outcome::Won));
    }

    #[test]
    fn losing_last_life_ends_in_death() {
        let mut game = open_game(Difficulty::High);
        let mut out = Vec::new();
        let _ = game.tick(1, press(), false, &mut out);
        assert!(game.bomb.is_some());
        let outcome = game.tick(game.profile.fuse_ms + 2, idle(), false, &mut out);
        assert_eq!(outcome, Some(Outcome::Died));
    }

    #[test]
    fn play_time_counts_whole_seconds_and_wraps() {
        let mut game = open_game(Difficulty::Low);
        let mut out = Vec::new();
        let _ = game.tick(999, idle(), false, &mut out);
        assert_eq!(game.play_time, 0);
        let _ = game.tick(1000, idle(), false, &mut out);
        assert_eq!(game.play_time, 1);
        // one tick after a long stall still only counts one second
        let _ = game.tick(5000, idle(), false, &mut out);
        assert_eq!(game.play_time, 2);

        game.play_time = PLAY_TIME_WRAP - 1;
        let _ = game.tick(6000, idle(), false, &mut out);
        assert_eq!(game.play_time, 0);
    }

    #[test]
    fn blink_toggles_do_not_redraw_viewport() {
        let mut game = open_game(Difficulty::Low);
        let mut out = Vec::new();
        let _ = game.tick(PLAYER_BLINK_MS, idle(), false, &mut out);
        assert!(!game.player.blink_on);
        assert!(!out.iter().any(|o| matches!(o, Output::Viewport { .. })));
        assert_eq!(
            out.last(),
            Some(&Output::Cell {
                row: PLAYER_CELL.0,
                col: PLAYER_CELL.1,
                on: false
            })
        );
    }

    #[test]
    fn movement_change_redraws_viewport() {
        let mut game = open_game(Difficulty::Low);
        let mut out = Vec::new();
        let input = InputSample {
            movement: Movement::Right,
            button: false,
        };
        let _ = game.tick(10, input, true, &mut out);
        assert_eq!(game.player.pos, Pos::new(1, 2));
        assert!(out.iter().any(|o| matches!(o, Output::Viewport { .. })));
    }

    #[test]
    fn alarm_follows_bomb_blink_when_sound_is_on() {
        let mut game = Game::with_grid(Grid::new(), Difficulty::Low.profile(), true, 0);
        game.grid.set(Pos::new(14, 14), Cell::Wall);
        let mut out = Vec::new();
        assert!(game.place_bomb(0, &mut out));
        assert!(out.contains(&Output::Tone {
            freq: ALARM_HZ,
            duration: None
        }));
        out.clear();
        let _ = game.tick(game.profile.bomb_blink_ms, idle(), false, &mut out);
        assert!(!game.bomb.is_some_and(|b| b.blink_on));
        assert!(out.contains(&Output::Silence));
    }
}
