use std::time::Duration;

use crate::config::END_HOLD_MS;
use crate::game::{Game, Outcome};
use crate::io::{InputSample, NvStore, RandomSource};
use crate::machine::{Machine, Mode, Output, Screen};

impl<S: NvStore, R: RandomSource> Machine<S, R> {
    pub(super) fn start_game(&mut self, now: u64, out: &mut Vec<Output>) {
        let game = Game::new(self.profile, self.settings.sound, &mut self.rng, now);
        log::info!(
            "game start: {} walls, {} lives, difficulty {}",
            game.grid.walls_remaining(),
            game.player.lives,
            self.profile.difficulty.label()
        );
        self.set_mode(Mode::Game);
        out.push(Output::Screen(Screen::Playing));
        game.announce(out);
        self.game = Some(game);
    }

    pub(super) fn play(
        &mut self,
        now: u64,
        input: InputSample,
        changed: bool,
        out: &mut Vec<Output>,
    ) {
        let Some(game) = self.game.as_mut() else {
            log::warn!("game mode without a game, back to menu");
            self.end_game(out);
            return;
        };
        if let Some(outcome) = game.tick(now, input, changed, out) {
            self.finish_game(outcome, out);
        }
    }

    /// Score screen (with rank if it made the table), a blocking hold, then
    /// the verdict. The next stick change returns to the menu.
    fn finish_game(&mut self, outcome: Outcome, out: &mut Vec<Output>) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        game.halt(out);
        let score = game.score;
        log::info!("game over: {outcome:?} with {score} points");

        let rank = self.leaderboard.insert(score, self.settings.name);
        if let Some(rank) = rank {
            log::info!("{} enters the leaderboard at #{}", self.settings.name_str(), rank + 1);
            let saved = self.persistence.save_leaderboard(&self.leaderboard);
            self.report(saved, "leaderboard");
        }
        out.push(Output::Screen(Screen::FinalScore { score, rank }));
        out.push(Output::Hold(Duration::from_millis(END_HOLD_MS)));
        out.push(Output::FillMatrix(false));
        out.push(Output::Screen(match outcome {
            Outcome::Won => Screen::Won { score },
            Outcome::Died => Screen::GameOver { score },
        }));
        self.set_mode(Mode::EndGame);
    }
}
