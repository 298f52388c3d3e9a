use crate::game::{Bomb, Pos};

use super::Game;

/// Cells a detonation reaches: the bomb's own cell plus its on-grid
/// orthogonal neighbours.
pub fn blast_pattern(center: Pos) -> impl Iterator<Item = Pos> {
    std::iter::once(center).chain(center.orthogonal())
}

/// A plus-shaped blast; diagonal neighbours are safe.
pub fn blast_hits(center: Pos, target: Pos) -> bool {
    blast_pattern(center).any(|pos| pos == target)
}

impl Game {
    /// Applies a blast at `bomb`: clears its cell, breaks adjacent walls for
    /// points, and costs the player one life if caught. Returns whether the
    /// player was hit.
    pub(super) fn apply_blast(&mut self, bomb: &Bomb) -> bool {
        let _ = self.grid.break_wall(bomb.pos);
        let mut broken: u16 = 0;
        for pos in bomb.pos.orthogonal() {
            if self.grid.break_wall(pos) {
                broken += 1;
            }
        }
        let gained = broken.saturating_mul(self.profile.points_per_wall);
        self.score = self.score.saturating_add(gained);

        let hit = blast_hits(bomb.pos, self.player.pos);
        if hit {
            self.player.lives = self.player.lives.saturating_sub(1);
        }
        log::debug!(
            "bomb at {:?} broke {broken} walls (+{gained}), player hit: {hit}",
            bomb.pos
        );
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_pattern_excludes_diagonals() {
        let c = Pos::new(5, 5);
        assert!(blast_hits(c, c));
        assert!(blast_hits(c, Pos::new(4, 5)));
        assert!(blast_hits(c, Pos::new(5, 6)));
        assert!(!blast_hits(c, Pos::new(4, 4)));
        assert!(!blast_hits(c, Pos::new(3, 5)));
    }

    #[test]
    fn pattern_at_edge_is_clipped() {
        assert_eq!(blast_pattern(Pos::new(0, 0)).count(), 3);
        assert_eq!(blast_pattern(Pos::new(8, 8)).count(), 5);
    }
}
