// Copyright (C) 2020-2024 Andy Kurnia.

use super::board::Board;
use super::moves::Move;
use super::rack::Rack;

/// Chooses one of the generated moves, or none to pass.
pub enum MovePicker {
    HighScore,
}

impl MovePicker {
    /// The first highest-scoring move in generation order, so picks are
    /// reproducible for a fixed board, rack, and lexicon.
    pub fn pick_move<'m>(
        &self,
        moves: &'m [Move],
        _board: &Board<'_>,
        _rack: &Rack,
    ) -> Option<&'m Move> {
        match self {
            MovePicker::HighScore => {
                let mut best: Option<&Move> = None;
                for play in moves {
                    if best.map_or(true, |leader| play.score > leader.score) {
                        best = Some(play);
                    }
                }
                best
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_config;
    use crate::lexicon;
    use crate::moves::{Position, Word};

    fn play(score: i16, col: i8) -> Move {
        Move {
            start: Position { row: 0, col },
            horizontal: true,
            word: Word::from_chars(b"cat"),
            score,
        }
    }

    #[test]
    fn picks_the_first_highest_score() {
        let game_config = game_config::make_plain_game_config(7, 7, 35);
        let lexicon = lexicon::from_words(&["cat"]);
        let board = Board::new(&game_config, &lexicon);
        let rack = Rack::new(7);
        let picker = MovePicker::HighScore;
        assert!(picker.pick_move(&[], &board, &rack).is_none());
        let moves = [play(8, 0), play(12, 1), play(12, 2), play(3, 3)];
        let picked = picker.pick_move(&moves, &board, &rack).unwrap();
        assert_eq!(picked.score, 12);
        assert_eq!(picked.start.col, 1);
    }
}
