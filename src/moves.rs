// Copyright (C) 2020-2024 Andy Kurnia.

use super::board::Board;
use super::error::{GameError, Returns};
use super::matrix;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

/// A word as it appears on the board after placement. The blank mask marks
/// the characters contributed by a blank tile from the current rack;
/// previously placed blanks stay unmarked and score zero through their
/// tile's stored letter multiplier.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Word {
    pub chars: Box<[u8]>,
    pub blank_mask: Box<[bool]>,
}

impl Word {
    pub fn from_chars(chars: &[u8]) -> Word {
        Word {
            chars: Box::from(chars),
            blank_mask: vec![false; chars.len()].into_boxed_slice(),
        }
    }

    pub(crate) fn validate(&self, dim: matrix::Dim, row: i8, col: i8) -> Returns<()> {
        if self.blank_mask.len() != self.chars.len() {
            return Err(GameError::InvalidWord(format!(
                "blank mask length {} disagrees with word length {}",
                self.blank_mask.len(),
                self.chars.len()
            )));
        }
        if self.chars.is_empty() {
            return Err(GameError::InvalidWord("word is empty".into()));
        }
        if !dim.contains(row, col) || col as usize + self.chars.len() > dim.n as usize {
            return Err(GameError::InvalidWord(format!(
                "word of length {} at ({row},{col}) extends beyond the board",
                self.chars.len()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, &letter) in self.chars.iter().enumerate() {
            // blanks read lower-case, regular tiles upper-case.
            let letter = if self.blank_mask[i] {
                letter.to_ascii_lowercase()
            } else {
                letter.to_ascii_uppercase()
            };
            write!(f, "{}", letter as char)?;
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Move {
    pub start: Position,
    pub horizontal: bool,
    pub word: Word,
    pub score: i16,
}

impl Move {
    /// Recomputes this move's score against the board. The board must be
    /// oriented so the move reads left to right: for a vertical move, score
    /// against the transposed board.
    pub fn calculate_score(&self, board: &Board<'_>) -> Returns<i16> {
        if self.horizontal {
            calculate_score(board, self.start.row, self.start.col, &self.word)
        } else {
            calculate_score(board, self.start.col, self.start.row, &self.word)
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            self.start.row + 1,
            (self.start.col as u8 + b'a') as char,
            if self.horizontal { "across" } else { "down" },
            self.word,
        )
    }
}

/// Scores a word read across from `(row, col)` in the board's current
/// orientation.
///
/// Letter premiums apply to newly placed letters only; word premiums
/// accumulate over newly placed squares and multiply the main word, while a
/// restricted square's perpendicular word scores
/// `(cross_score + letter_score) * word_multiplier`. Placed tiles carry
/// normalized multipliers, so nothing is counted twice.
pub fn calculate_score(board: &Board<'_>, row: i8, col: i8, word: &Word) -> Returns<i16> {
    word.validate(board.dim(), row, col)?;
    let game_config = board.game_config();
    let mut cross_total = 0i16;
    let mut main_total = 0i16;
    let mut main_word_multiplier = 1i16;
    let mut tiles_placed = 0u8;
    for (i, &letter) in word.chars.iter().enumerate() {
        let tile = board.tile_or_sentinel(row, col + i as i8);
        let letter_score = if word.blank_mask[i] {
            0
        } else {
            game_config.letter_score(letter) * tile.letter_multiplier() as i16
        };
        main_total += letter_score;
        if tile.is_empty() {
            // newly placed this move.
            main_word_multiplier *= tile.word_multiplier() as i16;
            if !tile.cross_check().is_unrestricted() {
                cross_total += (tile.cross_score() + letter_score) * tile.word_multiplier() as i16;
            }
            tiles_placed += 1;
        }
    }
    let mut score = main_total * main_word_multiplier + cross_total;
    if tiles_placed == game_config.rack_size() {
        score += game_config.bingo_premium();
    }
    Ok(score)
}
