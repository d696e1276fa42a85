// Copyright (C) 2020-2026 Andy Kurnia.

use super::error::Returns;
use super::game_config::GameConfig;
use super::letter_set::{CrossCheck, LetterSet};
use super::lexicon;
use super::matrix;
use super::moves::{Move, Word};

pub const EMPTY: u8 = 0;

/// One board square, persistent through the game.
///
/// A placed letter keeps a singleton cross-check and a zero cross-score, so
/// the move generator can treat placed letters uniformly with empty anchor
/// squares. The `_t` twins hold the same state for the transposed
/// orientation and are swapped by `Board::transpose`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tile {
    letter: u8,
    word_multiplier: i8,
    letter_multiplier: i8,
    cross_check: CrossCheck,
    cross_score: i16,
    cross_check_t: CrossCheck,
    cross_score_t: i16,
    is_anchor: bool,
    row: i8,
    col: i8,
}

impl Tile {
    fn new(row: i8, col: i8, word_multiplier: i8, letter_multiplier: i8) -> Tile {
        Tile {
            letter: EMPTY,
            word_multiplier,
            letter_multiplier,
            cross_check: CrossCheck::Unrestricted,
            cross_score: 0,
            cross_check_t: CrossCheck::Unrestricted,
            cross_score_t: 0,
            is_anchor: false,
            row,
            col,
        }
    }

    fn transpose(&mut self) {
        std::mem::swap(&mut self.row, &mut self.col);
        std::mem::swap(&mut self.cross_check, &mut self.cross_check_t);
        std::mem::swap(&mut self.cross_score, &mut self.cross_score_t);
    }

    #[inline(always)]
    pub fn letter(&self) -> u8 {
        self.letter
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.letter == EMPTY
    }

    #[inline(always)]
    pub fn word_multiplier(&self) -> i8 {
        self.word_multiplier
    }

    /// Zero marks a letter placed as a blank; placed non-blanks are
    /// normalized to one when the move is applied.
    #[inline(always)]
    pub fn letter_multiplier(&self) -> i8 {
        self.letter_multiplier
    }

    /// Cross-check in the board's current orientation.
    #[inline(always)]
    pub fn cross_check(&self) -> CrossCheck {
        self.cross_check
    }

    #[inline(always)]
    pub fn cross_score(&self) -> i16 {
        self.cross_score
    }

    #[inline(always)]
    pub fn is_anchor(&self) -> bool {
        self.is_anchor
    }

    #[inline(always)]
    pub fn row(&self) -> i8 {
        self.row
    }

    #[inline(always)]
    pub fn col(&self) -> i8 {
        self.col
    }
}

/// The square grid of tiles, together with the lexicon consulted by the
/// cross-check engine. The driver owns the board between turns; the move
/// generator transposes it in place and restores it before returning.
pub struct Board<'a> {
    game_config: &'a GameConfig,
    lexicon: &'a lexicon::Node,
    dim: matrix::Dim,
    tiles: Box<[Tile]>,
    sentinel: Tile,
}

impl<'a> Board<'a> {
    pub fn new(game_config: &'a GameConfig, lexicon: &'a lexicon::Node) -> Board<'a> {
        let dim = game_config.dim();
        let n = dim.n;
        let mut tiles = Vec::with_capacity((n as usize) * (n as usize));
        for row in 0..n {
            for col in 0..n {
                tiles.push(Tile::new(
                    row,
                    col,
                    game_config.word_multiplier_at(row, col),
                    game_config.letter_multiplier_at(row, col),
                ));
            }
        }
        let center = dim.center();
        tiles[dim.at_row_col(center, center)].is_anchor = true;
        let mut sentinel = Tile::new(-1, -1, 1, 1);
        sentinel.cross_check = CrossCheck::Finite(LetterSet::EMPTY);
        sentinel.cross_check_t = CrossCheck::Finite(LetterSet::EMPTY);
        Board {
            game_config,
            lexicon,
            dim,
            tiles: tiles.into_boxed_slice(),
            sentinel,
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn game_config(&self) -> &'a GameConfig {
        self.game_config
    }

    #[inline(always)]
    pub fn lexicon(&self) -> &'a lexicon::Node {
        self.lexicon
    }

    #[inline(always)]
    pub fn tile(&self, row: i8, col: i8) -> Option<&Tile> {
        if self.dim.contains(row, col) {
            Some(&self.tiles[self.dim.at_row_col(row, col)])
        } else {
            None
        }
    }

    /// Like `tile`, but walking off the board yields a sentinel whose empty
    /// cross-check set fails every edge, terminating any search.
    #[inline(always)]
    pub fn tile_or_sentinel(&self, row: i8, col: i8) -> &Tile {
        self.tile(row, col).unwrap_or(&self.sentinel)
    }

    pub fn adjacent(&self, tile: &Tile, dv: i8, dh: i8) -> Option<&Tile> {
        self.tile(tile.row + dv, tile.col + dh)
    }

    pub fn adjacent_or_sentinel(&self, tile: &Tile, dv: i8, dh: i8) -> &Tile {
        self.tile_or_sentinel(tile.row + dv, tile.col + dh)
    }

    /// In-place transpose. Every tile swaps its position components and its
    /// cross-check/cross-score twins; applying this twice restores the board
    /// exactly.
    pub fn transpose(&mut self) {
        let n = self.dim.n;
        for row in 0..n {
            for col in row + 1..n {
                let a = self.dim.at_row_col(row, col);
                let b = self.dim.at_row_col(col, row);
                self.tiles[a].transpose();
                self.tiles[b].transpose();
                self.tiles.swap(a, b);
            }
        }
        // the twin fields flip on the diagonal too.
        for row in 0..n {
            self.tiles[self.dim.at_row_col(row, row)].transpose();
        }
    }

    /// Cross-check and cross-score for a square, from the contiguous placed
    /// letters above and below it in the current orientation.
    fn cross_check_at(&self, row: i8, col: i8) -> (CrossCheck, i16) {
        let (prefix, prefix_score) = self.collect_run(row, col, -1);
        let (suffix, suffix_score) = self.collect_run(row, col, 1);
        if prefix.is_empty() && suffix.is_empty() {
            return (CrossCheck::Unrestricted, 0);
        }
        (
            CrossCheck::Finite(self.lexicon.cross_letters(&prefix, &suffix)),
            prefix_score + suffix_score,
        )
    }

    // contiguous placed letters from (row + dv, col) onward, returned in
    // top-to-bottom reading order. scores are base letter scores; a placed
    // tile's stored letter multiplier is 1, or 0 for a blank, so premiums
    // spent at placement time are not recounted.
    fn collect_run(&self, row: i8, col: i8, dv: i8) -> (Vec<u8>, i16) {
        let mut letters = Vec::new();
        let mut score = 0;
        let mut row = row + dv;
        while let Some(tile) = self.tile(row, col) {
            if tile.is_empty() {
                break;
            }
            letters.push(tile.letter);
            score += self.game_config.letter_score(tile.letter) * tile.letter_multiplier as i16;
            row += dv;
        }
        if dv < 0 {
            letters.reverse();
        }
        (letters, score)
    }

    /// Anchor setter. Making an empty square an anchor recomputes its
    /// cross-check and cross-score in the current orientation; clearing the
    /// flag is only legal on a just-placed letter and seals the square to
    /// the singleton of that letter in both orientations.
    pub fn set_is_anchor(&mut self, row: i8, col: i8, is_anchor: bool) -> Returns<()> {
        if !self.dim.contains(row, col) {
            invariant_violation!("({row},{col}) is off the board");
        }
        let idx = self.dim.at_row_col(row, col);
        if is_anchor {
            if !self.tiles[idx].is_empty() {
                invariant_violation!("({row},{col}) holds a letter, cannot become an anchor");
            }
            let (cross_check, cross_score) = self.cross_check_at(row, col);
            let tile = &mut self.tiles[idx];
            tile.cross_check = cross_check;
            tile.cross_score = cross_score;
            tile.is_anchor = true;
        } else {
            if !self.tiles[idx].is_anchor {
                invariant_violation!("({row},{col}) is not an anchor, nothing to reset");
            }
            if self.tiles[idx].is_empty() {
                invariant_violation!("({row},{col}) is empty, place a letter before resetting");
            }
            self.tiles[idx].is_anchor = false;
            self.seal_placed(idx);
        }
        Ok(())
    }

    // constrain lexicon traversals through a placed square to its letter.
    fn seal_placed(&mut self, idx: usize) {
        let tile = &mut self.tiles[idx];
        let singleton = CrossCheck::Finite(LetterSet::from_letters(&[tile.letter]));
        tile.cross_check = singleton;
        tile.cross_check_t = singleton;
        tile.cross_score = 0;
        tile.cross_score_t = 0;
    }

    /// Places a move's letters and maintains the anchor and cross-check
    /// state around the placement. Does not touch the rack.
    pub fn apply_move(&mut self, play: &Move) -> Returns<()> {
        if play.horizontal {
            self.apply_across(play.start.row, play.start.col, &play.word)
        } else {
            self.transpose();
            let result = self.apply_across(play.start.col, play.start.row, &play.word);
            self.transpose();
            result
        }
    }

    fn apply_across(&mut self, row: i8, col: i8, word: &Word) -> Returns<()> {
        word.validate(self.dim, row, col)?;
        let mut placed = Vec::with_capacity(word.chars.len());
        for (i, &letter) in word.chars.iter().enumerate() {
            let curr_col = col + i as i8;
            match self.tile(row, curr_col) {
                Some(tile) if tile.is_empty() => {
                    placed.push((curr_col, letter, word.blank_mask[i]));
                }
                Some(tile) if tile.letter == letter => {}
                Some(tile) => {
                    invariant_violation!(
                        "({row},{curr_col}) holds {:?}, move wants {:?}",
                        tile.letter as char,
                        letter as char
                    );
                }
                None => {
                    invariant_violation!("({row},{curr_col}) is off the board");
                }
            }
        }
        for &(curr_col, letter, is_blank) in &placed {
            let idx = self.dim.at_row_col(row, curr_col);
            {
                let tile = &mut self.tiles[idx];
                tile.letter = letter;
                tile.letter_multiplier = if is_blank { 0 } else { 1 };
                tile.word_multiplier = 1;
            }
            if self.tiles[idx].is_anchor {
                self.set_is_anchor(row, curr_col, false)?;
            } else {
                self.seal_placed(idx);
            }
        }
        // vertical contexts changed above and below each new letter.
        for &(curr_col, _, _) in &placed {
            for dv in [-1, 1] {
                let mut curr_row = row + dv;
                while self.tile(curr_row, curr_col).is_some_and(|tile| !tile.is_empty()) {
                    curr_row += dv;
                }
                if self.dim.contains(curr_row, curr_col) {
                    self.set_is_anchor(curr_row, curr_col, true)?;
                }
            }
        }
        // horizontal contexts changed beyond the word ends; in the
        // transposed frame those are vertical, landing in the twin fields.
        self.transpose();
        for (t_row, dv) in [(col - 1, -1), (col + word.chars.len() as i8, 1)] {
            let mut curr_row = t_row;
            while self.tile(curr_row, row).is_some_and(|tile| !tile.is_empty()) {
                curr_row += dv;
            }
            if self.dim.contains(curr_row, row) {
                self.set_is_anchor(curr_row, row, true)?;
            }
        }
        self.transpose();
        Ok(())
    }
}
