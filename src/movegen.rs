// Copyright (C) 2020-2026 Andy Kurnia.

use super::board::Board;
use super::error::{GameError, Returns};
use super::letter_set::BLANK;
use super::lexicon::{Node, PruneVisitor};
use super::moves::{self, Move, Position, Word};
use super::rack::Rack;

/// Generates every legal placement for a rack on a board.
///
/// The generator works only across rows: the vertical pass transposes the
/// board in place, reruns the across pass, and transposes back. Within a
/// pass, each anchor gets a prefix phase (the letters left of the anchor,
/// either fixed by a placed run or enumerated from the rack over the trie)
/// and an extension phase (through the anchor and rightwards, gated by the
/// rack, the per-square cross-checks, and the trie).
pub struct MoveGenerator {
    pub moves: Vec<Move>,
}

struct GenState<'a, 'g> {
    board: &'g Board<'a>,
    rack: &'g mut Rack,
    moves: &'g mut Vec<Move>,
    // scratch blank flags indexed by position in the word being built.
    blanks: Vec<bool>,
    horizontal: bool,
    anchor_row: i8,
    anchor_col: i8,
    error: Option<GameError>,
}

impl GenState<'_, '_> {
    // a real tile is preferred; a blank substitutes for any letter and
    // flags its position in the word.
    fn take_tile(&mut self, letter: u8, word_pos: usize) {
        let result = if self.rack.has_tile(letter) {
            self.rack.remove(letter)
        } else {
            self.rack.remove(BLANK).map(|()| {
                self.blanks[word_pos - 1] = true;
            })
        };
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }

    fn return_tile(&mut self, letter: u8, word_pos: usize) {
        if self.blanks[word_pos - 1] {
            self.blanks[word_pos - 1] = false;
            self.rack.add(BLANK);
        } else {
            self.rack.add(letter);
        }
    }

    fn emit(&mut self, node: &Node, prefix_len: usize) {
        let label = node.label();
        let start_col = self.anchor_col - prefix_len as i8;
        let word = Word {
            chars: Box::from(label),
            blank_mask: Box::from(&self.blanks[..label.len()]),
        };
        match moves::calculate_score(self.board, self.anchor_row, start_col, &word) {
            Ok(score) => {
                // the transposed pass reports original-frame coordinates.
                let start = if self.horizontal {
                    Position {
                        row: self.anchor_row,
                        col: start_col,
                    }
                } else {
                    Position {
                        row: start_col,
                        col: self.anchor_row,
                    }
                };
                self.moves.push(Move {
                    start,
                    horizontal: self.horizontal,
                    word,
                    score,
                });
            }
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
    }
}

/// Prefix phase: enumerates every rack-built prefix ending immediately left
/// of the anchor, handing each visited trie node to the extension phase.
/// Prefixes may not run off the board or across another anchor.
struct PrefixVisitor<'s, 'a, 'g> {
    state: &'s mut GenState<'a, 'g>,
    // the square the next prefix letter would occupy.
    cursor: i8,
}

impl PruneVisitor for PrefixVisitor<'_, '_, '_> {
    fn valid_edge(&mut self, letter: u8) -> bool {
        self.state.rack.contains(letter)
    }

    fn enter(&mut self, letter: u8, child: &Node) {
        self.state.take_tile(letter, child.label().len());
        self.cursor -= 1;
    }

    fn leave(&mut self, letter: u8, child: &Node) {
        self.cursor += 1;
        self.state.return_tile(letter, child.label().len());
    }

    fn stop(&mut self, _node: &Node) -> bool {
        if self.state.error.is_some() {
            return true;
        }
        match self.state.board.tile(self.state.anchor_row, self.cursor) {
            None => true,
            Some(tile) => !tile.is_empty() || tile.is_anchor(),
        }
    }

    fn visit(&mut self, node: &Node) {
        let mut extension = ExtensionVisitor {
            prefix_len: node.label().len(),
            cursor: self.state.anchor_col,
            state: &mut *self.state,
        };
        node.visit_pruned(&mut extension);
    }
}

/// Extension phase: walks rightwards from the anchor in lock-step with the
/// trie, consuming rack tiles on empty squares (cross-checks permitting) and
/// passing through placed letters, emitting a move at every terminal node
/// that ends on an empty square past the anchor.
struct ExtensionVisitor<'s, 'a, 'g> {
    state: &'s mut GenState<'a, 'g>,
    prefix_len: usize,
    // the square under consideration.
    cursor: i8,
}

impl ExtensionVisitor<'_, '_, '_> {
    fn curr_tile(&self) -> &crate::board::Tile {
        self.state
            .board
            .tile_or_sentinel(self.state.anchor_row, self.cursor)
    }
}

impl PruneVisitor for ExtensionVisitor<'_, '_, '_> {
    fn valid_edge(&mut self, letter: u8) -> bool {
        let tile = self.curr_tile();
        if tile.is_empty() {
            self.state.rack.contains(letter) && tile.cross_check().allows(letter)
        } else {
            tile.letter() == letter
        }
    }

    fn enter(&mut self, letter: u8, child: &Node) {
        if self.curr_tile().is_empty() {
            self.state.take_tile(letter, child.label().len());
        }
        self.cursor += 1;
    }

    fn leave(&mut self, letter: u8, child: &Node) {
        self.cursor -= 1;
        if self.curr_tile().is_empty() {
            self.state.return_tile(letter, child.label().len());
        }
    }

    fn stop(&mut self, _node: &Node) -> bool {
        // the sentinel's empty cross-check set already fails every edge.
        self.state.error.is_some()
    }

    fn visit(&mut self, node: &Node) {
        if node.is_terminal() && self.cursor > self.state.anchor_col && self.curr_tile().is_empty()
        {
            let prefix_len = self.prefix_len;
            self.state.emit(node, prefix_len);
        }
    }
}

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator { moves: Vec::new() }
    }

    /// Regenerates `self.moves` for the given board and rack. The board is
    /// transposed and restored in place; the rack is mutated during
    /// backtracking and equals its pre-call state on return.
    pub fn generate_moves(&mut self, board: &mut Board<'_>, rack: &mut Rack) -> Returns<()> {
        self.moves.clear();
        self.generate_pass(board, rack, true)?;
        board.transpose();
        let result = self.generate_pass(board, rack, false);
        board.transpose();
        result?;
        log::debug!("generated {} moves", self.moves.len());
        Ok(())
    }

    fn generate_pass(
        &mut self,
        board: &Board<'_>,
        rack: &mut Rack,
        horizontal: bool,
    ) -> Returns<()> {
        let n = board.dim().n;
        let mut state = GenState {
            board,
            rack,
            moves: &mut self.moves,
            blanks: vec![false; n as usize],
            horizontal,
            anchor_row: 0,
            anchor_col: 0,
            error: None,
        };
        for row in 0..n {
            for col in 0..n {
                if board.tile(row, col).is_some_and(|tile| tile.is_anchor()) {
                    state.anchor_row = row;
                    state.anchor_col = col;
                    generate_for_anchor(&mut state);
                }
            }
        }
        match state.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_for_anchor(state: &mut GenState<'_, '_>) {
    let board = state.board;
    let row = state.anchor_row;
    let anchor_col = state.anchor_col;
    let has_placed_run = board
        .tile(row, anchor_col - 1)
        .is_some_and(|tile| !tile.is_empty());
    if has_placed_run {
        // the prefix is fixed to the placed run and costs no rack tiles.
        let mut col = anchor_col - 1;
        while board.tile(row, col).is_some_and(|tile| !tile.is_empty()) {
            col -= 1;
        }
        let run: Vec<u8> = (col + 1..anchor_col)
            .map(|c| board.tile_or_sentinel(row, c).letter())
            .collect();
        if let Some(node) = board.lexicon().follow(&run) {
            let mut extension = ExtensionVisitor {
                prefix_len: run.len(),
                cursor: anchor_col,
                state,
            };
            node.visit_pruned(&mut extension);
        }
    } else {
        let mut prefix = PrefixVisitor {
            cursor: anchor_col - 1,
            state,
        };
        board.lexicon().visit_pruned(&mut prefix);
    }
}
