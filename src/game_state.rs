// Copyright (C) 2020-2026 Andy Kurnia.

use super::bag::Bag;
use super::board::Board;
use super::error::{GameError, Returns};
use super::game_config::GameConfig;
use super::letter_set::BLANK;
use super::lexicon;
use super::moves::Move;
use super::rack::Rack;
use rand::prelude::*;

pub struct GamePlayer {
    pub score: i16,
    pub rack: Rack,
}

/// Everything a game in progress owns: the board, the bag, and the players.
/// The driver mutates it only between move generations.
pub struct GameState<'a> {
    game_config: &'a GameConfig,
    pub players: Box<[GamePlayer]>,
    pub board: Board<'a>,
    pub bag: Bag,
    pub turn: u8,
}

impl<'a> GameState<'a> {
    pub fn new(
        game_config: &'a GameConfig,
        lexicon: &'a lexicon::Node,
        num_players: u8,
    ) -> Returns<GameState<'a>> {
        let bag = Bag::new(game_config);
        if (num_players as usize) * (game_config.rack_size() as usize) > bag.len() {
            return Err(GameError::LoadError(format!(
                "too many players ({num_players}) for rack size {} and a bag of {} tiles",
                game_config.rack_size(),
                bag.len()
            )));
        }
        Ok(GameState {
            game_config,
            players: (0..num_players)
                .map(|_| GamePlayer {
                    score: 0,
                    rack: Rack::new(game_config.rack_size()),
                })
                .collect(),
            board: Board::new(game_config, lexicon),
            bag,
            turn: 0,
        })
    }

    pub fn shuffle_and_draw_tiles(&mut self, rng: &mut dyn RngCore) -> Returns<()> {
        self.bag.shuffle(rng);
        for player in self.players.iter_mut() {
            player.rack.fill(&mut self.bag)?;
        }
        Ok(())
    }

    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn as usize]
    }

    /// Applies a move for the player on turn: places the word, spends the
    /// used rack tiles, banks the score, and refills from the bag.
    pub fn play(&mut self, play: &Move) -> Returns<()> {
        let (dv, dh) = if play.horizontal { (0, 1) } else { (1, 0) };
        let mut used = Vec::with_capacity(play.word.chars.len());
        for (i, &letter) in play.word.chars.iter().enumerate() {
            let row = play.start.row + (i as i8) * dv;
            let col = play.start.col + (i as i8) * dh;
            if self.board.tile(row, col).is_some_and(|tile| tile.is_empty()) {
                used.push(if play.word.blank_mask[i] { BLANK } else { letter });
            }
        }
        self.board.apply_move(play)?;
        let current_player = &mut self.players[self.turn as usize];
        for letter in used {
            current_player.rack.remove(letter)?;
        }
        current_player.score += play.score;
        current_player.rack.fill(&mut self.bag)?;
        log::info!(
            "player {} plays {} for {}",
            self.turn + 1,
            play,
            play.score
        );
        Ok(())
    }

    pub fn next_turn(&mut self) {
        self.turn = (self.turn + 1) % self.players.len() as u8;
    }

    /// True once the player on turn has gone out: the game ends immediately.
    pub fn played_out(&self) -> bool {
        self.bag.is_empty() && self.current_player().rack.is_empty()
    }

    /// Scores after the end-of-game adjustments: every player loses the
    /// value of their remaining tiles, and a player who went out gains the
    /// value of everyone else's.
    pub fn final_scores(&self) -> Vec<i16> {
        let rack_values: Vec<i16> = self
            .players
            .iter()
            .map(|player| {
                (b'a'..=b'z')
                    .map(|letter| {
                        self.game_config.letter_score(letter)
                            * player.rack.count(letter) as i16
                    })
                    .sum()
            })
            .collect();
        let all_racks: i16 = rack_values.iter().sum();
        self.players
            .iter()
            .zip(&rack_values)
            .map(|(player, &rack_value)| {
                let mut score = player.score - rack_value;
                if player.rack.is_empty() {
                    score += all_racks;
                }
                score
            })
            .collect()
    }

    /// Indices of the winning players. A tie on adjusted scores falls back
    /// to the pre-adjustment scores.
    pub fn winners(&self) -> Vec<usize> {
        let final_scores = self.final_scores();
        let winners = indices_of_max(&final_scores);
        if winners.len() == 1 {
            return winners;
        }
        let raw_scores: Vec<i16> = self.players.iter().map(|player| player.score).collect();
        indices_of_max(&raw_scores)
    }
}

fn indices_of_max(scores: &[i16]) -> Vec<usize> {
    let best = scores.iter().copied().max().unwrap_or(0);
    scores
        .iter()
        .enumerate()
        .filter(|&(_, &score)| score == best)
        .map(|(i, _)| i)
        .collect()
}
