// Copyright (C) 2020-2024 Andy Kurnia.

use super::error::{GameError, Returns};
use super::game_config::GameConfig;
use super::letter_set::BLANK;
use rand::prelude::*;

/// The tile bag. Stack-like: shuffle once, then draw from the end.
pub struct Bag(pub Vec<u8>);

impl Bag {
    pub fn new(game_config: &GameConfig) -> Bag {
        let mut bag = Vec::with_capacity(
            (b'a'..=b'z')
                .chain([BLANK])
                .map(|letter| game_config.letter_count(letter) as usize)
                .sum(),
        );
        for letter in (b'a'..=b'z').chain([BLANK]) {
            for _ in 0..game_config.letter_count(letter) {
                bag.push(letter);
            }
        }
        Bag(bag)
    }

    pub fn shuffle(&mut self, mut rng: &mut dyn RngCore) {
        self.0.shuffle(&mut rng);
    }

    pub fn draw(&mut self) -> Returns<u8> {
        self.0.pop().ok_or(GameError::EmptyBag)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
