// Copyright (C) 2020-2026 Andy Kurnia.

use super::error::{GameError, Returns};
use super::letter_set::{self, BLANK};
use super::matrix;
use serde::Deserialize;
use std::collections::HashMap;

const NUM_LETTERS: usize = 26;

#[derive(Clone, Copy)]
struct Premium {
    word_multiplier: i8,
    letter_multiplier: i8,
}

static TWS: Premium = Premium {
    word_multiplier: 3,
    letter_multiplier: 1,
};
static DWS: Premium = Premium {
    word_multiplier: 2,
    letter_multiplier: 1,
};
static TLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 3,
};
static DLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 2,
};
static FVS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 1,
};

#[rustfmt::skip]
static STANDARD_PREMIUMS: [Premium; 225] = [
    TWS, FVS, FVS, DLS, FVS, FVS, FVS, TWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
    FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
    FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, //
    DLS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, //
    FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, //
    FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, //
    FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
    TWS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
    FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
    FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, //
    FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, //
    DLS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, //
    FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, //
    FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
    TWS, FVS, FVS, DLS, FVS, FVS, FVS, TWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
];

#[rustfmt::skip]
static ENGLISH_SCORES: [i16; NUM_LETTERS] = [
    1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
];

#[rustfmt::skip]
static ENGLISH_COUNTS: [u8; NUM_LETTERS + 1] = [
    9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2, 6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1, 2,
];

/// Static per-game parameters: letter values and frequencies, the premium
/// grids, rack size, and the full-rack bonus.
pub struct GameConfig {
    bingo_premium: i16,
    rack_size: u8,
    letter_scores: [i16; NUM_LETTERS],
    letter_counts: [u8; NUM_LETTERS + 1],
    letter_multipliers: Box<[i8]>,
    word_multipliers: Box<[i8]>,
    dim: matrix::Dim,
}

impl GameConfig {
    #[inline(always)]
    pub fn bingo_premium(&self) -> i16 {
        self.bingo_premium
    }

    #[inline(always)]
    pub fn rack_size(&self) -> u8 {
        self.rack_size
    }

    /// Base score of a letter; blanks are worth nothing.
    #[inline(always)]
    pub fn letter_score(&self, letter: u8) -> i16 {
        if letter == BLANK {
            0
        } else {
            self.letter_scores[(letter - b'a') as usize]
        }
    }

    /// Starting count of a letter (or of blanks) in the bag.
    #[inline(always)]
    pub fn letter_count(&self, letter: u8) -> u8 {
        if letter == BLANK {
            self.letter_counts[NUM_LETTERS]
        } else {
            self.letter_counts[(letter - b'a') as usize]
        }
    }

    #[inline(always)]
    pub fn word_multiplier_at(&self, row: i8, col: i8) -> i8 {
        self.word_multipliers[self.dim.at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn letter_multiplier_at(&self, row: i8, col: i8) -> i8 {
        self.letter_multipliers[self.dim.at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }
}

/// Raw configuration document, one key per table entry.
#[derive(Deserialize)]
pub struct Configuration {
    pub bingo_premium: i16,
    pub rack_size: u8,
    pub letter_scores: HashMap<String, i16>,
    pub letter_counts: HashMap<String, u8>,
    pub letter_multipliers: Vec<Vec<i8>>,
    pub word_multipliers: Vec<Vec<i8>>,
}

fn single_letter(key: &str, blank_ok: bool) -> Returns<u8> {
    let folded = key.to_ascii_lowercase();
    match folded.as_bytes() {
        [letter] if letter_set::is_letter(*letter) => Ok(*letter),
        [BLANK] if blank_ok => Ok(BLANK),
        _ => Err(GameError::LoadError(format!(
            "configuration key {key:?} is not a single letter"
        ))),
    }
}

fn flatten_grid(name: &str, grid: &[Vec<i8>], n: usize) -> Returns<Box<[i8]>> {
    if grid.len() != n || grid.iter().any(|row| row.len() != n) {
        return Err(GameError::LoadError(format!(
            "{name} must be a {n}x{n} grid"
        )));
    }
    Ok(grid.iter().flatten().copied().collect())
}

impl TryFrom<Configuration> for GameConfig {
    type Error = GameError;

    fn try_from(config: Configuration) -> Returns<GameConfig> {
        let n = config.word_multipliers.len();
        if n == 0 || n % 2 == 0 || n > i8::MAX as usize {
            return Err(GameError::LoadError(format!(
                "board size {n} must be odd and positive"
            )));
        }
        let word_multipliers = flatten_grid("word_multipliers", &config.word_multipliers, n)?;
        let letter_multipliers = flatten_grid("letter_multipliers", &config.letter_multipliers, n)?;
        if config.rack_size == 0 {
            return Err(GameError::LoadError("rack_size must be positive".into()));
        }
        let mut letter_scores = [0i16; NUM_LETTERS];
        for (key, &score) in &config.letter_scores {
            letter_scores[(single_letter(key, false)? - b'a') as usize] = score;
        }
        let mut letter_counts = [0u8; NUM_LETTERS + 1];
        for (key, &count) in &config.letter_counts {
            match single_letter(key, true)? {
                BLANK => letter_counts[NUM_LETTERS] = count,
                letter => letter_counts[(letter - b'a') as usize] = count,
            }
        }
        Ok(GameConfig {
            bingo_premium: config.bingo_premium,
            rack_size: config.rack_size,
            letter_scores,
            letter_counts,
            letter_multipliers,
            word_multipliers,
            dim: matrix::Dim { n: n as i8 },
        })
    }
}

pub fn load(path: &str) -> Returns<GameConfig> {
    let data = std::fs::read_to_string(path)?;
    let config: Configuration =
        serde_json::from_str(&data).map_err(|err| GameError::LoadError(err.to_string()))?;
    config.try_into()
}

pub fn make_english_game_config() -> GameConfig {
    GameConfig {
        bingo_premium: 50,
        rack_size: 7,
        letter_scores: ENGLISH_SCORES,
        letter_counts: ENGLISH_COUNTS,
        letter_multipliers: STANDARD_PREMIUMS
            .iter()
            .map(|premium| premium.letter_multiplier)
            .collect(),
        word_multipliers: STANDARD_PREMIUMS
            .iter()
            .map(|premium| premium.word_multiplier)
            .collect(),
        dim: matrix::Dim { n: 15 },
    }
}

/// Uniform multipliers everywhere, handy for drivers and tests that want
/// premium-free boards.
pub fn make_plain_game_config(n: i8, rack_size: u8, bingo_premium: i16) -> GameConfig {
    GameConfig {
        bingo_premium,
        rack_size,
        letter_scores: ENGLISH_SCORES,
        letter_counts: ENGLISH_COUNTS,
        letter_multipliers: vec![1; (n as usize) * (n as usize)].into_boxed_slice(),
        word_multipliers: vec![1; (n as usize) * (n as usize)].into_boxed_slice(),
        dim: matrix::Dim { n },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(n: usize) -> Configuration {
        Configuration {
            bingo_premium: 35,
            rack_size: 7,
            letter_scores: HashMap::from([("a".to_string(), 1), ("C".to_string(), 4)]),
            letter_counts: HashMap::from([("a".to_string(), 9), ("*".to_string(), 2)]),
            letter_multipliers: vec![vec![1; n]; n],
            word_multipliers: vec![vec![1; n]; n],
        }
    }

    #[test]
    fn accepts_a_valid_document() {
        let config: GameConfig = raw(7).try_into().unwrap();
        assert_eq!(config.bingo_premium(), 35);
        assert_eq!(config.rack_size(), 7);
        assert_eq!(config.letter_score(b'c'), 4);
        assert_eq!(config.letter_score(BLANK), 0);
        assert_eq!(config.letter_count(BLANK), 2);
        assert_eq!(config.dim().n, 7);
        assert_eq!(config.dim().center(), 3);
    }

    #[test]
    fn rejects_even_boards() {
        assert!(matches!(
            GameConfig::try_from(raw(8)),
            Err(GameError::LoadError(_))
        ));
    }

    #[test]
    fn rejects_ragged_and_mismatched_grids() {
        let mut config = raw(7);
        config.letter_multipliers[3].pop();
        assert!(GameConfig::try_from(config).is_err());

        let mut config = raw(7);
        config.letter_multipliers = vec![vec![1; 9]; 9];
        assert!(GameConfig::try_from(config).is_err());
    }

    #[test]
    fn rejects_bad_letter_keys() {
        let mut config = raw(7);
        config.letter_scores.insert("ab".to_string(), 1);
        assert!(GameConfig::try_from(config).is_err());

        let mut config = raw(7);
        // blanks may be counted but have no score entry.
        config.letter_scores.insert("*".to_string(), 1);
        assert!(GameConfig::try_from(config).is_err());
    }

    #[test]
    fn parses_json() {
        let data = r#"{
            "bingo_premium": 50,
            "rack_size": 7,
            "letter_scores": {"a": 1},
            "letter_counts": {"a": 9, "*": 2},
            "letter_multipliers": [[1]],
            "word_multipliers": [[1]]
        }"#;
        let config: Configuration = serde_json::from_str(data).unwrap();
        let config: GameConfig = config.try_into().unwrap();
        assert_eq!(config.bingo_premium(), 50);
    }

    #[test]
    fn english_config_is_standard() {
        let config = make_english_game_config();
        assert_eq!(config.dim().n, 15);
        assert_eq!(config.letter_score(b'q'), 10);
        assert_eq!(config.letter_count(b'e'), 12);
        // center is a double word square, corners are triple words.
        assert_eq!(config.word_multiplier_at(7, 7), 2);
        assert_eq!(config.word_multiplier_at(0, 0), 3);
        assert_eq!(config.letter_multiplier_at(0, 3), 2);
        assert_eq!(config.letter_multiplier_at(1, 5), 3);
        let total: u16 = (b'a'..=b'z')
            .chain([BLANK])
            .map(|letter| config.letter_count(letter) as u16)
            .sum();
        assert_eq!(total, 100);
    }
}
