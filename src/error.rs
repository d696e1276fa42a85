// Copyright (C) 2020-2024 Andy Kurnia.

use thiserror::Error;

/// Error kinds surfaced by the engine.
///
/// `EmptyBag` is benign (the rack filler stops early); `InvariantViolation`
/// always indicates a bug in the caller or the engine itself, never bad user
/// input.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid word: {0}")]
    InvalidWord(String),
    #[error("bag is empty")]
    EmptyBag,
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    #[error("load error: {0}")]
    LoadError(String),
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::LoadError(err.to_string())
    }
}

pub type Returns<T> = Result<T, GameError>;

#[macro_export]
macro_rules! invariant_violation {
    ($($arg:tt)*) => {
        return Err($crate::error::GameError::InvariantViolation(format!($($arg)*)))
    };
}
