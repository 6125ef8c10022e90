//! Error types for engine operations.

use alloc::string::String;

use thiserror::Error;

/// Errors that can occur when parsing a card from short-hand notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The input was empty.
    #[error("card string is empty")]
    Empty,
    /// The input was not two or three characters long.
    #[error("card string must be 2 or 3 characters, got {0}")]
    InvalidLength(usize),
    /// The rank token was not recognized.
    #[error("unknown rank `{0}`")]
    UnknownRank(String),
    /// The suit token was not recognized.
    #[error("unknown suit `{0}`")]
    UnknownSuit(char),
}

/// Errors that can occur when drawing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    /// No cards left to draw.
    #[error("no cards left to draw")]
    Empty,
}

/// Errors that can occur when constructing a shoe.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShoeError {
    /// The shoe must hold at least one deck.
    #[error("a shoe needs at least one deck, got {0}")]
    InvalidDecks(u8),
    /// Penetration must lie in `(0, 1]`.
    #[error("penetration must be in (0, 1], got {0}")]
    InvalidPenetration(f64),
}
