//! Card types and short-hand card notation.

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

use crate::error::ParseCardError;

/// Card suit. Suits have no effect on play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All suits in canonical deck order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];

    /// Returns the suit glyph used when displaying a card.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
            Self::Spades => '♠',
        }
    }

    /// Returns the single-letter code of the suit.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Hearts => 'H',
            Self::Diamonds => 'D',
            Self::Clubs => 'C',
            Self::Spades => 'S',
        }
    }

    fn from_token(token: char) -> Option<Self> {
        match token.to_ascii_uppercase() {
            'H' | '♥' | '♡' => Some(Self::Hearts),
            'D' | '♦' | '♢' => Some(Self::Diamonds),
            'C' | '♣' | '♧' => Some(Self::Clubs),
            'S' | '♠' | '♤' => Some(Self::Spades),
            _ => None,
        }
    }
}

/// Card rank.
///
/// The derived ordering (two low, ace high) is only meant for display and
/// sorting; blackjack play uses [`Rank::value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
    /// Ace.
    Ace,
}

impl Rank {
    /// All ranks in canonical deck order.
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Returns the blackjack point value (aces count 11, faces 10).
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
            Self::Ace => 11,
        }
    }

    /// Returns the display symbol of the rank.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        let rank = match token {
            "2" => Self::Two,
            "3" => Self::Three,
            "4" => Self::Four,
            "5" => Self::Five,
            "6" => Self::Six,
            "7" => Self::Seven,
            "8" => Self::Eight,
            "9" => Self::Nine,
            "10" | "T" | "t" => Self::Ten,
            "J" | "j" => Self::Jack,
            "Q" | "q" => Self::Queen,
            "K" | "k" => Self::King,
            "A" | "a" => Self::Ace,
            _ => return None,
        };
        Some(rank)
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// The rank of the card.
    pub rank: Rank,
    /// The suit of the card.
    pub suit: Suit,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Parses a card from short-hand notation such as `"AS"`, `"10H"`,
    /// `"TD"` or `"K♦"`. Rank and suit tokens are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ParseCardError`] if the string is not two or three
    /// characters long or the rank or suit token is not recognized.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::{Card, Rank, Suit};
    ///
    /// let card = Card::from_string("10h").unwrap();
    /// assert_eq!(card, Card::new(Rank::Ten, Suit::Hearts));
    /// assert_eq!(Card::from_string("T♥"), Ok(card));
    /// ```
    pub fn from_string(s: &str) -> Result<Self, ParseCardError> {
        // Emoji presentation selectors ("♥️") are not part of the suit.
        let s = s.trim().trim_end_matches('\u{fe0f}');
        let len = s.chars().count();
        if len == 0 {
            return Err(ParseCardError::Empty);
        }
        if !(2..=3).contains(&len) {
            return Err(ParseCardError::InvalidLength(len));
        }

        let Some((split, suit_token)) = s.char_indices().last() else {
            return Err(ParseCardError::Empty);
        };
        let rank_token = &s[..split];

        let rank = Rank::from_token(rank_token)
            .ok_or_else(|| ParseCardError::UnknownRank(rank_token.to_string()))?;
        let suit = Suit::from_token(suit_token).ok_or(ParseCardError::UnknownSuit(suit_token))?;

        Ok(Self::new(rank, suit))
    }

    /// Returns the blackjack point value of the card.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.rank.value()
    }

    /// Returns whether the card is an ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        matches!(self.rank, Rank::Ace)
    }

    /// Returns whether the card counts as ten (ten or a face card).
    #[must_use]
    pub const fn is_ten_value(&self) -> bool {
        self.rank.value() == 10
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl TryFrom<&str> for Card {
    type Error = ParseCardError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_string(s)
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
