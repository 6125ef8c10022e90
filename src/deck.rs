//! Single decks and multi-deck shoes.

use alloc::vec::Vec;
use core::slice;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::{DrawError, ShoeError};
use crate::trace::trace_event;

/// Pushes one 52-card deck in canonical suit-major, rank-minor order.
fn push_deck(cards: &mut Vec<Card>) {
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(rank, suit));
        }
    }
}

/// A single 52-card deck.
///
/// Cards are drawn from the end of the sequence. A fresh deck is in
/// canonical order; call [`Deck::shuffle`] to permute it.
#[derive(Debug, Clone)]
pub struct Deck<R = ChaCha8Rng> {
    cards: Vec<Card>,
    rng: R,
}

impl Deck<ChaCha8Rng> {
    /// Creates a deck whose shuffles are driven by a ChaCha8 generator
    /// seeded with `seed`.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::Deck;
    ///
    /// let mut deck = Deck::new(7);
    /// deck.shuffle();
    /// assert_eq!(deck.len(), 52);
    /// ```
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Deck<R> {
    /// Creates a deck in canonical order using the given random source.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(DECK_SIZE),
            rng,
        };
        deck.reset();
        deck
    }

    /// Repopulates all 52 cards in canonical order.
    pub fn reset(&mut self) {
        self.cards.clear();
        push_deck(&mut self.cards);
    }

    /// Permutes the cards currently in the deck.
    ///
    /// Unlike [`Shoe::shuffle`], this does not restore drawn cards.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the last card.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Empty`] if no cards remain. The deck is left
    /// untouched in that case.
    pub fn draw(&mut self) -> Result<Card, DrawError> {
        self.cards.pop().ok_or(DrawError::Empty)
    }

    /// Returns the number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the remaining cards; the last element is drawn next.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterates over the remaining cards.
    pub fn iter(&self) -> slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

impl<'a, R> IntoIterator for &'a Deck<R> {
    type Item = &'a Card;
    type IntoIter = slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// A multi-deck shoe with a cut card.
///
/// The cut card sits `penetration` of the way into the shoe. Once that many
/// cards have been dealt, [`Shoe::needs_shuffle`] reports `true`.
#[derive(Debug, Clone)]
pub struct Shoe<R = ChaCha8Rng> {
    cards: Vec<Card>,
    num_decks: u8,
    penetration: f64,
    cut_card: usize,
    rng: R,
}

impl Shoe<ChaCha8Rng> {
    /// Creates a shuffled shoe driven by a ChaCha8 generator seeded with
    /// `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::InvalidDecks`] if `num_decks` is zero and
    /// [`ShoeError::InvalidPenetration`] if `penetration` is not in `(0, 1]`.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::Shoe;
    ///
    /// let mut shoe = Shoe::new(6, 0.75, 42).unwrap();
    /// assert_eq!(shoe.cards_remaining(), 312);
    /// assert_eq!(shoe.cut_card(), 234);
    /// shoe.draw().unwrap();
    /// assert!(!shoe.needs_shuffle());
    /// ```
    pub fn new(num_decks: u8, penetration: f64, seed: u64) -> Result<Self, ShoeError> {
        Self::with_rng(num_decks, penetration, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Shoe<R> {
    /// Creates a shuffled shoe using the given random source.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::InvalidDecks`] if `num_decks` is zero and
    /// [`ShoeError::InvalidPenetration`] if `penetration` is not in `(0, 1]`.
    pub fn with_rng(num_decks: u8, penetration: f64, rng: R) -> Result<Self, ShoeError> {
        if num_decks < 1 {
            return Err(ShoeError::InvalidDecks(num_decks));
        }
        if penetration.is_nan() || penetration <= 0.0 || penetration > 1.0 {
            return Err(ShoeError::InvalidPenetration(penetration));
        }

        let mut shoe = Self {
            cards: Vec::with_capacity(usize::from(num_decks) * DECK_SIZE),
            num_decks,
            penetration,
            cut_card: 0,
            rng,
        };
        shoe.shuffle();
        Ok(shoe)
    }

    /// Rebuilds the full multi-deck composition, then shuffles it and places
    /// the cut card.
    pub fn shuffle(&mut self) {
        self.cards.clear();
        for _ in 0..self.num_decks {
            push_deck(&mut self.cards);
        }
        self.cards.shuffle(&mut self.rng);

        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let cut = (self.total_cards() as f64 * self.penetration) as usize;
        self.cut_card = cut;

        trace_event!(
            decks = self.num_decks,
            cut_card = self.cut_card,
            "shoe reshuffled"
        );
    }

    /// Removes and returns the last card.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Empty`] if the shoe is exhausted. The shoe is
    /// left untouched in that case.
    pub fn draw(&mut self) -> Result<Card, DrawError> {
        self.cards.pop().ok_or(DrawError::Empty)
    }

    /// Draws `count` cards in deal order.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Empty`] without removing anything if fewer than
    /// `count` cards remain.
    pub fn draw_many(&mut self, count: usize) -> Result<Vec<Card>, DrawError> {
        if count > self.cards.len() {
            return Err(DrawError::Empty);
        }
        let mut drawn = self.cards.split_off(self.cards.len() - count);
        drawn.reverse();
        Ok(drawn)
    }

    /// Returns whether the cut card has been reached.
    #[must_use]
    pub fn needs_shuffle(&self) -> bool {
        self.cards_dealt() >= self.cut_card
    }

    /// Returns the number of decks in the shoe.
    #[must_use]
    pub const fn num_decks(&self) -> u8 {
        self.num_decks
    }

    /// Returns the configured penetration.
    #[must_use]
    pub const fn penetration(&self) -> f64 {
        self.penetration
    }

    /// Returns the cut-card position, counted in cards dealt.
    #[must_use]
    pub const fn cut_card(&self) -> usize {
        self.cut_card
    }

    /// Returns the number of cards in a full shoe.
    #[must_use]
    pub const fn total_cards(&self) -> usize {
        self.num_decks as usize * DECK_SIZE
    }

    /// Returns the number of cards left in the shoe.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns the number of cards dealt since the last shuffle.
    #[must_use]
    pub fn cards_dealt(&self) -> usize {
        self.total_cards() - self.cards.len()
    }

    /// Returns the remaining cards as a fractional number of decks.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    pub fn decks_remaining(&self) -> f64 {
        self.cards.len() as f64 / DECK_SIZE as f64
    }

    /// Returns whether the shoe is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the remaining cards; the last element is drawn next.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterates over the remaining cards.
    pub fn iter(&self) -> slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

impl<'a, R> IntoIterator for &'a Shoe<R> {
    type Item = &'a Card;
    type IntoIter = slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
