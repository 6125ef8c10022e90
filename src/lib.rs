//! A blackjack rules engine with optional `no_std` support.
//!
//! The crate models cards, decks and multi-deck shoes, evaluates hands,
//! tracks running and true counts under several counting systems, and
//! derives basic strategy plus count-based index plays for a given
//! [`RuleSet`].
//!
//! # Example
//!
//! ```
//! use bjcount::{
//!     Allowed, BasicStrategy, Counter, CountingSystem, RuleSet, Shoe, Situation, recommend,
//! };
//!
//! let rules = RuleSet::default();
//! let strategy = BasicStrategy::new(rules);
//! let mut shoe = Shoe::new(rules.decks, 0.75, 42).unwrap();
//! let mut counter = Counter::from_name("hilo");
//! counter.reset_for_shoe(rules.decks);
//!
//! for card in shoe.draw_many(10).unwrap() {
//!     counter.count_card(card);
//! }
//! let true_count = counter.true_count(shoe.decks_remaining());
//!
//! let action = recommend(&strategy, &Situation::hard(16, 10), Allowed::ALL, true_count, true);
//! let _ = action;
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod count;
pub mod deck;
pub mod deviation;
pub mod error;
pub mod hand;
pub mod rules;
pub mod strategy;
mod sync;
mod trace;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use count::{
    COUNT_EPSILON, Counter, CountingSystem, HiLo, Ko, OmegaII, SystemKind, Tally, WongHalves,
    count_matches, round_count,
};
pub use deck::{Deck, Shoe};
pub use deviation::{
    Direction, FAB_4, ILLUSTRIOUS_18, IndexPlay, find_deviation, find_index_play, recommend,
    should_take_insurance,
};
pub use error::{DrawError, ParseCardError, ShoeError};
pub use hand::{Hand, Outcome, evaluate, settle};
pub use rules::{Payout, RoundingMode, RuleSet, Surrender};
pub use strategy::{
    Action, Allowed, BasicStrategy, DEALER_UPCARDS, Situation, StrategyCache, StrategyTable,
};
