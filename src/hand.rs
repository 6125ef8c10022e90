//! Hand evaluation and round outcomes.

use alloc::vec::Vec;

use crate::card::Card;
use crate::rules::{RuleSet, round_amount};

/// Returns `(best value, hard total)` for a sequence of cards.
///
/// Every ace starts at 11 and is demoted to 1 while the total exceeds 21.
/// Totals beyond `u8::MAX` saturate, which still reads as bust.
fn evaluate_cards(cards: &[Card]) -> (u8, u8) {
    let mut value: u32 = 0;
    let mut aces: u32 = 0;

    for card in cards {
        if card.is_ace() {
            aces = aces.saturating_add(1);
        }
        value = value.saturating_add(u32::from(card.value()));
    }

    let hard = value.saturating_sub(aces.saturating_mul(10));

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let clamp = |total: u32| u8::try_from(total).unwrap_or(u8::MAX);
    (clamp(value), clamp(hard))
}

/// Result of a hand compared against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Player wins.
    Win,
    /// Player loses.
    Lose,
    /// Push (tie).
    Push,
}

impl Outcome {
    /// Returns `+1` for a win, `-1` for a loss and `0` for a push.
    #[must_use]
    pub const fn signum(self) -> i8 {
        match self {
            Self::Win => 1,
            Self::Lose => -1,
            Self::Push => 0,
        }
    }
}

/// A blackjack hand, used for both player and dealer.
///
/// Value and classification are recomputed from the cards on every query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Bet amount for this hand.
    bet: usize,
    /// Whether the hand has been doubled.
    doubled: bool,
    /// Whether this hand is from a split.
    from_split: bool,
    /// Whether the hand has been surrendered.
    surrendered: bool,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            bet,
            doubled: false,
            from_split: false,
            surrendered: false,
        }
    }

    /// Creates a hand holding the given cards with no bet.
    ///
    /// ```
    /// use bjcount::{Card, Hand};
    ///
    /// let cards = ["A♠", "K♥"].map(|s| s.parse::<Card>().unwrap());
    /// let hand = Hand::from_cards(&cards);
    /// assert!(hand.is_blackjack());
    /// ```
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
            ..Self::new(0)
        }
    }

    /// Creates a new hand from a split with a single card.
    #[must_use]
    pub fn from_split(card: Card, bet: usize) -> Self {
        Self {
            cards: alloc::vec![card],
            from_split: true,
            ..Self::new(bet)
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the first card, which is the dealer's up card.
    #[must_use]
    pub fn up_card(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Doubles the bet and marks the hand as doubled.
    pub const fn double_down(&mut self) {
        self.bet *= 2;
        self.doubled = true;
    }

    /// Returns whether the hand has been doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Returns whether this hand is from a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Marks the hand as surrendered.
    pub const fn surrender(&mut self) {
        self.surrendered = true;
    }

    /// Returns whether the hand has been surrendered.
    #[must_use]
    pub const fn is_surrendered(&self) -> bool {
        self.surrendered
    }

    /// Calculates the value of the hand.
    ///
    /// Aces are counted as 11 if possible without busting, otherwise as 1.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Returns the total with every ace counted as 1.
    #[must_use]
    pub fn hard_total(&self) -> u8 {
        evaluate_cards(&self.cards).1
    }

    /// Returns whether the hand is soft (an ace can count as 11 without
    /// busting).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.cards.iter().any(Card::is_ace) && self.hard_total() <= 11
    }

    /// Returns whether the hand is a natural: two cards totalling 21 that
    /// did not come from a split.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21 && !self.from_split
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Returns whether the hand is two cards of equal rank.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Returns the point value of the paired card, if the hand is a pair.
    #[must_use]
    pub fn pair_value(&self) -> Option<u8> {
        self.is_pair().then(|| self.cards[0].value())
    }

    /// Returns whether the hand may be doubled under `rules`.
    #[must_use]
    pub fn can_double(&self, rules: &RuleSet) -> bool {
        self.cards.len() == 2
            && !self.doubled
            && !self.surrendered
            && (!self.from_split || rules.double_after_split)
    }

    /// Returns whether the hand may be split under `rules`, given how many
    /// splits the starting hand has already used.
    #[must_use]
    pub fn can_split(&self, rules: &RuleSet, splits_so_far: u8) -> bool {
        if !self.is_pair() || splits_so_far >= rules.max_splits {
            return false;
        }
        !(self.from_split && self.cards[0].is_ace() && !rules.resplit_aces)
    }

    /// Returns whether a dealer holding this hand must draw.
    #[must_use]
    pub fn dealer_should_hit(&self, rules: &RuleSet) -> bool {
        let value = self.value();
        value < 17 || (value == 17 && self.is_soft() && rules.dealer_hits_soft_17)
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new round, keeping the bet.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.doubled = false;
        self.from_split = false;
        self.surrendered = false;
    }
}

/// Compares a finished player hand against the dealer.
///
/// Checks run in a fixed order: surrender, player bust, dealer bust,
/// blackjacks, then totals. A player bust loses even if the dealer busts.
///
/// ```
/// use bjcount::{Card, Hand, Outcome, evaluate};
///
/// let hand = |cards: [&str; 2]| Hand::from_cards(&cards.map(|s| s.parse::<Card>().unwrap()));
/// assert_eq!(evaluate(&hand(["10S", "9H"]), &hand(["10C", "8D"])), Outcome::Win);
/// ```
#[must_use]
pub fn evaluate(player: &Hand, dealer: &Hand) -> Outcome {
    if player.is_surrendered() || player.is_bust() {
        return Outcome::Lose;
    }
    if dealer.is_bust() {
        return Outcome::Win;
    }

    match (player.is_blackjack(), dealer.is_blackjack()) {
        (true, true) => Outcome::Push,
        (true, false) => Outcome::Win,
        (false, true) => Outcome::Lose,
        (false, false) => match player.value().cmp(&dealer.value()) {
            core::cmp::Ordering::Greater => Outcome::Win,
            core::cmp::Ordering::Less => Outcome::Lose,
            core::cmp::Ordering::Equal => Outcome::Push,
        },
    }
}

/// Returns the player's net result for the hand in bet units.
///
/// Wins pay even money, a winning natural pays the table's blackjack ratio,
/// and a surrender loses half the bet. Fractional amounts are rounded with
/// the rule set's rounding modes.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    reason = "bet amounts fit comfortably in f64 and isize"
)]
pub fn settle(player: &Hand, dealer: &Hand, rules: &RuleSet) -> isize {
    let bet = player.bet();

    if player.is_surrendered() {
        let lost = round_amount(bet as f64 * 0.5, rules.rounding_surrender);
        return -(lost as isize);
    }

    match evaluate(player, dealer) {
        Outcome::Win if player.is_blackjack() => {
            let won = bet as f64 * rules.blackjack_pays.multiplier();
            round_amount(won, rules.rounding_blackjack) as isize
        }
        Outcome::Win => bet as isize,
        Outcome::Lose => -(bet as isize),
        Outcome::Push => 0,
    }
}
